//! Deterministic stand-in for `gloo_timers::callback::Timeout` in native tests.
//! Dropping a handle cancels its callback, like `Timeout` does.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Pending = Vec<(u32, u64, Box<dyn FnOnce()>)>;

#[derive(Clone, Default)]
pub struct ManualTimers {
    pending: Rc<RefCell<Pending>>,
    now: Rc<Cell<u32>>,
    next_id: Rc<Cell<u64>>,
}

pub struct ManualTimer {
    id: u64,
    pending: Rc<RefCell<Pending>>,
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.pending.borrow_mut().retain(|(_, id, _)| *id != self.id);
    }
}

impl ManualTimers {
    pub fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> ManualTimer {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.pending
            .borrow_mut()
            .push((self.now.get() + delay_ms, id, callback));
        ManualTimer {
            id,
            pending: self.pending.clone(),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Fires every due callback in order of due time, up to and including `ms`.
    pub fn advance_to(&self, ms: u32) {
        loop {
            let next = {
                let mut pending = self.pending.borrow_mut();
                let earliest = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, (due, _, _))| *due <= ms)
                    .min_by_key(|(_, (due, id, _))| (*due, *id))
                    .map(|(index, _)| index);
                earliest.map(|index| pending.remove(index))
            };
            match next {
                Some((due, _, callback)) => {
                    self.now.set(due);
                    callback();
                }
                None => break,
            }
        }
        self.now.set(ms);
    }
}
