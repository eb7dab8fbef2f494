use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, MouseEvent};
use yew::prelude::*;

use crate::effects::listener::EventListenerGuard;
use crate::effects::media::{use_media_query, COARSE_POINTER};

/// Coalesces pointer moves so the cursor is repositioned at most once per frame.
#[derive(Debug, Default)]
pub struct PointerThrottle {
    pending: Option<(f64, f64)>,
    frame_requested: bool,
    frame_id: Option<i32>,
}

impl PointerThrottle {
    /// Stores the newest position. True when the caller has to request a frame.
    pub fn record(&mut self, x: f64, y: f64) -> bool {
        self.pending = Some((x, y));
        !std::mem::replace(&mut self.frame_requested, true)
    }

    pub fn frame_scheduled(&mut self, id: i32) {
        self.frame_id = Some(id);
    }

    /// The frame could not be requested; the next move tries again.
    pub fn frame_failed(&mut self) {
        self.frame_requested = false;
        self.frame_id = None;
    }

    /// Called from the frame callback.
    pub fn take(&mut self) -> Option<(f64, f64)> {
        self.frame_requested = false;
        self.frame_id = None;
        self.pending.take()
    }

    /// Forgets all state and hands back the frame that still has to be cancelled.
    pub fn cancel(&mut self) -> Option<i32> {
        self.pending = None;
        self.frame_requested = false;
        self.frame_id.take()
    }
}

fn request_frame(throttle: Rc<RefCell<PointerThrottle>>, position: UseStateHandle<Option<(f64, f64)>>) {
    let Some(window) = window() else {
        throttle.borrow_mut().frame_failed();
        return;
    };
    let on_frame = {
        let throttle = throttle.clone();
        Closure::once_into_js(move || {
            let next = throttle.borrow_mut().take();
            if let Some(next) = next {
                position.set(Some(next));
            }
        })
    };
    match window.request_animation_frame(on_frame.unchecked_ref()) {
        Ok(id) => throttle.borrow_mut().frame_scheduled(id),
        Err(_) => {
            log::warn!("requestAnimationFrame failed, retrying on the next pointer move");
            throttle.borrow_mut().frame_failed();
        }
    }
}

fn cancel_frame(throttle: &RefCell<PointerThrottle>) {
    if let Some(id) = throttle.borrow_mut().cancel() {
        if let Some(window) = window() {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

#[function_component(CustomCursor)]
pub fn custom_cursor() -> Html {
    let coarse = use_media_query(COARSE_POINTER);
    let position = use_state_eq(|| None::<(f64, f64)>);
    let throttle = use_mut_ref(PointerThrottle::default);

    {
        let position = position.clone();
        use_effect_with_deps(
            move |coarse: &bool| {
                let cleanup_throttle = throttle.clone();
                let guard = if *coarse {
                    None
                } else {
                    window().and_then(|window| {
                        EventListenerGuard::new(&window, "mousemove", move |event| {
                            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                                return;
                            };
                            let needs_frame = throttle
                                .borrow_mut()
                                .record(event.client_x() as f64, event.client_y() as f64);
                            if needs_frame {
                                request_frame(throttle.clone(), position.clone());
                            }
                        })
                    })
                };
                move || {
                    drop(guard);
                    cancel_frame(&cleanup_throttle);
                }
            },
            coarse,
        );
    }

    if coarse {
        return html! {};
    }

    match *position {
        Some((x, y)) => html! {
            <div
                class="custom-cursor"
                aria-hidden="true"
                style={format!("transform: translate3d({}px, {}px, 0)", x, y)}
            ></div>
        },
        None => html! {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_frame_per_burst_of_moves() {
        let mut throttle = PointerThrottle::default();
        assert!(throttle.record(1.0, 1.0));
        assert!(!throttle.record(2.0, 2.0));
        assert!(!throttle.record(3.0, 3.0));
        assert_eq!(throttle.take(), Some((3.0, 3.0)));
        assert!(throttle.record(4.0, 4.0));
    }

    #[test]
    fn failed_request_allows_a_retry() {
        let mut throttle = PointerThrottle::default();
        assert!(throttle.record(1.0, 1.0));
        throttle.frame_failed();
        assert!(throttle.record(2.0, 2.0));
    }

    #[test]
    fn cancel_returns_the_pending_frame_once() {
        let mut throttle = PointerThrottle::default();
        assert!(throttle.record(1.0, 1.0));
        throttle.frame_scheduled(7);
        assert_eq!(throttle.cancel(), Some(7));
        assert_eq!(throttle.cancel(), None);
        assert_eq!(throttle.take(), None);
        assert!(throttle.record(2.0, 2.0));
    }

    #[test]
    fn fired_frame_has_nothing_left_to_cancel() {
        let mut throttle = PointerThrottle::default();
        throttle.record(1.0, 1.0);
        throttle.frame_scheduled(3);
        assert_eq!(throttle.take(), Some((1.0, 1.0)));
        assert_eq!(throttle.cancel(), None);
    }

    #[test]
    fn nothing_to_take_without_moves() {
        let mut throttle = PointerThrottle::default();
        assert_eq!(throttle.take(), None);
    }
}
