use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::effects::media::{use_media_query, REDUCED_MOTION};

pub const DEFAULT_REVEAL_DELAY_MS: u32 = 100;

/// Loading is the initial phase and Content is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Loading,
    Content,
}

impl TransitionPhase {
    pub fn advance(self) -> Self {
        TransitionPhase::Content
    }

    pub fn is_content(self) -> bool {
        self == TransitionPhase::Content
    }
}

/// Holds the reveal timer of one mount. The timer is started at most once
/// however often the owner re-renders, and dropping the gate cancels it.
pub struct RevealGate<H = Timeout> {
    timer: Option<H>,
    armed: bool,
}

impl<H> Default for RevealGate<H> {
    fn default() -> Self {
        RevealGate { timer: None, armed: false }
    }
}

impl<H> RevealGate<H> {
    /// Starts the timer on the first call; later calls do nothing and return false.
    pub fn arm_once(&mut self, start: impl FnOnce() -> H) -> bool {
        if self.armed {
            return false;
        }
        self.armed = true;
        self.timer = Some(start());
        true
    }
}

/// Loading for `delay_ms` after mount, then Content for the rest of the mount.
#[hook]
pub fn use_mount_transition(delay_ms: u32) -> TransitionPhase {
    let phase = use_state_eq(TransitionPhase::default);
    // dropped with the component, which cancels a pending reveal
    let gate = use_mut_ref(RevealGate::<Timeout>::default);

    {
        let phase = phase.clone();
        use_effect(move || {
            gate.borrow_mut().arm_once(|| {
                Timeout::new(delay_ms, move || {
                    tracing::debug!("initial loading phase finished");
                    phase.set((*phase).advance());
                })
            });
            || ()
        });
    }

    *phase
}

#[derive(Properties, PartialEq)]
pub struct PageTransitionProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or(DEFAULT_REVEAL_DELAY_MS)]
    pub delay_ms: u32,
}

#[function_component(BrandedLoader)]
pub fn branded_loader() -> Html {
    html! {
        <div class="page-loader" aria-busy="true" aria-label="Loading">
            <span class="page-loader__mark">{"arclight"}</span>
            <span class="page-loader__pulse"></span>
        </div>
    }
}

/// Holds the branded loader over the first paint, then fades the content in.
#[function_component(PageTransition)]
pub fn page_transition(props: &PageTransitionProps) -> Html {
    let phase = use_mount_transition(props.delay_ms);
    let reduced_motion = use_media_query(REDUCED_MOTION);

    match phase {
        TransitionPhase::Loading => html! { <BrandedLoader /> },
        TransitionPhase::Content => html! {
            <div class={classes!("page-content", (!reduced_motion).then_some("page-content--enter"))}>
                { for props.children.iter() }
            </div>
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_loading() {
        assert_eq!(TransitionPhase::default(), TransitionPhase::Loading);
        assert!(!TransitionPhase::default().is_content());
    }

    #[test]
    fn transition_is_one_way() {
        let phase = TransitionPhase::Loading.advance();
        assert_eq!(phase, TransitionPhase::Content);
        assert_eq!(phase.advance(), TransitionPhase::Content);
        assert_eq!(phase.advance().advance(), TransitionPhase::Content);
    }

    mod timed {
        use super::*;
        use crate::sequencing::test_timers::{ManualTimer, ManualTimers};
        use std::cell::RefCell;
        use std::rc::Rc;

        /// Records phase changes the way `use_state_eq` publishes them.
        fn render_and_arm(
            gate: &mut RevealGate<ManualTimer>,
            clock: &ManualTimers,
            published: &Rc<RefCell<Vec<TransitionPhase>>>,
        ) {
            let published = published.clone();
            gate.arm_once(|| {
                clock.schedule(
                    DEFAULT_REVEAL_DELAY_MS,
                    Box::new(move || {
                        let mut published = published.borrow_mut();
                        let current = published.last().copied().unwrap_or_default();
                        let next = current.advance();
                        if next != current {
                            published.push(next);
                        }
                    }),
                )
            });
        }

        #[test]
        fn re_renders_never_restart_the_reveal() {
            let clock = ManualTimers::default();
            let published = Rc::new(RefCell::new(Vec::new()));
            let mut gate = RevealGate::default();

            for _ in 0..10 {
                render_and_arm(&mut gate, &clock, &published);
            }
            assert_eq!(clock.pending(), 1);

            clock.advance_to(50);
            for _ in 0..10 {
                render_and_arm(&mut gate, &clock, &published);
            }
            clock.advance_to(10_000);

            assert_eq!(*published.borrow(), vec![TransitionPhase::Content]);
        }

        #[test]
        fn navigations_after_the_reveal_stay_on_content() {
            let clock = ManualTimers::default();
            let published = Rc::new(RefCell::new(Vec::new()));
            let mut gate = RevealGate::default();
            render_and_arm(&mut gate, &clock, &published);
            clock.advance_to(DEFAULT_REVEAL_DELAY_MS);
            assert_eq!(*published.borrow(), vec![TransitionPhase::Content]);

            // route changes re-render the same mounted transition
            for _ in 0..5 {
                render_and_arm(&mut gate, &clock, &published);
                clock.advance_to(10_000);
            }
            assert_eq!(clock.pending(), 0);
            assert_eq!(*published.borrow(), vec![TransitionPhase::Content]);
        }

        #[test]
        fn unmount_before_the_delay_cancels_the_reveal() {
            let clock = ManualTimers::default();
            let published = Rc::new(RefCell::new(Vec::new()));
            let mut gate = RevealGate::default();
            render_and_arm(&mut gate, &clock, &published);

            drop(gate);
            clock.advance_to(10_000);
            assert!(published.borrow().is_empty());
        }

        #[test]
        fn only_the_first_arm_starts_a_timer() {
            let mut gate: RevealGate<u8> = RevealGate::default();
            assert!(gate.arm_once(|| 1));
            assert!(!gate.arm_once(|| 2));
            assert_eq!(gate.timer, Some(1));
        }
    }
}
