use std::rc::Rc;

use web_sys::{window, Element};
use yew::prelude::*;

use crate::effects::listener::EventListenerGuard;

/// Scroll progress through a region, always within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollFraction(f64);

impl ScrollFraction {
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            ScrollFraction(value.clamp(0.0, 1.0))
        } else {
            ScrollFraction(0.0)
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// Whole-document progress. A document that fits the viewport reads as 0.
pub fn document_fraction(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable.is_nan() || scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable).clamp(0.0, 1.0)
}

/// Progress of an element across the viewport: 0 while its top is still below
/// the viewport, 1 once its bottom has left through the top.
pub fn element_fraction(rect_top: f64, rect_height: f64, viewport_height: f64) -> f64 {
    let travel = rect_height + viewport_height;
    if travel.is_nan() || travel <= 0.0 {
        return 0.0;
    }
    ((viewport_height - rect_top) / travel).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScrollTarget {
    Document,
    Element(NodeRef),
}

fn measure(target: &ScrollTarget) -> ScrollFraction {
    let Some(window) = window() else {
        return ScrollFraction::default();
    };

    let fraction = match target {
        ScrollTarget::Document => window
            .document()
            .and_then(|document| document.document_element())
            .map(|root| {
                document_fraction(
                    root.scroll_top() as f64,
                    root.scroll_height() as f64,
                    root.client_height() as f64,
                )
            }),
        ScrollTarget::Element(node) => node.cast::<Element>().map(|element| {
            let rect = element.get_bounding_client_rect();
            let viewport = window
                .inner_height()
                .ok()
                .and_then(|height| height.as_f64())
                .unwrap_or(0.0);
            element_fraction(rect.top(), rect.height(), viewport)
        }),
    };

    ScrollFraction::new(fraction.unwrap_or(0.0))
}

/// Republishes the scroll fraction of `target` on every scroll and resize.
#[hook]
pub fn use_scroll_fraction(target: ScrollTarget) -> ScrollFraction {
    let fraction = use_state_eq(ScrollFraction::default);

    {
        let fraction = fraction.clone();
        use_effect_with_deps(
            move |target: &ScrollTarget| {
                let target = target.clone();
                let listeners = window().map(|window| {
                    let publish: Rc<dyn Fn()> = Rc::new(move || fraction.set(measure(&target)));
                    publish();
                    let on_scroll = {
                        let publish = publish.clone();
                        EventListenerGuard::new(&window, "scroll", move |_| publish())
                    };
                    let on_resize = EventListenerGuard::new(&window, "resize", move |_| publish());
                    (on_scroll, on_resize)
                });
                tracing::trace!("scroll listeners attached: {}", listeners.is_some());
                move || drop(listeners)
            },
            target,
        );
    }

    *fraction
}
