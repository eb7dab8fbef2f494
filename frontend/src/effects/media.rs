use web_sys::{window, MediaQueryList};
use yew::prelude::*;

use crate::effects::listener::EventListenerGuard;

pub const COARSE_POINTER: &str = "(pointer: coarse)";
pub const REDUCED_MOTION: &str = "(prefers-reduced-motion: reduce)";

fn media_query_list(query: &str) -> Option<MediaQueryList> {
    window()?.match_media(query).ok().flatten()
}

/// Tracks a CSS media query. False when `matchMedia` is unavailable.
#[hook]
pub fn use_media_query(query: &'static str) -> bool {
    let matches = use_state_eq(|| media_query_list(query).map(|list| list.matches()).unwrap_or(false));

    {
        let matches = matches.clone();
        use_effect_with_deps(
            move |query: &&'static str| {
                let guard = media_query_list(query).and_then(|list| {
                    matches.set(list.matches());
                    let observed = list.clone();
                    EventListenerGuard::new(&list, "change", move |_| {
                        matches.set(observed.matches());
                    })
                });
                move || drop(guard)
            },
            query,
        );
    }

    *matches
}
