use yew::prelude::*;

use crate::effects::media::{use_media_query, REDUCED_MOTION};
use crate::effects::scroll::{use_scroll_fraction, ScrollFraction, ScrollTarget};

const REVEAL_SPAN: f64 = 0.25;
const REVEAL_OFFSET_PX: f64 = 40.0;

#[function_component(ScrollProgressBar)]
pub fn scroll_progress_bar() -> Html {
    let fraction = use_scroll_fraction(ScrollTarget::Document);

    // smoothing is a CSS transition on .scroll-progress__bar
    html! {
        <div class="scroll-progress" aria-hidden="true">
            <div
                class="scroll-progress__bar"
                style={format!("transform: scaleX({:.4})", fraction.get())}
            ></div>
        </div>
    }
}

/// Opacity and vertical offset (px) for an element `fraction` of the way
/// through the viewport. Fully revealed after the first quarter.
pub fn reveal_style(fraction: ScrollFraction, reduced_motion: bool) -> (f64, f64) {
    if reduced_motion {
        return (1.0, 0.0);
    }
    let opacity = (fraction.get() / REVEAL_SPAN).min(1.0);
    (opacity, (1.0 - opacity) * REVEAL_OFFSET_PX)
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let fraction = use_scroll_fraction(ScrollTarget::Element(node.clone()));
    let reduced_motion = use_media_query(REDUCED_MOTION);
    let (opacity, offset) = reveal_style(fraction, reduced_motion);

    html! {
        <div
            ref={node}
            class={classes!("reveal", props.class.clone())}
            style={format!("opacity: {:.3}; transform: translateY({:.1}px)", opacity, offset)}
        >
            { for props.children.iter() }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_below_the_fold() {
        assert_eq!(reveal_style(ScrollFraction::new(0.0), false), (0.0, 40.0));
    }

    #[test]
    fn fully_revealed_after_a_quarter() {
        assert_eq!(reveal_style(ScrollFraction::new(0.25), false), (1.0, 0.0));
        assert_eq!(reveal_style(ScrollFraction::new(0.9), false), (1.0, 0.0));
    }

    #[test]
    fn halfway_through_the_reveal() {
        let (opacity, offset) = reveal_style(ScrollFraction::new(0.125), false);
        assert!((opacity - 0.5).abs() < 1e-9);
        assert!((offset - 20.0).abs() < 1e-9);
    }

    #[test]
    fn reduced_motion_shows_everything() {
        assert_eq!(reveal_style(ScrollFraction::new(0.0), true), (1.0, 0.0));
    }
}
