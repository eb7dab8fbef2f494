use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub eyebrow: AttrValue,
    pub title: AttrValue,
    pub subtitle: AttrValue,
    #[prop_or_default]
    pub cta: Option<(AttrValue, Route)>,
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    html! {
        <header class="hero">
            <span class="hero__eyebrow">{ props.eyebrow.clone() }</span>
            <h1 class="hero__title">{ props.title.clone() }</h1>
            <p class="hero__subtitle">{ props.subtitle.clone() }</p>
            {
                if let Some((label, to)) = &props.cta {
                    html! {
                        <Link<Route> to={to.clone()} classes="button button--primary hero__cta">
                            { label.clone() }
                        </Link<Route>>
                    }
                } else {
                    html! {}
                }
            }
        </header>
    }
}
