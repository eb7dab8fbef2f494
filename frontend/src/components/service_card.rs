use yew::prelude::*;

use crate::data::Service;

#[derive(Properties, PartialEq)]
pub struct ServiceCardProps {
    pub service: &'static Service,
    #[prop_or(false)]
    pub detailed: bool,
}

#[function_component(ServiceCard)]
pub fn service_card(props: &ServiceCardProps) -> Html {
    let service = props.service;
    html! {
        <article class="service-card">
            <h3 class="service-card__title">{ service.title }</h3>
            <p class="service-card__summary">{ service.summary }</p>
            if props.detailed {
                <ul class="service-card__items">
                    { for service.deliverables.iter().map(|item| html! { <li>{ *item }</li> }) }
                </ul>
            }
        </article>
    }
}
