use yew::prelude::*;
use yew_hooks::use_title;

use crate::components::hero::Hero;
use crate::components::scroll_progress::Reveal;
use crate::components::service_card::ServiceCard;
use crate::data::SERVICES;
use crate::Route;

#[function_component(Services)]
pub fn services() -> Html {
    use_title("Services | Arclight Studio".to_string());

    html! {
        <main class="page page--services">
            <Hero
                eyebrow="Services"
                title="From first sketch to the hundredth release"
                subtitle="Pick one discipline or bring us in for the whole journey."
                cta={Some((AttrValue::from("Talk to us"), Route::Contact))}
            />
            { for SERVICES.iter().map(|service| html! {
                <Reveal class="section">
                    <ServiceCard service={service} detailed={true} />
                </Reveal>
            }) }
        </main>
    }
}
