use yew::prelude::*;
use yew_hooks::use_title;
use yew_router::prelude::*;

use crate::components::hero::Hero;
use crate::components::scroll_progress::Reveal;
use crate::components::service_card::ServiceCard;
use crate::data::{CASE_STUDIES, SERVICES};
use crate::integrations::image_cdn::CdnImage;
use crate::Route;

#[function_component(Home)]
pub fn home() -> Html {
    use_title("Arclight Studio | Web, mobile and digital strategy".to_string());

    html! {
        <main class="page page--home">
            <Hero
                eyebrow="Independent digital studio"
                title="We build the web products people come back to"
                subtitle="Design, engineering and strategy from one small senior team."
                cta={Some((AttrValue::from("Start a project"), Route::Contact))}
            />
            <Reveal class="section">
                <h2>{"What we do"}</h2>
                <div class="card-grid">
                    { for SERVICES.iter().map(|service| html! { <ServiceCard service={service} /> }) }
                </div>
            </Reveal>
            <Reveal class="section">
                <h2>{"Selected work"}</h2>
                if let Some(study) = CASE_STUDIES.first() {
                    <article class="case-teaser">
                        <CdnImage src={study.image} alt={study.client} width={960} />
                        <div>
                            <span class="case-teaser__client">{ study.client }</span>
                            <h3>{ study.title }</h3>
                            <Link<Route> to={Route::Work} classes="text-link">{"See all work"}</Link<Route>>
                        </div>
                    </article>
                }
            </Reveal>
        </main>
    }
}
