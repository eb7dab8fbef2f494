use yew::prelude::*;
use yew_hooks::use_title;

use crate::components::hero::Hero;
use crate::components::scroll_progress::Reveal;
use crate::data::CASE_STUDIES;
use crate::integrations::image_cdn::CdnImage;

#[function_component(Work)]
pub fn work() -> Html {
    use_title("Work | Arclight Studio".to_string());

    html! {
        <main class="page page--work">
            <Hero
                eyebrow="Work"
                title="Projects we are proud of"
                subtitle="A few recent engagements and what changed for the people using them."
            />
            { for CASE_STUDIES.iter().map(|study| html! {
                <Reveal class="case-study">
                    <CdnImage src={study.image} alt={study.client} width={1280} class="case-study__image" />
                    <div class="case-study__body">
                        <span class="case-study__client">{ study.client }</span>
                        <h2>{ study.title }</h2>
                        <p>{ study.summary }</p>
                        <ul class="tag-list">
                            { for study.tags.iter().map(|tag| html! { <li>{ *tag }</li> }) }
                        </ul>
                    </div>
                </Reveal>
            }) }
        </main>
    }
}
