use yew::prelude::*;
use yew_hooks::use_title;

use crate::components::hero::Hero;
use crate::components::scroll_progress::Reveal;
use crate::data::PRINCIPLES;

#[function_component(About)]
pub fn about() -> Html {
    use_title("About | Arclight Studio".to_string());

    html! {
        <main class="page page--about">
            <Hero
                eyebrow="About"
                title="A studio small enough to care"
                subtitle="We partner with a handful of teams each year and stay with them past launch."
            />
            <Reveal class="section">
                <h2>{"How we work"}</h2>
                <div class="card-grid">
                    { for PRINCIPLES.iter().map(|principle| html! {
                        <article class="principle">
                            <h3>{ principle.title }</h3>
                            <p>{ principle.body }</p>
                        </article>
                    }) }
                </div>
            </Reveal>
        </main>
    }
}
