use serde::Serialize;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::boundary::{use_fault_reporter, FaultInfo};
use crate::data::CONTACT_EMAIL;
use crate::submission::{submit, SubmitOutcome};
use crate::validation::is_valid_email;
use crate::Route;

#[derive(Serialize)]
struct NewsletterSignup {
    email: String,
}

#[derive(Clone, PartialEq)]
enum SignupStatus {
    Idle,
    Sending,
    Done,
    Error(String),
}

#[function_component(NewsletterForm)]
fn newsletter_form() -> Html {
    let email = use_state(String::new);
    let status = use_state(|| SignupStatus::Idle);
    let faults = use_fault_reporter();

    let oninput = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let onsubmit = {
        let email = email.clone();
        let status = status.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !is_valid_email(&email) {
                status.set(SignupStatus::Error("Please enter a valid email address".to_string()));
                return;
            }
            status.set(SignupStatus::Sending);
            let signup = NewsletterSignup { email: email.trim().to_string() };
            let status = status.clone();
            let faults = faults.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match submit("/api/newsletter", &signup).await {
                    Ok(SubmitOutcome::Sent) => status.set(SignupStatus::Done),
                    Ok(outcome) => status.set(SignupStatus::Error(outcome.message().unwrap_or_default())),
                    Err(reason) => {
                        status.set(SignupStatus::Idle);
                        faults.report(FaultInfo::new("NewsletterForm", reason));
                    }
                }
            });
        })
    };

    if *status == SignupStatus::Done {
        return html! { <p class="newsletter__done">{"Thanks, you're on the list."}</p> };
    }

    html! {
        <form class="newsletter" onsubmit={onsubmit}>
            <label for="newsletter-email">{"Occasional notes on building for the web"}</label>
            <div class="newsletter__row">
                <input
                    id="newsletter-email"
                    type="email"
                    placeholder="you@company.com"
                    value={(*email).clone()}
                    oninput={oninput}
                />
                <button type="submit" class="button button--primary" disabled={*status == SignupStatus::Sending}>
                    {"Subscribe"}
                </button>
            </div>
            if let SignupStatus::Error(message) = &*status {
                <p class="form-error">{ message.clone() }</p>
            }
        </form>
    }
}

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <div class="site-footer__grid">
                <div>
                    <span class="site-footer__brand">{"arclight"}</span>
                    <p>{"A small studio for web, mobile and product strategy."}</p>
                    <a href={format!("mailto:{}", CONTACT_EMAIL)}>{ CONTACT_EMAIL }</a>
                </div>
                <nav class="site-footer__links">
                    <Link<Route> to={Route::About}>{"About"}</Link<Route>>
                    <Link<Route> to={Route::Services}>{"Services"}</Link<Route>>
                    <Link<Route> to={Route::Work}>{"Work"}</Link<Route>>
                    <Link<Route> to={Route::Contact}>{"Contact"}</Link<Route>>
                </nav>
                <NewsletterForm />
            </div>
            <p class="site-footer__legal">{ format!("© {} Arclight Studio", chrono::Utc::now().format("%Y")) }</p>
        </footer>
    }
}
