use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_hooks::use_title;

use crate::boundary::{use_fault_reporter, FaultInfo};
use crate::components::hero::Hero;
use crate::data::CONTACT_EMAIL;
use crate::submission::{submit, SubmitOutcome};
use crate::validation::{validate_contact, ContactForm};

#[derive(Clone, PartialEq)]
enum FormStatus {
    Editing,
    Sending,
    Sent,
}

enum Field {
    Name,
    Email,
    Company,
    Message,
}

fn apply(form: &ContactForm, field: Field, value: String) -> ContactForm {
    let mut next = form.clone();
    match field {
        Field::Name => next.name = value,
        Field::Email => next.email = value,
        Field::Company => next.company = Some(value),
        Field::Message => next.message = value,
    }
    next
}

#[function_component(Contact)]
pub fn contact() -> Html {
    use_title("Contact | Arclight Studio".to_string());

    let form = use_state(ContactForm::default);
    let status = use_state(|| FormStatus::Editing);
    let error = use_state(|| None::<String>);
    let faults = use_fault_reporter();

    let on_input = |field: fn() -> Field| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = e
                .target_dyn_into::<HtmlInputElement>()
                .map(|input| input.value())
                .or_else(|| e.target_dyn_into::<HtmlTextAreaElement>().map(|area| area.value()))
                .unwrap_or_default();
            form.set(apply(&form, field(), value));
        })
    };

    let onsubmit = {
        let form = form.clone();
        let status = status.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *status == FormStatus::Sending {
                return;
            }
            let enquiry = form.normalized();
            if let Err(reason) = validate_contact(&enquiry) {
                error.set(Some(reason.to_string()));
                return;
            }

            error.set(None);
            status.set(FormStatus::Sending);
            let status = status.clone();
            let error = error.clone();
            let faults = faults.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match submit("/api/contact", &enquiry).await {
                    Ok(SubmitOutcome::Sent) => {
                        log::info!("Contact enquiry sent");
                        status.set(FormStatus::Sent);
                    }
                    Ok(outcome) => {
                        error.set(outcome.message());
                        status.set(FormStatus::Editing);
                    }
                    Err(reason) => {
                        status.set(FormStatus::Editing);
                        faults.report(FaultInfo::new("ContactForm", reason));
                    }
                }
            });
        })
    };

    if *status == FormStatus::Sent {
        return html! {
            <main class="page page--contact">
                <section class="contact-sent">
                    <h1>{"Thanks for reaching out"}</h1>
                    <p>{"We reply to every enquiry within two working days."}</p>
                </section>
            </main>
        };
    }

    let sending = *status == FormStatus::Sending;

    html! {
        <main class="page page--contact">
            <Hero
                eyebrow="Contact"
                title="Tell us about your project"
                subtitle={format!("Use the form or write to {}.", CONTACT_EMAIL)}
            />
            <form class="contact-form" onsubmit={onsubmit} novalidate={true}>
                <label for="contact-name">{"Name"}</label>
                <input
                    id="contact-name"
                    type="text"
                    value={form.name.clone()}
                    oninput={on_input(|| Field::Name)}
                />
                <label for="contact-email">{"Email"}</label>
                <input
                    id="contact-email"
                    type="email"
                    value={form.email.clone()}
                    oninput={on_input(|| Field::Email)}
                />
                <label for="contact-company">{"Company (optional)"}</label>
                <input
                    id="contact-company"
                    type="text"
                    value={form.company.clone().unwrap_or_default()}
                    oninput={on_input(|| Field::Company)}
                />
                <label for="contact-message">{"Message"}</label>
                <textarea
                    id="contact-message"
                    rows="6"
                    value={form.message.clone()}
                    oninput={on_input(|| Field::Message)}
                />
                if let Some(message) = &*error {
                    <p class="form-error" role="alert">{ message.clone() }</p>
                }
                <button type="submit" class="button button--primary" disabled={sending}>
                    { if sending { "Sending..." } else { "Send message" } }
                </button>
            </form>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_touch_one_field() {
        let form = ContactForm::default();
        let form = apply(&form, Field::Name, "Ada".to_string());
        let form = apply(&form, Field::Company, "Analytical Engines".to_string());
        assert_eq!(form.name, "Ada");
        assert_eq!(form.company.as_deref(), Some("Analytical Engines"));
        assert!(form.email.is_empty());
        assert!(form.message.is_empty());
    }
}
