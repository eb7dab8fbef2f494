use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlScriptElement};
use yew::prelude::*;

use crate::config;
use crate::integrations::gate::{use_integrations, Capability};

/// Tag ids end up inside inline script, so only `[A-Za-z0-9-]` is allowed.
pub fn is_safe_tag_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= 32 && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn safe_id(capability: &Capability, kind: &str) -> Option<String> {
    let id = capability.value()?;
    if is_safe_tag_id(id) {
        Some(id.to_string())
    } else {
        log::warn!("Ignoring malformed {} id", kind);
        None
    }
}

pub fn gtm_bootstrap() -> String {
    "window.dataLayer = window.dataLayer || [];\nwindow.dataLayer.push({'gtm.start': new Date().getTime(), event: 'gtm.js'});"
        .to_string()
}

pub fn gtm_src(id: &str) -> String {
    format!("https://www.googletagmanager.com/gtm.js?id={}", id)
}

pub fn gtag_bootstrap(id: &str) -> String {
    format!(
        "window.dataLayer = window.dataLayer || [];\nfunction gtag(){{dataLayer.push(arguments);}}\ngtag('js', new Date());\ngtag('config', '{}');",
        id
    )
}

pub fn gtag_src(id: &str) -> String {
    format!("https://www.googletagmanager.com/gtag/js?id={}", id)
}

fn append_script(document: &Document, marker: &str, src: Option<&str>, inline: Option<&str>) -> Option<Element> {
    let script = document
        .create_element("script")
        .ok()?
        .dyn_into::<HtmlScriptElement>()
        .ok()?;
    let _ = script.set_attribute("data-integration", marker);
    if let Some(src) = src {
        script.set_src(src);
        script.set_async(true);
    }
    if let Some(inline) = inline {
        let _ = script.set_text(inline);
    }
    document.head()?.append_child(&script).ok()?;
    Some(script.into())
}

/// Appends the inline bootstrap and the loader script for as long as the component lives.
#[hook]
fn use_head_scripts(marker: &'static str, scripts: Option<(String, String)>) {
    use_effect_with_deps(
        move |scripts: &Option<(String, String)>| {
            let appended: Vec<Element> = match (scripts, window().and_then(|w| w.document())) {
                (Some((inline, src)), Some(document)) => [
                    append_script(&document, marker, None, Some(inline)),
                    append_script(&document, marker, Some(src), None),
                ]
                .into_iter()
                .flatten()
                .collect(),
                _ => Vec::new(),
            };
            move || {
                for element in appended {
                    element.remove();
                }
            }
        },
        scripts,
    );
}

#[function_component(TagManager)]
pub fn tag_manager() -> Html {
    let integrations = use_integrations();
    let id = integrations.and_then(|i| safe_id(&i.tag_manager, "tag manager"));
    use_head_scripts("gtm", id.as_deref().map(|id| (gtm_bootstrap(), gtm_src(id))));

    match id {
        Some(id) => html! {
            <noscript>
                <iframe
                    src={format!("https://www.googletagmanager.com/ns.html?id={}", id)}
                    height="0"
                    width="0"
                    style="display:none;visibility:hidden"
                ></iframe>
            </noscript>
        },
        None => html! {},
    }
}

#[function_component(Analytics)]
pub fn analytics() -> Html {
    let integrations = use_integrations();
    let id = integrations.and_then(|i| safe_id(&i.analytics, "analytics"));
    use_head_scripts("gtag", id.as_deref().map(|id| (gtag_bootstrap(id), gtag_src(id))));
    html! {}
}

/// Organization JSON-LD, fetched from the backend and embedded for crawlers.
#[function_component(StructuredData)]
pub fn structured_data() -> Html {
    let document = use_state(|| None::<String>);

    {
        let document = document.clone();
        use_effect_with_deps(
            move |_| {
                wasm_bindgen_futures::spawn_local(async move {
                    let url = config::api_url("/api/structured-data");
                    match gloo_net::http::Request::get(&url).send().await {
                        Ok(response) if response.ok() => match response.text().await {
                            Ok(text) => document.set(Some(text)),
                            Err(e) => log::warn!("Structured data unreadable: {}", e),
                        },
                        Ok(response) => log::warn!("Structured data request failed with status {}", response.status()),
                        Err(e) => log::warn!("Structured data request failed: {}", e),
                    }
                });
                || ()
            },
            (),
        );
    }

    match &*document {
        Some(json) => html! { <script type="application/ld+json">{ json.clone() }</script> },
        None => html! {},
    }
}
