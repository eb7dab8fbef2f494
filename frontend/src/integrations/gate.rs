use std::rc::Rc;

use gloo_net::http::Request;
use serde::Deserialize;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config;

pub const DEFAULT_SITE_URL: &str = "https://arclight.studio";

/// Shape of `GET /api/integrations`.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct PublicIntegrations {
    pub site_url: String,
    pub gtm_id: Option<String>,
    pub ga_id: Option<String>,
    pub cloudinary_cloud: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    Active(String),
    Inactive,
}

impl Capability {
    pub fn from_optional(value: Option<String>) -> Self {
        match value.map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() => Capability::Active(v),
            _ => Capability::Inactive,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Capability::Active(_))
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Capability::Active(v) => Some(v.as_str()),
            Capability::Inactive => None,
        }
    }
}

/// Integrations resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Integrations {
    pub site_url: String,
    pub tag_manager: Capability,
    pub analytics: Capability,
    pub image_cdn: Capability,
}

impl Integrations {
    pub fn inactive() -> Self {
        Integrations {
            site_url: DEFAULT_SITE_URL.to_string(),
            tag_manager: Capability::Inactive,
            analytics: Capability::Inactive,
            image_cdn: Capability::Inactive,
        }
    }
}

impl From<PublicIntegrations> for Integrations {
    fn from(public: PublicIntegrations) -> Self {
        let site_url = if public.site_url.trim().is_empty() {
            DEFAULT_SITE_URL.to_string()
        } else {
            public.site_url.trim_end_matches('/').to_string()
        };
        Integrations {
            site_url,
            tag_manager: Capability::from_optional(public.gtm_id),
            analytics: Capability::from_optional(public.ga_id),
            image_cdn: Capability::from_optional(public.cloudinary_cloud),
        }
    }
}

pub async fn fetch_integrations() -> Integrations {
    match Request::get(&config::api_url("/api/integrations")).send().await {
        Ok(response) if response.ok() => match response.json::<PublicIntegrations>().await {
            Ok(public) => public.into(),
            Err(e) => {
                log::warn!("Could not parse integrations, running without them: {}", e);
                Integrations::inactive()
            }
        },
        Ok(response) => {
            log::warn!("Integrations request failed with status {}", response.status());
            Integrations::inactive()
        }
        Err(e) => {
            log::warn!("Integrations request failed: {}", e);
            Integrations::inactive()
        }
    }
}

/// `None` until the integrations have been resolved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntegrationsContext(pub Option<Rc<Integrations>>);

#[hook]
pub fn use_integrations() -> Option<Rc<Integrations>> {
    use_context::<IntegrationsContext>().and_then(|ctx| ctx.0)
}

#[derive(Properties, PartialEq)]
pub struct IntegrationsProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(IntegrationsProvider)]
pub fn integrations_provider(props: &IntegrationsProviderProps) -> Html {
    let resolved = use_state(IntegrationsContext::default);

    {
        let resolved = resolved.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let integrations = fetch_integrations().await;
                    log::info!(
                        "Integrations: tag manager {}, analytics {}, image cdn {}",
                        integrations.tag_manager.is_active(),
                        integrations.analytics.is_active(),
                        integrations.image_cdn.is_active()
                    );
                    resolved.set(IntegrationsContext(Some(Rc::new(integrations))));
                });
                || ()
            },
            (),
        );
    }

    html! {
        <ContextProvider<IntegrationsContext> context={(*resolved).clone()}>
            { for props.children.iter() }
        </ContextProvider<IntegrationsContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_identifiers_are_inactive() {
        assert_eq!(Capability::from_optional(None), Capability::Inactive);
        assert_eq!(Capability::from_optional(Some("  ".to_string())), Capability::Inactive);
        assert_eq!(
            Capability::from_optional(Some("GTM-ABC".to_string())),
            Capability::Active("GTM-ABC".to_string())
        );
    }

    #[test]
    fn public_integrations_convert_to_capabilities() {
        let public: PublicIntegrations = serde_json::from_str(
            r#"{"site_url":"https://example.com/","gtm_id":"GTM-1","ga_id":null,"cloudinary_cloud":"demo"}"#,
        )
        .unwrap();
        let integrations = Integrations::from(public);
        assert_eq!(integrations.site_url, "https://example.com");
        assert!(integrations.tag_manager.is_active());
        assert!(!integrations.analytics.is_active());
        assert_eq!(integrations.image_cdn.value(), Some("demo"));
    }

    #[test]
    fn empty_site_url_falls_back_to_default() {
        let integrations = Integrations::from(PublicIntegrations::default());
        assert_eq!(integrations, Integrations::inactive());
    }
}
