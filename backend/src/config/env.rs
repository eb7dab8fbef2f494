use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;

use nonzero_ext::nonzero;
use serde::Serialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SITE_URL: &str = "https://arclight.studio";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_FRONTEND_DIST: &str = "../frontend/dist";

/// Whether an external integration is switched on, and with which credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    Active(String),
    Inactive,
}

impl Capability {
    pub fn from_optional(value: Option<String>) -> Self {
        match value {
            Some(v) => Capability::Active(v),
            None => Capability::Inactive,
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

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid URL ({value}): {reason}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("{var} must use http or https, got '{scheme}'")]
    UnsupportedScheme { var: &'static str, scheme: String },
    #[error("{var} is not a valid DSN: {reason}")]
    InvalidDsn { var: &'static str, reason: String },
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddress { var: &'static str, value: String },
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

/// Integration flags the browser is allowed to see.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PublicIntegrations {
    pub site_url: String,
    pub gtm_id: Option<String>,
    pub ga_id: Option<String>,
    pub cloudinary_cloud: Option<String>,
}

/// Process-wide configuration, resolved once at startup and read-only after.
#[derive(Debug, Clone)]
pub struct IntegrationConfig {
    pub site_url: Url,
    pub environment: String,
    pub bind_addr: SocketAddr,
    pub frontend_dist: PathBuf,
    pub contact_rate_per_minute: NonZeroU32,
    gtm_id: Capability,
    ga_id: Capability,
    contact_webhook: Capability,
    sentry_dsn: Capability,
    cloudinary_cloud: Capability,
}

impl IntegrationConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let site_url = match (read("SITE_URL"), read("NEXT_PUBLIC_SITE_URL")) {
            (Some(raw), _) => parse_http_url("SITE_URL", &raw)?,
            (None, Some(raw)) => parse_http_url("NEXT_PUBLIC_SITE_URL", &raw)?,
            (None, None) => parse_http_url("SITE_URL", DEFAULT_SITE_URL)?,
        };

        let contact_webhook = match read("CONTACT_WEBHOOK_URL") {
            Some(raw) => Capability::Active(parse_http_url("CONTACT_WEBHOOK_URL", &raw)?.to_string()),
            None => Capability::Inactive,
        };

        let sentry_dsn = match read("SENTRY_DSN") {
            Some(raw) => {
                sentry::types::Dsn::from_str(&raw).map_err(|e| ConfigError::InvalidDsn {
                    var: "SENTRY_DSN",
                    reason: e.to_string(),
                })?;
                Capability::Active(raw)
            }
            None => Capability::Inactive,
        };

        let bind_addr = {
            let raw = read("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
            raw.parse::<SocketAddr>().map_err(|_| ConfigError::InvalidAddress {
                var: "BIND_ADDR",
                value: raw.clone(),
            })?
        };

        let contact_rate_per_minute = match read("CONTACT_RATE_PER_MINUTE") {
            Some(raw) => raw
                .parse::<NonZeroU32>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "CONTACT_RATE_PER_MINUTE",
                    value: raw.clone(),
                })?,
            None => nonzero!(5u32),
        };

        Ok(IntegrationConfig {
            site_url,
            environment: read("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            bind_addr,
            frontend_dist: PathBuf::from(
                read("FRONTEND_DIST").unwrap_or_else(|| DEFAULT_FRONTEND_DIST.to_string()),
            ),
            contact_rate_per_minute,
            gtm_id: Capability::from_optional(read("GTM_ID")),
            ga_id: Capability::from_optional(read("GA_MEASUREMENT_ID")),
            contact_webhook,
            sentry_dsn,
            cloudinary_cloud: Capability::from_optional(read("CLOUDINARY_CLOUD_NAME")),
        })
    }

    /// Site URL without the trailing slash, for building absolute links.
    pub fn site_base(&self) -> &str {
        self.site_url.as_str().trim_end_matches('/')
    }

    pub fn tag_manager(&self) -> &Capability {
        &self.gtm_id
    }

    pub fn analytics(&self) -> &Capability {
        &self.ga_id
    }

    pub fn contact_webhook(&self) -> &Capability {
        &self.contact_webhook
    }

    pub fn crash_reporting(&self) -> &Capability {
        &self.sentry_dsn
    }

    pub fn image_cdn(&self) -> &Capability {
        &self.cloudinary_cloud
    }

    pub fn is_sheets_available(&self) -> bool {
        self.contact_webhook.is_active()
    }

    pub fn public_view(&self) -> PublicIntegrations {
        PublicIntegrations {
            site_url: self.site_base().to_string(),
            gtm_id: self.gtm_id.value().map(str::to_string),
            ga_id: self.ga_id.value().map(str::to_string),
            cloudinary_cloud: self.cloudinary_cloud.value().map(str::to_string),
        }
    }

    /// Logs one line per integration so a deploy shows what is switched on.
    pub fn log_integrations(&self) {
        let integrations = [
            ("tag manager", self.tag_manager()),
            ("analytics", self.analytics()),
            ("contact webhook", self.contact_webhook()),
            ("crash reporting", self.crash_reporting()),
            ("image cdn", self.image_cdn()),
        ];
        for (name, capability) in integrations {
            if capability.is_active() {
                tracing::info!("Integration {} active", name);
            } else {
                tracing::warn!("Integration {} not configured, running without it", name);
            }
        }
    }
}

fn parse_http_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            var,
            scheme: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<IntegrationConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        IntegrationConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.site_base(), DEFAULT_SITE_URL);
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.contact_rate_per_minute.get(), 5);
        assert_eq!(config.environment, "development");
        assert!(!config.tag_manager().is_active());
        assert!(!config.analytics().is_active());
        assert!(!config.crash_reporting().is_active());
        assert!(!config.image_cdn().is_active());
    }

    #[test]
    fn missing_webhook_means_sheets_unavailable() {
        let config = config_from(&[("GTM_ID", "GTM-ABC123")]).unwrap();
        assert!(!config.is_sheets_available());
        assert_eq!(config.contact_webhook(), &Capability::Inactive);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("CONTACT_WEBHOOK_URL", "   "), ("GA_MEASUREMENT_ID", "")]).unwrap();
        assert!(!config.is_sheets_available());
        assert!(!config.analytics().is_active());
    }

    #[test]
    fn configured_webhook_is_active() {
        let config =
            config_from(&[("CONTACT_WEBHOOK_URL", "https://script.google.com/macros/s/abc/exec")]).unwrap();
        assert!(config.is_sheets_available());
        assert_eq!(
            config.contact_webhook().value(),
            Some("https://script.google.com/macros/s/abc/exec")
        );
    }

    #[test]
    fn malformed_site_url_fails_the_same_way_every_time() {
        let first = config_from(&[("SITE_URL", "not a url")]).unwrap_err();
        let second = config_from(&[("SITE_URL", "not a url")]).unwrap_err();
        assert_eq!(first, second);
        assert!(matches!(first, ConfigError::InvalidUrl { var: "SITE_URL", .. }));
    }

    #[test]
    fn next_public_site_url_is_a_fallback() {
        let config = config_from(&[("NEXT_PUBLIC_SITE_URL", "https://public.example.com/")]).unwrap();
        assert_eq!(config.site_base(), "https://public.example.com");

        let config = config_from(&[
            ("SITE_URL", "https://primary.example.com"),
            ("NEXT_PUBLIC_SITE_URL", "https://public.example.com"),
        ])
        .unwrap();
        assert_eq!(config.site_base(), "https://primary.example.com");

        let err = config_from(&[("NEXT_PUBLIC_SITE_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { var: "NEXT_PUBLIC_SITE_URL", .. }));
    }

    #[test]
    fn non_http_site_url_is_rejected() {
        let err = config_from(&[("SITE_URL", "ftp://arclight.studio")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnsupportedScheme {
                var: "SITE_URL",
                scheme: "ftp".to_string()
            }
        );
    }

    #[test]
    fn malformed_webhook_url_is_fatal() {
        let err = config_from(&[("CONTACT_WEBHOOK_URL", "hooks.example.com/contact")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { var: "CONTACT_WEBHOOK_URL", .. }));
    }

    #[test]
    fn malformed_dsn_and_numbers_are_rejected() {
        assert!(matches!(
            config_from(&[("SENTRY_DSN", "nope")]).unwrap_err(),
            ConfigError::InvalidDsn { .. }
        ));
        assert!(matches!(
            config_from(&[("CONTACT_RATE_PER_MINUTE", "0")]).unwrap_err(),
            ConfigError::InvalidNumber { .. }
        ));
        assert!(matches!(
            config_from(&[("BIND_ADDR", "localhost")]).unwrap_err(),
            ConfigError::InvalidAddress { .. }
        ));
    }

    #[test]
    fn public_view_exposes_only_browser_safe_values() {
        let config = config_from(&[
            ("SITE_URL", "https://example.com/"),
            ("GTM_ID", "GTM-XYZ"),
            ("CLOUDINARY_CLOUD_NAME", "arclight"),
            ("CONTACT_WEBHOOK_URL", "https://hooks.example.com/contact"),
        ])
        .unwrap();
        let view = config.public_view();
        assert_eq!(view.site_url, "https://example.com");
        assert_eq!(view.gtm_id.as_deref(), Some("GTM-XYZ"));
        assert_eq!(view.ga_id, None);
        assert_eq!(view.cloudinary_cloud.as_deref(), Some("arclight"));
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("contact_webhook").is_none());
    }
}
