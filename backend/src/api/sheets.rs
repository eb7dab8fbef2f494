use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::env::{Capability, IntegrationConfig};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Contact,
    Newsletter,
}

/// One row for the spreadsheet webhook.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SheetEntry {
    #[serde(rename = "type")]
    pub r#type: EntryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl SheetEntry {
    pub fn contact(name: String, email: String, company: Option<String>, message: String) -> Self {
        SheetEntry {
            r#type: EntryType::Contact,
            name: Some(name),
            email,
            company,
            message: Some(message),
            ip: None,
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    pub fn newsletter(email: String) -> Self {
        SheetEntry {
            r#type: EntryType::Newsletter,
            name: None,
            email,
            company: None,
            message: None,
            ip: None,
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    pub fn with_ip(mut self, ip: Option<String>) -> Self {
        self.ip = ip;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Delivered,
    NotConfigured,
    Rejected(StatusCode),
    Transport(String),
}

impl SendOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SendOutcome::Delivered)
    }
}

/// Posts sheet entries to the configured webhook. One attempt per entry.
#[derive(Clone)]
pub struct SheetsForwarder {
    client: Client,
    endpoint: Capability,
}

impl SheetsForwarder {
    pub fn new(config: &IntegrationConfig) -> Self {
        Self::with_endpoint(config.contact_webhook().clone())
    }

    pub fn with_endpoint(endpoint: Capability) -> Self {
        SheetsForwarder {
            client: Client::new(),
            endpoint,
        }
    }

    pub fn is_available(&self) -> bool {
        self.endpoint.is_active()
    }

    /// Forwards the entry and reports success as a plain bool. Failures are logged here.
    pub async fn send(&self, entry: &SheetEntry) -> bool {
        let outcome = self.deliver(entry).await;
        match &outcome {
            SendOutcome::Delivered => {
                tracing::debug!("Forwarded {:?} entry to contact webhook", entry.r#type);
            }
            SendOutcome::NotConfigured => {
                tracing::warn!(
                    "Contact webhook not configured, {:?} entry not forwarded",
                    entry.r#type
                );
            }
            SendOutcome::Rejected(status) => {
                tracing::error!(
                    status = status.as_u16(),
                    "Contact webhook rejected {:?} entry with status {}",
                    entry.r#type,
                    status
                );
            }
            SendOutcome::Transport(e) => {
                tracing::error!("Failed to reach contact webhook: {}", e);
            }
        }
        outcome.is_delivered()
    }

    pub async fn deliver(&self, entry: &SheetEntry) -> SendOutcome {
        let endpoint = match &self.endpoint {
            Capability::Active(url) => url,
            Capability::Inactive => return SendOutcome::NotConfigured,
        };

        match self.client.post(endpoint).json(entry).send().await {
            Ok(response) if response.status().is_success() => SendOutcome::Delivered,
            Ok(response) => SendOutcome::Rejected(response.status()),
            Err(e) => SendOutcome::Transport(e.to_string()),
        }
    }
}
