use crate::AppState;
use std::sync::Arc;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;

const MAX_REPORT_CHARS: usize = 2000;
const MAX_LABEL_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
pub struct ClientFaultReport {
    pub message: String,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub component: Option<String>,
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_REPORT_CHARS).collect()
}

/// Route and component names are client supplied too, so they get a tighter cap.
fn label(value: Option<&str>) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.chars().take(MAX_LABEL_CHARS).collect(),
        None => "unknown".to_string(),
    }
}

/// Intake for faults caught by the browser's fault boundary.
pub async fn report_client_error(
    State(state): State<Arc<AppState>>,
    Json(report): Json<ClientFaultReport>,
) -> StatusCode {
    let message = truncate(&report.message);
    let route = label(report.route.as_deref());
    let component = label(report.component.as_deref());
    tracing::error!(route = %route, component = %component, "Client fault: {}", message);

    if state.config.crash_reporting().is_active() {
        sentry::capture_message(
            &format!("Client fault in {} on {}: {}", component, route, message),
            sentry::Level::Error,
        );
    }

    StatusCode::ACCEPTED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_messages_are_truncated() {
        let long = "é".repeat(MAX_REPORT_CHARS + 50);
        assert_eq!(truncate(&long).chars().count(), MAX_REPORT_CHARS);
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn route_and_component_are_capped() {
        let huge = "x".repeat(10_000);
        assert_eq!(label(Some(&huge)).chars().count(), MAX_LABEL_CHARS);
        assert_eq!(label(Some("/work")), "/work");
        assert_eq!(label(Some("  ")), "unknown");
        assert_eq!(label(None), "unknown");
    }
}
