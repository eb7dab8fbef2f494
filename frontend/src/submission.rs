use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::config;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Sent,
    /// Server-side validation message.
    Rejected(String),
    TooManyRequests,
    Failed,
}

impl SubmitOutcome {
    pub fn message(&self) -> Option<String> {
        match self {
            SubmitOutcome::Sent => None,
            SubmitOutcome::Rejected(reason) => Some(reason.clone()),
            SubmitOutcome::TooManyRequests => {
                Some("Too many submissions. Please wait a minute and try again.".to_string())
            }
            SubmitOutcome::Failed => Some("Something went wrong. Please try again later.".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct Accepted {
    success: bool,
}

/// Maps a non-2xx status (and its `{ "error": .. }` body when present) to an outcome.
pub fn classify_failure(status: u16, error: Option<String>) -> SubmitOutcome {
    match status {
        400 => SubmitOutcome::Rejected(error.unwrap_or_else(|| "Please check the form and try again.".to_string())),
        429 => SubmitOutcome::TooManyRequests,
        _ => SubmitOutcome::Failed,
    }
}

/// POSTs `body` to `path`. `Err` means the server accepted the request but
/// answered with something this client cannot read, which is a fault rather
/// than a user error.
pub async fn submit<T: Serialize>(path: &str, body: &T) -> Result<SubmitOutcome, String> {
    let request = match Request::post(&config::api_url(path)).json(body) {
        Ok(request) => request,
        Err(e) => return Err(format!("could not encode submission: {}", e)),
    };

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Submission to {} failed: {}", path, e);
            return Ok(SubmitOutcome::Failed);
        }
    };

    if response.ok() {
        return match response.json::<Accepted>().await {
            Ok(Accepted { success: true }) => Ok(SubmitOutcome::Sent),
            Ok(Accepted { success: false }) => Ok(SubmitOutcome::Failed),
            Err(e) => Err(format!("unreadable response from {}: {}", path, e)),
        };
    }

    let status = response.status();
    let error = response.json::<ErrorBody>().await.ok().map(|body| body.error);
    log::warn!("Submission to {} rejected with status {}", path, status);
    Ok(classify_failure(status, error))
}
