use crate::AppState;
use std::sync::Arc;
use axum::{
    Json,
    extract::State,
};
use uuid::Uuid;

use crate::api::sheets::SheetEntry;
use crate::handlers::contact_dtos::{ContactRequest, NewsletterRequest, SubmissionResponse};
use crate::handlers::request_guards::{ApiError, ClientIp};

// Valid input is answered with success either way; forwarding failures only reach the log.
async fn forward(state: &AppState, id: Uuid, entry: SheetEntry) {
    if !state.sheets.send(&entry).await {
        tracing::error!("Submission {} ({:?}) was not forwarded", id, entry.r#type);
    }
}

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ClientIp(ip): ClientIp,
    Json(req): Json<ContactRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let req = req.normalized();
    req.validate().map_err(|e| ApiError::bad_request(e.to_string()))?;

    let id = Uuid::new_v4();
    tracing::info!("Contact submission {} received", id);

    let entry = SheetEntry::contact(req.name, req.email, req.company, req.message)
        .with_ip(ip.map(|ip| ip.to_string()));
    forward(&state, id, entry).await;

    Ok(Json(SubmissionResponse { success: true, id }))
}

pub async fn subscribe_newsletter(
    State(state): State<Arc<AppState>>,
    ClientIp(ip): ClientIp,
    Json(req): Json<NewsletterRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    req.validate().map_err(|e| ApiError::bad_request(e.to_string()))?;

    let id = Uuid::new_v4();
    tracing::info!("Newsletter signup {} received", id);

    let entry = SheetEntry::newsletter(req.email.trim().to_string())
        .with_ip(ip.map(|ip| ip.to_string()));
    forward(&state, id, entry).await;

    Ok(Json(SubmissionResponse { success: true, id }))
}
