use crate::AppState;
use std::sync::Arc;
use axum::{
    Json,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::config::env::PublicIntegrations;
use crate::seo::sitemap::{self, SitemapEntry, SITE_ROUTES};
use crate::seo::structured_data;

pub async fn sitemap_xml(State(state): State<Arc<AppState>>) -> Response {
    let entries = sitemap::build_sitemap(state.config.site_base(), SITE_ROUTES, Utc::now());
    match sitemap::render_xml(&entries) {
        Ok(xml) => ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response(),
        Err(e) => {
            tracing::error!("Failed to render sitemap: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to render sitemap"})),
            )
                .into_response()
        }
    }
}

pub async fn sitemap_json(State(state): State<Arc<AppState>>) -> Json<Vec<SitemapEntry>> {
    Json(sitemap::build_sitemap(state.config.site_base(), SITE_ROUTES, Utc::now()))
}

pub async fn robots_txt(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        sitemap::robots_txt(state.config.site_base()),
    )
}

pub async fn structured_data(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(structured_data::organization_schema(state.config.site_base()))
}

pub async fn integrations(State(state): State<Arc<AppState>>) -> Json<PublicIntegrations> {
    Json(state.config.public_view())
}
