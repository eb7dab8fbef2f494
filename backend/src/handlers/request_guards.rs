use futures::Future;
use axum::{
    extract::{ConnectInfo, FromRequestParts, State},
    http::{request::Parts, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    body::Body,
    Json,
};
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use serde_json::json;

use crate::AppState;

/// Best-known address of the client that sent the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub Option<IpAddr>);

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
        }));

        (self.status, body).into_response()
    }
}

/// Only a local reverse proxy may vouch for the client address. Without
/// connection info (tests, some embedders) the headers are all there is.
fn is_trusted_proxy(peer: Option<SocketAddr>) -> bool {
    match peer.map(|addr| addr.ip()) {
        None => true,
        Some(IpAddr::V4(v4)) => v4.is_loopback() || v4.is_private(),
        Some(IpAddr::V6(v6)) => v6.is_loopback(),
    }
}

/// Behind a trusted proxy: first hop of `X-Forwarded-For`, then `X-Real-IP`,
/// then the socket peer. Anyone else is identified by the socket peer alone.
pub fn resolve_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<IpAddr> {
    let peer_ip = peer.map(|addr| addr.ip());
    if !is_trusted_proxy(peer) {
        return peer_ip;
    }

    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|header| header.to_str().ok())
            .and_then(|value| value.trim().parse::<IpAddr>().ok())
    };

    forwarded.or_else(real_ip).or(peer_ip)
}

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0);
        let ip = resolve_client_ip(&parts.headers, peer);
        async move { Ok(ClientIp(ip)) }
    }
}

pub async fn limit_submissions(
    State(state): State<Arc<AppState>>,
    ClientIp(ip): ClientIp,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.submission_limiter.check(ip) {
        tracing::warn!("Submission rate limit hit for {:?}", ip);
        return Err(ApiError {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "Too many submissions, please try again in a minute".to_string(),
        });
    }

    Ok(next.run(request).await)
}
