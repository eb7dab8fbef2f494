use dotenvy::dotenv;
use axum::{
    routing::{get, post},
    Router,
    middleware
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

mod config {
    pub mod env;
}
mod api {
    pub mod sheets;
}
mod handlers {
    pub mod request_guards;
    pub mod contact_dtos;
    pub mod contact_handlers;
    pub mod site_handlers;
    pub mod client_error_handlers;
}
mod seo {
    pub mod sitemap;
    pub mod structured_data;
}
mod utils {
    pub mod rate_limit;
}

use config::env::IntegrationConfig;
use api::sheets::SheetsForwarder;
use utils::rate_limit::SubmissionRateLimiter;

use handlers::contact_handlers;
use handlers::site_handlers;
use handlers::client_error_handlers;
use handlers::request_guards;

const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    config: Arc<IntegrationConfig>,
    sheets: SheetsForwarder,
    submission_limiter: SubmissionRateLimiter,
}

impl AppState {
    pub fn new(config: Arc<IntegrationConfig>) -> Self {
        AppState {
            sheets: SheetsForwarder::new(&config),
            submission_limiter: SubmissionRateLimiter::per_minute(config.contact_rate_per_minute),
            config,
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    let submission_routes = Router::new()
        .route("/api/contact", post(contact_handlers::submit_contact))
        .route("/api/newsletter", post(contact_handlers::subscribe_newsletter))
        .route_layer(middleware::from_fn_with_state(state.clone(), request_guards::limit_submissions));

    // Built frontend; unknown paths get index.html so client-side routes resolve.
    let dist = state.config.frontend_dist.clone();
    let frontend = ServeDir::new(&dist).not_found_service(ServeFile::new(dist.join("index.html")));

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/integrations", get(site_handlers::integrations))
        .route("/api/structured-data", get(site_handlers::structured_data))
        .route("/api/sitemap", get(site_handlers::sitemap_json))
        .route("/api/client-errors", post(client_error_handlers::report_client_error))
        .route("/sitemap.xml", get(site_handlers::sitemap_xml))
        .route("/robots.txt", get(site_handlers::robots_txt))
        .merge(submission_routes)
        .fallback_service(frontend)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_origin(Any)
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .expose_headers([axum::http::header::CONTENT_TYPE])
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = match IntegrationConfig::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let _guard = config.crash_reporting().value().map(|dsn| {
        sentry::init((dsn, sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.environment.clone().into()),
            ..Default::default()
        }))
    });

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    config.log_integrations();
    tracing::info!(
        "Serving {} ({}) from {}",
        config.site_base(),
        config.environment,
        config.frontend_dist.display()
    );

    let bind_addr = config.bind_addr;
    let state = Arc::new(AppState::new(config));

    let limiter = state.submission_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LIMITER_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            limiter.prune();
            tracing::debug!("Rate limiter tracking {} clients", limiter.tracked_clients());
        }
    });

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Listening on {}", bind_addr);
    axum::serve(listener, app(state).into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_state(pairs: &[(&str, &str)]) -> Arc<AppState> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = IntegrationConfig::from_lookup(|key| {
            pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
        .unwrap();
        Arc::new(AppState::new(Arc::new(config)))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_json(uri: &str, body: Value, ip: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("x-forwarded-for", ip)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app(test_state(&[]))
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");
    }

    #[tokio::test]
    async fn sitemap_xml_uses_configured_site_url() {
        let response = app(test_state(&[("SITE_URL", "https://example.com")]))
            .oneshot(Request::get("/sitemap.xml").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "application/xml; charset=utf-8"
        );
        let body = body_string(response).await;
        assert!(body.contains("<loc>https://example.com/contact</loc>"));
    }

    #[tokio::test]
    async fn robots_and_structured_data_are_served() {
        let state = test_state(&[]);
        let robots = app(state.clone())
            .oneshot(Request::get("/robots.txt").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(body_string(robots).await.contains("Sitemap: https://arclight.studio/sitemap.xml"));

        let ld = app(state)
            .oneshot(Request::get("/api/structured-data").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let doc: Value = serde_json::from_str(&body_string(ld).await).unwrap();
        assert_eq!(doc["@type"], "Organization");
    }

    #[tokio::test]
    async fn integrations_endpoint_reflects_configuration() {
        let response = app(test_state(&[("GTM_ID", "GTM-TEST")]))
            .oneshot(Request::get("/api/integrations").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let view: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(view["gtm_id"], "GTM-TEST");
        assert_eq!(view["ga_id"], Value::Null);
    }

    #[tokio::test]
    async fn invalid_contact_is_rejected() {
        let response = app(test_state(&[]))
            .oneshot(post_json(
                "/api/contact",
                json!({"name": "Ada", "email": "not-an-email", "message": "Hello there, studio!"}),
                "198.51.100.20",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"], "Please enter a valid email address");
    }

    #[tokio::test]
    async fn valid_contact_succeeds_even_without_webhook() {
        let response = app(test_state(&[]))
            .oneshot(post_json(
                "/api/contact",
                json!({"name": "Ada", "email": "ada@example.com", "message": "Hello there, studio!"}),
                "198.51.100.21",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["success"], true);
        assert!(body["id"].is_string());
    }

    #[tokio::test]
    async fn submissions_are_rate_limited_per_client() {
        let state = test_state(&[("CONTACT_RATE_PER_MINUTE", "1")]);
        let signup = || post_json("/api/newsletter", json!({"email": "ada@example.com"}), "198.51.100.22");

        let first = app(state.clone()).oneshot(signup()).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app(state.clone()).oneshot(signup()).await.unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

        let other_client = app(state)
            .oneshot(post_json("/api/newsletter", json!({"email": "bob@example.com"}), "198.51.100.23"))
            .await
            .unwrap();
        assert_eq!(other_client.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rotating_forwarded_for_does_not_escape_the_limit() {
        let state = test_state(&[("CONTACT_RATE_PER_MINUTE", "1")]);
        let peer: SocketAddr = "203.0.113.50:40000".parse().unwrap();

        let mut statuses = Vec::new();
        for i in 0..50 {
            let mut request = post_json(
                "/api/newsletter",
                json!({"email": "ada@example.com"}),
                &format!("10.0.0.{}", i),
            );
            request.extensions_mut().insert(axum::extract::ConnectInfo(peer));
            statuses.push(app(state.clone()).oneshot(request).await.unwrap().status());
        }

        assert_eq!(statuses[0], StatusCode::OK);
        assert!(statuses[1..].iter().all(|s| *s == StatusCode::TOO_MANY_REQUESTS));
        assert_eq!(state.submission_limiter.tracked_clients(), 1);
    }

    #[tokio::test]
    async fn client_errors_are_accepted() {
        let response = app(test_state(&[]))
            .oneshot(post_json(
                "/api/client-errors",
                json!({"message": "boom", "route": "/work"}),
                "198.51.100.24",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
}
