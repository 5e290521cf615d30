#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use conflog_api::auth::jwt::{generate_access_token, JwtConfig};
use conflog_api::components::StaticComponents;
use conflog_api::config::ServerConfig;
use conflog_api::router::build_app_router;
use conflog_api::state::AppState;
use conflog_core::nonce::NonceIssuer;
use conflog_core::roles::{ROLE_ADMIN, ROLE_VIEWER};
use conflog_core::types::{ActiveComponent, ActiveTheme, ComponentSnapshot};
use conflog_core::wire::ACTION_LOG_ERROR;
use conflog_db::{ErrorLogStore, MemoryKv};

pub const NONCE_SECRET: &str = "test-nonce-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-jwt-secret".to_string(),
            access_token_expiry_mins: 15,
        },
        nonce_secret: NONCE_SECRET.to_string(),
        components_file: None,
        database_url: None,
    }
}

/// Two enabled components and a theme.
pub fn test_snapshot() -> ComponentSnapshot {
    ComponentSnapshot {
        components: vec![
            ActiveComponent {
                path: "slider-pro/slider-pro.php".into(),
                name: "Slider Pro".into(),
                version: "2.1.0".into(),
            },
            ActiveComponent {
                path: "contact-form/contact-form.php".into(),
                name: "Contact Form".into(),
                version: "5.3".into(),
            },
        ],
        theme: ActiveTheme {
            id: "storefront".into(),
            name: "Storefront".into(),
        },
    }
}

/// Build the full application router over an in-memory log, returning the
/// store as well so tests can inspect what was persisted.
pub fn build_test_app() -> (Router, Arc<ErrorLogStore>) {
    let config = test_config();
    let store = Arc::new(ErrorLogStore::new(Arc::new(MemoryKv::new())));

    let state = AppState {
        store: Arc::clone(&store),
        config: Arc::new(config.clone()),
        nonces: Arc::new(NonceIssuer::new(NONCE_SECRET)),
        components: Arc::new(StaticComponents(test_snapshot())),
    };

    (build_app_router(state, &config), store)
}

/// A nonce the test app accepts for error ingestion.
pub fn valid_nonce() -> String {
    NonceIssuer::new(NONCE_SECRET).issue(ACTION_LOG_ERROR)
}

pub fn admin_token() -> String {
    generate_access_token("admin-op", ROLE_ADMIN, &test_config().jwt).unwrap()
}

pub fn viewer_token() -> String {
    generate_access_token("viewer-op", ROLE_VIEWER, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("user-agent", "TestBrowser/1.0")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
