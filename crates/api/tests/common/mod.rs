#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use vitrine_api::auth::jwt::{generate_token, AuthConfig};
use vitrine_api::config::{ServerConfig, StoreBackend};
use vitrine_api::router::build_app_router;
use vitrine_api::state::AppState;
use vitrine_db::MemoryCatalogStore;

pub const ADMIN_EMAIL: &str = "owner@boutique.sn";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:9002".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        store: StoreBackend::Memory,
        auth: AuthConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            admin_email: ADMIN_EMAIL.to_string(),
        },
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Returns the store handle too, so tests can inspect persisted state or
/// inject faults.
pub fn build_test_app() -> (Router, Arc<MemoryCatalogStore>) {
    let store = Arc::new(MemoryCatalogStore::new());
    let app = build_test_app_with(store.clone());
    (app, store)
}

pub fn build_test_app_with(store: Arc<MemoryCatalogStore>) -> Router {
    let config = test_config();
    let state = AppState::new(store, config.clone());
    build_app_router(state, &config)
}

/// Token for the allow-listed administrator.
pub fn admin_token() -> String {
    generate_token("uid-admin", Some(ADMIN_EMAIL), 15, &test_config().auth)
        .expect("token generation should succeed")
}

/// Token for a signed-in shopper who is not the administrator.
pub fn user_token() -> String {
    generate_token("uid-shopper", Some("client@gmail.com"), 15, &test_config().auth)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
