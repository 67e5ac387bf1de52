#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use bookclub_api::config::ServerConfig;
use bookclub_api::router::build_app_router;
use bookclub_api::state::AppState;
use bookclub_core::catalog::Catalog;
use bookclub_core::club::BookClub;
use bookclub_core::store::memory::MemoryStore;

/// Series used by most API tests. A single word, so no URL escaping needed.
pub const SERIES: &str = "Saltmarsh";

const TEST_CATALOG: &str = r#"
[[series]]
name = "Saltmarsh"

[[series.books]]
ordinal = 1.0
title = "Low Tide"
chapters = 30

[[series.books]]
ordinal = 2.0
title = "Flood Season"
chapters = 40

[[series.books]]
ordinal = 2.5
title = "Driftwood"
chapters = 12
"#;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        catalog_path: None,
        database_url: None,
    }
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let catalog = Arc::new(Catalog::from_toml_str(TEST_CATALOG).unwrap());
    let state = AppState {
        club: BookClub::new(catalog, store.clone()),
        store,
        config: Arc::new(test_config()),
    };
    build_app_router(state).unwrap()
}

/// A fresh app with its own empty in-memory store.
pub fn fresh_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (build_test_app(store.clone()), store)
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

async fn with_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    with_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    with_json(app, Method::PUT, uri, body).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// PUT progress and assert it was accepted.
pub async fn set_progress(app: &Router, user: &str, book_ordinal: f64, percent: i32) {
    let response = put_json(
        app.clone(),
        &format!("/api/v1/series/{SERIES}/progress/{user}"),
        serde_json::json!({ "book_ordinal": book_ordinal, "percent": percent }),
    )
    .await;
    assert_eq!(response.status(), 200, "progress update for {user} failed");
}
