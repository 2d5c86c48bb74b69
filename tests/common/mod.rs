// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use carbon_tracker::config::Config;
use carbon_tracker::routes::create_router;
use carbon_tracker::AppState;
use std::sync::Arc;

/// Create a test app with remote providers disabled.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::default())
}

/// Create a test app from a custom config.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::from_config(config).expect("Failed to build app state"));
    (create_router(state.clone()), state)
}

/// Serve a stub upstream on an ephemeral local port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Build a JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a request without a body.
#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Assert two floats are equal within a small tolerance.
#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
