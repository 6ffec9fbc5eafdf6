//! Integration tests for the Wordsmith account API.
//!
//! Tests drive the real router in-process over the in-memory store, so
//! they run hermetically with no database or network.
//!
//! ```bash
//! cargo test -p wordsmith-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use wordsmith_api::app;
use wordsmith_api::db::MemoryAccountStore;
use wordsmith_api::state::AppState;

/// Build the full application router over an empty in-memory store.
#[must_use]
pub fn test_app() -> Router {
    app(AppState::with_store(Arc::new(MemoryAccountStore::new())))
}

/// Send a request and return the response.
///
/// # Panics
///
/// Panics if the router fails to service the request.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("router should service the request")
}

/// Send a JSON request and return status plus parsed JSON body.
///
/// # Panics
///
/// Panics if the request fails or the body is not valid JSON.
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    let request = match body {
        Some(json) => builder
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };

    let response = send(app, request).await;
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();

    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };

    (status, json)
}
