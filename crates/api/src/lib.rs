//! Wordsmith Account API library.
//!
//! This crate provides the account API as a library, allowing the router
//! to be exercised in-process by tests and reused by the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Build the application router with all routes attached.
///
/// The binary wraps this with tracing and Sentry layers; tests drive it
/// directly via `tower::ServiceExt`.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new().merge(routes::routes()).with_state(state)
}
