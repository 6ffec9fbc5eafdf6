//! HTTP route handlers for the account API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health           - Liveness check
//! GET    /health/ready     - Readiness check (database connectivity)
//!
//! # Accounts
//! GET    /accounts         - List all accounts
//! POST   /accounts         - Create an account
//! GET    /accounts/{id}    - Get one account
//! PUT    /accounts/{id}    - Partially update an account
//! DELETE /accounts/{id}    - Delete an account
//! ```

pub mod accounts;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::state::AppState;

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(accounts::list).post(accounts::create))
        .route(
            "/{id}",
            get(accounts::show)
                .put(accounts::update)
                .delete(accounts::remove),
        )
}

/// Create all routes for the account API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/accounts", account_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
/// Always ready when running on the in-memory store.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.pool() {
        Some(pool) => match sqlx::query("SELECT 1").fetch_one(pool).await {
            Ok(_) => StatusCode::OK,
            Err(_) => StatusCode::SERVICE_UNAVAILABLE,
        },
        None => StatusCode::OK,
    }
}
