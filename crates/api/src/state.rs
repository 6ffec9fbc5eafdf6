//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::{AccountStore, PgAccountStore};
use crate::services::AccountService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the account store and, in
/// production, the database pool for readiness checks.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn AccountStore>,
    pool: Option<PgPool>,
}

impl AppState {
    /// Create state backed by `PostgreSQL`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store: Arc::new(PgAccountStore::new(pool.clone())),
                pool: Some(pool),
            }),
        }
    }

    /// Create state over an arbitrary store. Used by tests with the
    /// in-memory store.
    #[must_use]
    pub fn with_store(store: Arc<dyn AccountStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, pool: None }),
        }
    }

    /// Get an account service bound to the store.
    #[must_use]
    pub fn accounts(&self) -> AccountService {
        AccountService::new(Arc::clone(&self.inner.store))
    }

    /// Get the database pool, if this state is database-backed.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }
}
