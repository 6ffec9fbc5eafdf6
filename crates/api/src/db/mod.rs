//! Persistence layer for accounts.
//!
//! The [`AccountStore`] trait is the single seam between the service layer
//! and storage. Two implementations exist:
//!
//! - [`PgAccountStore`] - production store backed by `PostgreSQL`
//! - [`MemoryAccountStore`] - ordered in-memory store for tests and
//!   local development
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p wordsmith-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use memory::MemoryAccountStore;
pub use postgres::PgAccountStore;

use crate::models::{Account, AccountPatch, NewAccount};
use wordsmith_core::AccountId;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested account was not found.
    #[error("not found")]
    NotFound,

    /// Uniqueness violation on email or phone.
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Persistence operations for accounts.
///
/// Implementations enforce email and phone uniqueness and own timestamp
/// stamping: `insert` sets both timestamps, `update` strictly advances
/// `date_updated`. `delete_by_id` is an idempotent no-op for unknown ids;
/// callers that need a not-found signal check existence first.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// List all accounts in insertion order.
    async fn list(&self) -> Result<Vec<Account>, StoreError>;

    /// Find one account by id.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Insert a new account, generating its id and timestamps.
    ///
    /// Fails with [`StoreError::Conflict`] if the email or phone is
    /// already used by an existing account.
    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Merge the patch over the stored account and persist the result.
    ///
    /// Fails with [`StoreError::NotFound`] if the id does not exist and
    /// [`StoreError::Conflict`] if the patched email or phone collides
    /// with a different account.
    async fn update(&self, id: AccountId, patch: AccountPatch) -> Result<Account, StoreError>;

    /// Delete the account with the given id. No-op if absent.
    async fn delete_by_id(&self, id: AccountId) -> Result<(), StoreError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
