//! Account business logic.
//!
//! Thin coordination layer between the HTTP surface and the store. The
//! partial-update merge policy lives in the DTO-to-patch conversion and
//! the store's merge; this layer owns the not-found translation for
//! single-record reads and otherwise propagates store outcomes untouched
//! (no retries, all-or-nothing).

use std::sync::Arc;

use wordsmith_core::AccountId;

use crate::db::{AccountStore, StoreError};
use crate::models::{Account, AccountPatch, NewAccount};

/// Service for account operations.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    /// Create a new account service over a store.
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Return all stored accounts in store order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store query fails.
    pub async fn get_accounts(&self) -> Result<Vec<Account>, StoreError> {
        self.store.list().await
    }

    /// Fetch one account by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no account has the id.
    pub async fn get_account(&self, id: AccountId) -> Result<Account, StoreError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the email or phone is already in
    /// use by an existing account.
    pub async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        self.store.insert(account).await
    }

    /// Apply a partial update to an account.
    ///
    /// The patch carries only the fields the caller supplied with
    /// non-empty values; everything else keeps its stored value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id does not exist, or
    /// `StoreError::Conflict` if the patched email or phone collides with
    /// a different account.
    pub async fn update_account(
        &self,
        id: AccountId,
        patch: AccountPatch,
    ) -> Result<Account, StoreError> {
        self.store.update(id, patch).await
    }

    /// Delete an account by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store operation fails. Deleting an
    /// unknown id is not an error at this layer.
    pub async fn delete_account(&self, id: AccountId) -> Result<(), StoreError> {
        self.store.delete_by_id(id).await
    }
}
