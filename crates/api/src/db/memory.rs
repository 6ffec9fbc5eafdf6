//! In-memory account store.
//!
//! Keeps accounts in an ordered `Vec` behind a mutex, mirroring the
//! observable behavior of the `PostgreSQL` store: insertion-order listing,
//! email/phone uniqueness, strictly advancing `date_updated`, idempotent
//! delete. Intended for tests and local development; not tuned for
//! concurrent load.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use wordsmith_core::AccountId;

use super::{AccountStore, StoreError};
use crate::models::{Account, AccountPatch, NewAccount};

/// Ordered in-memory account store.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: Mutex<Vec<Account>>,
}

impl MemoryAccountStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Account>> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Check email/phone uniqueness against every account except `skip`.
fn check_conflicts(
    accounts: &[Account],
    email: Option<&wordsmith_core::Email>,
    phone: Option<&wordsmith_core::Phone>,
    skip: Option<AccountId>,
) -> Result<(), StoreError> {
    for existing in accounts {
        if Some(existing.id) == skip {
            continue;
        }
        if email.is_some_and(|e| *e == existing.email) {
            return Err(StoreError::Conflict("email already exists".to_owned()));
        }
        if phone.is_some_and(|p| *p == existing.phone) {
            return Err(StoreError::Conflict(
                "phone number already exists".to_owned(),
            ));
        }
    }
    Ok(())
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.lock().clone())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.lock().iter().find(|a| a.id == id).cloned())
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.lock();
        check_conflicts(&accounts, Some(&account.email), Some(&account.phone), None)?;

        let now = Utc::now();
        let created = Account {
            id: AccountId::generate(),
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            phone: account.phone,
            gender: account.gender,
            address: account.address,
            date_created: now,
            date_updated: now,
        };

        accounts.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: AccountId, patch: AccountPatch) -> Result<Account, StoreError> {
        let mut accounts = self.lock();
        check_conflicts(
            &accounts,
            patch.email.as_ref(),
            patch.phone.as_ref(),
            Some(id),
        )?;

        let Some(existing) = accounts.iter_mut().find(|a| a.id == id) else {
            return Err(StoreError::NotFound);
        };

        // Strictly advance date_updated even when the clock has not moved
        // between two updates.
        let stamp = Utc::now().max(existing.date_updated + Duration::microseconds(1));
        let merged = existing.merged_with(&patch, stamp);
        *existing = merged.clone();
        Ok(merged)
    }

    async fn delete_by_id(&self, id: AccountId) -> Result<(), StoreError> {
        // Idempotent no-op for unknown ids
        self.lock().retain(|a| a.id != id);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wordsmith_core::{Email, Gender, PersonName, Phone};

    fn new_account(email: &str, phone: &str) -> NewAccount {
        NewAccount {
            first_name: PersonName::parse("Mark").unwrap(),
            last_name: PersonName::parse("Smith").unwrap(),
            email: Email::parse(email).unwrap(),
            phone: Phone::parse(phone).unwrap(),
            gender: Gender::Male,
            address: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let store = MemoryAccountStore::new();
        let account = store
            .insert(new_account("mark.smith@gmail.com", "01117890003"))
            .await
            .unwrap();

        assert_eq!(account.date_created, account.date_updated);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = MemoryAccountStore::new();
        let first = store
            .insert(new_account("a@example.com", "01117890001"))
            .await
            .unwrap();
        let second = store
            .insert(new_account("b@example.com", "01117890002"))
            .await
            .unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed.first().unwrap().id, first.id);
        assert_eq!(listed.get(1).unwrap().id, second.id);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email() {
        let store = MemoryAccountStore::new();
        store
            .insert(new_account("dup@example.com", "01117890001"))
            .await
            .unwrap();

        let err = store
            .insert(new_account("dup@example.com", "01117890002"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_phone() {
        let store = MemoryAccountStore::new();
        store
            .insert(new_account("a@example.com", "01117890001"))
            .await
            .unwrap();

        let err = store
            .insert(new_account("b@example.com", "01117890001"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_merges_and_advances_date_updated() {
        let store = MemoryAccountStore::new();
        let created = store
            .insert(new_account("mark.smith@gmail.com", "01117890003"))
            .await
            .unwrap();

        let patch = AccountPatch {
            first_name: Some(PersonName::parse("newWordSmith").unwrap()),
            email: Some(Email::parse("w.sunak@gmail.com").unwrap()),
            ..AccountPatch::default()
        };
        let updated = store.update(created.id, patch).await.unwrap();

        assert_eq!(updated.first_name.as_str(), "newWordSmith");
        assert_eq!(updated.email.as_str(), "w.sunak@gmail.com");
        assert_eq!(updated.phone, created.phone);
        assert_eq!(updated.date_created, created.date_created);
        assert!(updated.date_updated > created.date_updated);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = MemoryAccountStore::new();
        let err = store
            .update(AccountId::generate(), AccountPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_update_rejects_email_of_other_account() {
        let store = MemoryAccountStore::new();
        store
            .insert(new_account("taken@example.com", "01117890001"))
            .await
            .unwrap();
        let second = store
            .insert(new_account("free@example.com", "01117890002"))
            .await
            .unwrap();

        let patch = AccountPatch {
            email: Some(Email::parse("taken@example.com").unwrap()),
            ..AccountPatch::default()
        };
        let err = store.update(second.id, patch).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_allows_own_email() {
        let store = MemoryAccountStore::new();
        let created = store
            .insert(new_account("mine@example.com", "01117890001"))
            .await
            .unwrap();

        // Re-submitting the current email is not a conflict
        let patch = AccountPatch {
            email: Some(Email::parse("mine@example.com").unwrap()),
            ..AccountPatch::default()
        };
        assert!(store.update(created.id, patch).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_removes_account() {
        let store = MemoryAccountStore::new();
        let created = store
            .insert(new_account("a@example.com", "01117890001"))
            .await
            .unwrap();

        store.delete_by_id(created.id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
        assert!(store.find_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let store = MemoryAccountStore::new();
        assert!(store.delete_by_id(AccountId::generate()).await.is_ok());
    }
}
