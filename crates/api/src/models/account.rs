//! Account domain types.
//!
//! These types represent validated domain objects separate from database
//! row types and request DTOs. The JSON view returned to API callers is
//! the full record, serialized camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wordsmith_core::{AccountId, Email, Gender, PersonName, Phone};

/// A stored account (domain type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique account ID, generated by the store on insert.
    pub id: AccountId,
    /// First given name.
    pub first_name: PersonName,
    /// Family name.
    pub last_name: PersonName,
    /// Email address (unique across accounts).
    pub email: Email,
    /// Phone number (unique across accounts).
    pub phone: Phone,
    /// Gender, defaults to `N` (would rather not say).
    pub gender: Gender,
    /// Optional free-text address.
    pub address: Option<String>,
    /// When the account was created. Never modified after insert.
    pub date_created: DateTime<Utc>,
    /// When the account was last updated. Advanced on every update.
    pub date_updated: DateTime<Utc>,
}

/// Fields required to create an account. The store assigns the id and
/// both timestamps.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub phone: Phone,
    pub gender: Gender,
    pub address: Option<String>,
}

/// A set of field changes for a partial update.
///
/// Only fields that are `Some` are applied; everything else keeps its
/// stored value. An update request that omits or blanks a field must
/// never erase existing data, so the DTO layer only populates a field
/// here when the caller supplied a non-empty value.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub email: Option<Email>,
    pub phone: Option<Phone>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
}

impl AccountPatch {
    /// Returns `true` if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.gender.is_none()
            && self.address.is_none()
    }
}

impl Account {
    /// Produce a new record from this one plus the fields set in `patch`.
    ///
    /// `id` and `date_created` are carried over untouched; `date_updated`
    /// is set to the supplied timestamp. The original record is not
    /// mutated, so past snapshots stay intact.
    #[must_use]
    pub fn merged_with(&self, patch: &AccountPatch, date_updated: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            first_name: patch
                .first_name
                .clone()
                .unwrap_or_else(|| self.first_name.clone()),
            last_name: patch
                .last_name
                .clone()
                .unwrap_or_else(|| self.last_name.clone()),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
            phone: patch.phone.clone().unwrap_or_else(|| self.phone.clone()),
            gender: patch.gender.unwrap_or(self.gender),
            address: patch.address.clone().or_else(|| self.address.clone()),
            date_created: self.date_created,
            date_updated,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_account() -> Account {
        let now = Utc::now();
        Account {
            id: AccountId::generate(),
            first_name: PersonName::parse("Mark").unwrap(),
            last_name: PersonName::parse("Smith").unwrap(),
            email: Email::parse("mark.smith@gmail.com").unwrap(),
            phone: Phone::parse("01117890003").unwrap(),
            gender: Gender::Male,
            address: Some("flat 3 block d, Manchester".to_owned()),
            date_created: now,
            date_updated: now,
        }
    }

    #[test]
    fn test_merge_applies_only_set_fields() {
        let account = sample_account();
        let later = account.date_updated + Duration::seconds(5);

        let patch = AccountPatch {
            first_name: Some(PersonName::parse("newWordSmith").unwrap()),
            email: Some(Email::parse("w.sunak@gmail.com").unwrap()),
            ..AccountPatch::default()
        };

        let merged = account.merged_with(&patch, later);
        assert_eq!(merged.first_name.as_str(), "newWordSmith");
        assert_eq!(merged.email.as_str(), "w.sunak@gmail.com");
        // Untouched fields keep their values
        assert_eq!(merged.last_name, account.last_name);
        assert_eq!(merged.phone, account.phone);
        assert_eq!(merged.address, account.address);
    }

    #[test]
    fn test_merge_preserves_id_and_date_created() {
        let account = sample_account();
        let later = account.date_updated + Duration::seconds(5);

        let merged = account.merged_with(&AccountPatch::default(), later);
        assert_eq!(merged.id, account.id);
        assert_eq!(merged.date_created, account.date_created);
        assert_eq!(merged.date_updated, later);
    }

    #[test]
    fn test_merge_does_not_mutate_original() {
        let account = sample_account();
        let patch = AccountPatch {
            last_name: Some(PersonName::parse("Sunak").unwrap()),
            ..AccountPatch::default()
        };

        let _ = account.merged_with(&patch, Utc::now());
        assert_eq!(account.last_name.as_str(), "Smith");
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(AccountPatch::default().is_empty());
        let patch = AccountPatch {
            gender: Some(Gender::Diverse),
            ..AccountPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_account_serializes_camel_case() {
        let account = sample_account();
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("dateCreated").is_some());
        assert!(json.get("dateUpdated").is_some());
        assert_eq!(json.get("gender").unwrap(), "M");
    }
}
