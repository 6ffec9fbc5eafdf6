//! Account JSON endpoints.
//!
//! Request bodies are validated field by field before reaching the
//! service; every failing field is reported, not just the first. The
//! response view is always the full account record.
//!
//! Status mapping for uniqueness conflicts follows the original API
//! contract: 400 on create, 403 on update.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use wordsmith_core::{AccountId, Email, Gender, PersonName, Phone};

use crate::db::StoreError;
use crate::error::{AppError, ValidationErrors};
use crate::models::{Account, AccountPatch, NewAccount};
use crate::state::AppState;

/// Request body for `POST /accounts`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Single-letter gender code; defaults to `N` when omitted.
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl CreateAccountRequest {
    /// Validate every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the per-field failure map if any field is malformed.
    pub fn validate(self) -> Result<NewAccount, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let first_name = PersonName::parse(&self.first_name)
            .map_err(|e| errors.push("firstName", e.to_string()))
            .ok();
        let last_name = PersonName::parse(&self.last_name)
            .map_err(|e| errors.push("lastName", e.to_string()))
            .ok();
        let email = Email::parse(&self.email)
            .map_err(|e| errors.push("email", e.to_string()))
            .ok();
        let phone = Phone::parse(&self.phone)
            .map_err(|e| errors.push("phone", e.to_string()))
            .ok();

        let gender = match self.gender.as_deref() {
            None | Some("") => Some(Gender::default()),
            Some(code) => Gender::from_code(code)
                .map_err(|e| errors.push("gender", e.to_string()))
                .ok(),
        };

        let address = self
            .address
            .map(|a| a.trim().to_owned())
            .filter(|a| !a.is_empty());

        match (first_name, last_name, email, phone, gender) {
            (Some(first_name), Some(last_name), Some(email), Some(phone), Some(gender))
                if errors.is_empty() =>
            {
                Ok(NewAccount {
                    first_name,
                    last_name,
                    email,
                    phone,
                    gender,
                    address,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Request body for `PUT /accounts/{id}`. Any subset of the create
/// fields; absent or blank fields leave the stored values untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl UpdateAccountRequest {
    /// Build the merge set from provided, non-blank fields, validating
    /// each one. Blanking a field is not a way to erase it.
    ///
    /// # Errors
    ///
    /// Returns the per-field failure map if any provided field is
    /// malformed.
    pub fn into_patch(self) -> Result<AccountPatch, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut patch = AccountPatch::default();

        if let Some(value) = non_blank(self.first_name) {
            patch.first_name = PersonName::parse(&value)
                .map_err(|e| errors.push("firstName", e.to_string()))
                .ok();
        }
        if let Some(value) = non_blank(self.last_name) {
            patch.last_name = PersonName::parse(&value)
                .map_err(|e| errors.push("lastName", e.to_string()))
                .ok();
        }
        if let Some(value) = non_blank(self.email) {
            patch.email = Email::parse(&value)
                .map_err(|e| errors.push("email", e.to_string()))
                .ok();
        }
        if let Some(value) = non_blank(self.phone) {
            patch.phone = Phone::parse(&value)
                .map_err(|e| errors.push("phone", e.to_string()))
                .ok();
        }
        if let Some(value) = non_blank(self.gender) {
            patch.gender = Gender::from_code(&value)
                .map_err(|e| errors.push("gender", e.to_string()))
                .ok();
        }
        patch.address = non_blank(self.address);

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}

/// Treat absent and whitespace-only values alike.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Parse a path id, mapping malformed ids to 404: a record with a
/// non-UUID id cannot exist.
fn parse_id(raw: &str) -> Result<AccountId, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(not_found_message(raw)))
}

fn not_found_message(id: &str) -> String {
    format!("Account with id {id} not found")
}

/// List all accounts.
///
/// GET /accounts
///
/// # Errors
///
/// Returns `AppError` if the store query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Account>>, AppError> {
    let accounts = state
        .accounts()
        .get_accounts()
        .await
        .map_err(AppError::Store)?;
    Ok(Json(accounts))
}

/// Get one account by id.
///
/// GET /accounts/{id}
///
/// # Errors
///
/// Returns 404 if the id is unknown.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Account>, AppError> {
    let account_id = parse_id(&id)?;
    let account = state
        .accounts()
        .get_account(account_id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => AppError::NotFound(not_found_message(&id)),
            other => AppError::Store(other),
        })?;
    Ok(Json(account))
}

/// Create an account.
///
/// POST /accounts
///
/// # Errors
///
/// Returns 400 on validation failure or when the email or phone is
/// already in use.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<Json<Account>, AppError> {
    let new_account = req.validate().map_err(AppError::Validation)?;
    let created = state
        .accounts()
        .create_account(new_account)
        .await
        .map_err(|e| match e {
            StoreError::Conflict(message) => AppError::BadRequest(message),
            other => AppError::Store(other),
        })?;
    Ok(Json(created))
}

/// Partially update an account.
///
/// PUT /accounts/{id}
///
/// # Errors
///
/// Returns 404 if the id is unknown, 400 on validation failure, 403 if
/// the new email or phone is already used by another account.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<Account>, AppError> {
    let account_id = parse_id(&id)?;
    let service = state.accounts();

    // Existence check owns the 404; conflicts afterwards are 403
    service.get_account(account_id).await.map_err(|e| match e {
        StoreError::NotFound => AppError::NotFound(not_found_message(&id)),
        other => AppError::Store(other),
    })?;

    let patch = req.into_patch().map_err(AppError::Validation)?;
    let updated = service
        .update_account(account_id, patch)
        .await
        .map_err(|e| match e {
            StoreError::Conflict(message) => AppError::Forbidden(message),
            StoreError::NotFound => AppError::NotFound(not_found_message(&id)),
            other => AppError::Store(other),
        })?;
    Ok(Json(updated))
}

/// Delete an account, returning its last known representation.
///
/// DELETE /accounts/{id}
///
/// # Errors
///
/// Returns 404 if the id is unknown.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Account>, AppError> {
    let account_id = parse_id(&id)?;
    let service = state.accounts();

    let account = service.get_account(account_id).await.map_err(|e| match e {
        StoreError::NotFound => AppError::NotFound(not_found_message(&id)),
        other => AppError::Store(other),
    })?;

    service
        .delete_account(account_id)
        .await
        .map_err(AppError::Store)?;
    Ok(Json(account))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_create() -> CreateAccountRequest {
        CreateAccountRequest {
            first_name: "Mark".to_owned(),
            last_name: "Smith".to_owned(),
            email: "mark.smith@gmail.com".to_owned(),
            phone: "01117890003".to_owned(),
            gender: Some("M".to_owned()),
            address: None,
        }
    }

    #[test]
    fn test_create_validate_ok() {
        let account = valid_create().validate().unwrap();
        assert_eq!(account.first_name.as_str(), "Mark");
        assert_eq!(account.gender, Gender::Male);
        assert_eq!(account.address, None);
    }

    #[test]
    fn test_create_validate_defaults_gender() {
        let mut req = valid_create();
        req.gender = None;
        let account = req.validate().unwrap();
        assert_eq!(account.gender, Gender::None);
    }

    #[test]
    fn test_create_validate_collects_all_failures() {
        let req = CreateAccountRequest {
            first_name: "ab".to_owned(),
            last_name: String::new(),
            email: "not-an-email".to_owned(),
            phone: "123".to_owned(),
            gender: Some("X".to_owned()),
            address: None,
        };

        let errors = req.validate().unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        for field in ["firstName", "lastName", "email", "phone", "gender"] {
            assert!(json.get(field).is_some(), "missing error for {field}");
        }
    }

    #[test]
    fn test_create_validate_blank_address_becomes_none() {
        let mut req = valid_create();
        req.address = Some("   ".to_owned());
        let account = req.validate().unwrap();
        assert_eq!(account.address, None);
    }

    #[test]
    fn test_update_patch_skips_absent_and_blank_fields() {
        let req = UpdateAccountRequest {
            first_name: Some("Rishi".to_owned()),
            last_name: Some(String::new()),
            email: Some("   ".to_owned()),
            ..UpdateAccountRequest::default()
        };

        let patch = req.into_patch().unwrap();
        assert_eq!(patch.first_name.unwrap().as_str(), "Rishi");
        assert!(patch.last_name.is_none());
        assert!(patch.email.is_none());
        assert!(patch.phone.is_none());
    }

    #[test]
    fn test_update_patch_rejects_invalid_provided_field() {
        let req = UpdateAccountRequest {
            email: Some("broken".to_owned()),
            ..UpdateAccountRequest::default()
        };

        let errors = req.into_patch().unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        assert!(json.get("email").is_some());
    }

    #[test]
    fn test_update_patch_empty_body_is_empty_patch() {
        let patch = UpdateAccountRequest::default().into_patch().unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_parse_id_rejects_malformed() {
        assert!(matches!(
            parse_id("not-a-uuid"),
            Err(AppError::NotFound(_))
        ));
        assert!(parse_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
    }
}
