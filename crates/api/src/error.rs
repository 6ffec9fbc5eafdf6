//! Unified error handling for the account API.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;

/// Per-field validation failures, collected before the service boundary.
///
/// Keyed by the JSON field name as the caller sent it (`firstName`, not
/// `first_name`).
#[derive(Debug, Default, Serialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure message for a field.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Returns `true` if no failures were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Application-level error type for the account API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed (database error or corrupt data).
    #[error("store error: {0}")]
    Store(#[source] StoreError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness conflict rejected on an update.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client (including create-path conflicts).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body failed field validation.
    #[error("validation failed")]
    Validation(ValidationErrors),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body for error responses: a message, plus per-field errors for
/// validation failures.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<ValidationErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Store(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Account API request error"
            );
        }

        let status = match &self {
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let body = match self {
            Self::Store(_) | Self::Internal(_) => ErrorBody {
                message: "Internal server error".to_string(),
                errors: None,
            },
            Self::Validation(errors) => ErrorBody {
                message: "Validation failed".to_string(),
                errors: Some(errors),
            },
            other => ErrorBody {
                message: other.to_string(),
                errors: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Account with id 42 not found".to_string());
        assert_eq!(err.to_string(), "Not found: Account with id 42 not found");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Forbidden("test".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Validation(ValidationErrors::new())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_errors_collects_per_field() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.push("firstName", "name must be at least 3 characters");
        errors.push("firstName", "name cannot be empty");
        errors.push("email", "email must contain an @ symbol");
        assert!(!errors.is_empty());

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json.get("firstName").unwrap().as_array().unwrap().len(),
            2
        );
        assert!(json.get("email").is_some());
    }
}
