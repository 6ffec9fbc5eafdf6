//! Wordsmith Core - Shared domain types.
//!
//! This crate provides the validated domain primitives used across the
//! account API workspace:
//!
//! - [`AccountId`] - UUID newtype identifying an account
//! - [`Email`] - validated email address (unique per account)
//! - [`Phone`] - validated phone number (unique per account)
//! - [`PersonName`] - length-bounded given/family name
//! - [`Gender`] - enumerated gender with single-letter wire codes
//!
//! All parsing constructors follow the parse-don't-validate pattern: once a
//! value exists, it is known to be well formed. With the `postgres` feature
//! enabled, each type can be bound and decoded directly through sqlx.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod types;

pub use types::email::{Email, EmailError};
pub use types::gender::{Gender, GenderError};
pub use types::id::AccountId;
pub use types::name::{NameError, PersonName};
pub use types::phone::{Phone, PhoneError};
