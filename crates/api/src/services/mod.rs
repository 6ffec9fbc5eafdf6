//! Business logic services.

pub mod accounts;

pub use accounts::AccountService;
