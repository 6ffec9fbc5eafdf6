//! Domain records for the account API.

pub mod account;

pub use account::{Account, AccountPatch, NewAccount};
