//! Domain primitives for the account API.
//!
//! Each submodule defines one validated wrapper type. Keeping them separate
//! from the API crate lets the store, service, and route layers share a
//! single definition of "well formed".

pub mod email;
pub mod gender;
pub mod id;
pub mod name;
pub mod phone;
