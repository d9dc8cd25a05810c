//! # storefront-core
//!
//! Core crate for the Storefront backend. Contains configuration schemas,
//! the collaborator traits consumed by the authentication subsystem
//! (cache, revocation store, user store), and the unified error system.
//!
//! This crate has **no** internal dependencies on other Storefront crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
