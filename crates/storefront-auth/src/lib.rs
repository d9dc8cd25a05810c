//! # storefront-auth
//!
//! Token-based session authentication for the Storefront backend.
//!
//! ## Modules
//!
//! - `token`: signed session token encoding and verification
//! - `session`: request authentication, login/logout, and revocation cleanup
//! - `revocation`: revocation store backends (database and cache)
//! - `password`: Argon2id password verification
//! - `credentials`: database-backed credential verification

pub mod credentials;
pub mod error;
pub mod password;
pub mod revocation;
pub mod session;
pub mod token;


pub use credentials::DatabaseUserStore;
pub use error::{AuthError, DenyReason};
pub use password::PasswordHasher;
pub use revocation::{CacheRevocationStore, DatabaseRevocationStore};
pub use session::{
    IssuedToken, RevocationCleanup, SessionAuthenticator, SessionLifecycle, credential_from,
};
pub use token::{Claims, TokenCodec};
