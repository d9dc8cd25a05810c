//! Concrete repository implementations backed by PostgreSQL.

pub mod revocation;
pub mod user;

pub use revocation::RevocationRepository;
pub use user::{UserCredentials, UserRepository};
