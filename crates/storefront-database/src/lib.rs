//! # storefront-database
//!
//! PostgreSQL connection management, migrations, and the repositories backing
//! credential verification and token revocation.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
