//! Revocation store backends.
//!
//! Both backends key records by [`fingerprint`] of the exact token string,
//! so per-token semantics hold without persisting usable bearer material.

pub mod cache_store;
pub mod database_store;
pub mod fingerprint;

pub use cache_store::CacheRevocationStore;
pub use database_store::DatabaseRevocationStore;
pub use fingerprint::fingerprint;
