//! Core traits defined in `storefront-core` and implemented by other crates.

pub mod cache;
pub mod revocation;
pub mod user_store;

pub use cache::CacheProvider;
pub use revocation::RevocationStore;
pub use user_store::{UserStore, VerifiedSubject};
