//! Request authentication, session lifecycle, and revocation cleanup.

pub mod authenticator;
pub mod cleanup;
pub mod lifecycle;

pub use authenticator::{SessionAuthenticator, credential_from};
pub use cleanup::RevocationCleanup;
pub use lifecycle::{IssuedToken, SessionLifecycle};
