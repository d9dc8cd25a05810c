//! Credential verification trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// A subject whose credentials were verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedSubject {
    /// Stable positive user id.
    pub subject_id: i64,
    /// Whether the subject holds the privileged (admin) capability.
    pub privileged: bool,
}

/// Looks up users by identifier and checks their secret.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Returns the subject when `identifier` exists and `secret` matches.
    ///
    /// An unknown identifier and a wrong secret both yield `Ok(None)`.
    async fn verify_credentials(
        &self,
        identifier: &str,
        secret: &str,
    ) -> AppResult<Option<VerifiedSubject>>;
}
