//! Credential verification against the `users` table.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::{debug, error};

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{UserStore, VerifiedSubject};
use storefront_database::repositories::UserRepository;

use crate::password::PasswordHasher;

/// Argon2 hash compared against when the identifier has no account.
static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Returns the dummy hash, hashing it on first call. Blocking.
fn dummy_hash(hasher: &PasswordHasher) -> Option<&'static str> {
    DUMMY_HASH
        .get_or_init(|| hasher.hash("storefront-dummy-password").ok())
        .as_deref()
}

/// Verifies identifiers and secrets against stored Argon2id hashes.
///
/// Unknown identifiers are checked against a fixed dummy hash so that both
/// rejection paths cost one Argon2 verification.
#[derive(Debug, Clone)]
pub struct DatabaseUserStore {
    users: UserRepository,
    hasher: Arc<PasswordHasher>,
}

impl DatabaseUserStore {
    /// Creates a store over the user repository.
    pub fn new(users: UserRepository, hasher: Arc<PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Runs an Argon2 verification on a blocking thread.
    async fn verify(&self, secret: &str, hash: String) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let secret = secret.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&secret, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
    }

    /// Spends one Argon2 verification on a secret that has no account.
    ///
    /// The dummy hash is created on first use, on the blocking pool like the
    /// verification itself.
    async fn verify_unknown(&self, secret: &str) {
        let hasher = Arc::clone(&self.hasher);
        let secret = secret.to_string();
        let outcome = tokio::task::spawn_blocking(move || {
            hasher.verify(&secret, dummy_hash(&hasher)?).ok()
        })
        .await;
        if let Err(e) = outcome {
            error!(error = %e, "Dummy password verification task failed");
        }
    }
}

#[async_trait]
impl UserStore for DatabaseUserStore {
    async fn verify_credentials(
        &self,
        identifier: &str,
        secret: &str,
    ) -> AppResult<Option<VerifiedSubject>> {
        let Some(user) = self.users.find_credentials_by_email(identifier).await? else {
            self.verify_unknown(secret).await;
            debug!("Credential check for unknown identifier");
            return Ok(None);
        };

        match self.verify(secret, user.password_hash).await {
            Ok(true) => Ok(Some(VerifiedSubject {
                subject_id: user.id,
                privileged: user.is_admin,
            })),
            Ok(false) => Ok(None),
            Err(e) => {
                error!(subject_id = user.id, error = %e, "Stored password hash is unusable");
                Err(e)
            }
        }
    }
}
