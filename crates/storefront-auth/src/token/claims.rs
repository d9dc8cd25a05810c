//! Claims carried by every session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id. Always positive.
    pub sub: i64,
    /// Whether the subject holds the admin capability.
    pub privileged: bool,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Token id; makes tokens issued in the same second distinct.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the user id from the subject claim.
    pub fn subject_id(&self) -> i64 {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    ///
    /// Timestamps beyond chrono's range saturate to the far future so that a
    /// revocation record derived from them never lapses early.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Whether the token is expired at `now` (seconds since epoch).
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }

    /// Remaining lifetime at `now`, zero once expired.
    pub fn remaining_ttl(&self, now: i64) -> std::time::Duration {
        let remaining = self.exp.saturating_sub(now);
        std::time::Duration::from_secs(u64::try_from(remaining).unwrap_or(0))
    }
}
