//! Token fingerprinting.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the exact token string.
pub fn fingerprint(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
