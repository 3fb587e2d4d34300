//! API token hashing.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a raw API token. Only the hash is stored.
#[must_use]
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
