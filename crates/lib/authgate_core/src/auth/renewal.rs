//! Renewal token generation and the store contract.
//!
//! A renewal token is an opaque high-entropy secret exchanged for a new
//! access token without re-presenting the password. At most one live token
//! exists per user: saving a new one replaces any prior token.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rand::{Rng, rng};
use sha2::{Digest, Sha256};

use super::AuthError;

/// Raw entropy per renewal token: 256 bits.
const RENEWAL_TOKEN_BYTES: usize = 32;

/// Generate a renewal token: 32 CSPRNG bytes, base64-encoded.
pub fn generate_renewal_token() -> String {
    let mut bytes = [0u8; RENEWAL_TOKEN_BYTES];
    rng().fill(&mut bytes[..]);
    STANDARD.encode(bytes)
}

/// SHA-256 hash a renewal token for storage.
///
/// Only the digest is ever persisted, and lookups compare digests, so a
/// mismatched token costs the same regardless of where it diverges from
/// the stored one.
pub fn hash_renewal_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Durable association of renewal tokens with user identities.
///
/// Implementations must serialize per-user writes (last writer wins) and
/// must never store token plaintext.
#[async_trait]
pub trait RenewalTokenStore: Send + Sync {
    /// Persist `token` as the sole renewal token for `user_id`, replacing
    /// any existing one. Fails with [`AuthError::NotFound`] when `user_id`
    /// does not resolve to a known identity.
    async fn save(&self, user_id: &str, token: &str) -> Result<(), AuthError>;

    /// True iff the stored token for `user_id` matches `token`.
    async fn validate(&self, user_id: &str, token: &str) -> Result<bool, AuthError>;

    /// Reverse lookup: which user owns the presented token, if any.
    async fn resolve(&self, token: &str) -> Result<Option<String>, AuthError>;

    /// Delete the stored token for `user_id`. Idempotent: revoking an
    /// absent token is not an error.
    async fn revoke(&self, user_id: &str) -> Result<(), AuthError>;
}
