//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API DTOs
//! (which carry `#[serde(rename)]` for the camelCase wire shape).

use serde::{Deserialize, Serialize};

/// A user identity as the credential directory exposes it.
///
/// Owned and mutated exclusively by the directory; this subsystem only
/// reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject — user ID (standard JWT `sub` claim).
    pub sub: String,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}
