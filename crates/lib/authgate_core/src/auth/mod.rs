//! Authentication primitives.
//!
//! Provides password hashing, access token issuance, renewal token
//! management, and the credential directory abstraction shared between the
//! HTTP layer and the server binary.

pub mod directory;
pub mod jwt;
pub mod memory;
pub mod password;
pub mod postgres;
pub mod queries;
pub mod renewal;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    CredentialError,

    /// Structured policy violations (duplicate email, weak password).
    /// Messages are surfaced to the caller verbatim.
    #[error("Registration rejected")]
    Rejected(Vec<String>),

    #[error("Unknown user")]
    NotFound,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
