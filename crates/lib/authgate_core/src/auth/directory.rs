//! The credential directory abstraction.
//!
//! Account storage and password verification live behind this trait so the
//! session flows can run against an in-memory map in tests and Postgres in
//! production.

use async_trait::async_trait;

use super::AuthError;
use crate::models::auth::User;

/// Stores user records and verifies passwords.
#[async_trait]
pub trait CredentialDirectory: Send + Sync {
    /// Create an account. Duplicate emails and policy violations surface as
    /// [`AuthError::Rejected`] with the per-field messages verbatim.
    async fn create_user(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Look up an identity by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Check a password against the stored hash. A failed attempt never
    /// blocks subsequent attempts (no lockout).
    async fn check_password(&self, user: &User, password: &str) -> Result<bool, AuthError>;
}
