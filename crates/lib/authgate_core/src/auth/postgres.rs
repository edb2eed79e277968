//! Postgres-backed credential directory and renewal token store.

use async_trait::async_trait;
use sqlx::PgPool;

use super::directory::CredentialDirectory;
use super::renewal::{RenewalTokenStore, hash_renewal_token};
use super::{AuthError, password, queries};
use crate::models::auth::User;

/// Production backend: one connection pool serving both the credential
/// directory and the renewal token store.
#[derive(Clone)]
pub struct PgAuthBackend {
    pool: PgPool,
}

impl PgAuthBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialDirectory for PgAuthBackend {
    async fn create_user(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let mut violations = password::policy_violations(password);
        if queries::email_exists(&self.pool, email).await? {
            violations.push("Email already registered".to_string());
        }
        if !violations.is_empty() {
            return Err(AuthError::Rejected(violations));
        }

        let password_hash = password::hash_password(password)?;
        let user_id = queries::create_user(&self.pool, email, &password_hash).await?;
        Ok(User {
            id: user_id,
            email: email.to_string(),
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row = queries::find_user_by_email(&self.pool, email).await?;
        Ok(row.map(|(id, _)| User {
            id,
            email: email.to_string(),
        }))
    }

    async fn check_password(&self, user: &User, password: &str) -> Result<bool, AuthError> {
        let row = queries::find_user_by_email(&self.pool, &user.email).await?;
        match row {
            Some((_, hash)) => password::verify_password(password, &hash),
            None => Ok(false),
        }
    }
}

#[async_trait]
impl RenewalTokenStore for PgAuthBackend {
    async fn save(&self, user_id: &str, token: &str) -> Result<(), AuthError> {
        queries::upsert_renewal_token(&self.pool, user_id, &hash_renewal_token(token)).await
    }

    async fn validate(&self, user_id: &str, token: &str) -> Result<bool, AuthError> {
        queries::renewal_token_matches(&self.pool, user_id, &hash_renewal_token(token)).await
    }

    async fn resolve(&self, token: &str) -> Result<Option<String>, AuthError> {
        queries::resolve_renewal_token(&self.pool, &hash_renewal_token(token)).await
    }

    async fn revoke(&self, user_id: &str) -> Result<(), AuthError> {
        queries::delete_renewal_token(&self.pool, user_id).await
    }
}
