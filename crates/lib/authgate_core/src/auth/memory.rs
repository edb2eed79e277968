//! In-memory credential directory and renewal token store.
//!
//! Backs the session flows in tests without a database. Both traits are
//! implemented on one backend over a single mutex, so per-user writes are
//! serialized just like the Postgres upsert.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::directory::CredentialDirectory;
use super::renewal::{RenewalTokenStore, hash_renewal_token};
use super::{AuthError, password};
use crate::models::auth::User;

#[derive(Default)]
struct MemoryState {
    /// user id → account record.
    users: HashMap<String, MemoryUser>,
    /// user id → renewal token hash (at most one per user).
    tokens: HashMap<String, String>,
}

struct MemoryUser {
    user: User,
    password_hash: String,
}

/// Map-backed auth backend.
#[derive(Default)]
pub struct MemoryAuthBackend {
    state: Mutex<MemoryState>,
}

impl MemoryAuthBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialDirectory for MemoryAuthBackend {
    async fn create_user(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let mut violations = password::policy_violations(password);
        {
            let state = self.state.lock().expect("memory state poisoned");
            if state.users.values().any(|u| u.user.email == email) {
                violations.push("Email already registered".to_string());
            }
        }
        if !violations.is_empty() {
            return Err(AuthError::Rejected(violations));
        }

        let password_hash = password::hash_password(password)?;
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
        };
        let mut state = self.state.lock().expect("memory state poisoned");
        state.users.insert(
            user.id.clone(),
            MemoryUser {
                user: user.clone(),
                password_hash,
            },
        );
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let state = self.state.lock().expect("memory state poisoned");
        Ok(state
            .users
            .values()
            .find(|u| u.user.email == email)
            .map(|u| u.user.clone()))
    }

    async fn check_password(&self, user: &User, password: &str) -> Result<bool, AuthError> {
        let hash = {
            let state = self.state.lock().expect("memory state poisoned");
            match state.users.get(&user.id) {
                Some(record) => record.password_hash.clone(),
                None => return Ok(false),
            }
        };
        password::verify_password(password, &hash)
    }
}

#[async_trait]
impl RenewalTokenStore for MemoryAuthBackend {
    async fn save(&self, user_id: &str, token: &str) -> Result<(), AuthError> {
        let mut state = self.state.lock().expect("memory state poisoned");
        if !state.users.contains_key(user_id) {
            return Err(AuthError::NotFound);
        }
        state
            .tokens
            .insert(user_id.to_string(), hash_renewal_token(token));
        Ok(())
    }

    async fn validate(&self, user_id: &str, token: &str) -> Result<bool, AuthError> {
        let state = self.state.lock().expect("memory state poisoned");
        Ok(state
            .tokens
            .get(user_id)
            .is_some_and(|stored| *stored == hash_renewal_token(token)))
    }

    async fn resolve(&self, token: &str) -> Result<Option<String>, AuthError> {
        let hash = hash_renewal_token(token);
        let state = self.state.lock().expect("memory state poisoned");
        Ok(state
            .tokens
            .iter()
            .find(|(_, stored)| **stored == hash)
            .map(|(user_id, _)| user_id.clone()))
    }

    async fn revoke(&self, user_id: &str) -> Result<(), AuthError> {
        let mut state = self.state.lock().expect("memory state poisoned");
        state.tokens.remove(user_id);
        Ok(())
    }
}
