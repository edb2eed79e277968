//! Session orchestration — register/login/refresh/logout flows over the
//! credential directory, renewal token store, and access token issuer.

use std::collections::HashMap;

use tracing::info;

use authgate_core::auth::jwt::ACCESS_TOKEN_EXPIRY_SECS;
use authgate_core::auth::renewal::generate_renewal_token;
use authgate_core::models::auth::User;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{AuthSession, MessageResponse};

/// The one message used for every authentication failure on login, so the
/// response never reveals whether the account exists.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Generic rejection for bad renewal tokens, whatever the actual cause.
const INVALID_RENEWAL: &str = "Invalid or expired refresh token";

/// Register a new account. No tokens are issued; login is a separate step.
pub async fn register(state: &AppState, email: &str, password: &str) -> AppResult<MessageResponse> {
    let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();
    if email.is_empty() {
        field_errors.insert("email".into(), vec!["Email is required".into()]);
    }
    if password.is_empty() {
        field_errors.insert("password".into(), vec!["Password is required".into()]);
    }
    if !field_errors.is_empty() {
        return Err(AppError::Rejected {
            message: "Invalid request".into(),
            errors: field_errors,
        });
    }

    let user = state.directory.create_user(email, password).await?;
    info!(email = %user.email, "user registered");
    Ok(MessageResponse {
        message: "User registered successfully".into(),
    })
}

/// Authenticate with email + password and open a session.
pub async fn login(state: &AppState, email: &str, password: &str) -> AppResult<AuthSession> {
    let user = match state.directory.find_by_email(email).await? {
        // Same message as a wrong password: enumeration resistance.
        None => return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into())),
        Some(user) => user,
    };

    if !state.directory.check_password(&user, password).await? {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    let session = open_session(state, &user).await?;
    info!(email = %user.email, "user logged in");
    Ok(session)
}

/// Exchange a renewal token for a fresh session, rotating the token.
pub async fn refresh(state: &AppState, token: &str) -> AppResult<AuthSession> {
    let user_id = match state.renewal.resolve(token).await? {
        None => return Err(AppError::Unauthorized(INVALID_RENEWAL.into())),
        Some(user_id) => user_id,
    };

    // Re-check against the store keyed by user: the token may have been
    // rotated out between the reverse lookup and now.
    if !state.renewal.validate(&user_id, token).await? {
        return Err(AppError::Unauthorized(INVALID_RENEWAL.into()));
    }

    let renewal_token = generate_renewal_token();
    match state.renewal.save(&user_id, &renewal_token).await {
        Ok(()) => {}
        // The owning account disappeared since the token was issued.
        Err(authgate_core::auth::AuthError::NotFound) => {
            return Err(AppError::Unauthorized(INVALID_RENEWAL.into()));
        }
        Err(e) => return Err(e.into()),
    }

    let access_token = state.issuer.issue(&user_id).map_err(AppError::from)?;
    info!(user_id = %user_id, "session refreshed");
    Ok(build_session(access_token, renewal_token))
}

/// Revoke the caller's renewal token. Always succeeds, even when no token
/// was present.
pub async fn logout(state: &AppState, user_id: &str) -> AppResult<MessageResponse> {
    state.renewal.revoke(user_id).await?;
    info!(user_id = %user_id, "user logged out");
    Ok(MessageResponse {
        message: "Logged out successfully".into(),
    })
}

/// Generate + persist a renewal token and mint an access token.
///
/// The renewal token is saved before the response is shaped, so a caller
/// disconnect can never leave a reported session without a stored token.
async fn open_session(state: &AppState, user: &User) -> AppResult<AuthSession> {
    let renewal_token = generate_renewal_token();
    state.renewal.save(&user.id, &renewal_token).await?;

    let access_token = state.issuer.issue(&user.id).map_err(AppError::from)?;
    Ok(build_session(access_token, renewal_token))
}

fn build_session(access_token: String, renewal_token: String) -> AuthSession {
    AuthSession {
        token_type: "Bearer".into(),
        access_token,
        expires_in: ACCESS_TOKEN_EXPIRY_SECS,
        refresh_token: renewal_token,
    }
}
