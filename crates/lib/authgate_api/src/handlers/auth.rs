//! Authentication request handlers.

use axum::extract::State;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    AuthSession, LoginRequest, MessageResponse, RefreshRequest, RegisterRequest,
};
use crate::services::auth;

/// `POST /auth/register` — create a new user account.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<Json<MessageResponse>> {
    let resp = auth::register(&state, &body.email, &body.password).await?;
    Ok(Json(resp))
}

/// `POST /auth/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<AuthSession>> {
    let resp = auth::login(&state, &body.email, &body.password).await?;
    Ok(Json(resp))
}

/// `POST /auth/refresh` — exchange a renewal token for a fresh session.
pub async fn refresh_handler(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> AppResult<Json<AuthSession>> {
    let token = match body.refresh_token.as_deref() {
        None | Some("") => {
            return Err(AppError::Validation("Refresh token is required".into()));
        }
        Some(token) => token,
    };
    let resp = auth::refresh(&state, token).await?;
    Ok(Json(resp))
}

/// `POST /auth/logout` — revoke the caller's renewal token. Requires
/// authentication.
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(claims)): Extension<AuthenticatedUser>,
) -> AppResult<Json<MessageResponse>> {
    let resp = auth::logout(&state, &claims.sub).await?;
    Ok(Json(resp))
}
