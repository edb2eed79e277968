//! Application error types.

use std::collections::HashMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Client error carrying per-field messages.
    #[error("{message}")]
    Rejected {
        message: String,
        errors: HashMap<String, Vec<String>>,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(m) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: m,
                    errors: None,
                },
            ),
            AppError::Rejected { message, errors } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message,
                    errors: Some(errors),
                },
            ),
            AppError::Unauthorized(m) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    message: m,
                    errors: None,
                },
            ),
            AppError::NotFound(m) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    message: m,
                    errors: None,
                },
            ),
            // Never leak internal detail to the caller.
            AppError::Internal(m) => {
                error!(detail = %m, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        message: "Internal server error".into(),
                        errors: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<authgate_core::auth::AuthError> for AppError {
    fn from(e: authgate_core::auth::AuthError) -> Self {
        use authgate_core::auth::AuthError;
        match e {
            AuthError::CredentialError => {
                AppError::Unauthorized("Invalid email or password".into())
            }
            AuthError::Rejected(violations) => AppError::Rejected {
                message: "Registration failed".into(),
                errors: HashMap::from([("errors".to_string(), violations)]),
            },
            AuthError::NotFound => AppError::NotFound("Unknown user".into()),
            AuthError::TokenError(m) => AppError::Internal(m),
            AuthError::DbError(e) => AppError::Internal(e.to_string()),
            AuthError::Internal(m) => AppError::Internal(m),
        }
    }
}
