//! API server configuration.

use authgate_core::auth::jwt::resolve_jwt_secret;

/// Configuration for the API server. Read once at startup, immutable after.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// `iss` claim stamped into access tokens.
    pub token_issuer: String,
    /// `aud` claim stamped into access tokens.
    pub token_audience: String,
    /// Allowed CORS origins; `*` allows any.
    pub allowed_origins: Vec<String>,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                     | Default                                  |
    /// |------------------------------|------------------------------------------|
    /// | `BIND_ADDR`                  | `127.0.0.1:8080`                         |
    /// | `DATABASE_URL`               | `postgres://localhost:5432/authgate`     |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted to file            |
    /// | `TOKEN_ISSUER`               | `authgate`                               |
    /// | `TOKEN_AUDIENCE`             | `authgate-clients`                       |
    /// | `CORS_ALLOWED_ORIGINS`       | `*` (comma-separated list)               |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/authgate".into()),
            jwt_secret: resolve_jwt_secret(),
            token_issuer: std::env::var("TOKEN_ISSUER").unwrap_or_else(|_| "authgate".into()),
            token_audience: std::env::var("TOKEN_AUDIENCE")
                .unwrap_or_else(|_| "authgate-clients".into()),
            allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}
