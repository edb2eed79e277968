//! Auth-related database queries.

use sqlx::PgPool;

use super::AuthError;

/// Postgres error code for foreign key violations.
const FK_VIOLATION: &str = "23503";

/// Fetch a user by email, returning (id, password_hash).
pub async fn find_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<(String, String)>, AuthError> {
    let row = sqlx::query_as::<_, (String, String)>(
        "SELECT id::text, password_hash FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Create a new user, returning the user ID.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
) -> Result<String, AuthError> {
    let user_id = sqlx::query_scalar::<_, String>(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id::text",
    )
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;
    Ok(user_id)
}

/// Check whether an email is already registered.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Store a renewal token hash as the sole token for a user.
///
/// The upsert on the `user_id` primary key both enforces the
/// one-live-token-per-user invariant and serializes concurrent writes for
/// the same user at the storage layer.
pub async fn upsert_renewal_token(
    pool: &PgPool,
    user_id: &str,
    token_hash: &str,
) -> Result<(), AuthError> {
    sqlx::query(
        "INSERT INTO renewal_tokens (user_id, token_hash) VALUES ($1::uuid, $2) \
         ON CONFLICT (user_id) DO UPDATE \
         SET token_hash = EXCLUDED.token_hash, created_at = now()",
    )
    .bind(user_id)
    .bind(token_hash)
    .execute(pool)
    .await
    .map_err(|e| {
        let fk_violation = e
            .as_database_error()
            .and_then(|d| d.code())
            .is_some_and(|code| code == FK_VIOLATION);
        if fk_violation {
            AuthError::NotFound
        } else {
            AuthError::DbError(e)
        }
    })?;
    Ok(())
}

/// True iff the stored token hash for `user_id` equals `token_hash`.
pub async fn renewal_token_matches(
    pool: &PgPool,
    user_id: &str,
    token_hash: &str,
) -> Result<bool, AuthError> {
    let matches = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM renewal_tokens \
         WHERE user_id = $1::uuid AND token_hash = $2)",
    )
    .bind(user_id)
    .bind(token_hash)
    .fetch_one(pool)
    .await?;
    Ok(matches)
}

/// Resolve a token hash to its owning user id.
pub async fn resolve_renewal_token(
    pool: &PgPool,
    token_hash: &str,
) -> Result<Option<String>, AuthError> {
    let row = sqlx::query_scalar::<_, String>(
        "SELECT user_id::text FROM renewal_tokens WHERE token_hash = $1",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Delete the renewal token for a user, if any.
pub async fn delete_renewal_token(pool: &PgPool, user_id: &str) -> Result<(), AuthError> {
    sqlx::query("DELETE FROM renewal_tokens WHERE user_id = $1::uuid")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
