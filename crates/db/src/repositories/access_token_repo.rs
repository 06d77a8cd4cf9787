//! Repository for the `access_tokens` table.

use sqlx::PgPool;

use crate::models::access_token::{AccessToken, CreateAccessToken};

const COLUMNS: &str = "id, user_id, jti, expires_at, revoked_at, created_at";

/// Tracks issued bearer tokens by `jti`.
pub struct AccessTokenRepo;

impl AccessTokenRepo {
    /// Record a newly issued token.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAccessToken,
    ) -> Result<AccessToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO access_tokens (user_id, jti, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessToken>(&query)
            .bind(input.user_id)
            .bind(&input.jti)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Whether `jti` names a token that is neither revoked nor expired.
    pub async fn is_active(pool: &PgPool, jti: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM access_tokens
                WHERE jti = $1 AND revoked_at IS NULL AND expires_at > NOW()
             )",
        )
        .bind(jti)
        .fetch_one(pool)
        .await
    }

    /// Revoke a token. Returns `false` if it was unknown or already revoked.
    pub async fn revoke(pool: &PgPool, jti: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE access_tokens SET revoked_at = NOW()
             WHERE jti = $1 AND revoked_at IS NULL",
        )
        .bind(jti)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
