//! Issued bearer tokens, tracked by their `jti` claim so they can be revoked.

use inkpost_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `access_tokens` table.
#[derive(Debug, Clone, FromRow)]
pub struct AccessToken {
    pub id: DbId,
    pub user_id: DbId,
    pub jti: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateAccessToken {
    pub user_id: DbId,
    pub jti: String,
    pub expires_at: Timestamp,
}
