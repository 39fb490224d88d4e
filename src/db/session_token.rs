//! Server-side session token repository.
//!
//! Session tokens are the opaque values carried by the session cookie; each
//! row references the owning user and carries expiry/revocation timestamps.

use sqlx::SqlitePool;

use crate::{GymDeskError, Result};

/// Session token entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionToken {
    /// Token ID.
    pub id: i64,
    /// User ID.
    pub user_id: i64,
    /// Token string (uuid v4).
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Revocation timestamp (None if not revoked).
    pub revoked_at: Option<String>,
}

/// New session token for creation.
pub struct NewSessionToken {
    /// User ID.
    pub user_id: i64,
    /// Token string.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: String,
}

/// Repository for session token operations.
pub struct SessionTokenRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionTokenRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new session token.
    pub async fn create(&self, new_token: &NewSessionToken) -> Result<SessionToken> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO session_tokens (user_id, token, expires_at) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(new_token.user_id)
        .bind(&new_token.token)
        .bind(&new_token.expires_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| GymDeskError::NotFound("session token".into()))
    }

    /// Get a session token by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<SessionToken>> {
        let token = sqlx::query_as::<_, SessionToken>(
            "SELECT id, user_id, token, expires_at, created_at, revoked_at
             FROM session_tokens WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(token)
    }

    /// Get a session token by token string, regardless of validity.
    pub async fn get_by_token(&self, token: &str) -> Result<Option<SessionToken>> {
        let result = sqlx::query_as::<_, SessionToken>(
            "SELECT id, user_id, token, expires_at, created_at, revoked_at
             FROM session_tokens WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a valid (not expired, not revoked) session token.
    pub async fn get_valid_token(&self, token: &str) -> Result<Option<SessionToken>> {
        let result = sqlx::query_as::<_, SessionToken>(
            "SELECT id, user_id, token, expires_at, created_at, revoked_at
             FROM session_tokens
             WHERE token = ?
               AND revoked_at IS NULL
               AND expires_at > datetime('now')",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Revoke a session token. Returns true if a live token was revoked.
    pub async fn revoke(&self, token: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE session_tokens SET revoked_at = datetime('now')
             WHERE token = ? AND revoked_at IS NULL",
        )
        .bind(token)
        .execute(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Revoke all tokens for a user.
    pub async fn revoke_all_for_user(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE session_tokens SET revoked_at = datetime('now')
             WHERE user_id = ? AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// Delete expired and revoked tokens (cleanup).
    pub async fn cleanup_expired(&self) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM session_tokens
             WHERE expires_at < datetime('now') OR revoked_at IS NOT NULL",
        )
        .execute(self.pool)
        .await
        .map_err(|e| GymDeskError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
