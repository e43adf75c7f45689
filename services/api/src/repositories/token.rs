//! Token repository: issue, revoke, and resolve opaque session tokens
//!
//! Tokens are uuid-valued database rows, not signed structures. A token
//! resolves only while it is non-deleted, younger than the configured TTL,
//! and its owning user is non-deleted. Once revoked it never resolves again.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::Token;

/// Token repository
#[derive(Clone)]
pub struct TokenRepository {
    pool: PgPool,
    ttl_seconds: u64,
}

/// Strip the optional "Bearer " prefix from an incoming header value
pub fn strip_bearer(raw: &str) -> &str {
    raw.strip_prefix("Bearer ").unwrap_or(raw).trim()
}

impl TokenRepository {
    /// Create a new token repository with a server-side TTL
    pub fn new(pool: PgPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    /// Issue a new active token for a user
    pub async fn issue(&self, user_id: i64) -> Result<Token> {
        info!("Issuing token for user id {}", user_id);

        let token = sqlx::query_as::<_, Token>(
            r#"
            INSERT INTO tokens (user_id)
            VALUES ($1)
            RETURNING token_id, token_uuid, user_id, is_deleted, created
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(token)
    }

    /// Revoke a token by internal id
    pub async fn revoke(&self, token_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tokens
            SET is_deleted = TRUE
            WHERE token_id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(token_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Revoke every active token a user holds; login calls this before
    /// issuing a replacement
    pub async fn revoke_active_for_user(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE tokens
            SET is_deleted = TRUE
            WHERE user_id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Resolve a raw bearer value to the active token row
    ///
    /// Accepts the value with or without a "Bearer " prefix. A value that is
    /// not a uuid, a revoked token, an expired token, and a token of a
    /// deleted user all resolve to `None`.
    pub async fn resolve(&self, raw_value: &str) -> Result<Option<Token>> {
        let Ok(token_uuid) = Uuid::parse_str(strip_bearer(raw_value)) else {
            return Ok(None);
        };

        let token = sqlx::query_as::<_, Token>(
            r#"
            SELECT t.token_id, t.token_uuid, t.user_id, t.is_deleted, t.created
            FROM tokens AS t
            INNER JOIN users AS u ON u.user_id = t.user_id
            WHERE t.token_uuid = $1
              AND t.is_deleted = FALSE
              AND u.is_deleted = FALSE
              AND t.created > now() - make_interval(secs => $2)
            "#,
        )
        .bind(token_uuid)
        .bind(self.ttl_seconds as f64)
        .fetch_optional(&self.pool)
        .await?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bearer() {
        assert_eq!(strip_bearer("Bearer abc-123"), "abc-123");
        assert_eq!(strip_bearer("abc-123"), "abc-123");
        assert_eq!(strip_bearer("Bearer abc-123 "), "abc-123");
        assert_eq!(strip_bearer(""), "");
    }
}
