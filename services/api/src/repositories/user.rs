//! User repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{NewUser, PublicUser, User};

/// Page size for user search results
const SEARCH_PAGE_SIZE: i64 = 10;

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user; the account starts unverified
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        info!("Creating new user: {}", new_user.user_email);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_name, user_email, hashed_password, password_salt, random_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING user_id, user_uuid, user_name, user_email, hashed_password,
                      password_salt, email_verified, random_id, is_deleted, created, modified
            "#,
        )
        .bind(&new_user.user_name)
        .bind(&new_user.user_email)
        .bind(&new_user.hashed_password)
        .bind(&new_user.password_salt)
        .bind(new_user.random_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check whether an email is already taken by a non-deleted account
    pub async fn email_taken(&self, email: &str) -> Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT user_id
            FROM users
            WHERE user_email = $1 AND is_deleted = FALSE
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// Find a non-deleted user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, user_uuid, user_name, user_email, hashed_password,
                   password_salt, email_verified, random_id, is_deleted, created, modified
            FROM users
            WHERE user_email = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a non-deleted user by internal id
    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, user_uuid, user_name, user_email, hashed_password,
                   password_salt, email_verified, random_id, is_deleted, created, modified
            FROM users
            WHERE user_id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a non-deleted user by public uuid
    pub async fn find_by_uuid(&self, user_uuid: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, user_uuid, user_name, user_email, hashed_password,
                   password_salt, email_verified, random_id, is_deleted, created, modified
            FROM users
            WHERE user_uuid = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(user_uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Resolve a public uuid to the internal user id
    pub async fn resolve_uuid(&self, user_uuid: Uuid) -> Result<Option<i64>> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT user_id
            FROM users
            WHERE user_uuid = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(user_uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id,)| id))
    }

    /// Flip `email_verified` to true; idempotent
    pub async fn mark_email_verified(&self, user_id: i64) -> Result<bool> {
        info!("Marking email verified for user id {}", user_id);

        let result = sqlx::query(
            r#"
            UPDATE users
            SET email_verified = TRUE, modified = now()
            WHERE user_id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Search users by exact name or email match, paginated
    ///
    /// `page` is 1-based; the page size is fixed at 10.
    pub async fn search(&self, phrase: &str, page: i64) -> Result<Vec<PublicUser>> {
        let offset = SEARCH_PAGE_SIZE * (page.max(1) - 1);

        let users = sqlx::query_as::<_, PublicUser>(
            r#"
            SELECT DISTINCT user_uuid, user_name, random_id
            FROM users
            WHERE (user_name = $1 OR user_email = $1)
              AND is_deleted = FALSE
            ORDER BY user_name, random_id, user_uuid
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(phrase)
        .bind(offset)
        .bind(SEARCH_PAGE_SIZE)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
