//! Friend-request repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::FriendRequest;

/// Friend-request repository
#[derive(Clone)]
pub struct FriendRequestRepository {
    pool: PgPool,
}

impl FriendRequestRepository {
    /// Create a new friend-request repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a friend request from sender to receiver
    pub async fn create(&self, sender_user_id: i64, receiver_user_id: i64) -> Result<FriendRequest> {
        info!(
            "Creating friend request from user id {} to user id {}",
            sender_user_id, receiver_user_id
        );

        let friend_request = sqlx::query_as::<_, FriendRequest>(
            r#"
            INSERT INTO friend_requests (sender_user_id, receiver_user_id)
            VALUES ($1, $2)
            RETURNING friend_request_id, friend_request_uuid, sender_user_id,
                      receiver_user_id, is_accepted, is_deleted, created, modified
            "#,
        )
        .bind(sender_user_id)
        .bind(receiver_user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(friend_request)
    }

    /// Find a non-deleted friend request by public uuid
    pub async fn find_by_uuid(&self, friend_request_uuid: Uuid) -> Result<Option<FriendRequest>> {
        let friend_request = sqlx::query_as::<_, FriendRequest>(
            r#"
            SELECT friend_request_id, friend_request_uuid, sender_user_id,
                   receiver_user_id, is_accepted, is_deleted, created, modified
            FROM friend_requests
            WHERE friend_request_uuid = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(friend_request_uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(friend_request)
    }

    /// Mark a friend request accepted
    pub async fn accept(&self, friend_request_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE friend_requests
            SET is_accepted = TRUE, modified = now()
            WHERE friend_request_id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(friend_request_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete a friend request
    pub async fn soft_delete(&self, friend_request_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE friend_requests
            SET is_deleted = TRUE, modified = now()
            WHERE friend_request_id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(friend_request_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List a user's friend requests, filtered by acceptance
    ///
    /// Matches rows naming the user as sender or receiver; with
    /// `is_accepted = true` this is the user's friend list.
    pub async fn list_for_user(&self, user_id: i64, is_accepted: bool) -> Result<Vec<FriendRequest>> {
        let friend_requests = sqlx::query_as::<_, FriendRequest>(
            r#"
            SELECT friend_request_id, friend_request_uuid, sender_user_id,
                   receiver_user_id, is_accepted, is_deleted, created, modified
            FROM friend_requests
            WHERE (sender_user_id = $1 OR receiver_user_id = $1)
              AND is_accepted = $2
              AND is_deleted = FALSE
            ORDER BY created DESC
            "#,
        )
        .bind(user_id)
        .bind(is_accepted)
        .fetch_all(&self.pool)
        .await?;

        Ok(friend_requests)
    }
}
