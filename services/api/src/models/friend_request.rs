//! Friend-request model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Friend-request entity, a directional edge in the social graph
///
/// Friendship is realized by `is_accepted = true` regardless of direction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FriendRequest {
    pub friend_request_id: i64,
    pub friend_request_uuid: Uuid,
    pub sender_user_id: i64,
    pub receiver_user_id: i64,
    pub is_accepted: bool,
    pub is_deleted: bool,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}
