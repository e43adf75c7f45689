//! XP ledger models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One XP ledger row; at most one per user per calendar day in practice
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct XpEntry {
    pub xp_id: i64,
    pub user_id: i64,
    pub xp_count: i32,
    pub created: DateTime<Utc>,
}

/// A leaderboard row: a connected user plus their current-week XP sum
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LeaderboardEntry {
    pub user_uuid: Uuid,
    pub user_name: String,
    pub random_id: i32,
    pub xp_count: i64,
}
