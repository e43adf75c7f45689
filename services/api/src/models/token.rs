//! Session token model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Token entity
///
/// `token_uuid` is the opaque bearer value clients send back; it carries no
/// structure and no embedded expiry. Expiry is enforced server-side by the
/// token repository's TTL check.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Token {
    pub token_id: i64,
    pub token_uuid: Uuid,
    pub user_id: i64,
    pub is_deleted: bool,
    pub created: DateTime<Utc>,
}
