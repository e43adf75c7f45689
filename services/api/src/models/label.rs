//! Label model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Label entity, a tag deduplicated by name among non-deleted rows
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Label {
    pub label_id: i64,
    pub label_name: String,
    pub is_deleted: bool,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}
