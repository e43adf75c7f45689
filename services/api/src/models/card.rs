//! Card model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Card entity, a front/back text pair belonging to exactly one deck
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Card {
    pub card_id: i64,
    pub card_uuid: Uuid,
    pub front_text: String,
    pub back_text: String,
    pub deck_id: i64,
    pub is_deleted: bool,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// New card creation payload
#[derive(Debug, Clone)]
pub struct NewCard {
    pub front_text: String,
    pub back_text: String,
    pub deck_id: i64,
}
