//! Deck model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Deck entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Deck {
    pub deck_id: i64,
    pub deck_uuid: Uuid,
    pub deck_name: String,
    pub creator_user_id: i64,
    pub is_public: bool,
    pub is_in_set: bool,
    pub study_set_id: Option<i64>,
    pub is_deleted: bool,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// New deck creation payload
#[derive(Debug, Clone)]
pub struct NewDeck {
    pub deck_name: String,
    pub creator_user_id: i64,
    pub is_public: bool,
    pub is_in_set: bool,
    pub study_set_id: Option<i64>,
}

/// A deck as returned by list endpoints, decorated with the derived
/// card count and attached label names.
#[derive(Debug, Clone, Serialize)]
pub struct DeckSummary {
    #[serde(skip_serializing)]
    pub deck_id: i64,
    pub deck_uuid: Uuid,
    pub deck_name: String,
    pub is_public: bool,
    pub card_count: i64,
    pub labels: Vec<String>,
}
