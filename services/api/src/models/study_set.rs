//! Study-set model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Study-set entity, a named, shareable collection of decks
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudySet {
    pub study_set_id: i64,
    pub study_set_uuid: Uuid,
    pub study_set_name: String,
    pub creator_user_id: i64,
    pub is_public: bool,
    pub is_deleted: bool,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// New study-set creation payload
#[derive(Debug, Clone)]
pub struct NewStudySet {
    pub study_set_name: String,
    pub creator_user_id: i64,
    pub is_public: bool,
}

/// A study set as returned by list endpoints, decorated with the derived
/// deck count and attached label names.
#[derive(Debug, Clone, Serialize)]
pub struct StudySetSummary {
    #[serde(skip_serializing)]
    pub study_set_id: i64,
    pub study_set_uuid: Uuid,
    pub study_set_name: String,
    pub is_public: bool,
    pub deck_count: i64,
    pub labels: Vec<String>,
}
