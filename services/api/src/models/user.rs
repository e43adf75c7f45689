//! User model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User entity
///
/// The internal `user_id` never leaves the service; clients only ever see
/// `user_uuid`. `random_id` is the 0..=9999 disambiguator used for
/// `name#1234` display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub user_uuid: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub hashed_password: String,
    pub password_salt: String,
    pub email_verified: bool,
    pub random_id: i32,
    pub is_deleted: bool,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// New user creation payload
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub user_email: String,
    pub hashed_password: String,
    pub password_salt: String,
    pub random_id: i32,
}

/// The externally visible slice of a user, used by search results
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PublicUser {
    pub user_uuid: Uuid,
    pub user_name: String,
    pub random_id: i32,
}
