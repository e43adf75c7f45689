//! Study-set repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::{NewStudySet, StudySet, StudySetSummary};

/// Study-set repository
#[derive(Clone)]
pub struct StudySetRepository {
    pool: PgPool,
}

impl StudySetRepository {
    /// Create a new study-set repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new study set
    pub async fn create(&self, new_set: &NewStudySet) -> Result<StudySet> {
        info!(
            "Creating study set '{}' for user id {}",
            new_set.study_set_name, new_set.creator_user_id
        );

        let study_set = sqlx::query_as::<_, StudySet>(
            r#"
            INSERT INTO study_sets (study_set_name, creator_user_id, is_public)
            VALUES ($1, $2, $3)
            RETURNING study_set_id, study_set_uuid, study_set_name, creator_user_id,
                      is_public, is_deleted, created, modified
            "#,
        )
        .bind(&new_set.study_set_name)
        .bind(new_set.creator_user_id)
        .bind(new_set.is_public)
        .fetch_one(&self.pool)
        .await?;

        Ok(study_set)
    }

    /// Find a non-deleted study set by public uuid
    pub async fn find_by_uuid(&self, study_set_uuid: Uuid) -> Result<Option<StudySet>> {
        let study_set = sqlx::query_as::<_, StudySet>(
            r#"
            SELECT study_set_id, study_set_uuid, study_set_name, creator_user_id,
                   is_public, is_deleted, created, modified
            FROM study_sets
            WHERE study_set_uuid = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(study_set_uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(study_set)
    }

    /// Soft-delete a study set
    pub async fn soft_delete(&self, study_set_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE study_sets
            SET is_deleted = TRUE, modified = now()
            WHERE study_set_id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(study_set_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List the study sets a user created or was invited to, with derived
    /// deck counts
    ///
    /// When `include_private` is false only public sets are returned. Label
    /// decoration happens at the handler via the label repository.
    pub async fn list_for_user(
        &self,
        user_id: i64,
        include_private: bool,
    ) -> Result<Vec<StudySetSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT s.study_set_id, s.study_set_uuid, s.study_set_name,
                   s.is_public, s.created,
                   (SELECT COUNT(*) FROM decks AS d
                    WHERE d.study_set_id = s.study_set_id AND d.is_deleted = FALSE) AS deck_count
            FROM study_sets AS s
            LEFT JOIN study_set_invites AS i
              ON i.study_set_id = s.study_set_id AND i.is_deleted = FALSE
            WHERE (s.creator_user_id = $1 OR i.user_id = $1)
              AND s.is_deleted = FALSE
              AND (s.is_public = TRUE OR $2)
            ORDER BY s.created DESC
            "#,
        )
        .bind(user_id)
        .bind(include_private)
        .fetch_all(&self.pool)
        .await?;

        let study_sets = rows
            .into_iter()
            .map(|row| StudySetSummary {
                study_set_id: row.get("study_set_id"),
                study_set_uuid: row.get("study_set_uuid"),
                study_set_name: row.get("study_set_name"),
                is_public: row.get("is_public"),
                deck_count: row.get("deck_count"),
                labels: Vec::new(),
            })
            .collect();

        Ok(study_sets)
    }

    /// Invite a user to a study set, optionally with edit rights
    ///
    /// Re-inviting a user with a revoked invitation creates a fresh row;
    /// lookups only ever consider non-deleted invitations.
    pub async fn invite_user(
        &self,
        study_set_id: i64,
        user_id: i64,
        can_edit: bool,
    ) -> Result<bool> {
        info!(
            "Inviting user id {} to study set id {} (can_edit: {})",
            user_id, study_set_id, can_edit
        );

        let result = sqlx::query(
            r#"
            INSERT INTO study_set_invites (study_set_id, user_id, can_edit)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(study_set_id)
        .bind(user_id)
        .bind(can_edit)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Revoke a user's invitation to a study set
    pub async fn remove_invite(&self, study_set_id: i64, user_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE study_set_invites
            SET is_deleted = TRUE, modified = now()
            WHERE study_set_id = $1 AND user_id = $2 AND is_deleted = FALSE
            "#,
        )
        .bind(study_set_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether a user may mutate a study set: its creator, or an invitee
    /// whose active invitation carries `can_edit`
    pub async fn can_edit(&self, study_set: &StudySet, user_id: i64) -> Result<bool> {
        if study_set.creator_user_id == user_id {
            return Ok(true);
        }

        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT invite_id
            FROM study_set_invites
            WHERE study_set_id = $1
              AND user_id = $2
              AND can_edit = TRUE
              AND is_deleted = FALSE
            LIMIT 1
            "#,
        )
        .bind(study_set.study_set_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }
}
