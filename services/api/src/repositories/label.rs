//! Label repository: deduplicated tags and their soft-deletable joins
//!
//! Attaching is get-or-create twice over: the label itself is deduplicated
//! by name, then the join row is deduplicated by (label, container) among
//! non-deleted joins. Attaching the same label to the same container twice
//! therefore leaves exactly one active association.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::models::Label;

/// Label repository
#[derive(Clone)]
pub struct LabelRepository {
    pool: PgPool,
}

impl LabelRepository {
    /// Create a new label repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a non-deleted label by exact name
    pub async fn find_by_name(&self, label_name: &str) -> Result<Option<Label>> {
        let label = sqlx::query_as::<_, Label>(
            r#"
            SELECT label_id, label_name, is_deleted, created, modified
            FROM labels
            WHERE label_name = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(label_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(label)
    }

    /// Get the label with the given name, creating it if absent
    pub async fn get_or_create(&self, label_name: &str) -> Result<Label> {
        if let Some(label) = self.find_by_name(label_name).await? {
            return Ok(label);
        }

        info!("Creating label '{}'", label_name);

        let label = sqlx::query_as::<_, Label>(
            r#"
            INSERT INTO labels (label_name)
            VALUES ($1)
            RETURNING label_id, label_name, is_deleted, created, modified
            "#,
        )
        .bind(label_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(label)
    }

    /// Attach a label to a deck; idempotent
    pub async fn attach_to_deck(&self, deck_id: i64, label_name: &str) -> Result<()> {
        let label = self.get_or_create(label_name).await?;

        let existing: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT deck_label_id
            FROM deck_labels
            WHERE label_id = $1 AND deck_id = $2 AND is_deleted = FALSE
            LIMIT 1
            "#,
        )
        .bind(label.label_id)
        .bind(deck_id)
        .fetch_optional(&self.pool)
        .await?;

        if existing.is_none() {
            sqlx::query(
                r#"
                INSERT INTO deck_labels (label_id, deck_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(label.label_id)
            .bind(deck_id)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Attach a label to a study set; idempotent
    pub async fn attach_to_study_set(&self, study_set_id: i64, label_name: &str) -> Result<()> {
        let label = self.get_or_create(label_name).await?;

        let existing: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT study_set_label_id
            FROM study_set_labels
            WHERE label_id = $1 AND study_set_id = $2 AND is_deleted = FALSE
            LIMIT 1
            "#,
        )
        .bind(label.label_id)
        .bind(study_set_id)
        .fetch_optional(&self.pool)
        .await?;

        if existing.is_none() {
            sqlx::query(
                r#"
                INSERT INTO study_set_labels (label_id, study_set_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(label.label_id)
            .bind(study_set_id)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// The names of the labels attached to a deck
    pub async fn deck_label_names(&self, deck_id: i64) -> Result<Vec<String>> {
        let names: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT l.label_name
            FROM labels AS l
            INNER JOIN deck_labels AS dl ON dl.label_id = l.label_id
            WHERE dl.deck_id = $1
              AND dl.is_deleted = FALSE
              AND l.is_deleted = FALSE
            "#,
        )
        .bind(deck_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(names.into_iter().map(|(name,)| name).collect())
    }

    /// The names of the labels attached to a study set
    pub async fn study_set_label_names(&self, study_set_id: i64) -> Result<Vec<String>> {
        let names: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT l.label_name
            FROM labels AS l
            INNER JOIN study_set_labels AS sl ON sl.label_id = l.label_id
            WHERE sl.study_set_id = $1
              AND sl.is_deleted = FALSE
              AND l.is_deleted = FALSE
            "#,
        )
        .bind(study_set_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(names.into_iter().map(|(name,)| name).collect())
    }
}
