//! Deck repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::{Deck, DeckSummary, NewDeck};

/// Deck repository
#[derive(Clone)]
pub struct DeckRepository {
    pool: PgPool,
}

impl DeckRepository {
    /// Create a new deck repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new deck
    pub async fn create(&self, new_deck: &NewDeck) -> Result<Deck> {
        info!(
            "Creating deck '{}' for user id {}",
            new_deck.deck_name, new_deck.creator_user_id
        );

        let deck = sqlx::query_as::<_, Deck>(
            r#"
            INSERT INTO decks (deck_name, creator_user_id, is_public, is_in_set, study_set_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING deck_id, deck_uuid, deck_name, creator_user_id, is_public,
                      is_in_set, study_set_id, is_deleted, created, modified
            "#,
        )
        .bind(&new_deck.deck_name)
        .bind(new_deck.creator_user_id)
        .bind(new_deck.is_public)
        .bind(new_deck.is_in_set)
        .bind(new_deck.study_set_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(deck)
    }

    /// Find a non-deleted deck by internal id
    pub async fn find_by_id(&self, deck_id: i64) -> Result<Option<Deck>> {
        let deck = sqlx::query_as::<_, Deck>(
            r#"
            SELECT deck_id, deck_uuid, deck_name, creator_user_id, is_public,
                   is_in_set, study_set_id, is_deleted, created, modified
            FROM decks
            WHERE deck_id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(deck_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deck)
    }

    /// Find a non-deleted deck by public uuid
    pub async fn find_by_uuid(&self, deck_uuid: Uuid) -> Result<Option<Deck>> {
        let deck = sqlx::query_as::<_, Deck>(
            r#"
            SELECT deck_id, deck_uuid, deck_name, creator_user_id, is_public,
                   is_in_set, study_set_id, is_deleted, created, modified
            FROM decks
            WHERE deck_uuid = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(deck_uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deck)
    }

    /// Soft-delete a deck
    pub async fn soft_delete(&self, deck_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE decks
            SET is_deleted = TRUE, modified = now()
            WHERE deck_id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(deck_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List a user's decks with their derived card counts
    ///
    /// When `include_private` is false (the caller is not the owner), only
    /// public decks are returned. Label decoration happens at the handler
    /// via the label repository.
    pub async fn list_for_user(
        &self,
        user_id: i64,
        include_private: bool,
    ) -> Result<Vec<DeckSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT d.deck_id, d.deck_uuid, d.deck_name, d.is_public,
                   (SELECT COUNT(*) FROM cards AS c
                    WHERE c.deck_id = d.deck_id AND c.is_deleted = FALSE) AS card_count
            FROM decks AS d
            WHERE d.creator_user_id = $1
              AND d.is_deleted = FALSE
              AND (d.is_public = TRUE OR $2)
            ORDER BY d.created DESC
            "#,
        )
        .bind(user_id)
        .bind(include_private)
        .fetch_all(&self.pool)
        .await?;

        let decks = rows
            .into_iter()
            .map(|row| DeckSummary {
                deck_id: row.get("deck_id"),
                deck_uuid: row.get("deck_uuid"),
                deck_name: row.get("deck_name"),
                is_public: row.get("is_public"),
                card_count: row.get("card_count"),
                labels: Vec::new(),
            })
            .collect();

        Ok(decks)
    }
}
