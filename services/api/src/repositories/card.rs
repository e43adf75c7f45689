//! Card repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{Card, NewCard};

/// Card repository
#[derive(Clone)]
pub struct CardRepository {
    pool: PgPool,
}

impl CardRepository {
    /// Create a new card repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new card in a deck
    pub async fn create(&self, new_card: &NewCard) -> Result<Card> {
        info!("Creating card in deck id {}", new_card.deck_id);

        let card = sqlx::query_as::<_, Card>(
            r#"
            INSERT INTO cards (front_text, back_text, deck_id)
            VALUES ($1, $2, $3)
            RETURNING card_id, card_uuid, front_text, back_text, deck_id,
                      is_deleted, created, modified
            "#,
        )
        .bind(&new_card.front_text)
        .bind(&new_card.back_text)
        .bind(new_card.deck_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(card)
    }

    /// Find a non-deleted card by public uuid
    pub async fn find_by_uuid(&self, card_uuid: Uuid) -> Result<Option<Card>> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            SELECT card_id, card_uuid, front_text, back_text, deck_id,
                   is_deleted, created, modified
            FROM cards
            WHERE card_uuid = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(card_uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    /// List the non-deleted cards of a deck
    pub async fn list_for_deck(&self, deck_id: i64) -> Result<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT card_id, card_uuid, front_text, back_text, deck_id,
                   is_deleted, created, modified
            FROM cards
            WHERE deck_id = $1 AND is_deleted = FALSE
            ORDER BY created
            "#,
        )
        .bind(deck_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    /// Update a card's front/back text
    pub async fn update_text(
        &self,
        card_id: i64,
        front_text: &str,
        back_text: &str,
    ) -> Result<Option<Card>> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            UPDATE cards
            SET front_text = $2, back_text = $3, modified = now()
            WHERE card_id = $1 AND is_deleted = FALSE
            RETURNING card_id, card_uuid, front_text, back_text, deck_id,
                      is_deleted, created, modified
            "#,
        )
        .bind(card_id)
        .bind(front_text)
        .bind(back_text)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    /// Soft-delete a card
    pub async fn soft_delete(&self, card_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE cards
            SET is_deleted = TRUE, modified = now()
            WHERE card_id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(card_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
