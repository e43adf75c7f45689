//! Card handlers
//!
//! Creating, editing, and deleting cards is reserved for the deck owner.
//! Listing a deck's cards additionally works for any authenticated user
//! when the deck is public.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::AuthUser,
    models::{Card, NewCard},
    routes::decks::{CardResponse, load_deck},
    state::AppState,
};

/// Card creation and update payload
#[derive(Debug, Deserialize)]
pub struct CardTextRequest {
    pub front_text: String,
    pub back_text: String,
}

fn validate_card_text(payload: &CardTextRequest) -> Result<(), ApiError> {
    if payload.front_text.is_empty() || payload.back_text.is_empty() {
        return Err(ApiError::Validation(
            "Card front and back text are required".to_string(),
        ));
    }
    Ok(())
}

/// Look up a card and its deck, erroring when either is gone
async fn load_card_with_deck(
    state: &AppState,
    card_uuid: Uuid,
) -> Result<(Card, crate::models::Deck), ApiError> {
    let card = state
        .card_repository
        .find_by_uuid(card_uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load card: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)?;

    let deck = state
        .deck_repository
        .find_by_id(card.deck_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load deck: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)?;

    Ok((card, deck))
}

/// Add a card to a deck the caller owns
pub async fn create_card(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(deck_uuid): Path<Uuid>,
    Json(payload): Json<CardTextRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_card_text(&payload)?;

    let deck = load_deck(&state, deck_uuid).await?;

    if deck.creator_user_id != auth_user.user_id {
        return Err(ApiError::Forbidden);
    }

    let new_card = NewCard {
        front_text: payload.front_text,
        back_text: payload.back_text,
        deck_id: deck.deck_id,
    };

    let card = state.card_repository.create(&new_card).await.map_err(|e| {
        tracing::error!("Failed to create card: {}", e);
        ApiError::InternalServerError
    })?;

    Ok((StatusCode::CREATED, Json(CardResponse::from(&card))))
}

/// List the cards of a deck
pub async fn get_deck_cards(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(deck_uuid): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deck = load_deck(&state, deck_uuid).await?;

    if deck.creator_user_id != auth_user.user_id && !deck.is_public {
        return Err(ApiError::Forbidden);
    }

    let cards = state
        .card_repository
        .list_for_deck(deck.deck_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load cards: {}", e);
            ApiError::InternalServerError
        })?;

    let cards: Vec<CardResponse> = cards.iter().map(CardResponse::from).collect();

    Ok(Json(cards))
}

/// Rewrite the front and back text of a card in a deck the caller owns
pub async fn update_card(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(card_uuid): Path<Uuid>,
    Json(payload): Json<CardTextRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_card_text(&payload)?;

    let (card, deck) = load_card_with_deck(&state, card_uuid).await?;

    if deck.creator_user_id != auth_user.user_id {
        return Err(ApiError::Forbidden);
    }

    let updated = state
        .card_repository
        .update_text(card.card_id, &payload.front_text, &payload.back_text)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update card: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(CardResponse::from(&updated)))
}

/// Soft-delete a card in a deck the caller owns
pub async fn delete_card(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(card_uuid): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let (card, deck) = load_card_with_deck(&state, card_uuid).await?;

    if deck.creator_user_id != auth_user.user_id {
        return Err(ApiError::Forbidden);
    }

    state
        .card_repository
        .soft_delete(card.card_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete card: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(json!({ "message": "Card deleted successfully" })))
}
