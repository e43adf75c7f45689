//! Deck handlers
//!
//! Mutations are owner-only. Reading a single deck is allowed for the
//! owner and, when the deck is public, for any authenticated user.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::AuthUser,
    models::{Card, Deck, NewDeck},
    state::AppState,
};

/// Deck creation payload
#[derive(Debug, Deserialize)]
pub struct CreateDeckRequest {
    pub deck_name: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Label attachment payload
#[derive(Debug, Deserialize)]
pub struct AddLabelRequest {
    pub label_name: String,
}

/// A card as exposed to clients
#[derive(Debug, Serialize)]
pub struct CardResponse {
    pub card_uuid: Uuid,
    pub front_text: String,
    pub back_text: String,
}

impl From<&Card> for CardResponse {
    fn from(card: &Card) -> Self {
        CardResponse {
            card_uuid: card.card_uuid,
            front_text: card.front_text.clone(),
            back_text: card.back_text.clone(),
        }
    }
}

/// A single deck with its labels and cards
#[derive(Debug, Serialize)]
pub struct DeckDetailResponse {
    pub deck_uuid: Uuid,
    pub deck_name: String,
    pub is_public: bool,
    pub labels: Vec<String>,
    pub cards: Vec<CardResponse>,
}

/// Look up a deck by uuid, erroring when it does not exist
pub(crate) async fn load_deck(state: &AppState, deck_uuid: Uuid) -> Result<Deck, ApiError> {
    state
        .deck_repository
        .find_by_uuid(deck_uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load deck: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)
}

/// Create a standalone deck owned by the caller
pub async fn create_deck(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<CreateDeckRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.deck_name.is_empty() {
        return Err(ApiError::Validation("Deck name is required".to_string()));
    }

    let new_deck = NewDeck {
        deck_name: payload.deck_name,
        creator_user_id: auth_user.user_id,
        is_public: payload.is_public,
        is_in_set: false,
        study_set_id: None,
    };

    let deck = state.deck_repository.create(&new_deck).await.map_err(|e| {
        tracing::error!("Failed to create deck: {}", e);
        ApiError::InternalServerError
    })?;

    for label_name in &payload.labels {
        if label_name.is_empty() {
            continue;
        }
        state
            .label_repository
            .attach_to_deck(deck.deck_id, label_name)
            .await
            .map_err(|e| {
                tracing::error!("Failed to attach label: {}", e);
                ApiError::InternalServerError
            })?;
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "deck_uuid": deck.deck_uuid,
            "deck_name": deck.deck_name,
            "is_public": deck.is_public,
        })),
    ))
}

/// Get a single deck with its labels and cards
pub async fn get_deck(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(deck_uuid): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deck = load_deck(&state, deck_uuid).await?;

    if deck.creator_user_id != auth_user.user_id && !deck.is_public {
        return Err(ApiError::Forbidden);
    }

    let labels = state
        .label_repository
        .deck_label_names(deck.deck_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load deck labels: {}", e);
            ApiError::InternalServerError
        })?;

    let cards = state
        .card_repository
        .list_for_deck(deck.deck_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load cards: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(DeckDetailResponse {
        deck_uuid: deck.deck_uuid,
        deck_name: deck.deck_name,
        is_public: deck.is_public,
        labels,
        cards: cards.iter().map(CardResponse::from).collect(),
    }))
}

/// Soft-delete a deck the caller owns
pub async fn delete_deck(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(deck_uuid): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deck = load_deck(&state, deck_uuid).await?;

    if deck.creator_user_id != auth_user.user_id {
        return Err(ApiError::Forbidden);
    }

    state
        .deck_repository
        .soft_delete(deck.deck_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete deck: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(json!({ "message": "Deck deleted successfully" })))
}

/// Attach a label to a deck the caller owns
pub async fn add_deck_label(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(deck_uuid): Path<Uuid>,
    Json(payload): Json<AddLabelRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.label_name.is_empty() {
        return Err(ApiError::Validation("Label name is required".to_string()));
    }

    let deck = load_deck(&state, deck_uuid).await?;

    if deck.creator_user_id != auth_user.user_id {
        return Err(ApiError::Forbidden);
    }

    state
        .label_repository
        .attach_to_deck(deck.deck_id, &payload.label_name)
        .await
        .map_err(|e| {
            tracing::error!("Failed to attach label: {}", e);
            ApiError::InternalServerError
        })?;

    let labels = state
        .label_repository
        .deck_label_names(deck.deck_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load deck labels: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(json!({
        "deck_uuid": deck.deck_uuid,
        "labels": labels,
    })))
}
