//! Study-set handlers
//!
//! Authorization comes in two tiers: deleting a set or managing its
//! invitations is creator-only, while adding decks and labels extends to
//! invited users holding edit rights.

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
    models::{NewDeck, NewStudySet, StudySet},
    state::AppState,
};

/// Study-set creation payload
#[derive(Debug, Deserialize)]
pub struct CreateStudySetRequest {
    pub study_set_name: String,
    #[serde(default)]
    pub is_public: bool,
}

/// Payload for adding a deck inside a study set
#[derive(Debug, Deserialize)]
pub struct AddSetDeckRequest {
    pub deck_name: String,
    #[serde(default)]
    pub is_public: bool,
}

/// Label attachment payload
#[derive(Debug, Deserialize)]
pub struct AddLabelRequest {
    pub label_name: String,
}

/// Invitation payload
#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    pub user_uuid: Uuid,
    #[serde(default)]
    pub can_edit: bool,
}

/// Look up a study set by uuid, erroring when it does not exist
async fn load_study_set(state: &AppState, study_set_uuid: Uuid) -> Result<StudySet, ApiError> {
    state
        .study_set_repository
        .find_by_uuid(study_set_uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load study set: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)
}

/// Error unless the caller may edit the study set's contents
async fn require_edit_rights(
    state: &AppState,
    study_set: &StudySet,
    user_id: i64,
) -> Result<(), ApiError> {
    let allowed = state
        .study_set_repository
        .can_edit(study_set, user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check edit rights: {}", e);
            ApiError::InternalServerError
        })?;

    if allowed { Ok(()) } else { Err(ApiError::Forbidden) }
}

/// Create a study set owned by the caller
pub async fn create_study_set(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<CreateStudySetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.study_set_name.is_empty() {
        return Err(ApiError::Validation(
            "Study set name is required".to_string(),
        ));
    }

    let new_set = NewStudySet {
        study_set_name: payload.study_set_name,
        creator_user_id: auth_user.user_id,
        is_public: payload.is_public,
    };

    let study_set = state
        .study_set_repository
        .create(&new_set)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create study set: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "study_set_uuid": study_set.study_set_uuid,
            "study_set_name": study_set.study_set_name,
            "is_public": study_set.is_public,
        })),
    ))
}

/// Soft-delete a study set; creator only, edit rights are not enough
pub async fn delete_study_set(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(study_set_uuid): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let study_set = load_study_set(&state, study_set_uuid).await?;

    if study_set.creator_user_id != auth_user.user_id {
        return Err(ApiError::Forbidden);
    }

    state
        .study_set_repository
        .soft_delete(study_set.study_set_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete study set: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(json!({ "message": "Study set deleted successfully" })))
}

/// Create a deck inside a study set
pub async fn add_study_set_deck(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(study_set_uuid): Path<Uuid>,
    Json(payload): Json<AddSetDeckRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.deck_name.is_empty() {
        return Err(ApiError::Validation("Deck name is required".to_string()));
    }

    let study_set = load_study_set(&state, study_set_uuid).await?;
    require_edit_rights(&state, &study_set, auth_user.user_id).await?;

    let new_deck = NewDeck {
        deck_name: payload.deck_name,
        creator_user_id: auth_user.user_id,
        is_public: payload.is_public,
        is_in_set: true,
        study_set_id: Some(study_set.study_set_id),
    };

    let deck = state.deck_repository.create(&new_deck).await.map_err(|e| {
        tracing::error!("Failed to create deck: {}", e);
        ApiError::InternalServerError
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "deck_uuid": deck.deck_uuid,
            "deck_name": deck.deck_name,
            "study_set_uuid": study_set.study_set_uuid,
        })),
    ))
}

/// Attach a label to a study set
pub async fn add_study_set_label(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(study_set_uuid): Path<Uuid>,
    Json(payload): Json<AddLabelRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.label_name.is_empty() {
        return Err(ApiError::Validation("Label name is required".to_string()));
    }

    let study_set = load_study_set(&state, study_set_uuid).await?;
    require_edit_rights(&state, &study_set, auth_user.user_id).await?;

    state
        .label_repository
        .attach_to_study_set(study_set.study_set_id, &payload.label_name)
        .await
        .map_err(|e| {
            tracing::error!("Failed to attach label: {}", e);
            ApiError::InternalServerError
        })?;

    let labels = state
        .label_repository
        .study_set_label_names(study_set.study_set_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load study set labels: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(json!({
        "study_set_uuid": study_set.study_set_uuid,
        "labels": labels,
    })))
}

/// Invite a user to a study set; creator only
pub async fn invite_to_study_set(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(study_set_uuid): Path<Uuid>,
    Json(payload): Json<InviteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let study_set = load_study_set(&state, study_set_uuid).await?;

    if study_set.creator_user_id != auth_user.user_id {
        return Err(ApiError::Forbidden);
    }

    let invitee_id = state
        .user_repository
        .resolve_uuid(payload.user_uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)?;

    if invitee_id == auth_user.user_id {
        return Err(ApiError::Validation(
            "Cannot invite yourself to your own study set".to_string(),
        ));
    }

    state
        .study_set_repository
        .invite_user(study_set.study_set_id, invitee_id, payload.can_edit)
        .await
        .map_err(|e| {
            tracing::error!("Failed to invite user: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User invited successfully" })),
    ))
}

/// Revoke a study-set invitation
///
/// The creator can remove anyone; an invited user can remove themself.
pub async fn remove_study_set_invite(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((study_set_uuid, user_uuid)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let study_set = load_study_set(&state, study_set_uuid).await?;

    let target_id = state
        .user_repository
        .resolve_uuid(user_uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)?;

    let is_creator = study_set.creator_user_id == auth_user.user_id;
    if !is_creator && target_id != auth_user.user_id {
        return Err(ApiError::Forbidden);
    }

    let removed = state
        .study_set_repository
        .remove_invite(study_set.study_set_id, target_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to remove invitation: {}", e);
            ApiError::InternalServerError
        })?;

    if !removed {
        return Err(ApiError::NotFound);
    }

    Ok(Json(json!({ "message": "Invitation removed successfully" })))
}
