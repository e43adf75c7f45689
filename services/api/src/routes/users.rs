//! Public user-facing views: search and per-user content listings
//!
//! These routes work without a token. When a valid token is supplied and
//! it belongs to the user being viewed, private content is included too.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::IntoResponse,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::ApiError, middleware::optional_user_id, repositories::xp::start_of_day,
    state::AppState,
};

/// User search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub phrase: String,
    pub page: Option<i64>,
}

/// XP view query parameters
#[derive(Debug, Deserialize)]
pub struct XpQuery {
    pub only_sum: Option<bool>,
}

/// Search users by exact name or email match
pub async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = query.page.unwrap_or(1);

    let users = state
        .user_repository
        .search(&query.phrase, page)
        .await
        .map_err(|e| {
            tracing::error!("Failed to search users: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(users))
}

/// List a user's decks, decorated with card counts and labels
pub async fn get_user_decks(
    State(state): State<AppState>,
    Path(user_uuid): Path<Uuid>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let target_id = state
        .user_repository
        .resolve_uuid(user_uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)?;

    let caller_id = optional_user_id(&state, &headers).await?;
    let include_private = caller_id == Some(target_id);

    let mut decks = state
        .deck_repository
        .list_for_user(target_id, include_private)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list decks: {}", e);
            ApiError::InternalServerError
        })?;

    for deck in &mut decks {
        deck.labels = state
            .label_repository
            .deck_label_names(deck.deck_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load deck labels: {}", e);
                ApiError::InternalServerError
            })?;
    }

    Ok(Json(decks))
}

/// List the study sets a user created or was invited to
pub async fn get_user_study_sets(
    State(state): State<AppState>,
    Path(user_uuid): Path<Uuid>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let target_id = state
        .user_repository
        .resolve_uuid(user_uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)?;

    let caller_id = optional_user_id(&state, &headers).await?;
    let include_private = caller_id == Some(target_id);

    let mut study_sets = state
        .study_set_repository
        .list_for_user(target_id, include_private)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list study sets: {}", e);
            ApiError::InternalServerError
        })?;

    for study_set in &mut study_sets {
        study_set.labels = state
            .label_repository
            .study_set_label_names(study_set.study_set_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load study set labels: {}", e);
                ApiError::InternalServerError
            })?;
    }

    Ok(Json(study_sets))
}

/// A user's XP over the last seven UTC days
///
/// With `only_sum=true` only the total is returned; otherwise each day's
/// row is included as well.
pub async fn get_user_xp(
    State(state): State<AppState>,
    Path(user_uuid): Path<Uuid>,
    Query(query): Query<XpQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = state
        .user_repository
        .resolve_uuid(user_uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)?;

    let end = start_of_day(Utc::now()) + Duration::days(1);
    let start = end - Duration::days(7);

    let total = state
        .xp_repository
        .sum(user_id, Some(start), Some(end))
        .await
        .map_err(|e| {
            tracing::error!("Failed to sum XP: {}", e);
            ApiError::InternalServerError
        })?;

    if query.only_sum.unwrap_or(false) {
        return Ok(Json(json!({
            "user_uuid": user_uuid,
            "xp_count": total,
        })));
    }

    let entries = state
        .xp_repository
        .entries_in_window(user_id, start, end)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load XP entries: {}", e);
            ApiError::InternalServerError
        })?;

    let days: Vec<_> = entries
        .iter()
        .map(|entry| {
            json!({
                "date": entry.created.format("%Y/%m/%d").to_string(),
                "xp_count": entry.xp_count,
            })
        })
        .collect();

    Ok(Json(json!({
        "user_uuid": user_uuid,
        "xp_count": total,
        "days": days,
    })))
}
