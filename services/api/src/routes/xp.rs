//! XP submission and leaderboard handlers

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::ApiError,
    middleware::AuthUser,
    models::LeaderboardEntry,
    repositories::xp::{current_week_window, start_of_day},
    state::AppState,
};

/// XP submission payload
#[derive(Debug, Deserialize)]
pub struct SubmitXpRequest {
    pub xp_count: i32,
}

/// XP view query parameters
#[derive(Debug, Deserialize)]
pub struct XpQuery {
    pub only_sum: Option<bool>,
}

/// Record earned XP for the caller
///
/// Amounts land on the caller's row for the current UTC day; repeated
/// submissions on the same day accumulate into that one row.
pub async fn submit_xp(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<SubmitXpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.xp_count <= 0 {
        return Err(ApiError::Validation(
            "XP amount must be positive".to_string(),
        ));
    }

    let entry = state
        .xp_repository
        .add(auth_user.user_id, payload.xp_count)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record XP: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "date": entry.created.format("%Y/%m/%d").to_string(),
            "xp_count": entry.xp_count,
        })),
    ))
}

/// The caller's XP over the last seven UTC days
pub async fn get_own_xp(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<XpQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let end = start_of_day(Utc::now()) + Duration::days(1);
    let start = end - Duration::days(7);

    let total = state
        .xp_repository
        .sum(auth_user.user_id, Some(start), Some(end))
        .await
        .map_err(|e| {
            tracing::error!("Failed to sum XP: {}", e);
            ApiError::InternalServerError
        })?;

    if query.only_sum.unwrap_or(false) {
        return Ok(Json(json!({ "xp_count": total })));
    }

    let entries = state
        .xp_repository
        .entries_in_window(auth_user.user_id, start, end)
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
        "xp_count": total,
        "days": days,
    })))
}

/// Weekly leaderboard over the caller and their connected users
///
/// The window is the current UTC week starting Monday. The caller is
/// always part of the board, even with zero XP and no connections.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let (start, end) = current_week_window(Utc::now());

    let mut entries = state
        .xp_repository
        .leaderboard(
            auth_user.user_id,
            state.config.leaderboard_accepted_only,
            start,
            end,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to build leaderboard: {}", e);
            ApiError::InternalServerError
        })?;

    let caller = state
        .user_repository
        .find_by_id(auth_user.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::Unauthorized)?;

    let own_total = state
        .xp_repository
        .sum(auth_user.user_id, Some(start), Some(end))
        .await
        .map_err(|e| {
            tracing::error!("Failed to sum XP: {}", e);
            ApiError::InternalServerError
        })?;

    // The caller leads the board; connected users follow ordered by XP.
    entries.insert(
        0,
        LeaderboardEntry {
            user_uuid: caller.user_uuid,
            user_name: caller.user_name,
            random_id: caller.random_id,
            xp_count: own_total,
        },
    );

    Ok(Json(entries))
}
