//! Friend-request handlers
//!
//! A friend request lives between exactly two users. Only the receiver
//! can accept it; either side can withdraw or dissolve it.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{error::ApiError, middleware::AuthUser, state::AppState};

/// Friend-request creation payload
#[derive(Debug, Deserialize)]
pub struct SendFriendRequestRequest {
    pub receiver_user_uuid: Uuid,
}

/// Listing query parameters
#[derive(Debug, Deserialize)]
pub struct FriendRequestQuery {
    /// true lists established friendships, false lists pending requests
    #[serde(default)]
    pub is_accepted: bool,
}

/// A friend request as exposed to clients, seen from the caller's side
#[derive(Debug, Serialize)]
pub struct FriendRequestResponse {
    pub friend_request_uuid: Uuid,
    pub is_accepted: bool,
    /// Whether the caller sent this request (as opposed to receiving it)
    pub outgoing: bool,
    pub user_uuid: Uuid,
    pub user_name: String,
    pub random_id: i32,
    pub created: DateTime<Utc>,
}

/// Send a friend request from the caller to another user
pub async fn send_friend_request(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<SendFriendRequestRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let receiver_id = state
        .user_repository
        .resolve_uuid(payload.receiver_user_uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)?;

    if receiver_id == auth_user.user_id {
        return Err(ApiError::Validation(
            "Cannot send a friend request to yourself".to_string(),
        ));
    }

    let friend_request = state
        .friend_request_repository
        .create(auth_user.user_id, receiver_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create friend request: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "friend_request_uuid": friend_request.friend_request_uuid,
        })),
    ))
}

/// List the caller's friend requests or established friendships
pub async fn get_friend_requests(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<FriendRequestQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let friend_requests = state
        .friend_request_repository
        .list_for_user(auth_user.user_id, query.is_accepted)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list friend requests: {}", e);
            ApiError::InternalServerError
        })?;

    let mut responses = Vec::with_capacity(friend_requests.len());
    for friend_request in friend_requests {
        let outgoing = friend_request.sender_user_id == auth_user.user_id;
        let counterpart_id = if outgoing {
            friend_request.receiver_user_id
        } else {
            friend_request.sender_user_id
        };

        let Some(counterpart) = state
            .user_repository
            .find_by_id(counterpart_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load user: {}", e);
                ApiError::InternalServerError
            })?
        else {
            // The other side deleted their account; hide the row.
            continue;
        };

        responses.push(FriendRequestResponse {
            friend_request_uuid: friend_request.friend_request_uuid,
            is_accepted: friend_request.is_accepted,
            outgoing,
            user_uuid: counterpart.user_uuid,
            user_name: counterpart.user_name,
            random_id: counterpart.random_id,
            created: friend_request.created,
        });
    }

    Ok(Json(responses))
}

/// Accept a friend request; receiver only
pub async fn accept_friend_request(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(friend_request_uuid): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let friend_request = state
        .friend_request_repository
        .find_by_uuid(friend_request_uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load friend request: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)?;

    if friend_request.receiver_user_id != auth_user.user_id {
        return Err(ApiError::Forbidden);
    }

    state
        .friend_request_repository
        .accept(friend_request.friend_request_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to accept friend request: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(json!({ "message": "Friend request accepted" })))
}

/// Withdraw or dissolve a friend request; sender or receiver
pub async fn delete_friend_request(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(friend_request_uuid): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let friend_request = state
        .friend_request_repository
        .find_by_uuid(friend_request_uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load friend request: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound)?;

    if friend_request.sender_user_id != auth_user.user_id
        && friend_request.receiver_user_id != auth_user.user_id
    {
        return Err(ApiError::Forbidden);
    }

    state
        .friend_request_repository
        .soft_delete(friend_request.friend_request_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete friend request: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(json!({ "message": "Friend request deleted" })))
}
