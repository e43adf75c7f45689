//! Registration, email verification, login, and logout handlers

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
    models::NewUser,
    password::{digests_match, generate_random_id, generate_salt, hash_password},
    state::AppState,
    validation::validate_registration,
};

/// Registration request payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub user_name: String,
    pub user_email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user_email: String,
    pub password: String,
}

/// Login response payload
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_uuid: Uuid,
    pub token: Uuid,
}

/// Register a new user
///
/// The verification email is best-effort: a mailer failure is logged and
/// the account is still created, since verification can be re-triggered
/// out of band.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_registration(
        &payload.user_email,
        &payload.user_name,
        &payload.password,
        &payload.password_confirm,
    )
    .map_err(ApiError::Validation)?;

    let taken = state
        .user_repository
        .email_taken(&payload.user_email)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check email availability: {}", e);
            ApiError::InternalServerError
        })?;

    if taken {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let salt = generate_salt();
    let new_user = NewUser {
        user_name: payload.user_name,
        user_email: payload.user_email,
        hashed_password: hash_password(&payload.password, &salt),
        password_salt: salt,
        random_id: generate_random_id(),
    };

    let user = state.user_repository.create(&new_user).await.map_err(|e| {
        tracing::error!("Failed to create user: {}", e);
        ApiError::InternalServerError
    })?;

    if let Some(mailer) = &state.mailer {
        if let Err(e) = mailer.send_verification_email(&user).await {
            tracing::warn!("Failed to send verification email: {}", e);
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({ "user_uuid": user.user_uuid })),
    ))
}

/// Mark a user's email address verified
///
/// Idempotent: verifying an already-verified account succeeds again.
pub async fn verify_email(
    State(state): State<AppState>,
    Path(user_uuid): Path<Uuid>,
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

    state
        .user_repository
        .mark_email_verified(user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to verify email: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(json!({ "message": "Email verified successfully" })))
}

/// Log a user in, exchanging credentials for a fresh opaque token
///
/// Unknown email and wrong password deliberately produce the same 401.
/// Any still-active tokens for the user are revoked before the new one
/// is issued, so each account has at most one live session.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_repository
        .find_by_email(&payload.user_email)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::Unauthorized)?;

    let candidate = hash_password(&payload.password, &user.password_salt);
    if !digests_match(&candidate, &user.hashed_password) {
        return Err(ApiError::Unauthorized);
    }

    if !user.email_verified {
        return Err(ApiError::EmailNotVerified);
    }

    state
        .token_repository
        .revoke_active_for_user(user.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to revoke previous tokens: {}", e);
            ApiError::InternalServerError
        })?;

    let token = state
        .token_repository
        .issue(user.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to issue token: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(LoginResponse {
        user_uuid: user.user_uuid,
        token: token.token_uuid,
    }))
}

/// Log the caller out by revoking the token that authenticated the request
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .token_repository
        .revoke(auth_user.token_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to revoke token: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(json!({ "message": "Logged out successfully" })))
}
