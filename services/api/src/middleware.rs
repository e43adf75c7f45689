//! Authentication middleware for opaque session tokens
//!
//! Tokens are looked up in the database on every request; there is nothing
//! to decode client-side. The raw value is taken from the `Authorization`
//! header (with or without a `Bearer ` prefix) or, failing that, a bare
//! `token` header.

use axum::{
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::error;

use crate::{error::ApiError, state::AppState};

/// Authenticated user information
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// Internal id of the user the token belongs to
    pub user_id: i64,
    /// Internal id of the token itself, so logout can revoke exactly it
    pub token_id: i64,
}

/// The raw token value carried by a request, if any
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .or_else(|| headers.get("token"))
        .and_then(|header| header.to_str().ok())
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let raw = token_from_headers(req.headers()).ok_or(ApiError::Unauthorized)?;

    let token = state
        .token_repository
        .resolve(raw)
        .await
        .map_err(|e| {
            error!("Failed to resolve token: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::Unauthorized)?;

    let user = AuthUser {
        user_id: token.user_id,
        token_id: token.token_id,
    };

    req.extensions_mut().insert(user);

    let response = next.run(req).await;

    Ok(response)
}

/// Resolve the caller on routes that work for anonymous visitors too
///
/// A missing, malformed, or expired token is treated as no caller rather
/// than an error; only a database failure propagates.
pub async fn optional_user_id(state: &AppState, headers: &HeaderMap) -> Result<Option<i64>, ApiError> {
    let Some(raw) = token_from_headers(headers) else {
        return Ok(None);
    };

    let token = state.token_repository.resolve(raw).await.map_err(|e| {
        error!("Failed to resolve token: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(token.map(|t| t.user_id))
}
