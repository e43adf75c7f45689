//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, invalid, revoked, or expired credentials. Unknown email and
    /// wrong password deliberately collapse into this one variant.
    #[error("Unauthorized")]
    Unauthorized,

    /// Correct credentials but the email address was never verified;
    /// surfaced distinctly so clients can prompt for re-verification.
    #[error("Email not verified")]
    EmailNotVerified,

    /// Authenticated but not allowed to touch the resource
    #[error("Forbidden")]
    Forbidden,

    /// The referenced resource does not exist (or is soft-deleted)
    #[error("Not found")]
    NotFound,

    /// The request conflicts with existing state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The request payload failed validation before touching the database
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::EmailNotVerified => {
                let body = Json(json!({
                    "error": "Email not verified",
                    "code": "email_not_verified",
                }));
                return (StatusCode::FORBIDDEN, body).into_response();
            }
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::EmailNotVerified.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("taken".to_string()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Validation("bad".to_string()).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::InternalServerError.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
