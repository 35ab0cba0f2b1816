//! API error type for handlers.
//!
//! Maps database failures to HTTP status codes. Internal causes are logged,
//! never echoed to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use goalpost_db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("database error")]
    Database(#[source] DbError),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::DuplicateEmail(email) => {
                ApiError::Conflict(format!("An employee with email {} already exists", email))
            }
            DbError::NotFound(what) => ApiError::NotFound(what),
            DbError::InvalidStatus(s) => ApiError::BadRequest(format!("invalid status: {}", s)),
            other => ApiError::Database(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::Database(source) => {
                tracing::error!(error = %source, "database error while serving request");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_email_maps_to_conflict() {
        let err: ApiError = DbError::DuplicateEmail("a@b.com".into()).into();
        assert!(matches!(err, ApiError::Conflict(_)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err: ApiError = DbError::NotFound("goal x".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_status_maps_to_400() {
        let err: ApiError = DbError::InvalidStatus("Done".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
