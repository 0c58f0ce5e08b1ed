//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::crud::RepositoryError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("{entity} not found for id(s) {ids:?}")]
    NotFound { entity: &'static str, ids: Vec<i64> },

    #[error("Request body for {0} must not be empty")]
    NullInput(&'static str),

    #[error("Malformed request: {0}")]
    MalformedPayload(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(RepositoryError),

    // Server errors (5xx)
    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(entity: &'static str, ids: Vec<i64>) -> Self {
        AppError::NotFound { entity, ids }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        if err.is_client_error() {
            AppError::InvalidReference(err)
        } else {
            AppError::Repository(err)
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedPayload(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::MalformedPayload(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::NullInput(entity) => {
                (StatusCode::BAD_REQUEST, "null_input", Some(entity.to_string()))
            }
            AppError::MalformedPayload(msg) => {
                (StatusCode::BAD_REQUEST, "malformed_payload", Some(msg.clone()))
            }
            AppError::InvalidReference(err) => {
                (StatusCode::BAD_REQUEST, "invalid_reference", Some(err.to_string()))
            }

            // 404 Not Found
            AppError::NotFound { ids, .. } => {
                let ids = ids.iter().map(i64::to_string).collect::<Vec<_>>().join(",");
                (StatusCode::NOT_FOUND, "not_found", Some(ids))
            }

            // 500 Internal Server Error
            AppError::Repository(e) => {
                tracing::error!("Repository error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "repository_error", None)
            }
            AppError::PasswordHash(msg) => {
                tracing::error!("Password hashing error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "password_hash_error", None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
