//! Application error type with consistent JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use gymlog_domain::{CreateError, DeleteError, ReadError, UpdateError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("internal server error")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    pub fn validation(err: impl std::fmt::Display) -> Self {
        AppError::Validation(err.to_string())
    }

    #[must_use]
    pub fn read(entity: &'static str, err: ReadError) -> Self {
        match err {
            ReadError::NotFound => AppError::NotFound(entity),
            err => AppError::Internal(Box::new(err)),
        }
    }

    #[must_use]
    pub fn create(err: CreateError) -> Self {
        match err {
            CreateError::Validation(validation) => AppError::Validation(validation.to_string()),
            CreateError::Conflict => AppError::Conflict("email is already in use".to_string()),
            err => AppError::Internal(Box::new(err)),
        }
    }

    #[must_use]
    pub fn update(entity: &'static str, err: UpdateError) -> Self {
        match err {
            UpdateError::NotFound => AppError::NotFound(entity),
            UpdateError::Validation(validation) => AppError::Validation(validation.to_string()),
            UpdateError::Conflict => AppError::Conflict("email is already in use".to_string()),
            err => AppError::Internal(Box::new(err)),
        }
    }

    #[must_use]
    pub fn delete(entity: &'static str, err: DeleteError) -> Self {
        match err {
            DeleteError::NotFound => AppError::NotFound(entity),
            err => AppError::Internal(Box::new(err)),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(entity) => (StatusCode::NOT_FOUND, format!("{entity} not found")),
            AppError::Conflict(message) => (StatusCode::CONFLICT, message),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
