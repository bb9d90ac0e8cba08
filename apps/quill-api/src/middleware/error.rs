//! Error handling - maps failures onto the `{ok:false, error}` envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use quill_shared::ErrorBody;
use std::fmt;

/// Application-level error type.
///
/// Not-found is the only failure a client can trigger; everything else is
/// an internal fault that gets logged and hidden behind a 500.
#[derive(Debug)]
pub enum AppError {
    NotFound,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound => write!(f, "Not found"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound => ErrorBody::not_found(),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorBody::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<quill_core::error::RepoError> for AppError {
    fn from(err: quill_core::error::RepoError) -> Self {
        match err {
            quill_core::error::RepoError::NotFound => AppError::NotFound,
            quill_core::error::RepoError::Backend(msg) => AppError::Internal(msg),
        }
    }
}

impl From<quill_core::ports::CacheError> for AppError {
    fn from(err: quill_core::ports::CacheError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
