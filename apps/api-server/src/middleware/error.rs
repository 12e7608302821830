//! Error handling - 1:1 mapping of typed failures to status codes with a
//! `{success: false, error}` body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use campus_shared::ErrorBody;
use std::fmt;

/// Application-level error type returned by handlers.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Forbidden(String),
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {msg}"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            AppError::Conflict(msg) => write!(f, "Conflict: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound(detail) => ErrorBody::not_found(detail),
            AppError::BadRequest(detail) => ErrorBody::bad_request(detail),
            AppError::Unauthorized => ErrorBody::unauthorized(),
            AppError::Forbidden(detail) => ErrorBody::forbidden(detail),
            AppError::Conflict(detail) => ErrorBody::new(detail.clone()),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorBody::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

// Conversion from domain errors
impl From<campus_core::error::DomainError> for AppError {
    fn from(err: campus_core::error::DomainError) -> Self {
        use campus_core::error::DomainError;
        match err {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::AuthRequired => AppError::Unauthorized,
            DomainError::Forbidden => {
                AppError::Forbidden("Not authorized to perform this action".to_string())
            }
            DomainError::NotFound(what) => AppError::NotFound(format!("{what} not found")),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Store(msg) => AppError::Internal(msg),
        }
    }
}

impl From<campus_core::error::RepoError> for AppError {
    fn from(err: campus_core::error::RepoError) -> Self {
        use campus_core::error::RepoError;
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => {
                tracing::error!("Database error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<campus_core::ports::AuthError> for AppError {
    fn from(err: campus_core::ports::AuthError) -> Self {
        use campus_core::ports::AuthError;
        match err {
            AuthError::InvalidCredentials => AppError::Unauthorized,
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
