//! Axum-specific error types and mappings.
//!
//! Maps `CoreError` and `RepositoryError` onto HTTP status codes and JSON
//! error bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_core::{CoreError, RepositoryError};
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input, rejected write, invalid query).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A lookup expected at most one result and found several.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The store did not answer in time.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(target: "roster.http", status = status.as_u16(), error = %self, "request failed");
        }

        let message = match self {
            Self::NotFound(msg)
            | Self::BadRequest(msg)
            | Self::Conflict(msg)
            | Self::ServiceUnavailable(msg)
            | Self::Internal(msg) => msg,
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => repo_err.into(),
            CoreError::Validation(msg) => Self::BadRequest(msg),
            CoreError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::NotFound(msg),
            RepositoryError::NonUnique { .. } => Self::Conflict(err.to_string()),
            RepositoryError::Constraint(msg) => Self::BadRequest(msg),
            RepositoryError::InvalidQuery(query_err) => Self::BadRequest(query_err.to_string()),
            RepositoryError::Timeout(_) => Self::ServiceUnavailable(err.to_string()),
            RepositoryError::Storage(msg) => Self::Internal(format!("Storage: {msg}")),
            RepositoryError::Serialization(msg) => Self::Internal(format!("Serialization: {msg}")),
        }
    }
}
