//! Error types for the HTTP boundary.
//!
//! `ApiError` reshapes the ledger/repository taxonomy into status codes
//! without changing its meaning: nothing is swallowed, and counter
//! underflows are logged loudly before turning into a generic 500.
use agora_ledger::LedgerError;
use agora_repository::RepositoryError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("forbidden")]
    Forbidden,

    #[error("internal error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound => ApiError::NotFound,
            LedgerError::Conflict => {
                ApiError::Conflict("vote conflicted with a concurrent request".to_string())
            }
            LedgerError::CounterUnderflow(target) => {
                error!(target_id = %target, "counter underflow reached the boundary");
                ApiError::Internal
            }
            LedgerError::Timeout(_) | LedgerError::Store(_) => {
                error!(error = %err, "ledger storage failure");
                ApiError::Internal
            }
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ApiError::NotFound,
            RepositoryError::Conflict => {
                ApiError::Conflict("a conflicting row already exists".to_string())
            }
            RepositoryError::Locked(post) => {
                ApiError::Conflict(format!("post {post} is locked"))
            }
            other => {
                error!(error = %other, "repository failure");
                ApiError::Internal
            }
        }
    }
}

/// Errors that can abort server startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
