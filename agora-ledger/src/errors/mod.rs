//! Error types for the engagement ledger.
//! Defines the taxonomy surfaced to the HTTP boundary: missing targets,
//! exhausted concurrency retries, counter invariant violations, timeouts,
//! and underlying storage failures.
use std::time::Duration;

use agora_repository::RepositoryError;
use thiserror::Error;
use uuid::Uuid;

/// Represents errors that can occur within the vote ledger and ranker.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("target or voter not found")]
    NotFound,

    #[error("vote lost a concurrent race and retries were exhausted")]
    Conflict,

    #[error("vote counters for target {0} would go negative")]
    CounterUnderflow(Uuid),

    #[error("vote transaction timed out after {0:?}")]
    Timeout(Duration),

    #[error("storage error: {0}")]
    Store(#[source] RepositoryError),
}

impl From<RepositoryError> for LedgerError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => LedgerError::NotFound,
            RepositoryError::Conflict => LedgerError::Conflict,
            RepositoryError::CounterUnderflow(target) => LedgerError::CounterUnderflow(target),
            other => LedgerError::Store(other),
        }
    }
}
