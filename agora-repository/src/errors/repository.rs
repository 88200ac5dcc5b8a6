//! Error types for repository operations.
//! Defines specific errors that can occur during database operations on the
//! vote ledger, content entities, and sessions.
use thiserror::Error;
use uuid::Uuid;

/// Represents errors that can occur within the agora repositories.
///
/// `Conflict` and `CounterUnderflow` carry ledger semantics: the former is
/// the transient loser of a concurrent mutation race on the same
/// (voter, target) key, the latter a counter that would have gone negative,
/// which indicates ledger/counter divergence and is never corrected
/// silently.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("row not found")]
    NotFound,

    #[error("concurrent mutation conflict")]
    Conflict,

    #[error("vote counter underflow for target {0}")]
    CounterUnderflow(Uuid),

    #[error("post {0} is locked")]
    Locked(Uuid),

    #[error("invalid polarity discriminator: {0}")]
    InvalidPolarity(i16),
}
