//! PostgreSQL implementations of the agora repository traits.
//!
//! All implementations share a `sqlx::PgPool`; the vote repository is the
//! only one that opens multi-statement transactions. Row decoding goes
//! through the helpers in [`row`] so posts and comments deserialize the
//! same way everywhere.
mod comments;
mod posts;
mod row;
mod sessions;
mod subs;
mod trending;
mod users;
mod votes;

pub use comments::PostgresCommentRepository;
pub use posts::PostgresPostRepository;
pub use sessions::PostgresSessionRepository;
pub use subs::PostgresSubRepository;
pub use trending::PostgresTrendingRepository;
pub use users::PostgresUserRepository;
pub use votes::PostgresVoteRepository;

use crate::errors::RepositoryError;

/// Maps a sqlx error to the repository taxonomy using SQLSTATE codes.
///
/// Unique violations, serialization failures and deadlocks are all races
/// the caller may retry (`Conflict`); everything else surfaces unchanged.
pub(crate) fn map_write_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(code) = db_err.code() {
            match code.as_ref() {
                // unique_violation, serialization_failure, deadlock_detected
                "23505" | "40001" | "40P01" => return RepositoryError::Conflict,
                _ => {}
            }
        }
    }
    RepositoryError::Database(err)
}

/// Returns whether the error is a CHECK constraint violation (SQLSTATE
/// 23514), which on the counter columns means an underflow.
pub(crate) fn is_check_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        if let Some(code) = db_err.code() {
            return code.as_ref() == "23514";
        }
    }
    false
}
