//! Error types for the agora repository.
//! Consolidates and re-exports error types related to persistence operations.
mod repository;

pub use repository::RepositoryError;
