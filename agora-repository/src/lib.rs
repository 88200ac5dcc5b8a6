//! # Agora Repository
//! This crate provides traits and implementations for interacting with the
//! agora data store. It includes definitions for errors, interfaces, and
//! concrete implementations for PostgreSQL.
pub mod errors;
pub mod interfaces;
pub mod postgres;

pub use errors::RepositoryError;
pub use interfaces::{
    CommentRepository, PostRepository, SessionRepository, SubRepository, TrendingRepository,
    UserRepository, VoteRepository,
};
pub use postgres::{
    PostgresCommentRepository, PostgresPostRepository, PostgresSessionRepository,
    PostgresSubRepository, PostgresTrendingRepository, PostgresUserRepository,
    PostgresVoteRepository,
};
