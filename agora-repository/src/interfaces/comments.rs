//! This module defines the `CommentRepository` trait for creating, reading
//! and soft-deleting comments.
use agora_shared::types::{Comment, NewComment};
use uuid::Uuid;

use crate::errors::RepositoryError;

/// A trait that defines the interface for the comment store.
#[async_trait::async_trait]
pub trait CommentRepository: Send + Sync {
    /// Inserts a new comment authored by `author_id` and returns it.
    ///
    /// # Errors
    ///
    /// * `RepositoryError::NotFound` - the parent post is missing or deleted.
    /// * `RepositoryError::Locked` - the parent post is locked against new
    ///   comments.
    async fn create(
        &self,
        author_id: Uuid,
        comment: &NewComment,
    ) -> Result<Comment, RepositoryError>;

    /// Fetches a comment by id; `None` when missing or soft-deleted.
    async fn get(&self, id: Uuid) -> Result<Option<Comment>, RepositoryError>;

    /// Replaces the body of a live comment and returns the updated row.
    /// Returns `NotFound` when no live row matched.
    async fn update(&self, id: Uuid, body: &str) -> Result<Comment, RepositoryError>;

    /// Lists non-deleted comments on a post, newest first.
    async fn list_by_post(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>, RepositoryError>;

    /// Soft-deletes a comment. Returns `NotFound` when no live row matched.
    async fn soft_delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
