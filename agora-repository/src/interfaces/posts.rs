//! This module defines the `PostRepository` trait for creating, reading and
//! soft-deleting posts.
use agora_shared::types::{NewPost, Post, UpdatePost};
use uuid::Uuid;

use crate::errors::RepositoryError;

/// A trait that defines the interface for the post store.
///
/// Content mutations never touch the vote counters; those belong
/// exclusively to the vote ledger.
#[async_trait::async_trait]
pub trait PostRepository: Send + Sync {
    /// Inserts a new post authored by `author_id` and returns it.
    async fn create(&self, author_id: Uuid, post: &NewPost) -> Result<Post, RepositoryError>;

    /// Fetches a post by id; `None` when missing or soft-deleted.
    async fn get(&self, id: Uuid) -> Result<Option<Post>, RepositoryError>;

    /// Edits the title and/or body of a live post and returns the updated
    /// row. Returns `NotFound` when no live row matched.
    async fn update(&self, id: Uuid, update: &UpdatePost) -> Result<Post, RepositoryError>;

    /// Lists non-deleted posts in a sub, newest first.
    async fn list_by_sub(
        &self,
        sub_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, RepositoryError>;

    /// Soft-deletes a post. Returns `NotFound` when no live row matched.
    async fn soft_delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
