//! This module defines the `SubRepository` trait for creating and reading
//! subs (communities).
use agora_shared::types::{NewSub, Sub};
use uuid::Uuid;

use crate::errors::RepositoryError;

/// A trait that defines the interface for the sub store.
#[async_trait::async_trait]
pub trait SubRepository: Send + Sync {
    /// Inserts a new sub created by `creator_id` and returns it.
    ///
    /// Sub names are unique; a duplicate name maps to
    /// `RepositoryError::Conflict`.
    async fn create(&self, creator_id: Uuid, sub: &NewSub) -> Result<Sub, RepositoryError>;

    /// Fetches a sub by id; `None` when missing or soft-deleted.
    async fn get(&self, id: Uuid) -> Result<Option<Sub>, RepositoryError>;

    /// Fetches a sub by its unique name; `None` when missing or soft-deleted.
    async fn get_by_name(&self, name: &str) -> Result<Option<Sub>, RepositoryError>;

    /// Replaces the description of a live sub and returns the updated row.
    /// Names are immutable. Returns `NotFound` when no live row matched.
    async fn update(&self, id: Uuid, description: &str) -> Result<Sub, RepositoryError>;

    /// Soft-deletes a sub. Returns `NotFound` when no live row matched.
    /// Existing posts keep their rows; sub trending hides deleted subs.
    async fn soft_delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
