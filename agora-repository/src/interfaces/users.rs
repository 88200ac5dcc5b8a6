//! This module defines the `UserRepository` trait for creating and reading
//! user accounts.
use agora_shared::types::User;
use uuid::Uuid;

use crate::errors::RepositoryError;

/// A trait that defines the interface for the user store.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user and returns it. Usernames are unique; a duplicate
    /// maps to `RepositoryError::Conflict`.
    async fn create(&self, username: &str) -> Result<User, RepositoryError>;

    /// Fetches a user by id.
    async fn get(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
}
