//! This module defines the `SessionRepository` trait, the boundary through
//! which the HTTP layer resolves bearer tokens to user ids. Token issuance
//! lives with the external auth service; this store only records and
//! resolves already-issued sessions.
use uuid::Uuid;

use crate::errors::RepositoryError;

/// A trait that defines the interface for the session store.
#[async_trait::async_trait]
pub trait SessionRepository: Send + Sync {
    /// Records a session for `user_id` and returns its bearer token.
    async fn create(&self, user_id: Uuid) -> Result<Uuid, RepositoryError>;

    /// Resolves a bearer token to the owning user id, `None` when unknown.
    async fn resolve(&self, token: Uuid) -> Result<Option<Uuid>, RepositoryError>;
}
