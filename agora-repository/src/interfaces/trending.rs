//! This module defines the `TrendingRepository` trait, the read-only seam
//! the trending ranker pulls ordered snapshots through. Rankings read only
//! denormalized state; they never join against the vote ledger.
use agora_shared::types::{Post, Sub};

use crate::errors::RepositoryError;

/// A trait that defines the interface for trending reads.
///
/// Both queries are single read-only statements that take no locks and
/// never block a writer. The ordering is deterministic for a given
/// snapshot: score descending, then more recent `created_at`, then id.
#[async_trait::async_trait]
pub trait TrendingRepository: Send + Sync {
    /// Lists non-deleted posts by net vote score.
    async fn trending_posts(&self, limit: i64) -> Result<Vec<Post>, RepositoryError>;

    /// Lists non-deleted subs by their count of non-deleted posts.
    async fn trending_subs(&self, limit: i64) -> Result<Vec<Sub>, RepositoryError>;
}
