//! The trending ranker: ordered, read-time views over content.
//!
//! Rankings are derived purely from denormalized state (post counters, per
//! sub post counts) and reflect a snapshot at query time; two calls
//! separated by concurrent writes may differ. Per-vote work is zero.
use std::sync::Arc;

use agora_repository::TrendingRepository;
use agora_shared::types::{Post, Sub};

use crate::errors::LedgerError;

/// Number of items returned when the caller does not supply a limit.
pub const DEFAULT_TRENDING_LIMIT: i64 = 10;

/// Read-only ranking service over the trending repository.
///
/// Post score is net votes (`upvotes - downvotes`); sub score is the count
/// of non-deleted posts. Ties rank the more recently created item first,
/// with id as the final tie-break so the order is total.
pub struct TrendingRanker {
    repository: Arc<dyn TrendingRepository>,
}

impl TrendingRanker {
    pub fn new(repository: Arc<dyn TrendingRepository>) -> Self {
        Self { repository }
    }

    /// Returns up to `limit` posts by trending score (default 10).
    pub async fn trending_posts(&self, limit: Option<i64>) -> Result<Vec<Post>, LedgerError> {
        let limit = effective_limit(limit);
        Ok(self.repository.trending_posts(limit).await?)
    }

    /// Returns up to `limit` subs by post count (default 10).
    pub async fn trending_subs(&self, limit: Option<i64>) -> Result<Vec<Sub>, LedgerError> {
        let limit = effective_limit(limit);
        Ok(self.repository.trending_subs(limit).await?)
    }
}

/// Falls back to the default and floors negatives at zero. No upper bound
/// is enforced at this layer.
fn effective_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_TRENDING_LIMIT).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_floors() {
        assert_eq!(effective_limit(None), DEFAULT_TRENDING_LIMIT);
        assert_eq!(effective_limit(Some(25)), 25);
        assert_eq!(effective_limit(Some(0)), 0);
        assert_eq!(effective_limit(Some(-5)), 0);
    }
}
