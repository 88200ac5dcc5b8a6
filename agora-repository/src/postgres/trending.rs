//! PostgreSQL implementation of the trending reads.
//!
//! Both queries read only denormalized state: the counters embedded on
//! `posts`, and a post count grouped per sub. Neither touches the `votes`
//! ledger, so ranking cost is independent of vote history size.
use agora_shared::types::{Post, Sub};
use async_trait::async_trait;

use crate::errors::RepositoryError;
use crate::interfaces::TrendingRepository;
use crate::postgres::row::{post_from_row, sub_from_row};

/// PostgreSQL implementation of [`TrendingRepository`].
pub struct PostgresTrendingRepository {
    pool: sqlx::PgPool,
}

impl PostgresTrendingRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrendingRepository for PostgresTrendingRepository {
    async fn trending_posts(&self, limit: i64) -> Result<Vec<Post>, RepositoryError> {
        // Net score descending; ties broken by more recent creation, then
        // id for a total order.
        let rows = sqlx::query(
            "SELECT id, title, body, author_id, sub_id, upvotes, downvotes, \
                    is_locked, is_pinned, created_at, updated_at, deleted_at \
             FROM posts \
             WHERE deleted_at IS NULL \
             ORDER BY (upvotes - downvotes) DESC, created_at DESC, id ASC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(|r| post_from_row(r).map_err(RepositoryError::from)).collect()
    }

    async fn trending_subs(&self, limit: i64) -> Result<Vec<Sub>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT s.id, s.name, s.description, s.creator_id, \
                    s.created_at, s.updated_at, s.deleted_at \
             FROM subs s \
             LEFT JOIN posts p ON p.sub_id = s.id AND p.deleted_at IS NULL \
             WHERE s.deleted_at IS NULL \
             GROUP BY s.id \
             ORDER BY COUNT(p.id) DESC, s.created_at DESC, s.id ASC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(|r| sub_from_row(r).map_err(RepositoryError::from)).collect()
    }
}
