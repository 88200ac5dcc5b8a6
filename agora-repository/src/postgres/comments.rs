//! PostgreSQL implementation of the comment store.
//!
//! Comment creation checks the parent post's moderation flags in the same
//! transaction as the insert, so a post locked concurrently cannot gain a
//! comment after the lock commits.
use agora_shared::types::{Comment, NewComment};
use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::CommentRepository;
use crate::postgres::{map_write_error, row::comment_from_row};

const COMMENT_COLUMNS: &str = "id, body, author_id, post_id, parent_id, upvotes, downvotes, \
     created_at, updated_at, deleted_at";

/// PostgreSQL implementation of [`CommentRepository`].
pub struct PostgresCommentRepository {
    pool: sqlx::PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(
        &self,
        author_id: Uuid,
        comment: &NewComment,
    ) -> Result<Comment, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // FOR SHARE keeps the post's lock state stable until we commit.
        let post = sqlx::query(
            "SELECT is_locked FROM posts WHERE id = $1 AND deleted_at IS NULL FOR SHARE",
        )
        .bind(comment.post_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(post) = post else {
            return Err(RepositoryError::NotFound);
        };
        if post.try_get::<bool, _>("is_locked")? {
            return Err(RepositoryError::Locked(comment.post_id));
        }

        let sql = format!(
            "INSERT INTO comments (body, author_id, post_id, parent_id) \
             VALUES ($1, $2, $3, $4) RETURNING {COMMENT_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&comment.body)
            .bind(author_id)
            .bind(comment.post_id)
            .bind(comment.parent_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_write_error)?;
        let created = comment_from_row(&row)?;

        tx.commit().await.map_err(map_write_error)?;
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Comment>, RepositoryError> {
        let sql =
            format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1 AND deleted_at IS NULL");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.map(|r| comment_from_row(&r)).transpose().map_err(RepositoryError::from)
    }

    async fn update(&self, id: Uuid, body: &str) -> Result<Comment, RepositoryError> {
        let sql = format!(
            "UPDATE comments SET body = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {COMMENT_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(body)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?;
        match row {
            Some(row) => Ok(comment_from_row(&row)?),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn list_by_post(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>, RepositoryError> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments \
             WHERE post_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query(&sql)
            .bind(post_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|r| comment_from_row(r).map_err(RepositoryError::from)).collect()
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE comments SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
