//! PostgreSQL implementation of the post store.
use agora_shared::types::{NewPost, Post, UpdatePost};
use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::PostRepository;
use crate::postgres::{map_write_error, row::post_from_row};

const POST_COLUMNS: &str = "id, title, body, author_id, sub_id, upvotes, downvotes, \
     is_locked, is_pinned, created_at, updated_at, deleted_at";

/// PostgreSQL implementation of [`PostRepository`].
pub struct PostgresPostRepository {
    pool: sqlx::PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, author_id: Uuid, post: &NewPost) -> Result<Post, RepositoryError> {
        let sql = format!(
            "INSERT INTO posts (title, body, author_id, sub_id) \
             VALUES ($1, $2, $3, $4) RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&post.title)
            .bind(&post.body)
            .bind(author_id)
            .bind(post.sub_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;
        Ok(post_from_row(&row)?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Post>, RepositoryError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1 AND deleted_at IS NULL");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.map(|r| post_from_row(&r)).transpose().map_err(RepositoryError::from)
    }

    async fn update(&self, id: Uuid, update: &UpdatePost) -> Result<Post, RepositoryError> {
        // COALESCE keeps unspecified fields; the counter columns are never
        // named here, so edits cannot disturb vote state.
        let sql = format!(
            "UPDATE posts SET title = COALESCE($2, title), body = COALESCE($3, body), \
             updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(update.title.as_deref())
            .bind(update.body.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?;
        match row {
            Some(row) => Ok(post_from_row(&row)?),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn list_by_sub(
        &self,
        sub_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, RepositoryError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE sub_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query(&sql)
            .bind(sub_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|r| post_from_row(r).map_err(RepositoryError::from)).collect()
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE posts SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
