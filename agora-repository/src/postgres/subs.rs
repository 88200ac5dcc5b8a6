//! PostgreSQL implementation of the sub store.
use agora_shared::types::{NewSub, Sub};
use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::SubRepository;
use crate::postgres::{map_write_error, row::sub_from_row};

const SUB_COLUMNS: &str =
    "id, name, description, creator_id, created_at, updated_at, deleted_at";

/// PostgreSQL implementation of [`SubRepository`].
pub struct PostgresSubRepository {
    pool: sqlx::PgPool,
}

impl PostgresSubRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubRepository for PostgresSubRepository {
    async fn create(&self, creator_id: Uuid, sub: &NewSub) -> Result<Sub, RepositoryError> {
        let sql = format!(
            "INSERT INTO subs (name, description, creator_id) \
             VALUES ($1, $2, $3) RETURNING {SUB_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&sub.name)
            .bind(&sub.description)
            .bind(creator_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;
        Ok(sub_from_row(&row)?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Sub>, RepositoryError> {
        let sql = format!("SELECT {SUB_COLUMNS} FROM subs WHERE id = $1 AND deleted_at IS NULL");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.map(|r| sub_from_row(&r)).transpose().map_err(RepositoryError::from)
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Sub>, RepositoryError> {
        let sql = format!("SELECT {SUB_COLUMNS} FROM subs WHERE name = $1 AND deleted_at IS NULL");
        let row = sqlx::query(&sql).bind(name).fetch_optional(&self.pool).await?;
        row.map(|r| sub_from_row(&r)).transpose().map_err(RepositoryError::from)
    }

    async fn update(&self, id: Uuid, description: &str) -> Result<Sub, RepositoryError> {
        let sql = format!(
            "UPDATE subs SET description = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {SUB_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(description)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?;
        match row {
            Some(row) => Ok(sub_from_row(&row)?),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE subs SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
