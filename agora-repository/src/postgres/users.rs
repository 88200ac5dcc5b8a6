//! PostgreSQL implementation of the user store.
use agora_shared::types::User;
use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::UserRepository;
use crate::postgres::{map_write_error, row::user_from_row};

/// PostgreSQL implementation of [`UserRepository`].
pub struct PostgresUserRepository {
    pool: sqlx::PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, username: &str) -> Result<User, RepositoryError> {
        let row = sqlx::query(
            "INSERT INTO users (username) VALUES ($1) RETURNING id, username, created_at",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;
        Ok(user_from_row(&row)?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT id, username, created_at FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| user_from_row(&r)).transpose().map_err(RepositoryError::from)
    }
}
