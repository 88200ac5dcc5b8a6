//! PostgreSQL implementation of the session store.
use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::SessionRepository;

/// PostgreSQL implementation of [`SessionRepository`].
pub struct PostgresSessionRepository {
    pool: sqlx::PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn create(&self, user_id: Uuid) -> Result<Uuid, RepositoryError> {
        let token: Uuid =
            sqlx::query_scalar("INSERT INTO sessions (user_id) VALUES ($1) RETURNING token")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(token)
    }

    async fn resolve(&self, token: Uuid) -> Result<Option<Uuid>, RepositoryError> {
        let user_id: Option<Uuid> =
            sqlx::query_scalar("SELECT user_id FROM sessions WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user_id)
    }
}
