//! PostgreSQL implementation of the vote ledger store.
//!
//! The ledger write and the counter delta execute in one transaction.
//! Every write is guarded by the state the caller observed when it
//! resolved the transition: the primary key on `votes` rejects a racing
//! insert, and flips/retracts predicate on the expected prior polarity so
//! a racing mutation leaves zero rows affected. Either way the loser gets
//! `RepositoryError::Conflict` and can re-read and retry.
use agora_shared::types::{LedgerWrite, TargetKind, TargetRef, VoteChange, VoteCounts, VoteValue};
use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::VoteRepository;
use crate::postgres::{is_check_violation, map_write_error};

/// PostgreSQL implementation of [`VoteRepository`].
pub struct PostgresVoteRepository {
    pool: sqlx::PgPool,
}

impl PostgresVoteRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// Table carrying the denormalized counters for the target kind.
    fn target_table(kind: TargetKind) -> &'static str {
        match kind {
            TargetKind::Post => "posts",
            TargetKind::Comment => "comments",
        }
    }

    /// Performs the guarded ledger row mutation within the transaction.
    async fn write_ledger_row(
        &self,
        voter_id: Uuid,
        target: TargetRef,
        write: LedgerWrite,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<(), RepositoryError> {
        match write {
            LedgerWrite::Insert { polarity } => {
                sqlx::query(
                    "INSERT INTO votes (voter_id, target_id, target_kind, polarity) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(voter_id)
                .bind(target.id)
                .bind(target.kind.as_i16())
                .bind(polarity.as_i16())
                .execute(&mut **tx)
                .await
                .map_err(map_write_error)?;
            }
            LedgerWrite::Flip { from, to } => {
                let result = sqlx::query(
                    "UPDATE votes SET polarity = $4, updated_at = NOW() \
                     WHERE voter_id = $1 AND target_id = $2 AND target_kind = $3 \
                       AND polarity = $5",
                )
                .bind(voter_id)
                .bind(target.id)
                .bind(target.kind.as_i16())
                .bind(to.as_i16())
                .bind(from.as_i16())
                .execute(&mut **tx)
                .await
                .map_err(map_write_error)?;
                if result.rows_affected() == 0 {
                    return Err(RepositoryError::Conflict);
                }
            }
            LedgerWrite::Retract { from } => {
                let result = sqlx::query(
                    "DELETE FROM votes \
                     WHERE voter_id = $1 AND target_id = $2 AND target_kind = $3 \
                       AND polarity = $4",
                )
                .bind(voter_id)
                .bind(target.id)
                .bind(target.kind.as_i16())
                .bind(from.as_i16())
                .execute(&mut **tx)
                .await
                .map_err(map_write_error)?;
                if result.rows_affected() == 0 {
                    return Err(RepositoryError::Conflict);
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl VoteRepository for PostgresVoteRepository {
    async fn voter_exists(&self, voter_id: Uuid) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(voter_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn counts(&self, target: TargetRef) -> Result<Option<VoteCounts>, RepositoryError> {
        let sql = format!(
            "SELECT upvotes, downvotes FROM {} WHERE id = $1 AND deleted_at IS NULL",
            Self::target_table(target.kind)
        );
        let row = sqlx::query(&sql).bind(target.id).fetch_optional(&self.pool).await?;
        match row {
            Some(row) => Ok(Some(VoteCounts {
                upvotes: row.try_get("upvotes")?,
                downvotes: row.try_get("downvotes")?,
            })),
            None => Ok(None),
        }
    }

    async fn get_vote(
        &self,
        voter_id: Uuid,
        target: TargetRef,
    ) -> Result<Option<VoteValue>, RepositoryError> {
        let polarity: Option<i16> = sqlx::query_scalar(
            "SELECT polarity FROM votes \
             WHERE voter_id = $1 AND target_id = $2 AND target_kind = $3",
        )
        .bind(voter_id)
        .bind(target.id)
        .bind(target.kind.as_i16())
        .fetch_optional(&self.pool)
        .await?;

        match polarity {
            Some(value) => VoteValue::from_i16(value)
                .map(Some)
                .ok_or(RepositoryError::InvalidPolarity(value)),
            None => Ok(None),
        }
    }

    async fn apply_vote(
        &self,
        voter_id: Uuid,
        target: TargetRef,
        change: VoteChange,
    ) -> Result<VoteCounts, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        self.write_ledger_row(voter_id, target, change.write, &mut tx).await?;

        // Atomic increment, not read-modify-write: the row lock taken by
        // this UPDATE is what lets concurrent distinct voters both land
        // their deltas.
        let sql = format!(
            "UPDATE {} SET upvotes = upvotes + $2, downvotes = downvotes + $3 \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING upvotes, downvotes",
            Self::target_table(target.kind)
        );
        let row = sqlx::query(&sql)
            .bind(target.id)
            .bind(change.delta.up)
            .bind(change.delta.down)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|err| {
                if is_check_violation(&err) {
                    RepositoryError::CounterUnderflow(target.id)
                } else {
                    map_write_error(err)
                }
            })?;

        let Some(row) = row else {
            // Target vanished between the precondition check and the write.
            return Err(RepositoryError::NotFound);
        };
        let counts = VoteCounts {
            upvotes: row.try_get("upvotes")?,
            downvotes: row.try_get("downvotes")?,
        };

        tx.commit().await.map_err(map_write_error)?;
        Ok(counts)
    }
}
