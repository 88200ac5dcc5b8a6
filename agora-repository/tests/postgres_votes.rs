//! Integration tests for the PostgreSQL vote ledger store.
//!
//! These tests require a real PostgreSQL database and use SQLx test macros
//! to ensure proper test isolation and cleanup.
//!
//! Run with: `cargo test --test postgres_votes`
mod common;

use agora_repository::{PostgresVoteRepository, RepositoryError, VoteRepository};
use agora_shared::types::{
    CountDelta, LedgerWrite, TargetRef, VoteChange, VoteCounts, VoteValue,
};
use common::{ledger_tally, seed_target};
use std::sync::Arc;

fn insert(polarity: VoteValue) -> VoteChange {
    let delta = match polarity {
        VoteValue::Up => CountDelta::new(1, 0),
        VoteValue::Down => CountDelta::new(0, 1),
    };
    VoteChange { write: LedgerWrite::Insert { polarity }, delta }
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn insert_records_vote_and_counter_together(pool: sqlx::PgPool) {
    let (user, post) = seed_target(&pool).await;
    let repository = PostgresVoteRepository::new(pool.clone());
    let target = TargetRef::post(post.id);

    let counts = repository.apply_vote(user.id, target, insert(VoteValue::Up)).await.unwrap();
    assert_eq!(counts, VoteCounts { upvotes: 1, downvotes: 0 });

    assert_eq!(repository.get_vote(user.id, target).await.unwrap(), Some(VoteValue::Up));
    assert_eq!(ledger_tally(&pool, post.id, 0).await, (1, 0));
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn duplicate_insert_is_a_conflict(pool: sqlx::PgPool) {
    let (user, post) = seed_target(&pool).await;
    let repository = PostgresVoteRepository::new(pool.clone());
    let target = TargetRef::post(post.id);

    repository.apply_vote(user.id, target, insert(VoteValue::Up)).await.unwrap();
    let err = repository.apply_vote(user.id, target, insert(VoteValue::Up)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict));

    // The losing transaction must not have leaked its counter delta.
    assert_eq!(
        repository.counts(target).await.unwrap(),
        Some(VoteCounts { upvotes: 1, downvotes: 0 })
    );
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn flip_guard_rejects_stale_state(pool: sqlx::PgPool) {
    let (user, post) = seed_target(&pool).await;
    let repository = PostgresVoteRepository::new(pool.clone());
    let target = TargetRef::post(post.id);

    repository.apply_vote(user.id, target, insert(VoteValue::Up)).await.unwrap();

    // Claims the row currently holds Down; it holds Up, so the guarded
    // update matches nothing.
    let stale = VoteChange {
        write: LedgerWrite::Flip { from: VoteValue::Down, to: VoteValue::Up },
        delta: CountDelta::new(1, -1),
    };
    let err = repository.apply_vote(user.id, target, stale).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict));
    assert_eq!(
        repository.counts(target).await.unwrap(),
        Some(VoteCounts { upvotes: 1, downvotes: 0 })
    );
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn retract_removes_row_and_decrements(pool: sqlx::PgPool) {
    let (user, post) = seed_target(&pool).await;
    let repository = PostgresVoteRepository::new(pool.clone());
    let target = TargetRef::post(post.id);

    repository.apply_vote(user.id, target, insert(VoteValue::Down)).await.unwrap();
    let retract = VoteChange {
        write: LedgerWrite::Retract { from: VoteValue::Down },
        delta: CountDelta::new(0, -1),
    };
    let counts = repository.apply_vote(user.id, target, retract).await.unwrap();

    assert_eq!(counts, VoteCounts::default());
    assert_eq!(repository.get_vote(user.id, target).await.unwrap(), None);
    assert_eq!(ledger_tally(&pool, post.id, 0).await, (0, 0));
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn underflow_fails_loudly_and_rolls_back(pool: sqlx::PgPool) {
    let (user, post) = seed_target(&pool).await;
    let repository = PostgresVoteRepository::new(pool.clone());
    let target = TargetRef::post(post.id);

    // A retraction delta against a zeroed counter: the ledger row write
    // succeeds, the counter CHECK refuses, the whole transaction unwinds.
    repository.apply_vote(user.id, target, insert(VoteValue::Up)).await.unwrap();
    let divergent = VoteChange {
        write: LedgerWrite::Retract { from: VoteValue::Up },
        delta: CountDelta::new(-2, 0),
    };
    let err = repository.apply_vote(user.id, target, divergent).await.unwrap_err();
    assert!(matches!(err, RepositoryError::CounterUnderflow(id) if id == post.id));

    // Rolled back in full: the ledger row survived.
    assert_eq!(repository.get_vote(user.id, target).await.unwrap(), Some(VoteValue::Up));
    assert_eq!(
        repository.counts(target).await.unwrap(),
        Some(VoteCounts { upvotes: 1, downvotes: 0 })
    );
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn counts_hides_soft_deleted_targets(pool: sqlx::PgPool) {
    let (user, post) = seed_target(&pool).await;
    let repository = PostgresVoteRepository::new(pool.clone());
    let target = TargetRef::post(post.id);

    assert!(repository.counts(target).await.unwrap().is_some());
    sqlx::query("UPDATE posts SET deleted_at = NOW() WHERE id = $1")
        .bind(post.id)
        .execute(&pool)
        .await
        .unwrap();
    assert!(repository.counts(target).await.unwrap().is_none());
    assert!(!repository.voter_exists(uuid::Uuid::new_v4()).await.unwrap());
    assert!(repository.voter_exists(user.id).await.unwrap());
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn concurrent_same_key_inserts_admit_exactly_one(pool: sqlx::PgPool) {
    let (user, post) = seed_target(&pool).await;
    let repository = Arc::new(PostgresVoteRepository::new(pool.clone()));
    let target = TargetRef::post(post.id);

    // Both writers resolved their transition against NoVote; the ledger's
    // primary key must admit exactly one of them.
    let a = {
        let repository = repository.clone();
        tokio::spawn(async move { repository.apply_vote(user.id, target, insert(VoteValue::Up)).await })
    };
    let b = {
        let repository = repository.clone();
        tokio::spawn(async move { repository.apply_vote(user.id, target, insert(VoteValue::Up)).await })
    };
    let (a, b) = (a.await.unwrap(), b.await.unwrap());

    assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1, "exactly one insert must win");
    let loser = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert!(matches!(loser, RepositoryError::Conflict));

    assert_eq!(
        repository.counts(target).await.unwrap(),
        Some(VoteCounts { upvotes: 1, downvotes: 0 })
    );
    assert_eq!(ledger_tally(&pool, post.id, 0).await, (1, 0));
}
