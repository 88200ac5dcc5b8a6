//! Shared fixtures for the PostgreSQL integration tests.
use agora_repository::{
    PostRepository, PostgresPostRepository, PostgresSubRepository, PostgresUserRepository,
    SubRepository, UserRepository,
};
use agora_shared::types::{NewPost, NewSub, Post, Sub, User};
use uuid::Uuid;

pub async fn make_user(pool: &sqlx::PgPool, username: &str) -> User {
    PostgresUserRepository::new(pool.clone()).create(username).await.unwrap()
}

pub async fn make_sub(pool: &sqlx::PgPool, creator_id: Uuid, name: &str) -> Sub {
    PostgresSubRepository::new(pool.clone())
        .create(creator_id, &NewSub { name: name.to_string(), description: String::new() })
        .await
        .unwrap()
}

pub async fn make_post(pool: &sqlx::PgPool, author_id: Uuid, sub_id: Uuid, title: &str) -> Post {
    PostgresPostRepository::new(pool.clone())
        .create(
            author_id,
            &NewPost { title: title.to_string(), body: "body".to_string(), sub_id },
        )
        .await
        .unwrap()
}

/// Seeds one user, one sub and one post; returns (user, post).
pub async fn seed_target(pool: &sqlx::PgPool) -> (User, Post) {
    let user = make_user(pool, "author").await;
    let sub = make_sub(pool, user.id, "general").await;
    let post = make_post(pool, user.id, sub.id, "hello").await;
    (user, post)
}

/// Counts ledger rows of each polarity for a target, straight off the table.
pub async fn ledger_tally(pool: &sqlx::PgPool, target_id: Uuid, target_kind: i16) -> (i64, i64) {
    let up: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM votes WHERE target_id = $1 AND target_kind = $2 AND polarity = 0",
    )
    .bind(target_id)
    .bind(target_kind)
    .fetch_one(pool)
    .await
    .unwrap();
    let down: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM votes WHERE target_id = $1 AND target_kind = $2 AND polarity = 1",
    )
    .bind(target_id)
    .bind(target_kind)
    .fetch_one(pool)
    .await
    .unwrap();
    (up, down)
}
