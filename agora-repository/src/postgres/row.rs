//! Row decoding helpers shared by the content repositories.
use agora_shared::types::{Comment, Post, Sub, User};
use sqlx::Row;
use sqlx::postgres::PgRow;

pub(crate) fn post_from_row(row: &PgRow) -> Result<Post, sqlx::Error> {
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        body: row.try_get("body")?,
        author_id: row.try_get("author_id")?,
        sub_id: row.try_get("sub_id")?,
        upvotes: row.try_get("upvotes")?,
        downvotes: row.try_get("downvotes")?,
        is_locked: row.try_get("is_locked")?,
        is_pinned: row.try_get("is_pinned")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        deleted_at: row.try_get("deleted_at")?,
    })
}

pub(crate) fn comment_from_row(row: &PgRow) -> Result<Comment, sqlx::Error> {
    Ok(Comment {
        id: row.try_get("id")?,
        body: row.try_get("body")?,
        author_id: row.try_get("author_id")?,
        post_id: row.try_get("post_id")?,
        parent_id: row.try_get("parent_id")?,
        upvotes: row.try_get("upvotes")?,
        downvotes: row.try_get("downvotes")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        deleted_at: row.try_get("deleted_at")?,
    })
}

pub(crate) fn sub_from_row(row: &PgRow) -> Result<Sub, sqlx::Error> {
    Ok(Sub {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        creator_id: row.try_get("creator_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        deleted_at: row.try_get("deleted_at")?,
    })
}

pub(crate) fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        created_at: row.try_get("created_at")?,
    })
}
