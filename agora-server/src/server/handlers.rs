// HTTP request handlers
use agora_shared::types::{
    NewComment, NewPost, NewSub, TargetRef, UpdatePost, VoteCounts, VoteValue,
};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::server::state::AppState;

/// Body of `POST /posts/{id}/vote` and `POST /comments/{id}/vote`.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub direction: VoteValue,
}

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
}

/// Body of `POST /posts/{id}/comments`; the post id comes from the path.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// Body of `PUT /comments/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub body: String,
}

/// Body of `PUT /subs/{name}`; sub names are immutable.
#[derive(Debug, Deserialize)]
pub struct UpdateSubRequest {
    pub description: String,
}

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "agora is running")
}

pub async fn vote_post(
    State(state): State<AppState>,
    AuthUser(voter_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<VoteRequest>,
) -> Result<Json<VoteCounts>, ApiError> {
    let counts =
        state.ledger.cast_vote(voter_id, TargetRef::post(id), request.direction).await?;
    Ok(Json(counts))
}

pub async fn unvote_post(
    State(state): State<AppState>,
    AuthUser(voter_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<VoteCounts>, ApiError> {
    let counts = state.ledger.remove_vote(voter_id, TargetRef::post(id)).await?;
    Ok(Json(counts))
}

pub async fn vote_comment(
    State(state): State<AppState>,
    AuthUser(voter_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<VoteRequest>,
) -> Result<Json<VoteCounts>, ApiError> {
    let counts =
        state.ledger.cast_vote(voter_id, TargetRef::comment(id), request.direction).await?;
    Ok(Json(counts))
}

pub async fn unvote_comment(
    State(state): State<AppState>,
    AuthUser(voter_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<VoteCounts>, ApiError> {
    let counts = state.ledger.remove_vote(voter_id, TargetRef::comment(id)).await?;
    Ok(Json(counts))
}

pub async fn trending_posts(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let posts = state.ranker.trending_posts(query.limit).await?;
    Ok(Json(posts))
}

pub async fn trending_subs(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let subs = state.ranker.trending_subs(query.limit).await?;
    Ok(Json(subs))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.create(&request.username).await?;
    info!(user = %user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn create_sub(
    State(state): State<AppState>,
    AuthUser(creator_id): AuthUser,
    Json(request): Json<NewSub>,
) -> Result<impl IntoResponse, ApiError> {
    let sub = state.subs.create(creator_id, &request).await?;
    info!(sub = %sub.id, name = %sub.name, "sub created");
    Ok((StatusCode::CREATED, Json(sub)))
}

pub async fn get_sub(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let sub = state.subs.get_by_name(&name).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(sub))
}

pub async fn update_sub(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(name): Path<String>,
    Json(request): Json<UpdateSubRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let sub = state.subs.get_by_name(&name).await?.ok_or(ApiError::NotFound)?;
    if sub.creator_id != caller_id {
        return Err(ApiError::Forbidden);
    }
    let updated = state.subs.update(sub.id, &request.description).await?;
    Ok(Json(updated))
}

pub async fn delete_sub(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    let sub = state.subs.get_by_name(&name).await?.ok_or(ApiError::NotFound)?;
    if sub.creator_id != caller_id {
        return Err(ApiError::Forbidden);
    }
    state.subs.soft_delete(sub.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_posts(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let sub = state.subs.get_by_name(&name).await?.ok_or(ApiError::NotFound)?;
    let posts = state
        .posts
        .list_by_sub(sub.id, page.limit.unwrap_or(50).max(0), page.offset.unwrap_or(0).max(0))
        .await?;
    Ok(Json(posts))
}

pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(author_id): AuthUser,
    Json(request): Json<NewPost>,
) -> Result<impl IntoResponse, ApiError> {
    if state.subs.get(request.sub_id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    let post = state.posts.create(author_id, &request).await?;
    info!(post = %post.id, sub = %post.sub_id, "post created");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(post))
}

pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePost>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.get(id).await?.ok_or(ApiError::NotFound)?;
    if post.author_id != caller_id {
        return Err(ApiError::Forbidden);
    }
    let updated = state.posts.update(id, &request).await?;
    Ok(Json(updated))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let post = state.posts.get(id).await?.ok_or(ApiError::NotFound)?;
    if post.author_id != caller_id {
        return Err(ApiError::Forbidden);
    }
    state.posts.soft_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(author_id): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_comment = NewComment {
        body: request.body,
        post_id,
        parent_id: request.parent_id,
    };
    let comment = state.comments.create(author_id, &new_comment).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let comments = state
        .comments
        .list_by_post(post_id, page.limit.unwrap_or(50).max(0), page.offset.unwrap_or(0).max(0))
        .await?;
    Ok(Json(comments))
}

pub async fn update_comment(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = state.comments.get(id).await?.ok_or(ApiError::NotFound)?;
    if comment.author_id != caller_id {
        return Err(ApiError::Forbidden);
    }
    let updated = state.comments.update(id, &request.body).await?;
    Ok(Json(updated))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let comment = state.comments.get(id).await?.ok_or(ApiError::NotFound)?;
    if comment.author_id != caller_id {
        return Err(ApiError::Forbidden);
    }
    state.comments.soft_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
