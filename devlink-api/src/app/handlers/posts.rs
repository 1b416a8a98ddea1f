//! 帖子 handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use devlink_core::validation::{FieldBag, POST_RULES};
use devlink_core::{Comment, Post, PostInput};
use serde_json::{json, Value};

use super::super::error::ApiError;
use super::super::middleware::Identity;
use super::super::state::AppState;

fn validate_text(input: &PostInput) -> Result<String, ApiError> {
    let bag = FieldBag::new().put("text", input.text.as_deref());
    let validation = POST_RULES.validate(&bag);
    if !validation.is_valid() {
        return Err(ApiError::validation(validation.errors));
    }
    Ok(input.text.clone().unwrap_or_default())
}

/// GET /api/v1/posts - 全部帖子，最新在前
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = state.posts.list().await?;
    Ok(Json(posts))
}

/// GET /api/v1/posts/:id - 单个帖子
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let post = state.posts.get(&id).await?;
    Ok(Json(post))
}

/// POST /api/v1/posts - 发帖
pub async fn create_post(
    State(state): State<AppState>,
    Identity(auth): Identity,
    Json(input): Json<PostInput>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let text = validate_text(&input)?;
    let post = state.posts.create(&auth.author(), &text).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// DELETE /api/v1/posts/:id - 删帖（仅作者）
pub async fn delete_post(
    State(state): State<AppState>,
    Identity(auth): Identity,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.posts.delete(&id, &auth.claims.sub).await?;
    Ok(Json(json!({ "success": true })))
}

/// PUT /api/v1/posts/:id/like - 点赞
pub async fn like_post(
    State(state): State<AppState>,
    Identity(auth): Identity,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let post = state.posts.like(&id, &auth.claims.sub).await?;
    Ok(Json(post))
}

/// PUT /api/v1/posts/:id/unlike - 取消点赞
pub async fn unlike_post(
    State(state): State<AppState>,
    Identity(auth): Identity,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let post = state.posts.unlike(&id, &auth.claims.sub).await?;
    Ok(Json(post))
}

/// GET /api/v1/posts/:id/comments - 帖子的评论列表
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let post = state.posts.get(&id).await?;
    Ok(Json(post.comments))
}

/// POST /api/v1/posts/:id/comments - 追加评论
pub async fn add_comment(
    State(state): State<AppState>,
    Identity(auth): Identity,
    Path(id): Path<String>,
    Json(input): Json<PostInput>,
) -> Result<Json<Post>, ApiError> {
    let text = validate_text(&input)?;
    let post = state.posts.add_comment(&id, &auth.author(), &text).await?;
    Ok(Json(post))
}

/// GET /api/v1/posts/:id/comments/:cid - 单条评论
pub async fn get_comment(
    State(state): State<AppState>,
    Identity(_auth): Identity,
    Path((id, cid)): Path<(String, String)>,
) -> Result<Json<Comment>, ApiError> {
    let comment = state.posts.get_comment(&id, &cid).await?;
    Ok(Json(comment))
}

/// DELETE /api/v1/posts/:id/comments/:cid - 删除评论
pub async fn remove_comment(
    State(state): State<AppState>,
    Identity(_auth): Identity,
    Path((id, cid)): Path<(String, String)>,
) -> Result<Json<Post>, ApiError> {
    let post = state.posts.remove_comment(&id, &cid).await?;
    Ok(Json(post))
}
