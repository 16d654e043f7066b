// Aula - A training and content platform backend built with Rust
// Copyright (C) 2026 Aula Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use aula_core::models::comment::{Comment, CommentTarget, Reply};
use aula_db::repositories::{BlogPostRepository, CommentRepository, ProductRepository};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{error::AppError, response::ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub struct CommentPayload {
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Resolve a comment target slug to its row id.
async fn resolve_target(
    pool: &SqlitePool,
    kind: CommentTarget,
    slug: &str,
) -> Result<i64, AppError> {
    let id = match kind {
        CommentTarget::Blog => BlogPostRepository::new(pool.clone())
            .find_by_slug(slug)
            .await
            .map_err(AppError::from)?
            .and_then(|p| p.id),
        CommentTarget::Product => ProductRepository::new(pool.clone())
            .find_by_slug(slug)
            .await
            .map_err(AppError::from)?
            .and_then(|p| p.id),
    };
    id.ok_or_else(|| match kind {
        CommentTarget::Blog => AppError::not_found("Blog post not found"),
        CommentTarget::Product => AppError::not_found("Product not found"),
    })
}

async fn list_threads(
    state: AppState,
    kind: CommentTarget,
    slug: String,
) -> Result<impl IntoResponse, AppError> {
    let target_id = resolve_target(&state.db, kind, &slug).await?;
    let threads = CommentRepository::new(state.db.clone())
        .list_approved_threads(kind, target_id)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::data(threads))
}

async fn submit_comment(
    state: AppState,
    kind: CommentTarget,
    slug: String,
    payload: CommentPayload,
) -> Result<impl IntoResponse, AppError> {
    let target_id = resolve_target(&state.db, kind, &slug).await?;

    // New comments always start unapproved, whatever the client sends
    let mut comment = Comment::new(kind, target_id, payload.name, payload.email, payload.body);
    comment.is_valid().map_err(AppError::bad_request)?;

    let repo = CommentRepository::new(state.db.clone());
    let id = repo.create(&comment).await.map_err(AppError::from)?;
    comment.id = Some(id);

    tracing::info!(comment_id = id, target = %kind, "Comment submitted");
    Ok((StatusCode::CREATED, ApiResponse::data(comment)))
}

async fn submit_reply(
    state: AppState,
    kind: CommentTarget,
    comment_id: i64,
    payload: CommentPayload,
) -> Result<impl IntoResponse, AppError> {
    let repo = CommentRepository::new(state.db.clone());
    repo.find_by_id(comment_id, kind)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Comment not found"))?;

    let mut reply = Reply::new(comment_id, payload.name, payload.email, payload.body);
    reply.is_valid().map_err(AppError::bad_request)?;

    let id = repo.create_reply(&reply).await.map_err(AppError::from)?;
    reply.id = Some(id);

    tracing::info!(reply_id = id, comment_id = comment_id, "Reply submitted");
    Ok((StatusCode::CREATED, ApiResponse::data(reply)))
}

pub async fn list_blog_comments(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    list_threads(state, CommentTarget::Blog, slug).await
}

pub async fn list_product_comments(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    list_threads(state, CommentTarget::Product, slug).await
}

pub async fn submit_blog_comment(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<CommentPayload>,
) -> Result<impl IntoResponse, AppError> {
    submit_comment(state, CommentTarget::Blog, slug, payload).await
}

pub async fn submit_product_comment(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<CommentPayload>,
) -> Result<impl IntoResponse, AppError> {
    submit_comment(state, CommentTarget::Product, slug, payload).await
}

pub async fn submit_blog_reply(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    Json(payload): Json<CommentPayload>,
) -> Result<impl IntoResponse, AppError> {
    submit_reply(state, CommentTarget::Blog, comment_id, payload).await
}

pub async fn submit_product_reply(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    Json(payload): Json<CommentPayload>,
) -> Result<impl IntoResponse, AppError> {
    submit_reply(state, CommentTarget::Product, comment_id, payload).await
}
