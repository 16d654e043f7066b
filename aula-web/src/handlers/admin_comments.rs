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
    extract::{Path, Query, State},
    response::IntoResponse,
};
use aula_core::models::comment::CommentTarget;
use aula_db::repositories::CommentRepository;
use serde::Deserialize;

use crate::{auth::RequireAdmin, error::AppError, response::{ApiResponse, Paginated}, AppState};

#[derive(Debug, Deserialize)]
pub struct ModerationQuery {
    #[serde(rename = "type")]
    pub target: Option<String>,
    pub is_approved: Option<bool>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct TargetQuery {
    #[serde(rename = "type")]
    pub target: Option<String>,
}

fn parse_target(raw: Option<&str>) -> Result<CommentTarget, AppError> {
    raw.unwrap_or("blog")
        .parse::<CommentTarget>()
        .map_err(AppError::bad_request)
}

/// Paginated moderation listing; any approval state unless `is_approved`
/// is given.
pub async fn list_comments(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ModerationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let kind = parse_target(query.target.as_deref())?;
    let page = query.page.unwrap_or(1).max(1);
    let limit = state.config.page_size(query.limit);

    let (items, total) = CommentRepository::new(state.db.clone())
        .list_admin(kind, query.is_approved, page, limit)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::data(Paginated::new(items, page, limit, total)))
}

pub async fn approve_comment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
    Query(query): Query<TargetQuery>,
) -> Result<impl IntoResponse, AppError> {
    let kind = parse_target(query.target.as_deref())?;
    let approved = CommentRepository::new(state.db.clone())
        .approve(id, kind)
        .await
        .map_err(AppError::from)?;

    if !approved {
        return Err(AppError::not_found("Comment not found"));
    }

    tracing::info!(comment_id = id, target = %kind, "Comment approved");
    Ok(ApiResponse::message("Comment approved"))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
    Query(query): Query<TargetQuery>,
) -> Result<impl IntoResponse, AppError> {
    let kind = parse_target(query.target.as_deref())?;
    let deleted = CommentRepository::new(state.db.clone())
        .delete(id, kind)
        .await
        .map_err(AppError::from)?;

    if !deleted {
        return Err(AppError::not_found("Comment not found"));
    }

    tracing::info!(comment_id = id, target = %kind, "Comment deleted");
    Ok(ApiResponse::message("Comment deleted"))
}

pub async fn approve_reply(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let approved = CommentRepository::new(state.db.clone())
        .approve_reply(id)
        .await
        .map_err(AppError::from)?;

    if !approved {
        return Err(AppError::not_found("Reply not found"));
    }

    tracing::info!(reply_id = id, "Reply approved");
    Ok(ApiResponse::message("Reply approved"))
}

pub async fn delete_reply(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = CommentRepository::new(state.db.clone())
        .delete_reply(id)
        .await
        .map_err(AppError::from)?;

    if !deleted {
        return Err(AppError::not_found("Reply not found"));
    }

    tracing::info!(reply_id = id, "Reply deleted");
    Ok(ApiResponse::message("Reply deleted"))
}
