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
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use aula_core::models::{blog_post::BlogPost, product::Product, training::Training};
use aula_db::repositories::{BlogPostRepository, ProductRepository, TrainingRepository};
use serde::Deserialize;

use crate::{
    auth::RequireAdmin,
    error::AppError,
    response::{ApiResponse, Paginated},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = state.config.page_size(query.limit);

    let (items, total) = BlogPostRepository::new(state.db.clone())
        .list_published(page, limit)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::data(Paginated::new(items, page, limit, total)))
}

pub async fn get_blog(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post = BlogPostRepository::new(state.db.clone())
        .find_by_slug(&slug)
        .await
        .map_err(AppError::from)?
        .filter(|p| p.is_published)
        .ok_or_else(|| AppError::not_found("Blog post not found"))?;

    Ok(ApiResponse::data(post))
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = state.config.page_size(query.limit);

    let (items, total) = ProductRepository::new(state.db.clone())
        .list_published(page, limit)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::data(Paginated::new(items, page, limit, total)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let product = ProductRepository::new(state.db.clone())
        .find_by_slug(&slug)
        .await
        .map_err(AppError::from)?
        .filter(|p| p.is_published)
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(ApiResponse::data(product))
}

pub async fn list_trainings(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let trainings = TrainingRepository::new(state.db.clone())
        .list_active()
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::data(trainings))
}

#[derive(Debug, Deserialize)]
pub struct BlogPostRequest {
    pub title: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub publish: Option<bool>,
}

pub async fn create_blog(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(request): Json<BlogPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut post = BlogPost::new(
        request.title,
        request.excerpt.unwrap_or_default(),
        request.body,
    );
    post.is_published = request.publish.unwrap_or(false);
    post.is_valid().map_err(AppError::bad_request)?;

    let repo = BlogPostRepository::new(state.db.clone());
    let id = repo.create(&mut post).await.map_err(AppError::from)?;
    post.id = Some(id);

    tracing::info!(blog_post_id = id, slug = %post.slug, "Blog post created");
    Ok((StatusCode::CREATED, ApiResponse::data(post)))
}

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub publish: Option<bool>,
}

pub async fn create_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(request): Json<ProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut product = Product::new(
        request.name,
        request.description.unwrap_or_default(),
        request.price_cents,
    );
    product.is_published = request.publish.unwrap_or(false);
    product.is_valid().map_err(AppError::bad_request)?;

    let repo = ProductRepository::new(state.db.clone());
    let id = repo.create(&mut product).await.map_err(AppError::from)?;
    product.id = Some(id);

    tracing::info!(product_id = id, slug = %product.slug, "Product created");
    Ok((StatusCode::CREATED, ApiResponse::data(product)))
}

pub async fn publish_blog(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let published = BlogPostRepository::new(state.db.clone())
        .publish(id)
        .await
        .map_err(AppError::from)?;

    if !published {
        return Err(AppError::not_found("Blog post not found"));
    }

    tracing::info!(blog_post_id = id, "Blog post published");
    Ok(ApiResponse::message("Blog post published"))
}

pub async fn publish_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let published = ProductRepository::new(state.db.clone())
        .publish(id)
        .await
        .map_err(AppError::from)?;

    if !published {
        return Err(AppError::not_found("Product not found"));
    }

    tracing::info!(product_id = id, "Product published");
    Ok(ApiResponse::message("Product published"))
}

#[derive(Debug, Deserialize)]
pub struct TrainingRequest {
    pub title: String,
    pub description: Option<String>,
    pub duration_weeks: i32,
    pub price_cents: i64,
}

pub async fn create_training(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(request): Json<TrainingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut training = Training::new(
        request.title,
        request.description.unwrap_or_default(),
        request.duration_weeks,
        request.price_cents,
    );
    training.is_valid().map_err(AppError::bad_request)?;

    let repo = TrainingRepository::new(state.db.clone());
    let id = repo.create(&mut training).await.map_err(AppError::from)?;
    training.id = Some(id);

    tracing::info!(training_id = id, slug = %training.slug, "Training created");
    Ok((StatusCode::CREATED, ApiResponse::data(training)))
}
