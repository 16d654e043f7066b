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
    http::{HeaderValue, StatusCode},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{handlers, AppState};

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        // Health check
        .route("/.health", get(health))
        // Public: comments
        .route(
            "/comments/blog/{slug}",
            get(handlers::comments::list_blog_comments).post(handlers::comments::submit_blog_comment),
        )
        .route(
            "/comments/product/{slug}",
            get(handlers::comments::list_product_comments)
                .post(handlers::comments::submit_product_comment),
        )
        .route(
            "/comments/blog/reply/{id}",
            post(handlers::comments::submit_blog_reply),
        )
        .route(
            "/comments/product/reply/{id}",
            post(handlers::comments::submit_product_reply),
        )
        // Public: enrollments and content
        .route("/enrollments", post(handlers::enrollments::submit_enrollment))
        .route("/training-page", get(handlers::training_page::get_training_page))
        .route("/blogs", get(handlers::content::list_blogs))
        .route("/blogs/{slug}", get(handlers::content::get_blog))
        .route("/products", get(handlers::content::list_products))
        .route("/products/{slug}", get(handlers::content::get_product))
        .route("/trainings", get(handlers::content::list_trainings))
        // Admin: auth
        .route("/admin/login", post(handlers::auth::login))
        .route("/admin/logout", post(handlers::auth::logout))
        // Admin: comment moderation
        .route("/admin/comments", get(handlers::admin_comments::list_comments))
        .route(
            "/admin/comments/{id}/approve",
            put(handlers::admin_comments::approve_comment),
        )
        .route(
            "/admin/comments/{id}",
            delete(handlers::admin_comments::delete_comment),
        )
        .route(
            "/admin/replies/{id}/approve",
            put(handlers::admin_comments::approve_reply),
        )
        .route(
            "/admin/replies/{id}",
            delete(handlers::admin_comments::delete_reply),
        )
        // Admin: enrollments
        .route(
            "/admin/enrollments",
            get(handlers::admin_enrollments::list_enrollments),
        )
        .route(
            "/admin/enrollments/students",
            get(handlers::admin_enrollments::list_students),
        )
        .route(
            "/admin/enrollments/download",
            get(handlers::admin_enrollments::download_enrollments),
        )
        .route(
            "/admin/enrollments/{id}",
            get(handlers::admin_enrollments::get_enrollment)
                .put(handlers::admin_enrollments::update_enrollment),
        )
        .route(
            "/admin/enrollments/{id}/approve",
            put(handlers::admin_enrollments::approve_enrollment),
        )
        .route(
            "/admin/enrollments/{id}/reject",
            put(handlers::admin_enrollments::reject_enrollment),
        )
        .route(
            "/admin/enrollments/{id}/complete",
            put(handlers::admin_enrollments::complete_enrollment),
        )
        // Admin: training page settings
        .route(
            "/admin/training-page",
            get(handlers::training_page::get_training_page_admin)
                .put(handlers::training_page::update_training_page),
        )
        // Admin: content
        .route("/admin/blogs", post(handlers::content::create_blog))
        .route(
            "/admin/blogs/{id}/publish",
            put(handlers::content::publish_blog),
        )
        .route("/admin/products", post(handlers::content::create_product))
        .route(
            "/admin/products/{id}/publish",
            put(handlers::content::publish_product),
        )
        .route("/admin/trainings", post(handlers::content::create_training))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn health() -> StatusCode {
    StatusCode::OK
}
