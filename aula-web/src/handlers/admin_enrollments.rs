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
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use aula_core::models::enrollment::{EnrollmentSource, EnrollmentStatus};
use aula_db::repositories::{EnrollmentFilter, EnrollmentRepository};
use serde::Deserialize;

use crate::{
    auth::RequireAdmin,
    error::AppError,
    export::{enrollments_to_csv, export_filename},
    response::{ApiResponse, Paginated},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct EnrollmentQuery {
    pub status: Option<String>,
    pub training_id: Option<i64>,
    pub source: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl EnrollmentQuery {
    fn to_filter(&self) -> Result<EnrollmentFilter, AppError> {
        let status = self
            .status
            .as_deref()
            .map(|raw| raw.parse::<EnrollmentStatus>())
            .transpose()
            .map_err(AppError::bad_request)?;
        let source = self
            .source
            .as_deref()
            .map(|raw| raw.parse::<EnrollmentSource>())
            .transpose()
            .map_err(AppError::bad_request)?;
        Ok(EnrollmentFilter {
            status,
            training_id: self.training_id,
            source,
            search: self.search.clone(),
        })
    }
}

pub async fn list_enrollments(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<EnrollmentQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.to_filter()?;
    let page = query.page.unwrap_or(1).max(1);
    let limit = state.config.page_size(query.limit);

    let (items, total) = EnrollmentRepository::new(state.db.clone())
        .list_admin(&filter, page, limit)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::data(Paginated::new(items, page, limit, total)))
}

/// Students grouped from enrollments, computed per request.
pub async fn list_students(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<EnrollmentQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.to_filter()?;
    let page = query.page.unwrap_or(1).max(1);
    let limit = state.config.page_size(query.limit);

    let (items, total) = EnrollmentRepository::new(state.db.clone())
        .list_students(&filter, page, limit)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::data(Paginated::new(items, page, limit, total)))
}

/// All matching enrollments as a CSV attachment.
pub async fn download_enrollments(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<EnrollmentQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.to_filter()?;
    let rows = EnrollmentRepository::new(state.db.clone())
        .list_all(&filter)
        .await
        .map_err(AppError::from)?;

    let csv = enrollments_to_csv(&rows);
    let filename = export_filename(chrono::Utc::now());

    tracing::info!(rows = rows.len(), filename = %filename, "Enrollments exported");
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}

pub async fn get_enrollment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let enrollment = EnrollmentRepository::new(state.db.clone())
        .find_by_id(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Enrollment not found"))?;

    Ok(ApiResponse::data(enrollment))
}

#[derive(Debug, Deserialize)]
pub struct EnrollmentNotes {
    pub admin_notes: Option<String>,
}

/// Update the free-form admin notes without touching the status.
pub async fn update_enrollment(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(request): Json<EnrollmentNotes>,
) -> Result<impl IntoResponse, AppError> {
    let repo = EnrollmentRepository::new(state.db.clone());
    let mut enrollment = repo
        .find_by_id(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Enrollment not found"))?;

    enrollment.admin_notes = request.admin_notes;
    enrollment.recorded_by = admin.user.id;
    enrollment.updated_at = chrono::Utc::now();
    repo.update(&enrollment).await.map_err(AppError::from)?;

    Ok(ApiResponse::data(enrollment))
}

async fn transition(
    state: AppState,
    admin: crate::auth::CurrentUser,
    id: i64,
    next: EnrollmentStatus,
    notes: Option<String>,
) -> Result<impl IntoResponse, AppError> {
    let repo = EnrollmentRepository::new(state.db.clone());
    let mut enrollment = repo
        .find_by_id(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Enrollment not found"))?;

    enrollment.transition_to(next).map_err(AppError::bad_request)?;
    if notes.is_some() {
        enrollment.admin_notes = notes;
    }
    enrollment.recorded_by = admin.user.id;
    repo.update(&enrollment).await.map_err(AppError::from)?;

    tracing::info!(enrollment_id = id, status = %next, "Enrollment status changed");
    Ok(ApiResponse::data(enrollment))
}

pub async fn approve_enrollment(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(request): Json<EnrollmentNotes>,
) -> Result<impl IntoResponse, AppError> {
    transition(state, admin, id, EnrollmentStatus::Approved, request.admin_notes).await
}

pub async fn reject_enrollment(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(request): Json<EnrollmentNotes>,
) -> Result<impl IntoResponse, AppError> {
    transition(state, admin, id, EnrollmentStatus::Rejected, request.admin_notes).await
}

pub async fn complete_enrollment(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(request): Json<EnrollmentNotes>,
) -> Result<impl IntoResponse, AppError> {
    transition(state, admin, id, EnrollmentStatus::Completed, request.admin_notes).await
}
