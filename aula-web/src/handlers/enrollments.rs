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

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use aula_core::models::enrollment::{Enrollment, EnrollmentSource};
use aula_db::repositories::{EnrollmentRepository, TrainingRepository};
use serde::Deserialize;

use crate::{error::AppError, response::ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub struct EnrollmentRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub training_id: i64,
    pub source: Option<String>,
    pub message: Option<String>,
}

/// Public enrollment submission. Always lands as pending; repeat
/// submissions by the same person are allowed.
pub async fn submit_enrollment(
    State(state): State<AppState>,
    Json(request): Json<EnrollmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    TrainingRepository::new(state.db.clone())
        .find_by_id(request.training_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Training not found"))?;

    let source = match request.source.as_deref() {
        Some(raw) => raw
            .parse::<EnrollmentSource>()
            .map_err(AppError::bad_request)?,
        None => EnrollmentSource::Website,
    };

    let mut enrollment = Enrollment::new(
        request.name,
        request.email,
        request.phone,
        request.training_id,
        source,
    );
    enrollment.student_whatsapp = request.whatsapp;
    enrollment.message = request.message;
    enrollment.is_valid().map_err(AppError::bad_request)?;

    let id = EnrollmentRepository::new(state.db.clone())
        .create(&enrollment)
        .await
        .map_err(AppError::from)?;
    enrollment.id = Some(id);

    tracing::info!(
        enrollment_id = id,
        training_id = enrollment.training_id,
        "Enrollment submitted"
    );
    Ok((StatusCode::CREATED, ApiResponse::data(enrollment)))
}
