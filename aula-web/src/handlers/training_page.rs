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

use axum::{extract::State, response::IntoResponse, Json};
use aula_core::models::page_settings::TrainingPageSettingsUpdate;
use aula_db::repositories::TrainingPageSettingsRepository;

use crate::{auth::RequireAdmin, error::AppError, response::ApiResponse, AppState};

/// The settings row is seeded during database initialization, so a
/// missing row here is a server fault, not a 404.
pub async fn get_training_page(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let settings = TrainingPageSettingsRepository::new(state.db.clone())
        .get()
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::internal_server_error("Training page settings missing"))?;

    Ok(ApiResponse::data(settings))
}

pub async fn get_training_page_admin(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, AppError> {
    let settings = TrainingPageSettingsRepository::new(state.db.clone())
        .get()
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::internal_server_error("Training page settings missing"))?;

    Ok(ApiResponse::data(settings))
}

/// Section-level merge; sections absent from the body stay as they are.
pub async fn update_training_page(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(update): Json<TrainingPageSettingsUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let settings = TrainingPageSettingsRepository::new(state.db.clone())
        .update(update)
        .await
        .map_err(AppError::from)?;

    tracing::info!("Training page settings updated");
    Ok(ApiResponse::data(settings))
}
