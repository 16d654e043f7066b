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
use axum_extra::extract::{cookie::Cookie, CookieJar};
use aula_core::models::{session::Session, user::User};
use aula_db::repositories::{SessionRepository, UserRepository};
use serde::Deserialize;

use crate::{
    auth::{CurrentUser, SESSION_COOKIE},
    error::AppError,
    response::ApiResponse,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Verify credentials, open a session and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_repo = UserRepository::new(state.db.clone());
    let user = user_repo
        .find_by_email(&request.email)
        .await
        .map_err(AppError::from)?;

    let user = match user {
        Some(u) if u.is_active => u,
        Some(_) => return Err(AppError::forbidden("Account disabled")),
        None => return Err(AppError::unauthorized("Invalid email or password")),
    };

    let password_ok = user
        .verify_password(&request.password)
        .map_err(AppError::from)?;
    if !password_ok {
        return Err(AppError::unauthorized("Invalid email or password"));
    }

    let user_id = user
        .id
        .ok_or_else(|| AppError::internal_server_error("User record has no id"))?;
    let session = Session::new(user_id);
    SessionRepository::new(state.db.clone())
        .create(&session)
        .await
        .map_err(AppError::from)?;

    tracing::info!(user_id = user_id, "Admin logged in");

    let cookie = Cookie::build((SESSION_COOKIE, session.id.clone()))
        .path("/")
        .http_only(true)
        .build();
    let jar = jar.add(cookie);

    Ok((jar, ApiResponse::data(LoginResponse { user })))
}

#[derive(Debug, serde::Serialize)]
pub struct LoginResponse {
    pub user: User,
}

/// Close the current session and clear the cookie.
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    SessionRepository::new(state.db.clone())
        .delete(&current.session.id)
        .await
        .map_err(AppError::from)?;

    tracing::info!(user_id = current.session.user_id, "Admin logged out");

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    Ok((jar, ApiResponse::message("Logged out")))
}
