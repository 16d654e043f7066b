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
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeader,
};
use aula_core::models::{session::Session, user::User};
use aula_db::repositories::{SessionRepository, UserRepository};
use sqlx::SqlitePool;

use crate::error::AppError;

pub const SESSION_COOKIE: &str = "session_id";

/// Current authenticated admin, extracted from the session cookie or a
/// Bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub session: Session,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    SqlitePool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session_id = extract_session_id(parts).await?;
        let pool = SqlitePool::from_ref(state);

        let session_repo = SessionRepository::new(pool.clone());
        let session = session_repo
            .find_by_id(&session_id)
            .await
            .map_err(|_| AppError::internal_server_error("Database error"))?
            .ok_or_else(|| AppError::unauthorized("Invalid session"))?;

        if session.is_expired() {
            return Err(AppError::unauthorized("Session expired"));
        }

        let user_repo = UserRepository::new(pool);
        let user = user_repo
            .find_by_id(session.user_id)
            .await
            .map_err(|_| AppError::internal_server_error("Database error"))?
            .ok_or_else(|| AppError::unauthorized("User not found"))?;

        if !user.is_active {
            return Err(AppError::forbidden("Account disabled"));
        }

        Ok(CurrentUser { user, session })
    }
}

/// Require an admin account. Wraps `CurrentUser` and rejects non-admins.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    SqlitePool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let current = CurrentUser::from_request_parts(parts, state).await?;

        if !current.user.is_admin {
            return Err(AppError::forbidden("Admin access required"));
        }

        Ok(RequireAdmin(current))
    }
}

async fn extract_session_id(parts: &mut Parts) -> Result<String, AppError> {
    // First try cookie
    let cookies = parts.extract::<axum_extra::extract::CookieJar>().await.ok();

    if let Some(cookies) = cookies {
        if let Some(session_cookie) = cookies.get(SESSION_COOKIE) {
            return Ok(session_cookie.value().to_string());
        }
    }

    // Then try Authorization header
    if let Ok(TypedHeader(Authorization(bearer))) =
        parts.extract::<TypedHeader<Authorization<Bearer>>>().await
    {
        return Ok(bearer.token().to_string());
    }

    Err(AppError::unauthorized("No session found"))
}
