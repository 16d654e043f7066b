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

use crate::datetime::parse_datetime;
use anyhow::{Context, Result};
use aula_core::models::session::Session;
use sqlx::SqlitePool;

pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, session: &Session) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, expires_at, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&session.id)
        .bind(session.user_id)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to create session")?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Session>> {
        let row = sqlx::query_as::<_, (String, i64, String, String)>(
            r#"
            SELECT id, user_id, expires_at, created_at
            FROM sessions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find session by id")?;

        match row {
            Some((id, user_id, expires_at, created_at)) => Ok(Some(Session {
                id,
                user_id,
                expires_at: parse_datetime(&expires_at)?,
                created_at: parse_datetime(&created_at)?,
            })),
            None => Ok(None),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete session")?;

        Ok(())
    }

    /// Remove expired sessions. Returns how many were deleted.
    pub async fn delete_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
            .bind(chrono::Utc::now())
            .execute(&self.pool)
            .await
            .context("Failed to delete expired sessions")?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::create_schema;
    use aula_core::models::user::User;

    async fn setup(pool: &SqlitePool) -> Result<i64> {
        create_schema(pool).await?;
        let user = User::new("admin@example.com".to_string(), "admin".to_string(), "pw")?;
        crate::repositories::UserRepository::new(pool.clone())
            .create(&user)
            .await
    }

    #[sqlx::test]
    async fn test_create_and_find() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let user_id = setup(&pool).await?;
        let repo = SessionRepository::new(pool.clone());

        let session = Session::new(user_id);
        repo.create(&session).await?;

        let found = repo.find_by_id(&session.id).await?.expect("session exists");
        assert_eq!(found.user_id, user_id);
        assert!(!found.is_expired());
        Ok(())
    }

    #[sqlx::test]
    async fn test_delete() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let user_id = setup(&pool).await?;
        let repo = SessionRepository::new(pool.clone());

        let session = Session::new(user_id);
        repo.create(&session).await?;
        repo.delete(&session.id).await?;

        assert!(repo.find_by_id(&session.id).await?.is_none());
        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_expired_keeps_live_sessions() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let user_id = setup(&pool).await?;
        let repo = SessionRepository::new(pool.clone());

        let live = Session::new(user_id);
        repo.create(&live).await?;

        let mut stale = Session::new(user_id);
        stale.expires_at = chrono::Utc::now() - chrono::Duration::hours(1);
        repo.create(&stale).await?;

        let deleted = repo.delete_expired().await?;
        assert_eq!(deleted, 1);
        assert!(repo.find_by_id(&live.id).await?.is_some());
        assert!(repo.find_by_id(&stale.id).await?.is_none());
        Ok(())
    }
}
