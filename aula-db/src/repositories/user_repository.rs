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
use aula_core::models::user::User;
use sqlx::SqlitePool;

type UserRow = (i64, String, String, String, bool, bool, String, String);

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn from_row(row: UserRow) -> Result<User> {
        let (id, email, username, password_hash, is_active, is_admin, created_at, updated_at) = row;
        Ok(User {
            id: Some(id),
            email,
            username,
            password_hash,
            is_active,
            is_admin,
            created_at: parse_datetime(&created_at)?,
            updated_at: parse_datetime(&updated_at)?,
        })
    }

    pub async fn create(&self, user: &User) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, username, password_hash, is_active, is_admin, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.is_admin)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to create user")?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, username, password_hash, is_active, is_admin, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find user by id")?;

        row.map(Self::from_row).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, username, password_hash, is_active, is_admin, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find user by email")?;

        row.map(Self::from_row).transpose()
    }

    pub async fn update(&self, user: &User) -> Result<()> {
        let id = user.id.context("Cannot update user without ID")?;

        let rows_affected = sqlx::query(
            r#"
            UPDATE users
            SET email = ?, username = ?, password_hash = ?, is_active = ?, is_admin = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.is_admin)
        .bind(user.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update user")?
        .rows_affected();

        if rows_affected == 0 {
            return Err(anyhow::anyhow!("User with id {} not found", id));
        }

        Ok(())
    }
}
