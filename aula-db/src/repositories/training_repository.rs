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
use aula_core::models::training::Training;
use sqlx::SqlitePool;

type TrainingRow = (i64, String, String, String, i32, i64, bool, String, String);

const COLUMNS: &str =
    "id, slug, title, description, duration_weeks, price_cents, is_active, created_at, updated_at";

pub struct TrainingRepository {
    pool: SqlitePool,
}

impl TrainingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn from_row(row: TrainingRow) -> Result<Training> {
        let (id, slug, title, description, duration_weeks, price_cents, is_active, created_at, updated_at) =
            row;
        Ok(Training {
            id: Some(id),
            slug,
            title,
            description,
            duration_weeks,
            price_cents,
            is_active,
            created_at: parse_datetime(&created_at)?,
            updated_at: parse_datetime(&updated_at)?,
        })
    }

    pub async fn create(&self, training: &mut Training) -> Result<i64> {
        training.slug = self.generate_unique_slug(&training.slug).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO trainings (slug, title, description, duration_weeks, price_cents, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&training.slug)
        .bind(&training.title)
        .bind(&training.description)
        .bind(training.duration_weeks)
        .bind(training.price_cents)
        .bind(training.is_active)
        .bind(training.created_at)
        .bind(training.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to create training")?;

        Ok(result.last_insert_rowid())
    }

    async fn generate_unique_slug(&self, base_slug: &str) -> Result<String> {
        let mut slug = base_slug.to_string();
        let mut suffix = 1;

        loop {
            let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trainings WHERE slug = ?")
                .bind(&slug)
                .fetch_one(&self.pool)
                .await
                .context("Failed to check slug existence")?;

            if exists == 0 {
                return Ok(slug);
            }

            suffix += 1;
            slug = format!("{}-{}", base_slug, suffix);
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Training>> {
        let row = sqlx::query_as::<_, TrainingRow>(&format!(
            "SELECT {} FROM trainings WHERE id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find training by id")?;

        row.map(Self::from_row).transpose()
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Training>> {
        let row = sqlx::query_as::<_, TrainingRow>(&format!(
            "SELECT {} FROM trainings WHERE slug = ?",
            COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find training by slug")?;

        row.map(Self::from_row).transpose()
    }

    /// Active trainings, newest first. The list is small enough to not
    /// need pagination.
    pub async fn list_active(&self) -> Result<Vec<Training>> {
        let rows = sqlx::query_as::<_, TrainingRow>(&format!(
            r#"
            SELECT {}
            FROM trainings
            WHERE is_active = 1
            ORDER BY created_at DESC, id DESC
            "#,
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list active trainings")?;

        rows.into_iter().map(Self::from_row).collect()
    }
}
