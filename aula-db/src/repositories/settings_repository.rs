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
use aula_core::models::page_settings::{TrainingPageSettings, TrainingPageSettingsUpdate};
use sqlx::SqlitePool;

type SettingsRow = (
    i64,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
);

const COLUMNS: &str = "id, hero, featured_course, standout, modules, testimonials, \
     impact, cta, custom_sections, created_at, updated_at";

/// The training page settings live in a single-row table. The row is
/// seeded at startup; reads and writes always address that row.
pub struct TrainingPageSettingsRepository {
    pool: SqlitePool,
}

impl TrainingPageSettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn from_row(row: SettingsRow) -> Result<TrainingPageSettings> {
        let (id, hero, featured_course, standout, modules, testimonials, impact, cta, custom_sections, created_at, updated_at) =
            row;
        Ok(TrainingPageSettings {
            id: Some(id),
            hero: serde_json::from_str(&hero).context("Invalid hero section data")?,
            featured_course: serde_json::from_str(&featured_course)
                .context("Invalid featured course data")?,
            standout: serde_json::from_str(&standout).context("Invalid standout section data")?,
            modules: serde_json::from_str(&modules).context("Invalid modules data")?,
            testimonials: serde_json::from_str(&testimonials).context("Invalid testimonials data")?,
            impact: serde_json::from_str(&impact).context("Invalid impact stats data")?,
            cta: serde_json::from_str(&cta).context("Invalid call-to-action data")?,
            custom_sections: serde_json::from_str(&custom_sections)
                .context("Invalid custom sections data")?,
            created_at: parse_datetime(&created_at)?,
            updated_at: parse_datetime(&updated_at)?,
        })
    }

    pub async fn get(&self) -> Result<Option<TrainingPageSettings>> {
        let row = sqlx::query_as::<_, SettingsRow>(&format!(
            "SELECT {} FROM training_page_settings ORDER BY id LIMIT 1",
            COLUMNS
        ))
        .fetch_optional(&self.pool)
        .await
        .context("Failed to load training page settings")?;

        row.map(Self::from_row).transpose()
    }

    /// Insert the default settings row. Called once at startup when the
    /// table is empty.
    pub async fn seed_default(&self) -> Result<i64> {
        let defaults = TrainingPageSettings::default();
        let result = sqlx::query(
            r#"
            INSERT INTO training_page_settings (
                hero, featured_course, standout, modules, testimonials,
                impact, cta, custom_sections, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(serde_json::to_string(&defaults.hero)?)
        .bind(serde_json::to_string(&defaults.featured_course)?)
        .bind(serde_json::to_string(&defaults.standout)?)
        .bind(serde_json::to_string(&defaults.modules)?)
        .bind(serde_json::to_string(&defaults.testimonials)?)
        .bind(serde_json::to_string(&defaults.impact)?)
        .bind(serde_json::to_string(&defaults.cta)?)
        .bind(serde_json::to_string(&defaults.custom_sections)?)
        .bind(defaults.created_at)
        .bind(defaults.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to seed training page settings")?;

        Ok(result.last_insert_rowid())
    }

    /// Merge the update into the current settings and persist the result.
    /// Sections absent from the update are left untouched.
    pub async fn update(&self, update: TrainingPageSettingsUpdate) -> Result<TrainingPageSettings> {
        let mut settings = self
            .get()
            .await?
            .context("Training page settings have not been seeded")?;
        let id = settings.id.context("Settings row has no id")?;
        settings.apply(update);

        sqlx::query(
            r#"
            UPDATE training_page_settings
            SET hero = ?, featured_course = ?, standout = ?, modules = ?,
                testimonials = ?, impact = ?, cta = ?, custom_sections = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(serde_json::to_string(&settings.hero)?)
        .bind(serde_json::to_string(&settings.featured_course)?)
        .bind(serde_json::to_string(&settings.standout)?)
        .bind(serde_json::to_string(&settings.modules)?)
        .bind(serde_json::to_string(&settings.testimonials)?)
        .bind(serde_json::to_string(&settings.impact)?)
        .bind(serde_json::to_string(&settings.cta)?)
        .bind(serde_json::to_string(&settings.custom_sections)?)
        .bind(settings.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update training page settings")?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::create_schema;
    use aula_core::models::page_settings::HeroSection;

    #[sqlx::test]
    async fn test_get_before_seed_is_none() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        create_schema(&pool).await?;

        let repo = TrainingPageSettingsRepository::new(pool.clone());
        assert!(repo.get().await?.is_none());
        Ok(())
    }

    #[sqlx::test]
    async fn test_seed_then_get_round_trips_defaults() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        create_schema(&pool).await?;

        let repo = TrainingPageSettingsRepository::new(pool.clone());
        let id = repo.seed_default().await?;

        let settings = repo.get().await?.unwrap();
        assert_eq!(settings.id, Some(id));

        let defaults = TrainingPageSettings::default();
        assert_eq!(settings.hero, defaults.hero);
        assert_eq!(settings.modules, defaults.modules);
        assert_eq!(settings.custom_sections, defaults.custom_sections);
        Ok(())
    }

    #[sqlx::test]
    async fn test_partial_update_leaves_other_sections() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        create_schema(&pool).await?;

        let repo = TrainingPageSettingsRepository::new(pool.clone());
        repo.seed_default().await?;
        let before = repo.get().await?.unwrap();

        let update = TrainingPageSettingsUpdate {
            hero: Some(HeroSection {
                title: "New hero title".to_string(),
                ..before.hero.clone()
            }),
            ..Default::default()
        };
        let updated = repo.update(update).await?;
        assert_eq!(updated.hero.title, "New hero title");
        assert_eq!(updated.cta, before.cta);
        assert_eq!(updated.modules, before.modules);

        let reloaded = repo.get().await?.unwrap();
        assert_eq!(reloaded.hero.title, "New hero title");
        assert_eq!(reloaded.impact, before.impact);
        Ok(())
    }

    #[sqlx::test]
    async fn test_update_without_seed_fails() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        create_schema(&pool).await?;

        let repo = TrainingPageSettingsRepository::new(pool.clone());
        let result = repo.update(TrainingPageSettingsUpdate::default()).await;
        assert!(result.is_err());
        Ok(())
    }
}
