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

use crate::repositories::TrainingPageSettingsRepository;
use anyhow::{Context, Result};
use aula_core::models::user::User;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize the database: create the file if needed, apply the schema,
/// and seed the training-page settings singleton. Seeding here (instead of
/// lazily on first read) is what keeps the singleton unique under
/// concurrent first access.
pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    if database_url.starts_with("sqlite:") {
        let path = database_url.trim_start_matches("sqlite:");
        if !path.starts_with(":memory:") {
            if let Some(parent) = Path::new(path).parent() {
                std::fs::create_dir_all(parent).context("Failed to create database directory")?;
            }
        }
    }

    let pool = SqlitePool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    create_schema(&pool).await?;

    let settings_repo = TrainingPageSettingsRepository::new(pool.clone());
    if settings_repo.get().await?.is_none() {
        tracing::info!("Seeding default training page settings");
        settings_repo.seed_default().await?;
    }

    Ok(pool)
}

/// Apply the schema. Every statement is idempotent so this can run on
/// every startup and on fresh in-memory test databases.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_admin INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS blog_posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slug TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            excerpt TEXT NOT NULL DEFAULT '',
            body TEXT NOT NULL DEFAULT '',
            is_published INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slug TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            price_cents INTEGER NOT NULL DEFAULT 0,
            is_published INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS trainings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slug TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            duration_weeks INTEGER NOT NULL DEFAULT 1,
            price_cents INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            target_kind TEXT NOT NULL,
            target_id INTEGER NOT NULL,
            author_name TEXT NOT NULL,
            author_email TEXT NOT NULL,
            body TEXT NOT NULL,
            is_approved INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS replies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            comment_id INTEGER NOT NULL,
            author_name TEXT NOT NULL,
            author_email TEXT NOT NULL,
            body TEXT NOT NULL,
            is_approved INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (comment_id) REFERENCES comments(id) ON DELETE CASCADE
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS enrollments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_name TEXT NOT NULL,
            student_email TEXT NOT NULL,
            student_phone TEXT NOT NULL,
            student_whatsapp TEXT,
            training_id INTEGER NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            source TEXT NOT NULL DEFAULT 'website',
            message TEXT,
            admin_notes TEXT,
            recorded_by INTEGER,
            approved_at TEXT,
            completed_at TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (training_id) REFERENCES trainings(id),
            FOREIGN KEY (recorded_by) REFERENCES users(id)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS training_page_settings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            hero TEXT NOT NULL,
            featured_course TEXT NOT NULL,
            standout TEXT NOT NULL,
            modules TEXT NOT NULL,
            testimonials TEXT NOT NULL,
            impact TEXT NOT NULL,
            cta TEXT NOT NULL,
            custom_sections TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_comments_target ON comments(target_kind, target_id)",
        "CREATE INDEX IF NOT EXISTS idx_replies_comment_id ON replies(comment_id)",
        "CREATE INDEX IF NOT EXISTS idx_enrollments_training_id ON enrollments(training_id)",
        "CREATE INDEX IF NOT EXISTS idx_enrollments_status ON enrollments(status)",
        "CREATE INDEX IF NOT EXISTS idx_enrollments_student_email ON enrollments(student_email)",
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to apply schema statement")?;
    }

    Ok(())
}

/// Create the admin account if it does not exist yet. Returns the user id.
pub async fn ensure_admin_user(
    pool: &SqlitePool,
    email: &str,
    username: &str,
    password: &str,
) -> Result<i64> {
    let repo = crate::repositories::UserRepository::new(pool.clone());

    if let Some(existing) = repo.find_by_email(email).await? {
        return existing
            .id
            .context("Existing admin user has no id");
    }

    let mut user = User::new(email.to_string(), username.to_string(), password)?;
    user.is_admin = true;
    let id = repo.create(&user).await?;
    tracing::info!(email, "Created admin user");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    async fn test_schema_is_idempotent() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        create_schema(&pool).await?;
        create_schema(&pool).await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 0);
        Ok(())
    }

    #[sqlx::test]
    async fn test_init_seeds_settings_once() -> Result<()> {
        let pool = init_database("sqlite::memory:").await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM training_page_settings")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 1);

        // Re-running schema + seed logic must not duplicate the singleton
        create_schema(&pool).await?;
        let repo = TrainingPageSettingsRepository::new(pool.clone());
        assert!(repo.get().await?.is_some());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM training_page_settings")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_ensure_admin_user_is_idempotent() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        create_schema(&pool).await?;

        let first = ensure_admin_user(&pool, "admin@example.com", "admin", "pw-123456").await?;
        let second = ensure_admin_user(&pool, "admin@example.com", "admin", "other-pw").await?;
        assert_eq!(first, second);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 1);
        Ok(())
    }
}
