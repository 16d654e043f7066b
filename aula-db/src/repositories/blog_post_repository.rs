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
use aula_core::models::blog_post::BlogPost;
use sqlx::SqlitePool;

type BlogPostRow = (i64, String, String, String, String, bool, String, String);

const COLUMNS: &str = "id, slug, title, excerpt, body, is_published, created_at, updated_at";

pub struct BlogPostRepository {
    pool: SqlitePool,
}

impl BlogPostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn from_row(row: BlogPostRow) -> Result<BlogPost> {
        let (id, slug, title, excerpt, body, is_published, created_at, updated_at) = row;
        Ok(BlogPost {
            id: Some(id),
            slug,
            title,
            excerpt,
            body,
            is_published,
            created_at: parse_datetime(&created_at)?,
            updated_at: parse_datetime(&updated_at)?,
        })
    }

    /// Insert a post, uniquifying its slug with a numeric suffix on conflict.
    pub async fn create(&self, post: &mut BlogPost) -> Result<i64> {
        post.slug = self.generate_unique_slug(&post.slug).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO blog_posts (slug, title, excerpt, body, is_published, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&post.slug)
        .bind(&post.title)
        .bind(&post.excerpt)
        .bind(&post.body)
        .bind(post.is_published)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to create blog post")?;

        Ok(result.last_insert_rowid())
    }

    async fn generate_unique_slug(&self, base_slug: &str) -> Result<String> {
        let mut slug = base_slug.to_string();
        let mut suffix = 1;

        loop {
            let exists: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts WHERE slug = ?")
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

    pub async fn find_by_id(&self, id: i64) -> Result<Option<BlogPost>> {
        let row = sqlx::query_as::<_, BlogPostRow>(&format!(
            "SELECT {} FROM blog_posts WHERE id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find blog post by id")?;

        row.map(Self::from_row).transpose()
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        let row = sqlx::query_as::<_, BlogPostRow>(&format!(
            "SELECT {} FROM blog_posts WHERE slug = ?",
            COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find blog post by slug")?;

        row.map(Self::from_row).transpose()
    }

    /// Published posts, newest first.
    pub async fn list_published(&self, page: i64, limit: i64) -> Result<(Vec<BlogPost>, i64)> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts WHERE is_published = 1")
                .fetch_one(&self.pool)
                .await
                .context("Failed to count published blog posts")?;

        let rows = sqlx::query_as::<_, BlogPostRow>(&format!(
            r#"
            SELECT {}
            FROM blog_posts
            WHERE is_published = 1
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
            COLUMNS
        ))
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list published blog posts")?;

        let posts = rows
            .into_iter()
            .map(Self::from_row)
            .collect::<Result<Vec<_>>>()?;
        Ok((posts, total))
    }

    pub async fn publish(&self, id: i64) -> Result<bool> {
        let rows = sqlx::query(
            "UPDATE blog_posts SET is_published = 1, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to publish blog post")?
        .rows_affected();

        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::create_schema;

    async fn setup(pool: &SqlitePool) -> Result<BlogPostRepository> {
        create_schema(pool).await?;
        Ok(BlogPostRepository::new(pool.clone()))
    }

    fn post(title: &str) -> BlogPost {
        BlogPost::new(title.to_string(), "excerpt".to_string(), "body".to_string())
    }

    #[sqlx::test]
    async fn test_create_and_find_by_slug() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let repo = setup(&pool).await?;

        let mut p = post("Why We Teach");
        let id = repo.create(&mut p).await?;

        let found = repo.find_by_slug("why-we-teach").await?.unwrap();
        assert_eq!(found.id, Some(id));
        assert_eq!(found.title, "Why We Teach");
        Ok(())
    }

    #[sqlx::test]
    async fn test_slug_conflict_gets_suffix() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let repo = setup(&pool).await?;

        let mut first = post("Same Title");
        let mut second = post("Same Title");
        repo.create(&mut first).await?;
        repo.create(&mut second).await?;

        assert_eq!(first.slug, "same-title");
        assert_eq!(second.slug, "same-title-2");
        Ok(())
    }

    #[sqlx::test]
    async fn test_list_published_excludes_drafts() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let repo = setup(&pool).await?;

        let mut draft = post("Draft");
        repo.create(&mut draft).await?;

        let mut live = post("Live");
        let live_id = repo.create(&mut live).await?;
        repo.publish(live_id).await?;

        let (posts, total) = repo.list_published(1, 10).await?;
        assert_eq!(total, 1);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Live");
        Ok(())
    }

    #[sqlx::test]
    async fn test_publish_missing_post() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let repo = setup(&pool).await?;
        assert!(!repo.publish(999).await?);
        Ok(())
    }
}
