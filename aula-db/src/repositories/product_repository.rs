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
use aula_core::models::product::Product;
use sqlx::SqlitePool;

type ProductRow = (i64, String, String, String, i64, bool, String, String);

const COLUMNS: &str = "id, slug, name, description, price_cents, is_published, created_at, updated_at";

pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn from_row(row: ProductRow) -> Result<Product> {
        let (id, slug, name, description, price_cents, is_published, created_at, updated_at) = row;
        Ok(Product {
            id: Some(id),
            slug,
            name,
            description,
            price_cents,
            is_published,
            created_at: parse_datetime(&created_at)?,
            updated_at: parse_datetime(&updated_at)?,
        })
    }

    pub async fn create(&self, product: &mut Product) -> Result<i64> {
        product.slug = self.generate_unique_slug(&product.slug).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO products (slug, name, description, price_cents, is_published, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.slug)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.is_published)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to create product")?;

        Ok(result.last_insert_rowid())
    }

    async fn generate_unique_slug(&self, base_slug: &str) -> Result<String> {
        let mut slug = base_slug.to_string();
        let mut suffix = 1;

        loop {
            let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE slug = ?")
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

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find product by id")?;

        row.map(Self::from_row).transpose()
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE slug = ?",
            COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find product by slug")?;

        row.map(Self::from_row).transpose()
    }

    pub async fn list_published(&self, page: i64, limit: i64) -> Result<(Vec<Product>, i64)> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_published = 1")
                .fetch_one(&self.pool)
                .await
                .context("Failed to count published products")?;

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {}
            FROM products
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
        .context("Failed to list published products")?;

        let products = rows
            .into_iter()
            .map(Self::from_row)
            .collect::<Result<Vec<_>>>()?;
        Ok((products, total))
    }

    pub async fn publish(&self, id: i64) -> Result<bool> {
        let rows = sqlx::query(
            "UPDATE products SET is_published = 1, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to publish product")?
        .rows_affected();

        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::create_schema;

    #[sqlx::test]
    async fn test_create_and_find() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        create_schema(&pool).await?;
        let repo = ProductRepository::new(pool.clone());

        let mut product = Product::new(
            "Starter Tool Kit".to_string(),
            "Everything you need".to_string(),
            14900,
        );
        let id = repo.create(&mut product).await?;

        let found = repo.find_by_slug("starter-tool-kit").await?.unwrap();
        assert_eq!(found.id, Some(id));
        assert_eq!(found.price_cents, 14900);
        Ok(())
    }

    #[sqlx::test]
    async fn test_list_published_pagination() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        create_schema(&pool).await?;
        let repo = ProductRepository::new(pool.clone());

        for i in 0..5 {
            let mut p = Product::new(format!("Kit {}", i), "".to_string(), 1000);
            let id = repo.create(&mut p).await?;
            repo.publish(id).await?;
        }

        let (page1, total) = repo.list_published(1, 2).await?;
        assert_eq!(total, 5);
        assert_eq!(page1.len(), 2);

        let (page3, _) = repo.list_published(3, 2).await?;
        assert_eq!(page3.len(), 1);
        Ok(())
    }
}
