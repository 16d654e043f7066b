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

use crate::utils::slug::generate_slug_from_title;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Option<i64>,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: String, description: String, price_cents: i64) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            slug: generate_slug_from_title(&name),
            name,
            description,
            price_cents,
            is_published: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_valid(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name cannot be empty".to_string());
        }
        if self.name.len() > 200 {
            return Err("Name cannot exceed 200 characters".to_string());
        }
        if self.price_cents < 0 {
            return Err("Price cannot be negative".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_generates_slug() {
        let product = Product::new(
            "Starter Tool Kit".to_string(),
            "Everything you need".to_string(),
            14900,
        );
        assert_eq!(product.slug, "starter-tool-kit");
        assert!(!product.is_published);
    }

    #[test]
    fn test_negative_price_rejected() {
        let product = Product::new("Kit".to_string(), "".to_string(), -1);
        assert!(product.is_valid().is_err());
    }
}
