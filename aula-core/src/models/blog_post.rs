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
pub struct BlogPost {
    pub id: Option<i64>,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    pub fn new(title: String, excerpt: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            slug: generate_slug_from_title(&title),
            title,
            excerpt,
            body,
            is_published: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_valid(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title cannot be empty".to_string());
        }
        if self.title.len() > 200 {
            return Err("Title cannot exceed 200 characters".to_string());
        }
        if self.slug.is_empty() {
            return Err("Slug cannot be empty".to_string());
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
        let post = BlogPost::new(
            "Why We Teach".to_string(),
            "A short excerpt".to_string(),
            "Full body".to_string(),
        );
        assert_eq!(post.slug, "why-we-teach");
        assert!(!post.is_published);
    }

    #[test]
    fn test_validation() {
        let mut post = BlogPost::new(
            "Title".to_string(),
            "".to_string(),
            "Body".to_string(),
        );
        assert!(post.is_valid().is_ok());

        post.title = "   ".to_string();
        assert!(post.is_valid().is_err());
    }
}
