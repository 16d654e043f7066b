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

/// A training offering students can enroll into.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Training {
    pub id: Option<i64>,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub duration_weeks: i32,
    pub price_cents: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Training {
    pub fn new(title: String, description: String, duration_weeks: i32, price_cents: i64) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            slug: generate_slug_from_title(&title),
            title,
            description,
            duration_weeks,
            price_cents,
            is_active: true,
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
        if self.duration_weeks <= 0 {
            return Err("Duration must be at least one week".to_string());
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
    fn test_new_training() {
        let training = Training::new(
            "Professional Baking".to_string(),
            "Twelve weeks of bread and pastry".to_string(),
            12,
            250_000,
        );
        assert_eq!(training.slug, "professional-baking");
        assert!(training.is_active);
        assert!(training.is_valid().is_ok());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let training = Training::new("Course".to_string(), "".to_string(), 0, 0);
        assert!(training.is_valid().is_err());
    }
}
