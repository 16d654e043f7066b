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

use once_cell::sync::Lazy;
use regex::Regex;

static SLUG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("Failed to compile slug regex"));

/// Generate a URL-friendly slug from a title
pub fn generate_slug_from_title(title: &str) -> String {
    let mut slug = title.trim().to_lowercase();

    // Replace non-alphanumeric characters with hyphens
    slug = SLUG_REGEX.replace_all(&slug, "-").to_string();

    // Remove leading/trailing hyphens
    slug = slug.trim_matches('-').to_string();

    if slug.is_empty() {
        slug = "untitled".to_string();
    }

    // Keep slugs to a reasonable length (100 chars)
    if slug.len() > 100 {
        slug = slug
            .chars()
            .take(100)
            .collect::<String>()
            .trim_end_matches('-')
            .to_string();
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_slug_basic() {
        assert_eq!(generate_slug_from_title("Hello World"), "hello-world");
        assert_eq!(
            generate_slug_from_title("Advanced Pastry Course"),
            "advanced-pastry-course"
        );
    }

    #[test]
    fn test_generate_slug_special_characters() {
        assert_eq!(generate_slug_from_title("Hello, World!"), "hello-world");
        assert_eq!(generate_slug_from_title("What's New?"), "what-s-new");
        assert_eq!(generate_slug_from_title("Price: $99.99"), "price-99-99");
    }

    #[test]
    fn test_generate_slug_whitespace() {
        assert_eq!(generate_slug_from_title("  Hello  World  "), "hello-world");
        assert_eq!(
            generate_slug_from_title("\tTabs\tand\tSpaces\t"),
            "tabs-and-spaces"
        );
    }

    #[test]
    fn test_generate_slug_edge_cases() {
        assert_eq!(generate_slug_from_title(""), "untitled");
        assert_eq!(generate_slug_from_title("   "), "untitled");
        assert_eq!(generate_slug_from_title("!!!"), "untitled");
    }

    #[test]
    fn test_generate_slug_length_limit() {
        let long_title = "word ".repeat(40);
        let slug = generate_slug_from_title(&long_title);
        assert!(slug.len() <= 100);
        assert!(!slug.ends_with('-'));
    }
}
