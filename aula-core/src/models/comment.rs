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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a comment is attached to: a blog post or a product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentTarget {
    Blog,
    Product,
}

impl CommentTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentTarget::Blog => "blog",
            CommentTarget::Product => "product",
        }
    }
}

impl fmt::Display for CommentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CommentTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog" => Ok(CommentTarget::Blog),
            "product" => Ok(CommentTarget::Product),
            other => Err(format!("Unknown comment target: {}", other)),
        }
    }
}

/// A top-level visitor comment. Submitted comments are always held
/// unapproved until an admin approves them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: Option<i64>,
    pub target: CommentTarget,
    pub target_id: i64,
    pub author_name: String,
    pub author_email: String,
    pub body: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        target: CommentTarget,
        target_id: i64,
        author_name: String,
        author_email: String,
        body: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            target,
            target_id,
            author_name,
            author_email,
            body,
            is_approved: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_valid(&self) -> Result<(), String> {
        validate_author_fields(&self.author_name, &self.author_email, &self.body)
    }
}

/// A reply owned by a comment. Replies cannot own further replies, so
/// nesting is limited to one level by construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reply {
    pub id: Option<i64>,
    pub comment_id: i64,
    pub author_name: String,
    pub author_email: String,
    pub body: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reply {
    pub fn new(comment_id: i64, author_name: String, author_email: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            comment_id,
            author_name,
            author_email,
            body,
            is_approved: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_valid(&self) -> Result<(), String> {
        validate_author_fields(&self.author_name, &self.author_email, &self.body)
    }
}

/// A comment with its owned replies, as served publicly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentThread {
    pub comment: Comment,
    pub replies: Vec<Reply>,
}

fn validate_author_fields(name: &str, email: &str, body: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.len() > 100 {
        return Err("Name cannot exceed 100 characters".to_string());
    }
    crate::models::user::User::validate_email(email)?;
    if body.trim().is_empty() {
        return Err("Comment cannot be empty".to_string());
    }
    if body.len() > 5000 {
        return Err("Comment cannot exceed 5000 characters".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_comment() -> Comment {
        Comment::new(
            CommentTarget::Blog,
            1,
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "Great post!".to_string(),
        )
    }

    #[test]
    fn test_new_comment_is_unapproved() {
        let comment = valid_comment();
        assert!(!comment.is_approved);
        assert!(comment.id.is_none());
    }

    #[test]
    fn test_new_reply_is_unapproved() {
        let reply = Reply::new(
            7,
            "Bob".to_string(),
            "bob@example.com".to_string(),
            "Agreed.".to_string(),
        );
        assert!(!reply.is_approved);
        assert_eq!(reply.comment_id, 7);
    }

    #[test]
    fn test_comment_validation() {
        let mut comment = valid_comment();
        assert!(comment.is_valid().is_ok());

        comment.author_name = "".to_string();
        assert!(comment.is_valid().is_err());

        comment.author_name = "Alice".to_string();
        comment.author_email = "not-an-email".to_string();
        assert!(comment.is_valid().is_err());

        comment.author_email = "alice@example.com".to_string();
        comment.body = "   ".to_string();
        assert!(comment.is_valid().is_err());
    }

    #[test]
    fn test_target_round_trip() {
        assert_eq!(CommentTarget::Blog.as_str(), "blog");
        assert_eq!(CommentTarget::Product.as_str(), "product");
        assert_eq!("blog".parse::<CommentTarget>(), Ok(CommentTarget::Blog));
        assert_eq!(
            "product".parse::<CommentTarget>(),
            Ok(CommentTarget::Product)
        );
        assert!("page".parse::<CommentTarget>().is_err());
    }

    #[test]
    fn test_comment_serialization() {
        let comment = valid_comment();
        let json = serde_json::to_string(&comment).unwrap();
        assert!(json.contains("\"target\":\"blog\""));
        let back: Comment = serde_json::from_str(&json).unwrap();
        assert_eq!(comment, back);
    }
}
