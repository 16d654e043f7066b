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
use aula_core::models::comment::{Comment, CommentTarget, CommentThread, Reply};
use serde::Serialize;
use sqlx::SqlitePool;

type CommentRow = (i64, String, i64, String, String, String, bool, String, String);
type ReplyRow = (i64, i64, String, String, String, bool, String, String);

const COMMENT_COLUMNS: &str =
    "id, target_kind, target_id, author_name, author_email, body, is_approved, created_at, updated_at";
const REPLY_COLUMNS: &str =
    "id, comment_id, author_name, author_email, body, is_approved, created_at, updated_at";

/// One row of the admin moderation listing: the comment joined with the
/// title and slug of whatever it is attached to.
#[derive(Debug, Clone, Serialize)]
pub struct ModeratedComment {
    pub comment: Comment,
    pub target_title: String,
    pub target_slug: String,
    pub reply_count: i64,
}

pub struct CommentRepository {
    pool: SqlitePool,
}

impl CommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn comment_from_row(row: CommentRow) -> Result<Comment> {
        let (id, target_kind, target_id, author_name, author_email, body, is_approved, created_at, updated_at) =
            row;
        Ok(Comment {
            id: Some(id),
            target: target_kind
                .parse::<CommentTarget>()
                .map_err(|e| anyhow::anyhow!(e))?,
            target_id,
            author_name,
            author_email,
            body,
            is_approved,
            created_at: parse_datetime(&created_at)?,
            updated_at: parse_datetime(&updated_at)?,
        })
    }

    fn reply_from_row(row: ReplyRow) -> Result<Reply> {
        let (id, comment_id, author_name, author_email, body, is_approved, created_at, updated_at) =
            row;
        Ok(Reply {
            id: Some(id),
            comment_id,
            author_name,
            author_email,
            body,
            is_approved,
            created_at: parse_datetime(&created_at)?,
            updated_at: parse_datetime(&updated_at)?,
        })
    }

    pub async fn create(&self, comment: &Comment) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO comments (target_kind, target_id, author_name, author_email, body, is_approved, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(comment.target.as_str())
        .bind(comment.target_id)
        .bind(&comment.author_name)
        .bind(&comment.author_email)
        .bind(&comment.body)
        .bind(comment.is_approved)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to create comment")?;

        Ok(result.last_insert_rowid())
    }

    pub async fn create_reply(&self, reply: &Reply) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO replies (comment_id, author_name, author_email, body, is_approved, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(reply.comment_id)
        .bind(&reply.author_name)
        .bind(&reply.author_email)
        .bind(&reply.body)
        .bind(reply.is_approved)
        .bind(reply.created_at)
        .bind(reply.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to create reply")?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(&self, id: i64, kind: CommentTarget) -> Result<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {} FROM comments WHERE id = ? AND target_kind = ?",
            COMMENT_COLUMNS
        ))
        .bind(id)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find comment by id")?;

        row.map(Self::comment_from_row).transpose()
    }

    pub async fn find_reply_by_id(&self, id: i64) -> Result<Option<Reply>> {
        let row = sqlx::query_as::<_, ReplyRow>(&format!(
            "SELECT {} FROM replies WHERE id = ?",
            REPLY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find reply by id")?;

        row.map(Self::reply_from_row).transpose()
    }

    /// Approved comments for one target, newest first, each carrying its
    /// approved replies oldest first. Unapproved content never leaves
    /// this query.
    pub async fn list_approved_threads(
        &self,
        kind: CommentTarget,
        target_id: i64,
    ) -> Result<Vec<CommentThread>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            r#"
            SELECT {}
            FROM comments
            WHERE target_kind = ? AND target_id = ? AND is_approved = 1
            ORDER BY created_at DESC, id DESC
            "#,
            COMMENT_COLUMNS
        ))
        .bind(kind.as_str())
        .bind(target_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list approved comments")?;

        let mut threads = Vec::with_capacity(rows.len());
        for row in rows {
            let comment = Self::comment_from_row(row)?;
            let comment_id = comment.id.context("Comment row has no id")?;

            let reply_rows = sqlx::query_as::<_, ReplyRow>(&format!(
                r#"
                SELECT {}
                FROM replies
                WHERE comment_id = ? AND is_approved = 1
                ORDER BY created_at ASC, id ASC
                "#,
                REPLY_COLUMNS
            ))
            .bind(comment_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list approved replies")?;

            let replies = reply_rows
                .into_iter()
                .map(Self::reply_from_row)
                .collect::<Result<Vec<_>>>()?;

            threads.push(CommentThread { comment, replies });
        }

        Ok(threads)
    }

    /// Moderation listing: every approval state unless a filter is given,
    /// joined with the target's title and slug, newest first.
    pub async fn list_admin(
        &self,
        kind: CommentTarget,
        is_approved: Option<bool>,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<ModeratedComment>, i64)> {
        // blog_posts and products expose the display title under
        // different column names
        let (target_table, title_column) = match kind {
            CommentTarget::Blog => ("blog_posts", "title"),
            CommentTarget::Product => ("products", "name"),
        };

        let approval_clause = match is_approved {
            Some(true) => " AND c.is_approved = 1",
            Some(false) => " AND c.is_approved = 0",
            None => "",
        };

        let total: i64 = sqlx::query_scalar(&format!(
            r#"
            SELECT COUNT(*)
            FROM comments c
            JOIN {target_table} t ON t.id = c.target_id
            WHERE c.target_kind = ?{approval_clause}
            "#,
        ))
        .bind(kind.as_str())
        .fetch_one(&self.pool)
        .await
        .context("Failed to count comments")?;

        let rows = sqlx::query_as::<
            _,
            (i64, String, i64, String, String, String, bool, String, String, String, String, i64),
        >(&format!(
            r#"
            SELECT c.id, c.target_kind, c.target_id, c.author_name, c.author_email,
                   c.body, c.is_approved, c.created_at, c.updated_at,
                   t.{title_column}, t.slug,
                   (SELECT COUNT(*) FROM replies r WHERE r.comment_id = c.id)
            FROM comments c
            JOIN {target_table} t ON t.id = c.target_id
            WHERE c.target_kind = ?{approval_clause}
            ORDER BY c.created_at DESC, c.id DESC
            LIMIT ? OFFSET ?
            "#,
        ))
        .bind(kind.as_str())
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list comments for moderation")?;

        let mut listing = Vec::with_capacity(rows.len());
        for row in rows {
            let (id, target_kind, target_id, author_name, author_email, body, is_approved, created_at, updated_at, target_title, target_slug, reply_count) =
                row;
            let comment = Self::comment_from_row((
                id,
                target_kind,
                target_id,
                author_name,
                author_email,
                body,
                is_approved,
                created_at,
                updated_at,
            ))?;
            listing.push(ModeratedComment {
                comment,
                target_title,
                target_slug,
                reply_count,
            });
        }

        Ok((listing, total))
    }

    /// Returns false when the id does not exist.
    pub async fn approve(&self, id: i64, kind: CommentTarget) -> Result<bool> {
        let rows = sqlx::query(
            "UPDATE comments SET is_approved = 1, updated_at = datetime('now') WHERE id = ? AND target_kind = ?",
        )
        .bind(id)
        .bind(kind.as_str())
        .execute(&self.pool)
        .await
        .context("Failed to approve comment")?
        .rows_affected();

        Ok(rows > 0)
    }

    /// Hard-delete a comment and the replies it owns.
    /// Returns false when the id does not exist.
    pub async fn delete(&self, id: i64, kind: CommentTarget) -> Result<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to start transaction")?;

        sqlx::query("DELETE FROM replies WHERE comment_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete replies")?;

        let rows = sqlx::query("DELETE FROM comments WHERE id = ? AND target_kind = ?")
            .bind(id)
            .bind(kind.as_str())
            .execute(&mut *tx)
            .await
            .context("Failed to delete comment")?
            .rows_affected();

        tx.commit().await.context("Failed to commit transaction")?;

        Ok(rows > 0)
    }

    pub async fn approve_reply(&self, id: i64) -> Result<bool> {
        let rows = sqlx::query(
            "UPDATE replies SET is_approved = 1, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to approve reply")?
        .rows_affected();

        Ok(rows > 0)
    }

    pub async fn delete_reply(&self, id: i64) -> Result<bool> {
        let rows = sqlx::query("DELETE FROM replies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete reply")?
            .rows_affected();

        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::create_schema;
    use crate::repositories::BlogPostRepository;
    use aula_core::models::blog_post::BlogPost;

    async fn setup(pool: &SqlitePool) -> Result<(CommentRepository, i64)> {
        create_schema(pool).await?;
        let mut post = BlogPost::new(
            "First Post".to_string(),
            "".to_string(),
            "body".to_string(),
        );
        let post_id = BlogPostRepository::new(pool.clone()).create(&mut post).await?;
        Ok((CommentRepository::new(pool.clone()), post_id))
    }

    fn comment(post_id: i64, body: &str) -> Comment {
        Comment::new(
            CommentTarget::Blog,
            post_id,
            "Alice".to_string(),
            "alice@example.com".to_string(),
            body.to_string(),
        )
    }

    #[sqlx::test]
    async fn test_create_and_find() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let (repo, post_id) = setup(&pool).await?;

        let id = repo.create(&comment(post_id, "hello")).await?;
        let found = repo.find_by_id(id, CommentTarget::Blog).await?.unwrap();
        assert_eq!(found.body, "hello");
        assert!(!found.is_approved);

        // The same id under the other target kind is not visible
        assert!(repo.find_by_id(id, CommentTarget::Product).await?.is_none());
        Ok(())
    }

    #[sqlx::test]
    async fn test_public_listing_hides_unapproved() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let (repo, post_id) = setup(&pool).await?;

        let approved_id = repo.create(&comment(post_id, "approved")).await?;
        repo.approve(approved_id, CommentTarget::Blog).await?;
        repo.create(&comment(post_id, "held")).await?;

        let threads = repo
            .list_approved_threads(CommentTarget::Blog, post_id)
            .await?;
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].comment.body, "approved");
        Ok(())
    }

    #[sqlx::test]
    async fn test_thread_reply_ordering_and_filtering() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let (repo, post_id) = setup(&pool).await?;

        let comment_id = repo.create(&comment(post_id, "parent")).await?;
        repo.approve(comment_id, CommentTarget::Blog).await?;

        let mut early = Reply::new(
            comment_id,
            "Bob".to_string(),
            "bob@example.com".to_string(),
            "first reply".to_string(),
        );
        early.created_at = early.created_at - chrono::Duration::minutes(10);
        early.updated_at = early.created_at;
        let early_id = repo.create_reply(&early).await?;
        repo.approve_reply(early_id).await?;

        let late = Reply::new(
            comment_id,
            "Cara".to_string(),
            "cara@example.com".to_string(),
            "second reply".to_string(),
        );
        let late_id = repo.create_reply(&late).await?;
        repo.approve_reply(late_id).await?;

        let held = Reply::new(
            comment_id,
            "Dan".to_string(),
            "dan@example.com".to_string(),
            "unapproved".to_string(),
        );
        repo.create_reply(&held).await?;

        let threads = repo
            .list_approved_threads(CommentTarget::Blog, post_id)
            .await?;
        assert_eq!(threads.len(), 1);
        let replies = &threads[0].replies;
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].body, "first reply");
        assert_eq!(replies[1].body, "second reply");
        Ok(())
    }

    #[sqlx::test]
    async fn test_admin_listing_includes_unapproved_and_join() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let (repo, post_id) = setup(&pool).await?;

        repo.create(&comment(post_id, "held")).await?;
        let approved_id = repo.create(&comment(post_id, "visible")).await?;
        repo.approve(approved_id, CommentTarget::Blog).await?;

        let (all, total) = repo.list_admin(CommentTarget::Blog, None, 1, 10).await?;
        assert_eq!(total, 2);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].target_title, "First Post");
        assert_eq!(all[0].target_slug, "first-post");

        let (held_only, held_total) = repo
            .list_admin(CommentTarget::Blog, Some(false), 1, 10)
            .await?;
        assert_eq!(held_total, 1);
        assert_eq!(held_only[0].comment.body, "held");
        Ok(())
    }

    #[sqlx::test]
    async fn test_admin_listing_pagination() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let (repo, post_id) = setup(&pool).await?;

        for i in 0..5 {
            repo.create(&comment(post_id, &format!("c{}", i))).await?;
        }

        let (page1, total) = repo.list_admin(CommentTarget::Blog, None, 1, 2).await?;
        assert_eq!(total, 5);
        assert_eq!(page1.len(), 2);

        let (page3, _) = repo.list_admin(CommentTarget::Blog, None, 3, 2).await?;
        assert_eq!(page3.len(), 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_removes_owned_replies() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let (repo, post_id) = setup(&pool).await?;

        let comment_id = repo.create(&comment(post_id, "parent")).await?;
        let reply = Reply::new(
            comment_id,
            "Bob".to_string(),
            "bob@example.com".to_string(),
            "child".to_string(),
        );
        let reply_id = repo.create_reply(&reply).await?;

        assert!(repo.delete(comment_id, CommentTarget::Blog).await?);
        assert!(repo.find_by_id(comment_id, CommentTarget::Blog).await?.is_none());
        assert!(repo.find_reply_by_id(reply_id).await?.is_none());
        Ok(())
    }

    #[sqlx::test]
    async fn test_approve_and_delete_missing_ids() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let (repo, _post_id) = setup(&pool).await?;

        assert!(!repo.approve(999, CommentTarget::Blog).await?);
        assert!(!repo.delete(999, CommentTarget::Blog).await?);
        assert!(!repo.approve_reply(999).await?);
        assert!(!repo.delete_reply(999).await?);
        Ok(())
    }
}
