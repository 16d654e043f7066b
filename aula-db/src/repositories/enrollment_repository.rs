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

use crate::datetime::{parse_datetime, parse_datetime_opt};
use anyhow::{Context, Result};
use aula_core::models::enrollment::{Enrollment, EnrollmentSource, EnrollmentStatus};
use aula_core::models::student::Student;
use serde::Serialize;
use sqlx::SqlitePool;

type EnrollmentRow = (
    i64,
    String,
    String,
    String,
    Option<String>,
    i64,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<i64>,
    Option<String>,
    Option<String>,
    String,
    String,
);

const COLUMNS: &str = "e.id, e.student_name, e.student_email, e.student_phone, e.student_whatsapp, \
     e.training_id, e.status, e.source, e.message, e.admin_notes, e.recorded_by, \
     e.approved_at, e.completed_at, e.created_at, e.updated_at";

/// Admin listing filters. All fields optional; `search` matches the
/// student's name, email or phone as a substring.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentFilter {
    pub status: Option<EnrollmentStatus>,
    pub training_id: Option<i64>,
    pub source: Option<EnrollmentSource>,
    pub search: Option<String>,
}

impl EnrollmentFilter {
    fn where_clause(&self) -> String {
        let mut clause = String::from(" WHERE 1=1");
        if self.status.is_some() {
            clause.push_str(" AND e.status = ?");
        }
        if self.training_id.is_some() {
            clause.push_str(" AND e.training_id = ?");
        }
        if self.source.is_some() {
            clause.push_str(" AND e.source = ?");
        }
        if self.search.is_some() {
            clause.push_str(
                " AND (e.student_name LIKE ? OR e.student_email LIKE ? OR e.student_phone LIKE ?)",
            );
        }
        clause
    }
}

// Same columns as EnrollmentRow plus the joined training title.
type EnrollmentJoinRow = (
    i64,
    String,
    String,
    String,
    Option<String>,
    i64,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<i64>,
    Option<String>,
    Option<String>,
    String,
    String,
    String,
);

fn split_join_row(row: EnrollmentJoinRow) -> (EnrollmentRow, String) {
    let (a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, title) = row;
    ((a, b, c, d, e, f, g, h, i, j, k, l, m, n, o), title)
}

/// One admin listing row: the enrollment joined with its training's title.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentWithTraining {
    pub enrollment: Enrollment,
    pub training_title: String,
}

pub struct EnrollmentRepository {
    pool: SqlitePool,
}

impl EnrollmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn from_row(row: EnrollmentRow) -> Result<Enrollment> {
        let (
            id,
            student_name,
            student_email,
            student_phone,
            student_whatsapp,
            training_id,
            status,
            source,
            message,
            admin_notes,
            recorded_by,
            approved_at,
            completed_at,
            created_at,
            updated_at,
        ) = row;
        Ok(Enrollment {
            id: Some(id),
            student_name,
            student_email,
            student_phone,
            student_whatsapp,
            training_id,
            status: status
                .parse::<EnrollmentStatus>()
                .map_err(|e| anyhow::anyhow!(e))?,
            source: source
                .parse::<EnrollmentSource>()
                .map_err(|e| anyhow::anyhow!(e))?,
            message,
            admin_notes,
            recorded_by,
            approved_at: parse_datetime_opt(approved_at.as_deref())?,
            completed_at: parse_datetime_opt(completed_at.as_deref())?,
            created_at: parse_datetime(&created_at)?,
            updated_at: parse_datetime(&updated_at)?,
        })
    }

    pub async fn create(&self, enrollment: &Enrollment) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO enrollments (
                student_name, student_email, student_phone, student_whatsapp,
                training_id, status, source, message, admin_notes, recorded_by,
                approved_at, completed_at, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&enrollment.student_name)
        .bind(&enrollment.student_email)
        .bind(&enrollment.student_phone)
        .bind(&enrollment.student_whatsapp)
        .bind(enrollment.training_id)
        .bind(enrollment.status.as_str())
        .bind(enrollment.source.as_str())
        .bind(&enrollment.message)
        .bind(&enrollment.admin_notes)
        .bind(enrollment.recorded_by)
        .bind(enrollment.approved_at)
        .bind(enrollment.completed_at)
        .bind(enrollment.created_at)
        .bind(enrollment.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to create enrollment")?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Enrollment>> {
        let row = sqlx::query_as::<_, EnrollmentRow>(&format!(
            "SELECT {} FROM enrollments e WHERE e.id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find enrollment by id")?;

        row.map(Self::from_row).transpose()
    }

    /// Persist the mutable fields after a status transition or a note edit.
    pub async fn update(&self, enrollment: &Enrollment) -> Result<()> {
        let id = enrollment.id.context("Enrollment has no id")?;
        let rows = sqlx::query(
            r#"
            UPDATE enrollments
            SET status = ?, admin_notes = ?, recorded_by = ?,
                approved_at = ?, completed_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(enrollment.status.as_str())
        .bind(&enrollment.admin_notes)
        .bind(enrollment.recorded_by)
        .bind(enrollment.approved_at)
        .bind(enrollment.completed_at)
        .bind(enrollment.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update enrollment")?
        .rows_affected();

        if rows == 0 {
            anyhow::bail!("No enrollment found with id {}", id);
        }
        Ok(())
    }

    /// Filtered admin listing, newest first, joined with training titles.
    pub async fn list_admin(
        &self,
        filter: &EnrollmentFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<EnrollmentWithTraining>, i64)> {
        let clause = filter.where_clause();

        let count_sql = format!(
            "SELECT COUNT(*) FROM enrollments e JOIN trainings t ON t.id = e.training_id{}",
            clause
        );
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        count_query = Self::bind_filter_scalar(count_query, filter);
        let total = count_query
            .fetch_one(&self.pool)
            .await
            .context("Failed to count enrollments")?;

        let list_sql = format!(
            r#"
            SELECT {}, t.title
            FROM enrollments e
            JOIN trainings t ON t.id = e.training_id{}
            ORDER BY e.created_at DESC, e.id DESC
            LIMIT ? OFFSET ?
            "#,
            COLUMNS, clause
        );
        let mut list_query = sqlx::query_as::<_, EnrollmentJoinRow>(&list_sql);
        list_query = Self::bind_filter_rows(list_query, filter);
        let rows = list_query
            .bind(limit)
            .bind((page - 1) * limit)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list enrollments")?;

        let mut listing = Vec::with_capacity(rows.len());
        for join_row in rows {
            let (row, training_title) = split_join_row(join_row);
            listing.push(EnrollmentWithTraining {
                enrollment: Self::from_row(row)?,
                training_title,
            });
        }

        Ok((listing, total))
    }

    /// Unpaginated filtered listing for the CSV export, newest first.
    pub async fn list_all(&self, filter: &EnrollmentFilter) -> Result<Vec<EnrollmentWithTraining>> {
        let clause = filter.where_clause();
        let sql = format!(
            r#"
            SELECT {}, t.title
            FROM enrollments e
            JOIN trainings t ON t.id = e.training_id{}
            ORDER BY e.created_at DESC, e.id DESC
            "#,
            COLUMNS, clause
        );
        let mut query = sqlx::query_as::<_, EnrollmentJoinRow>(&sql);
        query = Self::bind_filter_rows(query, filter);
        let rows = query
            .fetch_all(&self.pool)
            .await
            .context("Failed to list enrollments for export")?;

        let mut listing = Vec::with_capacity(rows.len());
        for join_row in rows {
            let (row, training_title) = split_join_row(join_row);
            listing.push(EnrollmentWithTraining {
                enrollment: Self::from_row(row)?,
                training_title,
            });
        }
        Ok(listing)
    }

    /// Aggregate enrollments into students keyed by (name, email, phone),
    /// ordered by most recent enrollment first.
    pub async fn list_students(
        &self,
        filter: &EnrollmentFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Student>, i64)> {
        let clause = filter.where_clause();
        let group = " GROUP BY e.student_name, e.student_email, e.student_phone";

        let count_sql = format!(
            "SELECT COUNT(*) FROM (SELECT 1 FROM enrollments e{}{})",
            clause, group
        );
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        count_query = Self::bind_filter_scalar(count_query, filter);
        let total = count_query
            .fetch_one(&self.pool)
            .await
            .context("Failed to count students")?;

        let identity_sql = format!(
            r#"
            SELECT e.student_name, e.student_email, e.student_phone
            FROM enrollments e{}{}
            ORDER BY MAX(e.created_at) DESC
            LIMIT ? OFFSET ?
            "#,
            clause, group
        );
        let mut identity_query =
            sqlx::query_as::<_, (String, String, String)>(&identity_sql);
        identity_query = Self::bind_identity(identity_query, filter);
        let identities = identity_query
            .bind(limit)
            .bind((page - 1) * limit)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list student identities")?;

        let mut students = Vec::with_capacity(identities.len());
        for (name, email, phone) in identities {
            let rows = sqlx::query_as::<_, EnrollmentRow>(&format!(
                r#"
                SELECT {}
                FROM enrollments e
                WHERE e.student_name = ? AND e.student_email = ? AND e.student_phone = ?
                ORDER BY e.created_at ASC, e.id ASC
                "#,
                COLUMNS
            ))
            .bind(&name)
            .bind(&email)
            .bind(&phone)
            .fetch_all(&self.pool)
            .await
            .context("Failed to load a student's enrollments")?;

            let enrollments = rows
                .into_iter()
                .map(Self::from_row)
                .collect::<Result<Vec<_>>>()?;
            if let Some(student) = Student::from_enrollments(enrollments) {
                students.push(student);
            }
        }

        Ok((students, total))
    }

    fn bind_filter_scalar<'q>(
        mut query: sqlx::query::QueryScalar<'q, sqlx::Sqlite, i64, sqlx::sqlite::SqliteArguments<'q>>,
        filter: &'q EnrollmentFilter,
    ) -> sqlx::query::QueryScalar<'q, sqlx::Sqlite, i64, sqlx::sqlite::SqliteArguments<'q>> {
        if let Some(status) = filter.status {
            query = query.bind(status.as_str());
        }
        if let Some(training_id) = filter.training_id {
            query = query.bind(training_id);
        }
        if let Some(source) = filter.source {
            query = query.bind(source.as_str());
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            query = query.bind(pattern.clone()).bind(pattern.clone()).bind(pattern);
        }
        query
    }

    fn bind_filter_rows<'q>(
        mut query: sqlx::query::QueryAs<
            'q,
            sqlx::Sqlite,
            EnrollmentJoinRow,
            sqlx::sqlite::SqliteArguments<'q>,
        >,
        filter: &'q EnrollmentFilter,
    ) -> sqlx::query::QueryAs<
        'q,
        sqlx::Sqlite,
        EnrollmentJoinRow,
        sqlx::sqlite::SqliteArguments<'q>,
    > {
        if let Some(status) = filter.status {
            query = query.bind(status.as_str());
        }
        if let Some(training_id) = filter.training_id {
            query = query.bind(training_id);
        }
        if let Some(source) = filter.source {
            query = query.bind(source.as_str());
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            query = query.bind(pattern.clone()).bind(pattern.clone()).bind(pattern);
        }
        query
    }

    fn bind_identity<'q>(
        mut query: sqlx::query::QueryAs<
            'q,
            sqlx::Sqlite,
            (String, String, String),
            sqlx::sqlite::SqliteArguments<'q>,
        >,
        filter: &'q EnrollmentFilter,
    ) -> sqlx::query::QueryAs<
        'q,
        sqlx::Sqlite,
        (String, String, String),
        sqlx::sqlite::SqliteArguments<'q>,
    > {
        if let Some(status) = filter.status {
            query = query.bind(status.as_str());
        }
        if let Some(training_id) = filter.training_id {
            query = query.bind(training_id);
        }
        if let Some(source) = filter.source {
            query = query.bind(source.as_str());
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            query = query.bind(pattern.clone()).bind(pattern.clone()).bind(pattern);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::create_schema;
    use crate::repositories::TrainingRepository;
    use aula_core::models::training::Training;

    async fn setup(pool: &SqlitePool) -> Result<(EnrollmentRepository, i64)> {
        create_schema(pool).await?;
        let mut training = Training::new(
            "Rust Fundamentals".to_string(),
            "Eight weeks of Rust".to_string(),
            8,
            149_900,
        );
        let training_id = TrainingRepository::new(pool.clone())
            .create(&mut training)
            .await?;
        Ok((EnrollmentRepository::new(pool.clone()), training_id))
    }

    fn enrollment(name: &str, email: &str, training_id: i64) -> Enrollment {
        Enrollment::new(
            name.to_string(),
            email.to_string(),
            "+55 11 99999-0000".to_string(),
            training_id,
            EnrollmentSource::Website,
        )
    }

    #[sqlx::test]
    async fn test_create_and_find() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let (repo, training_id) = setup(&pool).await?;

        let id = repo
            .create(&enrollment("Maria Silva", "maria@example.com", training_id))
            .await?;
        let found = repo.find_by_id(id).await?.unwrap();
        assert_eq!(found.student_name, "Maria Silva");
        assert_eq!(found.status, EnrollmentStatus::Pending);
        assert!(found.approved_at.is_none());
        Ok(())
    }

    #[sqlx::test]
    async fn test_update_persists_transition_timestamps() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let (repo, training_id) = setup(&pool).await?;

        let id = repo
            .create(&enrollment("Maria Silva", "maria@example.com", training_id))
            .await?;
        let mut found = repo.find_by_id(id).await?.unwrap();
        found.transition_to(EnrollmentStatus::Approved).unwrap();
        found.admin_notes = Some("paid in full".to_string());
        repo.update(&found).await?;

        let reloaded = repo.find_by_id(id).await?.unwrap();
        assert_eq!(reloaded.status, EnrollmentStatus::Approved);
        assert!(reloaded.approved_at.is_some());
        assert_eq!(reloaded.admin_notes.as_deref(), Some("paid in full"));
        Ok(())
    }

    #[sqlx::test]
    async fn test_update_missing_id_fails() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let (repo, training_id) = setup(&pool).await?;

        let mut ghost = enrollment("Maria Silva", "maria@example.com", training_id);
        ghost.id = Some(999);
        assert!(repo.update(&ghost).await.is_err());
        Ok(())
    }

    #[sqlx::test]
    async fn test_list_admin_filters() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let (repo, training_id) = setup(&pool).await?;

        let approved_id = repo
            .create(&enrollment("Maria Silva", "maria@example.com", training_id))
            .await?;
        let mut approved = repo.find_by_id(approved_id).await?.unwrap();
        approved.transition_to(EnrollmentStatus::Approved).unwrap();
        repo.update(&approved).await?;

        repo.create(&enrollment("Joao Souza", "joao@example.com", training_id))
            .await?;

        let (all, total) = repo.list_admin(&EnrollmentFilter::default(), 1, 10).await?;
        assert_eq!(total, 2);
        assert_eq!(all[0].training_title, "Rust Fundamentals");

        let filter = EnrollmentFilter {
            status: Some(EnrollmentStatus::Pending),
            ..Default::default()
        };
        let (pending, pending_total) = repo.list_admin(&filter, 1, 10).await?;
        assert_eq!(pending_total, 1);
        assert_eq!(pending[0].enrollment.student_name, "Joao Souza");

        let filter = EnrollmentFilter {
            search: Some("maria@".to_string()),
            ..Default::default()
        };
        let (matched, matched_total) = repo.list_admin(&filter, 1, 10).await?;
        assert_eq!(matched_total, 1);
        assert_eq!(matched[0].enrollment.student_email, "maria@example.com");
        Ok(())
    }

    #[sqlx::test]
    async fn test_list_all_honors_filter() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let (repo, training_id) = setup(&pool).await?;

        repo.create(&enrollment("Maria Silva", "maria@example.com", training_id))
            .await?;
        repo.create(&enrollment("Joao Souza", "joao@example.com", training_id))
            .await?;

        let all = repo.list_all(&EnrollmentFilter::default()).await?;
        assert_eq!(all.len(), 2);

        let filter = EnrollmentFilter {
            search: Some("Joao".to_string()),
            ..Default::default()
        };
        let matched = repo.list_all(&filter).await?;
        assert_eq!(matched.len(), 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_list_students_groups_repeat_enrollments() -> Result<()> {
        let pool = SqlitePool::connect(":memory:").await?;
        let (repo, training_id) = setup(&pool).await?;

        // Maria enrolls twice, Joao once
        repo.create(&enrollment("Maria Silva", "maria@example.com", training_id))
            .await?;
        repo.create(&enrollment("Maria Silva", "maria@example.com", training_id))
            .await?;
        repo.create(&enrollment("Joao Souza", "joao@example.com", training_id))
            .await?;

        let (students, total) = repo
            .list_students(&EnrollmentFilter::default(), 1, 10)
            .await?;
        assert_eq!(total, 2);
        assert_eq!(students.len(), 2);

        let maria = students
            .iter()
            .find(|s| s.email == "maria@example.com")
            .unwrap();
        assert_eq!(maria.total_enrollments, 2);
        assert_eq!(maria.pending_count, 2);
        assert!(maria.first_enrolled_at <= maria.last_enrolled_at);
        Ok(())
    }
}
