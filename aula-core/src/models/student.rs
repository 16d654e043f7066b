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

use crate::models::enrollment::{Enrollment, EnrollmentStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate view of one person across repeat enrollments, keyed by
/// (name, email, phone). Derived on read, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub total_enrollments: usize,
    pub pending_count: usize,
    pub approved_count: usize,
    pub rejected_count: usize,
    pub completed_count: usize,
    pub first_enrolled_at: DateTime<Utc>,
    pub last_enrolled_at: DateTime<Utc>,
    pub enrollments: Vec<Enrollment>,
}

impl Student {
    /// Build the aggregate from one identity's enrollments.
    /// Expects a non-empty list; returns None otherwise.
    pub fn from_enrollments(enrollments: Vec<Enrollment>) -> Option<Self> {
        let first = enrollments.first()?;
        let name = first.student_name.clone();
        let email = first.student_email.clone();
        let phone = first.student_phone.clone();

        let mut pending = 0;
        let mut approved = 0;
        let mut rejected = 0;
        let mut completed = 0;
        let mut first_at = first.created_at;
        let mut last_at = first.created_at;

        for e in &enrollments {
            match e.status {
                EnrollmentStatus::Pending => pending += 1,
                EnrollmentStatus::Approved => approved += 1,
                EnrollmentStatus::Rejected => rejected += 1,
                EnrollmentStatus::Completed => completed += 1,
            }
            if e.created_at < first_at {
                first_at = e.created_at;
            }
            if e.created_at > last_at {
                last_at = e.created_at;
            }
        }

        Some(Self {
            name,
            email,
            phone,
            total_enrollments: enrollments.len(),
            pending_count: pending,
            approved_count: approved,
            rejected_count: rejected,
            completed_count: completed,
            first_enrolled_at: first_at,
            last_enrolled_at: last_at,
            enrollments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enrollment::EnrollmentSource;
    use pretty_assertions::assert_eq;

    fn enrollment(status: EnrollmentStatus) -> Enrollment {
        let mut e = Enrollment::new(
            "Maria Silva".to_string(),
            "maria@example.com".to_string(),
            "+55 11 99999-0000".to_string(),
            1,
            EnrollmentSource::Website,
        );
        e.status = status;
        e
    }

    #[test]
    fn test_from_empty_list() {
        assert!(Student::from_enrollments(vec![]).is_none());
    }

    #[test]
    fn test_counts_by_status() {
        let student = Student::from_enrollments(vec![
            enrollment(EnrollmentStatus::Pending),
            enrollment(EnrollmentStatus::Approved),
            enrollment(EnrollmentStatus::Completed),
            enrollment(EnrollmentStatus::Completed),
        ])
        .unwrap();

        assert_eq!(student.total_enrollments, 4);
        assert_eq!(student.pending_count, 1);
        assert_eq!(student.approved_count, 1);
        assert_eq!(student.rejected_count, 0);
        assert_eq!(student.completed_count, 2);
        assert_eq!(student.name, "Maria Silva");
        assert_eq!(student.enrollments.len(), 4);
    }

    #[test]
    fn test_enrollment_time_span() {
        let mut early = enrollment(EnrollmentStatus::Completed);
        early.created_at = early.created_at - chrono::Duration::days(30);
        let late = enrollment(EnrollmentStatus::Pending);

        let expected_first = early.created_at;
        let expected_last = late.created_at;

        let student = Student::from_enrollments(vec![late, early]).unwrap();
        assert_eq!(student.first_enrolled_at, expected_first);
        assert_eq!(student.last_enrolled_at, expected_last);
    }
}
