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

/// Enrollment lifecycle. Transitions go through an explicit table:
/// pending -> approved, pending -> rejected, approved -> completed.
/// Rejected and completed are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Approved => "approved",
            EnrollmentStatus::Rejected => "rejected",
            EnrollmentStatus::Completed => "completed",
        }
    }

    pub fn can_transition_to(&self, next: EnrollmentStatus) -> bool {
        matches!(
            (self, next),
            (EnrollmentStatus::Pending, EnrollmentStatus::Approved)
                | (EnrollmentStatus::Pending, EnrollmentStatus::Rejected)
                | (EnrollmentStatus::Approved, EnrollmentStatus::Completed)
        )
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EnrollmentStatus::Pending),
            "approved" => Ok(EnrollmentStatus::Approved),
            "rejected" => Ok(EnrollmentStatus::Rejected),
            "completed" => Ok(EnrollmentStatus::Completed),
            other => Err(format!("Unknown enrollment status: {}", other)),
        }
    }
}

/// Acquisition channel recorded for an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentSource {
    Website,
    Whatsapp,
    Referral,
    Other,
}

impl EnrollmentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentSource::Website => "website",
            EnrollmentSource::Whatsapp => "whatsapp",
            EnrollmentSource::Referral => "referral",
            EnrollmentSource::Other => "other",
        }
    }
}

impl fmt::Display for EnrollmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EnrollmentSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "website" => Ok(EnrollmentSource::Website),
            "whatsapp" => Ok(EnrollmentSource::Whatsapp),
            "referral" => Ok(EnrollmentSource::Referral),
            "other" => Ok(EnrollmentSource::Other),
            other => Err(format!("Unknown enrollment source: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enrollment {
    pub id: Option<i64>,
    pub student_name: String,
    pub student_email: String,
    pub student_phone: String,
    pub student_whatsapp: Option<String>,
    pub training_id: i64,
    pub status: EnrollmentStatus,
    pub source: EnrollmentSource,
    pub message: Option<String>,
    pub admin_notes: Option<String>,
    pub recorded_by: Option<i64>,
    pub approved_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    /// Create a fresh pending enrollment. Duplicate submissions by the
    /// same student for the same training are allowed.
    pub fn new(
        student_name: String,
        student_email: String,
        student_phone: String,
        training_id: i64,
        source: EnrollmentSource,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            student_name,
            student_email,
            student_phone,
            student_whatsapp: None,
            training_id,
            status: EnrollmentStatus::Pending,
            source,
            message: None,
            admin_notes: None,
            recorded_by: None,
            approved_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_valid(&self) -> Result<(), String> {
        if self.student_name.trim().is_empty() {
            return Err("Student name cannot be empty".to_string());
        }
        if self.student_name.len() > 100 {
            return Err("Student name cannot exceed 100 characters".to_string());
        }
        crate::models::user::User::validate_email(&self.student_email)?;
        if self.student_phone.trim().is_empty() {
            return Err("Phone number cannot be empty".to_string());
        }
        if self.student_phone.len() > 30 {
            return Err("Phone number cannot exceed 30 characters".to_string());
        }
        Ok(())
    }

    /// Apply a checked status transition, stamping the matching timestamp.
    pub fn transition_to(&mut self, next: EnrollmentStatus) -> Result<(), String> {
        if !self.status.can_transition_to(next) {
            return Err(format!(
                "Cannot move enrollment from {} to {}",
                self.status, next
            ));
        }
        let now = Utc::now();
        match next {
            EnrollmentStatus::Approved => self.approved_at = Some(now),
            EnrollmentStatus::Completed => self.completed_at = Some(now),
            _ => {}
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pending_enrollment() -> Enrollment {
        Enrollment::new(
            "Maria Silva".to_string(),
            "maria@example.com".to_string(),
            "+55 11 99999-0000".to_string(),
            1,
            EnrollmentSource::Website,
        )
    }

    #[test]
    fn test_new_enrollment_is_pending() {
        let enrollment = pending_enrollment();
        assert_eq!(enrollment.status, EnrollmentStatus::Pending);
        assert!(enrollment.approved_at.is_none());
        assert!(enrollment.completed_at.is_none());
    }

    #[test]
    fn test_transition_table() {
        use EnrollmentStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Completed));

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Approved.can_transition_to(Pending));
        assert!(!Rejected.can_transition_to(Pending));
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Approved));
    }

    #[test]
    fn test_approve_then_complete_sets_both_timestamps() {
        let mut enrollment = pending_enrollment();
        enrollment.transition_to(EnrollmentStatus::Approved).unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::Approved);
        assert!(enrollment.approved_at.is_some());

        enrollment
            .transition_to(EnrollmentStatus::Completed)
            .unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::Completed);
        assert!(enrollment.approved_at.is_some());
        assert!(enrollment.completed_at.is_some());
    }

    #[test]
    fn test_illegal_transition_is_rejected() {
        let mut enrollment = pending_enrollment();
        let err = enrollment
            .transition_to(EnrollmentStatus::Completed)
            .unwrap_err();
        assert!(err.contains("pending"));
        assert!(err.contains("completed"));
        assert_eq!(enrollment.status, EnrollmentStatus::Pending);
        assert!(enrollment.completed_at.is_none());
    }

    #[test]
    fn test_validation() {
        let mut enrollment = pending_enrollment();
        assert!(enrollment.is_valid().is_ok());

        enrollment.student_email = "nope".to_string();
        assert!(enrollment.is_valid().is_err());

        enrollment.student_email = "maria@example.com".to_string();
        enrollment.student_phone = "".to_string();
        assert!(enrollment.is_valid().is_err());
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in [
            EnrollmentStatus::Pending,
            EnrollmentStatus::Approved,
            EnrollmentStatus::Rejected,
            EnrollmentStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<EnrollmentStatus>(), Ok(status));
        }
        assert!("done".parse::<EnrollmentStatus>().is_err());
    }

    #[test]
    fn test_source_string_round_trip() {
        for source in [
            EnrollmentSource::Website,
            EnrollmentSource::Whatsapp,
            EnrollmentSource::Referral,
            EnrollmentSource::Other,
        ] {
            assert_eq!(source.as_str().parse::<EnrollmentSource>(), Ok(source));
        }
        assert!("email".parse::<EnrollmentSource>().is_err());
    }
}
