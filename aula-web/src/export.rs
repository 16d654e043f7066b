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

use aula_db::repositories::EnrollmentWithTraining;
use chrono::{DateTime, Utc};

/// Quote a field per RFC 4180 when it contains a comma, quote or newline.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn format_datetime_opt(dt: &Option<DateTime<Utc>>) -> String {
    dt.as_ref().map(format_datetime).unwrap_or_default()
}

const HEADER: &str = "id,student_name,student_email,student_phone,student_whatsapp,\
training,status,source,message,admin_notes,approved_at,completed_at,created_at";

/// Render enrollments as CSV with a header row. Rows keep the order they
/// were given in.
pub fn enrollments_to_csv(rows: &[EnrollmentWithTraining]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for row in rows {
        let e = &row.enrollment;
        let fields = [
            e.id.map(|id| id.to_string()).unwrap_or_default(),
            e.student_name.clone(),
            e.student_email.clone(),
            e.student_phone.clone(),
            e.student_whatsapp.clone().unwrap_or_default(),
            row.training_title.clone(),
            e.status.to_string(),
            e.source.to_string(),
            e.message.clone().unwrap_or_default(),
            e.admin_notes.clone().unwrap_or_default(),
            format_datetime_opt(&e.approved_at),
            format_datetime_opt(&e.completed_at),
            format_datetime(&e.created_at),
        ];
        let line: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}

/// Attachment filename carrying the export moment, e.g.
/// `enrollments-20260826-153000.csv`.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("enrollments-{}.csv", now.format("%Y%m%d-%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_core::models::enrollment::{Enrollment, EnrollmentSource};
    use pretty_assertions::assert_eq;

    fn row(name: &str, message: Option<&str>) -> EnrollmentWithTraining {
        let mut enrollment = Enrollment::new(
            name.to_string(),
            "maria@example.com".to_string(),
            "+55 11 99999-0000".to_string(),
            1,
            EnrollmentSource::Website,
        );
        enrollment.id = Some(7);
        enrollment.message = message.map(|m| m.to_string());
        EnrollmentWithTraining {
            enrollment,
            training_title: "Rust Fundamentals".to_string(),
        }
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_csv_header_and_row_count() {
        let rows = vec![row("Maria Silva", None), row("Joao Souza", None)];
        let csv = enrollments_to_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,student_name,student_email"));
        assert!(lines[1].contains("Maria Silva"));
        assert!(lines[1].contains("pending"));
        assert!(lines[1].contains("Rust Fundamentals"));
    }

    #[test]
    fn test_csv_quotes_messages_with_commas() {
        let rows = vec![row("Maria Silva", Some("hello, world"))];
        let csv = enrollments_to_csv(&rows);
        assert!(csv.contains("\"hello, world\""));
    }

    #[test]
    fn test_export_filename() {
        let now = DateTime::parse_from_rfc3339("2026-08-26T15:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(export_filename(now), "enrollments-20260826-153000.csv");
    }
}
