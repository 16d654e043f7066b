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

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Parse a timestamp column. SQLite stores datetimes either as
/// "YYYY-MM-DD HH:MM:SS" (datetime('now') defaults) or as RFC3339
/// (values bound from chrono).
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>> {
    if value.contains('T') {
        Ok(DateTime::parse_from_rfc3339(value)
            .with_context(|| format!("Failed to parse '{}' as RFC3339", value))?
            .with_timezone(&Utc))
    } else {
        Ok(
            chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .with_context(|| format!("Failed to parse '{}' as SQLite datetime", value))?
                .and_utc(),
        )
    }
}

/// Same as [`parse_datetime`] for nullable columns.
pub fn parse_datetime_opt(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    value.map(parse_datetime).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sqlite_format() {
        let dt = parse_datetime("2026-01-15 09:30:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-01-15T09:30:00+00:00");
    }

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_datetime("2026-01-15T09:30:00+00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-01-15T09:30:00+00:00");
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_datetime("2026-01-15T09:30:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-01-15T07:30:00+00:00");
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn test_parse_opt() {
        assert!(parse_datetime_opt(None).unwrap().is_none());
        assert!(parse_datetime_opt(Some("2026-01-15 09:30:00"))
            .unwrap()
            .is_some());
        assert!(parse_datetime_opt(Some("bad")).is_err());
    }
}
