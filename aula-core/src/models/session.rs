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

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SESSION_HOURS: i64 = 24;

/// An admin login session, identified by a random UUID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            expires_at: now + Duration::hours(SESSION_HOURS),
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_uuid_and_expiry() {
        let session = Session::new(42);
        assert!(Uuid::parse_str(&session.id).is_ok());
        assert_eq!(session.user_id, 42);

        let expected = session.created_at + Duration::hours(SESSION_HOURS);
        assert!((session.expires_at - expected).num_seconds().abs() < 1);
        assert!(!session.is_expired());
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(Session::new(1).id, Session::new(1).id);
    }

    #[test]
    fn test_expired_session() {
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id: 1,
            expires_at: Utc::now() - Duration::hours(1),
            created_at: Utc::now() - Duration::hours(25),
        };
        assert!(session.is_expired());
    }
}
