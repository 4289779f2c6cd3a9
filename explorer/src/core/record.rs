//! Profile record and raw response body.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The body of a profile response, exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawBody(String);

impl RawBody {
    /// Wraps response text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the body text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the body length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the body and returns the text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for RawBody {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for RawBody {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

/// A decoded user profile.
///
/// Records are values: the annotator produces a new record instead of
/// rewriting the username of an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    username: String,
    public_resource_count: i64,
    external_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<NaiveDateTime>,
}

impl ProfileRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        public_resource_count: i64,
        external_id: i64,
        created_at: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            username: username.into(),
            public_resource_count,
            external_id,
            created_at,
        }
    }

    /// Returns the display username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the number of public resources (repositories) of the user.
    #[must_use]
    pub const fn public_resource_count(&self) -> i64 {
        self.public_resource_count
    }

    /// Returns the identifier assigned by the remote service.
    #[must_use]
    pub const fn external_id(&self) -> i64 {
        self.external_id
    }

    /// Returns the account creation time, if known.
    #[must_use]
    pub const fn created_at(&self) -> Option<NaiveDateTime> {
        self.created_at
    }

    /// Returns a copy of this record with a different username.
    #[must_use]
    pub fn with_username(self, username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..self
        }
    }
}

impl fmt::Display for ProfileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProfileRecord(username={}, public_resource_count={}, external_id={}, created_at=",
            self.username, self.public_resource_count, self.external_id
        )?;
        match self.created_at {
            Some(ts) => write!(f, "{ts})"),
            None => write!(f, "none)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn created() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_with_username_keeps_other_fields() {
        let record = ProfileRecord::new("alice", 5, 42, Some(created()));
        let renamed = record.with_username("alice ★");

        assert_eq!(renamed.username(), "alice ★");
        assert_eq!(renamed.public_resource_count(), 5);
        assert_eq!(renamed.external_id(), 42);
        assert_eq!(renamed.created_at(), Some(created()));
    }

    #[test]
    fn test_display_without_created_at() {
        let record = ProfileRecord::new("bob", 21, 7, None);
        assert_eq!(
            record.to_string(),
            "ProfileRecord(username=bob, public_resource_count=21, external_id=7, created_at=none)"
        );
    }

    #[test]
    fn test_serialization_omits_missing_created_at() {
        let record = ProfileRecord::new("bob", 21, 7, None);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["username"], "bob");
        assert_eq!(json["external_id"], 7);
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_raw_body_conversions() {
        let body = RawBody::from("{}");
        assert_eq!(body.as_str(), "{}");
        assert_eq!(body.len(), 2);
        assert!(!body.is_empty());
        assert_eq!(body.into_string(), "{}");
        assert!(RawBody::default().is_empty());
    }
}
