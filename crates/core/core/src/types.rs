//! Core data types for Activity Analytics.
//!
//! This module defines the canonical `User` and `Session` structs together
//! with the `YearMonth` selector and the `ActivityStatus` label.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AnalyticsError, AnalyticsResult};

/// A registered user.
///
/// Users are created on registration and never change afterwards.
///
/// # Example
///
/// ```rust
/// use activity_analytics_core::User;
///
/// let user = User::new("user1", "Alice");
/// assert_eq!(user.name, "Alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier chosen by the caller
    pub id: String,

    /// Display name
    pub name: String,

    /// Timestamp when the user was registered
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user registered now.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

/// A recorded login/logout interval.
///
/// Timestamps are local date-times without an offset. A session always
/// satisfies `login_time < logout_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for the session
    pub id: String,

    /// The ID of the user this session belongs to
    pub user_id: String,

    /// When the user logged in
    pub login_time: NaiveDateTime,

    /// When the user logged out
    pub logout_time: NaiveDateTime,
}

impl Session {
    /// Creates a new session, rejecting intervals that do not move forward.
    pub fn new(
        user_id: impl Into<String>,
        login_time: NaiveDateTime,
        logout_time: NaiveDateTime,
    ) -> AnalyticsResult<Self> {
        if logout_time <= login_time {
            return Err(AnalyticsError::invalid_interval(format!(
                "logout time {logout_time} is not after login time {login_time}"
            )));
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            login_time,
            logout_time,
        })
    }

    /// Length of the session in whole minutes, truncated.
    pub fn duration_minutes(&self) -> i64 {
        (self.logout_time - self.login_time).num_minutes()
    }

    /// Calendar date on which the session ended.
    pub fn logout_date(&self) -> NaiveDate {
        self.logout_time.date()
    }

    /// Whether the session started inside the given month.
    pub fn started_in(&self, month: YearMonth) -> bool {
        month.contains(&self.login_time)
    }
}

/// A calendar month selector, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a month selector; `month` must be in `1..=12`.
    pub fn new(year: i32, month: u32) -> AnalyticsResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AnalyticsError::invalid_month(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whether the timestamp falls inside this month.
    pub fn contains(&self, at: &NaiveDateTime) -> bool {
        at.year() == self.year && at.month() == self.month
    }
}

impl FromStr for YearMonth {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AnalyticsError::invalid_month(s);

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
            return Err(invalid());
        }

        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = AnalyticsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// Coarse classification of a user by total activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityStatus {
    #[serde(rename = "Inactive")]
    Inactive,
    #[serde(rename = "Active")]
    Active,
    #[serde(rename = "Highly active")]
    HighlyActive,
}

impl ActivityStatus {
    /// The label shown to clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "Inactive",
            Self::Active => "Active",
            Self::HighlyActive => "Highly active",
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_session_duration() {
        let session = Session::new("user1", at("2025-01-01T10:10:10"), at("2025-01-01T11:10:10")).unwrap();
        assert_eq!(session.duration_minutes(), 60);
        assert_eq!(session.logout_date(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_session_duration_truncates_partial_minutes() {
        let session = Session::new("user1", at("2025-01-01T10:00:00"), at("2025-01-01T10:01:59")).unwrap();
        assert_eq!(session.duration_minutes(), 1);
    }

    #[test]
    fn test_session_rejects_non_increasing_interval() {
        let t = at("2025-01-01T10:00:00");
        assert!(matches!(
            Session::new("user1", t, t),
            Err(AnalyticsError::InvalidInterval { .. })
        ));
        assert!(Session::new("user1", t, at("2025-01-01T09:00:00")).is_err());
    }

    #[test]
    fn test_year_month_parse() {
        let month: YearMonth = "2025-01".parse().unwrap();
        assert_eq!(month.year(), 2025);
        assert_eq!(month.month(), 1);
        assert_eq!(month.to_string(), "2025-01");
    }

    #[test]
    fn test_year_month_rejects_garbage() {
        for input in ["fon", "2025-13", "2025-00", "2025-1", "25-01", "2025/01", "2025-01-01", ""] {
            assert!(
                matches!(input.parse::<YearMonth>(), Err(AnalyticsError::InvalidMonth { .. })),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_year_month_contains() {
        let month: YearMonth = "2025-01".parse().unwrap();
        assert!(month.contains(&at("2025-01-31T23:59:59")));
        assert!(!month.contains(&at("2025-02-01T00:00:00")));
        assert!(!month.contains(&at("2024-01-15T12:00:00")));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ActivityStatus::Inactive.to_string(), "Inactive");
        assert_eq!(ActivityStatus::HighlyActive.to_string(), "Highly active");
        assert_eq!(
            serde_json::to_string(&ActivityStatus::HighlyActive).unwrap(),
            "\"Highly active\""
        );
    }
}
