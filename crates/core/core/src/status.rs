//! Status classification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::AnalyticsResult;
use crate::traits::ActivitySource;
use crate::types::{ActivityStatus, Session};

/// Inclusive lower bounds, in minutes, of the non-inactive statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusThresholds {
    /// Minimum total minutes to count as `Active`.
    pub active_minutes: i64,
    /// Minimum total minutes to count as `Highly active`.
    pub highly_active_minutes: i64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            active_minutes: 60,
            highly_active_minutes: 120,
        }
    }
}

impl StatusThresholds {
    /// Maps a total activity figure to its status.
    pub fn classify(&self, total_minutes: i64) -> ActivityStatus {
        if total_minutes >= self.highly_active_minutes {
            ActivityStatus::HighlyActive
        } else if total_minutes >= self.active_minutes {
            ActivityStatus::Active
        } else {
            ActivityStatus::Inactive
        }
    }
}

/// Derives status labels and last-session dates from an activity source.
#[derive(Clone)]
pub struct StatusService {
    activity: Arc<dyn ActivitySource>,
    thresholds: StatusThresholds,
}

impl StatusService {
    /// Creates a classifier with the default thresholds.
    pub fn new(activity: Arc<dyn ActivitySource>) -> Self {
        Self::with_thresholds(activity, StatusThresholds::default())
    }

    /// Creates a classifier with custom thresholds.
    pub fn with_thresholds(activity: Arc<dyn ActivitySource>, thresholds: StatusThresholds) -> Self {
        Self {
            activity,
            thresholds,
        }
    }

    /// Classifies a user by total activity.
    pub async fn status(&self, user_id: &str) -> AnalyticsResult<ActivityStatus> {
        let total = self.activity.total_activity_minutes(user_id).await?;
        Ok(self.thresholds.classify(total))
    }

    /// Calendar date of the user's latest logout, if any session exists.
    pub async fn last_session_date(&self, user_id: &str) -> AnalyticsResult<Option<NaiveDate>> {
        let sessions = self.activity.user_sessions(user_id).await?;
        Ok(latest_session(&sessions).map(Session::logout_date))
    }
}

/// The session with the greatest logout time. Among equal logout times the
/// earliest inserted one wins.
pub fn latest_session(sessions: &[Session]) -> Option<&Session> {
    sessions
        .iter()
        .reduce(|best, s| if s.logout_time > best.logout_time { s } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use crate::traits::MockActivitySource;
    use chrono::{Duration, Local, NaiveDateTime};

    fn service_with_total(total: i64) -> StatusService {
        let mut mock = MockActivitySource::new();
        mock.expect_total_activity_minutes()
            .returning(move |_| Ok(total));
        StatusService::new(Arc::new(mock))
    }

    fn service_with_sessions(sessions: Vec<Session>) -> StatusService {
        let mut mock = MockActivitySource::new();
        mock.expect_user_sessions()
            .returning(move |_| Ok(sessions.clone()));
        StatusService::new(Arc::new(mock))
    }

    fn session(login: NaiveDateTime, logout: NaiveDateTime) -> Session {
        Session::new("user123", login, logout).unwrap()
    }

    #[tokio::test]
    async fn test_status_thresholds() {
        let cases = [
            (0, ActivityStatus::Inactive),
            (30, ActivityStatus::Inactive),
            (59, ActivityStatus::Inactive),
            (60, ActivityStatus::Active),
            (90, ActivityStatus::Active),
            (119, ActivityStatus::Active),
            (120, ActivityStatus::HighlyActive),
            (200, ActivityStatus::HighlyActive),
        ];

        for (total, expected) in cases {
            let status = service_with_total(total).status("user123").await.unwrap();
            assert_eq!(status, expected, "total of {total} minutes");
        }
    }

    #[tokio::test]
    async fn test_status_propagates_unknown_user() {
        let mut mock = MockActivitySource::new();
        mock.expect_total_activity_minutes()
            .returning(|id| Err(AnalyticsError::unknown_user(id)));
        let service = StatusService::new(Arc::new(mock));

        let err = service.status("ghost").await.unwrap_err();
        assert_eq!(err, AnalyticsError::unknown_user("ghost"));
    }

    #[tokio::test]
    async fn test_custom_thresholds() {
        let mut mock = MockActivitySource::new();
        mock.expect_total_activity_minutes().returning(|_| Ok(30));
        let service = StatusService::with_thresholds(
            Arc::new(mock),
            StatusThresholds {
                active_minutes: 10,
                highly_active_minutes: 30,
            },
        );

        assert_eq!(service.status("user123").await.unwrap(), ActivityStatus::HighlyActive);
    }

    #[tokio::test]
    async fn test_last_session_date_empty() {
        let service = service_with_sessions(Vec::new());
        assert_eq!(service.last_session_date("user123").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_last_session_date_ordering() {
        let now = Local::now().naive_local();
        let last = session(now - Duration::hours(1), now);
        let earlier = session(now - Duration::days(1), now - Duration::hours(2));
        let expected = Some(last.logout_date());

        let single = service_with_sessions(vec![last.clone()]);
        assert_eq!(single.last_session_date("user123").await.unwrap(), expected);

        let ordered = service_with_sessions(vec![earlier.clone(), last.clone()]);
        assert_eq!(ordered.last_session_date("user123").await.unwrap(), expected);

        let unordered = service_with_sessions(vec![last, earlier]);
        assert_eq!(unordered.last_session_date("user123").await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_last_session_date_propagates_unknown_user() {
        let mut mock = MockActivitySource::new();
        mock.expect_user_sessions()
            .returning(|id| Err(AnalyticsError::unknown_user(id)));
        let service = StatusService::new(Arc::new(mock));

        assert!(matches!(
            service.last_session_date("ghost").await,
            Err(AnalyticsError::UnknownUser { .. })
        ));
    }

    #[test]
    fn test_latest_session_tie_keeps_first_inserted() {
        let base: NaiveDateTime = "2025-03-10T08:00:00".parse().unwrap();
        let first = session(base, base + Duration::hours(2));
        let second = session(base + Duration::hours(1), base + Duration::hours(2));
        let sessions = vec![first.clone(), second];

        assert_eq!(latest_session(&sessions).map(|s| &s.id), Some(&first.id));
    }
}
