//! The analytics engine.
//!
//! `AnalyticsService` owns the registry/session-store handle and derives
//! per-user activity figures from it.

use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDateTime};
use std::sync::Arc;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::traits::{ActivitySource, StorageAdapter};
use crate::types::{Session, User, YearMonth};

/// Registration, session recording and activity aggregation over a storage
/// adapter.
///
/// # Example
///
/// ```rust,ignore
/// let analytics = AnalyticsService::new(Arc::new(MemoryAdapter::new()));
/// analytics.register_user("user1", "Alice").await?;
/// let minutes = analytics.total_activity_minutes("user1").await?;
/// ```
#[derive(Clone)]
pub struct AnalyticsService {
    db: Arc<dyn StorageAdapter>,
}

impl AnalyticsService {
    /// Creates a new engine over the given storage adapter.
    pub fn new(db: Arc<dyn StorageAdapter>) -> Self {
        Self { db }
    }

    // ==================== Registry ====================

    /// Registers a user. Returns `true` on success.
    pub async fn register_user(&self, id: &str, name: &str) -> AnalyticsResult<bool> {
        let user = self.db.create_user(&User::new(id, name)).await?;
        tracing::info!(user_id = %user.id, "registered user");
        Ok(true)
    }

    /// Checks whether a user is registered.
    pub async fn user_exists(&self, id: &str) -> AnalyticsResult<bool> {
        self.db.user_exists(id).await
    }

    // ==================== Sessions ====================

    /// Records a login/logout interval for a registered user.
    pub async fn record_session(
        &self,
        user_id: &str,
        login_time: NaiveDateTime,
        logout_time: NaiveDateTime,
    ) -> AnalyticsResult<Session> {
        self.ensure_registered(user_id).await?;

        let session = Session::new(user_id, login_time, logout_time)?;
        let session = self.db.create_session(&session).await?;
        tracing::info!(
            user_id,
            session_id = %session.id,
            minutes = session.duration_minutes(),
            "recorded session"
        );
        Ok(session)
    }

    /// Returns the sessions of a registered user in insertion order.
    pub async fn sessions(&self, user_id: &str) -> AnalyticsResult<Vec<Session>> {
        self.ensure_registered(user_id).await?;
        self.db.get_sessions_by_user_id(user_id).await
    }

    // ==================== Aggregates ====================

    /// Sum of all session durations of a user, in whole minutes.
    pub async fn total_activity_minutes(&self, user_id: &str) -> AnalyticsResult<i64> {
        let sessions = self.sessions(user_id).await?;
        let total: i64 = sessions.iter().map(Session::duration_minutes).sum();
        tracing::debug!(user_id, total, "computed total activity");
        Ok(total)
    }

    /// Sum of durations of the sessions that started in `month`.
    ///
    /// A session is counted in full in the month of its login time, even
    /// if it runs into the next month.
    pub async fn monthly_activity_minutes(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> AnalyticsResult<i64> {
        let sessions = self.sessions(user_id).await?;
        let total: i64 = sessions
            .iter()
            .filter(|s| s.started_in(month))
            .map(Session::duration_minutes)
            .sum();
        tracing::debug!(user_id, %month, total, "computed monthly activity");
        Ok(total)
    }

    /// Users with no sessions, or whose last logout is more than
    /// `since_days` days before now.
    pub async fn inactive_users(&self, since_days: u32) -> AnalyticsResult<Vec<String>> {
        self.inactive_users_at(since_days, Local::now().naive_local())
            .await
    }

    /// Same as [`inactive_users`](Self::inactive_users) with an explicit
    /// reference instant. Results follow registration order.
    pub async fn inactive_users_at(
        &self,
        since_days: u32,
        now: NaiveDateTime,
    ) -> AnalyticsResult<Vec<String>> {
        // None when the window reaches past the representable range: nobody
        // with a session can be older than that.
        let cutoff = Duration::try_days(i64::from(since_days))
            .and_then(|window| now.checked_sub_signed(window));

        let mut inactive = Vec::new();
        for user in self.db.list_users().await? {
            let sessions = self.db.get_sessions_by_user_id(&user.id).await?;
            let last_logout = sessions.iter().map(|s| s.logout_time).max();

            let is_inactive = match last_logout {
                None => true,
                Some(last) => cutoff.is_some_and(|cutoff| last < cutoff),
            };
            if is_inactive {
                inactive.push(user.id);
            }
        }

        tracing::debug!(since_days, count = inactive.len(), "computed inactive users");
        Ok(inactive)
    }

    async fn ensure_registered(&self, user_id: &str) -> AnalyticsResult<()> {
        if self.db.user_exists(user_id).await? {
            Ok(())
        } else {
            Err(AnalyticsError::unknown_user(user_id))
        }
    }
}

#[async_trait]
impl ActivitySource for AnalyticsService {
    async fn total_activity_minutes(&self, user_id: &str) -> AnalyticsResult<i64> {
        AnalyticsService::total_activity_minutes(self, user_id).await
    }

    async fn user_sessions(&self, user_id: &str) -> AnalyticsResult<Vec<Session>> {
        self.sessions(user_id).await
    }
}
