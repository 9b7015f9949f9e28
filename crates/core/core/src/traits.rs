//! Core traits for Activity Analytics.
//!
//! This module defines the storage seam that adapters implement and the
//! activity seam the status classifier depends on.

use async_trait::async_trait;

use crate::error::AnalyticsResult;
use crate::types::{Session, User};

/// Trait for storage adapters.
///
/// Adapters hold the user registry and the per-user session lists.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    // ==================== User Operations ====================

    /// Registers a new user.
    ///
    /// Fails with `AlreadyExists` when the ID is taken. The check and the
    /// insert must be atomic.
    async fn create_user(&self, user: &User) -> AnalyticsResult<User>;

    /// Gets a user by ID.
    async fn get_user_by_id(&self, id: &str) -> AnalyticsResult<Option<User>>;

    /// Checks whether a user is registered.
    async fn user_exists(&self, id: &str) -> AnalyticsResult<bool> {
        Ok(self.get_user_by_id(id).await?.is_some())
    }

    /// Lists all users in registration order.
    async fn list_users(&self) -> AnalyticsResult<Vec<User>>;

    // ==================== Session Operations ====================

    /// Appends a session to its user's list.
    ///
    /// Fails with `UnknownUser` when the session's user is not registered.
    async fn create_session(&self, session: &Session) -> AnalyticsResult<Session>;

    /// Gets all sessions for a user in insertion order.
    ///
    /// Returns an empty list for users without sessions, registered or not.
    async fn get_sessions_by_user_id(&self, user_id: &str) -> AnalyticsResult<Vec<Session>>;
}

/// Source of per-user activity figures.
///
/// The status classifier depends on this rather than on storage so that it
/// can be driven by any engine, or by a mock in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Total activity of a registered user in whole minutes.
    async fn total_activity_minutes(&self, user_id: &str) -> AnalyticsResult<i64>;

    /// Sessions of a registered user in insertion order.
    async fn user_sessions(&self, user_id: &str) -> AnalyticsResult<Vec<Session>>;
}
