//! # Activity Analytics Memory Adapter
//!
//! An in-memory user registry and session store. State lives for the
//! lifetime of the process; nothing is persisted.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use activity_analytics_adapter_memory::MemoryAdapter;
//! use activity_analytics_core::AnalyticsService;
//!
//! let analytics = AnalyticsService::new(Arc::new(MemoryAdapter::new()));
//! ```

use activity_analytics_core::error::{AnalyticsError, AnalyticsResult};
use activity_analytics_core::traits::StorageAdapter;
use activity_analytics_core::types::{Session, User};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage keyed by ID.
type Store<T> = Arc<RwLock<HashMap<String, T>>>;

/// Registered users plus the order they were registered in.
#[derive(Debug, Default)]
struct UserTable {
    by_id: HashMap<String, User>,
    order: Vec<String>,
}

/// In-memory storage adapter.
///
/// Lock order is users before sessions. Users are never removed, so a
/// registry check followed by a session append cannot race with deletion.
#[derive(Debug, Clone, Default)]
pub struct MemoryAdapter {
    users: Arc<RwLock<UserTable>>,
    sessions: Store<Vec<Session>>,
}

impl MemoryAdapter {
    /// Creates a new, empty adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all stored data.
    pub async fn clear(&self) {
        let mut users = self.users.write().await;
        let mut sessions = self.sessions.write().await;
        users.by_id.clear();
        users.order.clear();
        sessions.clear();
    }

    /// Returns the number of users stored.
    pub async fn user_count(&self) -> usize {
        self.users.read().await.order.len()
    }

    /// Returns the number of sessions stored across all users.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl StorageAdapter for MemoryAdapter {
    // ==================== User Operations ====================

    async fn create_user(&self, user: &User) -> AnalyticsResult<User> {
        let mut users = self.users.write().await;

        if users.by_id.contains_key(&user.id) {
            tracing::debug!(user_id = %user.id, "rejected duplicate registration");
            return Err(AnalyticsError::already_exists(&user.id));
        }

        users.by_id.insert(user.id.clone(), user.clone());
        users.order.push(user.id.clone());
        Ok(user.clone())
    }

    async fn get_user_by_id(&self, id: &str) -> AnalyticsResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.by_id.get(id).cloned())
    }

    async fn user_exists(&self, id: &str) -> AnalyticsResult<bool> {
        let users = self.users.read().await;
        Ok(users.by_id.contains_key(id))
    }

    async fn list_users(&self) -> AnalyticsResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .order
            .iter()
            .filter_map(|id| users.by_id.get(id).cloned())
            .collect())
    }

    // ==================== Session Operations ====================

    async fn create_session(&self, session: &Session) -> AnalyticsResult<Session> {
        let users = self.users.read().await;
        if !users.by_id.contains_key(&session.user_id) {
            return Err(AnalyticsError::unknown_user(&session.user_id));
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session.user_id.clone())
            .or_default()
            .push(session.clone());
        Ok(session.clone())
    }

    async fn get_sessions_by_user_id(&self, user_id: &str) -> AnalyticsResult<Vec<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(user_id).cloned().unwrap_or_default())
    }
}
