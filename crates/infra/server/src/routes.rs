//! HTTP routes of the analytics service.

use activity_analytics_core::{
    parse_month, parse_since_days, parse_timestamp, AnalyticsError, AnalyticsService,
    StatusService,
};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

/// Shared state for the analytics routes.
#[derive(Clone)]
pub struct AppState {
    pub analytics: Arc<AnalyticsService>,
    pub status: StatusService,
}

impl AppState {
    pub fn new(analytics: Arc<AnalyticsService>, status: StatusService) -> Self {
        Self { analytics, status }
    }
}

/// Creates the router with every analytics route.
///
/// # Example
///
/// ```rust,ignore
/// let app = analytics_routes(state);
/// axum::serve(listener, app).await?;
/// ```
pub fn analytics_routes(state: AppState) -> Router {
    Router::new()
        .route("/register", post(register_handler))
        .route("/recordSession", post(record_session_handler))
        .route("/totalActivity", get(total_activity_handler))
        .route("/monthlyActivity", get(monthly_activity_handler))
        .route("/inactiveUsers", get(inactive_users_handler))
        .route("/userStatus", get(user_status_handler))
        .route("/lastSessionDate", get(last_session_date_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

type ApiResult<T> = Result<T, ApiError>;

fn require(value: Option<String>, name: &str) -> Result<String, AnalyticsError> {
    value.ok_or_else(|| AnalyticsError::missing(name))
}

// ==================== Query parameters ====================

#[derive(Debug, Deserialize)]
pub struct RegisterParams {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "userName")]
    pub user_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordSessionParams {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "loginTime")]
    pub login_time: Option<String>,
    #[serde(rename = "logoutTime")]
    pub logout_time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserParams {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyParams {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub month: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InactiveParams {
    pub days: Option<String>,
}

// ==================== Response bodies ====================

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthlyActivityResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub month: String,
    pub minutes: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LastSessionDateResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "lastSessionDate")]
    pub last_session_date: Option<String>,
}

// ==================== Handlers ====================

async fn register_handler(
    State(state): State<AppState>,
    Query(params): Query<RegisterParams>,
) -> ApiResult<String> {
    let user_id = require(params.user_id, "userId")?;
    let user_name = require(params.user_name, "userName")?;

    let registered = state.analytics.register_user(&user_id, &user_name).await?;
    Ok(format!("User registered: {registered}"))
}

async fn record_session_handler(
    State(state): State<AppState>,
    Query(params): Query<RecordSessionParams>,
) -> ApiResult<&'static str> {
    let user_id = require(params.user_id, "userId")?;
    let login_time = require(params.login_time, "loginTime")?;
    let logout_time = require(params.logout_time, "logoutTime")?;

    // Unknown users are reported before malformed timestamps.
    if !state.analytics.user_exists(&user_id).await? {
        return Err(AnalyticsError::unknown_user(user_id).into());
    }

    let login_time = parse_timestamp(&login_time)?;
    let logout_time = parse_timestamp(&logout_time)?;
    state
        .analytics
        .record_session(&user_id, login_time, logout_time)
        .await?;
    Ok("Session recorded")
}

async fn total_activity_handler(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> ApiResult<String> {
    let user_id = require(params.user_id, "userId")?;

    let minutes = state.analytics.total_activity_minutes(&user_id).await?;
    Ok(format!("Total activity: {minutes} minutes"))
}

async fn monthly_activity_handler(
    State(state): State<AppState>,
    Query(params): Query<MonthlyParams>,
) -> ApiResult<Json<MonthlyActivityResponse>> {
    let user_id = require(params.user_id, "userId")?;
    let month = require(params.month, "month")?;

    let month = parse_month(&month)?;
    let minutes = state
        .analytics
        .monthly_activity_minutes(&user_id, month)
        .await?;
    Ok(Json(MonthlyActivityResponse {
        user_id,
        month: month.to_string(),
        minutes,
    }))
}

async fn inactive_users_handler(
    State(state): State<AppState>,
    Query(params): Query<InactiveParams>,
) -> ApiResult<Json<Vec<String>>> {
    let days = require(params.days, "days")?;

    let days = parse_since_days(&days)?;
    let users = state.analytics.inactive_users(days).await?;
    Ok(Json(users))
}

async fn user_status_handler(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> ApiResult<&'static str> {
    let user_id = require(params.user_id, "userId")?;

    let status = state.status.status(&user_id).await?;
    Ok(status.as_str())
}

async fn last_session_date_handler(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> ApiResult<Json<LastSessionDateResponse>> {
    let user_id = require(params.user_id, "userId")?;

    let date = state.status.last_session_date(&user_id).await?;
    Ok(Json(LastSessionDateResponse {
        user_id,
        last_session_date: date.map(|d| d.to_string()),
    }))
}

async fn health_handler() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert_eq!(require(Some("user1".into()), "userId").unwrap(), "user1");
        assert_eq!(
            require(None, "userId").unwrap_err(),
            AnalyticsError::missing("userId")
        );
    }
}
