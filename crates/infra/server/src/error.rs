//! Mapping of analytics errors to HTTP responses.

use activity_analytics_core::AnalyticsError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Wrapper for AnalyticsError that implements IntoResponse.
///
/// Every analytics error is a client error and becomes `400 Bad Request`
/// with a plain-text body.
#[derive(Debug)]
pub struct ApiError(pub AnalyticsError);

impl ApiError {
    /// Plain-text body shown to the client.
    pub fn body(&self) -> String {
        match &self.0 {
            AnalyticsError::AlreadyExists { .. } => "User already exists".to_string(),
            AnalyticsError::InvalidNumber { .. } => "Invalid number format for days".to_string(),
            AnalyticsError::MissingParameter { .. } => self.0.to_string(),
            other => format!("Invalid data: {other}"),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_validation_error() {
            tracing::warn!(error = %self.0, "rejected malformed request");
        } else {
            tracing::debug!(error = %self.0, "request failed");
        }

        (self.status_code(), self.body()).into_response()
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        ApiError(err)
    }
}
