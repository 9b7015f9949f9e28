//! Error types for Activity Analytics.
//!
//! This module defines the `AnalyticsError` enum which represents every
//! failure the registry, session store and analytics operations can report.
//! All of them are caller-recoverable; there is no fatal class.

use thiserror::Error;

/// The main error type for Activity Analytics operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    // ==================== Registry Errors ====================
    /// A user with this ID is already registered.
    #[error("User already exists")]
    AlreadyExists { user_id: String },

    /// The user ID is not present in the registry.
    #[error("User not found: {user_id}")]
    UnknownUser { user_id: String },

    // ==================== Validation Errors ====================
    /// The login/logout pair is malformed or not strictly increasing.
    #[error("Invalid session interval: {reason}")]
    InvalidInterval { reason: String },

    /// The month selector is not a valid `YYYY-MM` value.
    #[error("Invalid month '{value}', expected YYYY-MM")]
    InvalidMonth { value: String },

    /// The day count is not a non-negative integer.
    #[error("Invalid number format for days: '{value}'")]
    InvalidNumber { value: String },

    /// A required request parameter is absent. Only raised at the HTTP boundary.
    #[error("Missing parameter: {name}")]
    MissingParameter { name: String },
}

impl AnalyticsError {
    /// Creates a new already-exists error.
    pub fn already_exists(user_id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            user_id: user_id.into(),
        }
    }

    /// Creates a new unknown-user error.
    pub fn unknown_user(user_id: impl Into<String>) -> Self {
        Self::UnknownUser {
            user_id: user_id.into(),
        }
    }

    /// Creates a new invalid-interval error.
    pub fn invalid_interval(reason: impl Into<String>) -> Self {
        Self::InvalidInterval {
            reason: reason.into(),
        }
    }

    /// Creates a new invalid-month error.
    pub fn invalid_month(value: impl Into<String>) -> Self {
        Self::InvalidMonth {
            value: value.into(),
        }
    }

    /// Creates a new invalid-number error.
    pub fn invalid_number(value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            value: value.into(),
        }
    }

    /// Creates a new missing-parameter error.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Returns true if the error stems from malformed input rather than
    /// from registry state.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInterval { .. }
                | Self::InvalidMonth { .. }
                | Self::InvalidNumber { .. }
                | Self::MissingParameter { .. }
        )
    }
}

/// A Result type alias using AnalyticsError.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::already_exists("user1");
        assert_eq!(err.to_string(), "User already exists");

        let err = AnalyticsError::unknown_user("user2");
        assert_eq!(err.to_string(), "User not found: user2");

        let err = AnalyticsError::invalid_number("fon");
        assert!(err.to_string().contains("Invalid number format for days"));
    }

    #[test]
    fn test_is_validation_error() {
        assert!(AnalyticsError::invalid_month("fon").is_validation_error());
        assert!(AnalyticsError::missing("userId").is_validation_error());
        assert!(!AnalyticsError::unknown_user("user2").is_validation_error());
        assert!(!AnalyticsError::already_exists("user1").is_validation_error());
    }
}
