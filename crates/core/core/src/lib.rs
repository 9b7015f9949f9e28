//! # Activity Analytics Core
//!
//! This crate provides the foundational types and services for the Activity
//! Analytics system. It defines the data structures (`User`, `Session`),
//! the error type, the storage trait that adapters implement, the analytics
//! engine and the status classifier.

pub mod analytics;
pub mod error;
pub mod input;
pub mod status;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate root
pub use analytics::AnalyticsService;
pub use error::{AnalyticsError, AnalyticsResult};
pub use input::{parse_month, parse_since_days, parse_timestamp};
pub use status::{latest_session, StatusService, StatusThresholds};
pub use traits::{ActivitySource, StorageAdapter};
pub use types::{ActivityStatus, Session, User, YearMonth};
