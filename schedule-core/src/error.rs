//! Schedule error types

use thiserror::Error;

/// Schedule error type
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Schedule document failed validation
    #[error("Invalid schedule document: {0}")]
    InvalidDocument(String),

    /// Delivery location string is malformed
    #[error("Invalid delivery location: {0}")]
    InvalidLocation(String),

    /// Date or time field failed to parse
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type for schedule operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;
