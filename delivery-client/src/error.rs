//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Schedule document not yet fetched; computations must wait for the
    /// load to resolve
    #[error("Schedule data has not been loaded")]
    MissingScheduleData,

    /// No delivery location has been selected yet
    #[error("No delivery location selected")]
    NoLocation,

    /// The selected location names a region the document does not carry
    #[error("Unknown delivery region: {0}")]
    UnknownRegion(String),

    /// Domain-level schedule failure
    #[error(transparent)]
    Schedule(#[from] schedule_core::ScheduleError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
