use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the fleetmatch library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Roster file could not be located at the resolved path.
    #[error("driver roster not found at {path}")]
    RosterNotFound { path: PathBuf },

    /// Raised when a roster parses but contains unusable records.
    #[error("invalid driver roster: {message}")]
    RosterValidation { message: String },

    /// Raised when two roster records share the same driver id.
    #[error("duplicate driver id encountered: {id}")]
    DuplicateDriverId { id: String },

    /// Raised when a timestamp is neither RFC 3339 nor a naive ISO 8601 value.
    #[error("invalid timestamp '{value}': expected ISO 8601 date-time")]
    InvalidTimestamp { value: String },

    /// Raised when a parsed trip carries out-of-range or inconsistent values.
    #[error("invalid trip: {message}")]
    InvalidTrip { message: String },

    /// Wrapper for JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
