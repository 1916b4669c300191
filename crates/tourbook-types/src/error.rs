//! Errors raised while parsing wire values into typed values

use thiserror::Error;

/// Result type alias for type conversions
pub type TypeResult<T> = Result<T, TypeError>;

/// Errors that can occur when converting raw strings into domain types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Unknown booking status
    #[error("Unknown booking status: {value}")]
    UnknownStatus {
        /// The rejected value
        value: String,
    },

    /// Unknown status action
    #[error("Unknown status action: {value}. Expected confirm, complete or cancel")]
    UnknownAction {
        /// The rejected value
        value: String,
    },

    /// Unknown difficulty level
    #[error("Unknown difficulty level: {value}")]
    UnknownDifficulty {
        /// The rejected value
        value: String,
    },

    /// Timestamp in an unsupported format
    #[error("Invalid timestamp: {value}")]
    InvalidTimestamp {
        /// The rejected value
        value: String,
    },
}
