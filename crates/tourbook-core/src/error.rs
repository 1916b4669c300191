//! Error types for configuration and logging setup

use thiserror::Error;

/// Errors raised while preparing the client environment
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration sources could not be read or merged
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// A loaded setting has an unusable value
    #[error("Invalid setting {key}: {message}")]
    InvalidSetting {
        /// Dotted key of the setting
        key: String,
        /// What is wrong with it
        message: String,
    },

    /// The tracing subscriber could not be installed
    #[error("Logging initialization failed: {message}")]
    Logging {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Shorthand for [`Error::InvalidSetting`]
    #[must_use]
    pub fn invalid_setting(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
