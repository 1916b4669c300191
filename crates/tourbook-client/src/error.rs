//! Error types for backend calls

use std::time::Duration;
use thiserror::Error;
use tourbook_protocol::{FieldErrors, FormErrors};
use tourbook_types::{ErrorBody, ServerErrors};

/// Result type alias for client operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Normalized failure of a backend call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The backend answered with a non-2xx status
    #[error("{message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Server message, or a generic one naming the status
        message: String,
        /// Field errors attached by the server
        errors: ServerErrors,
    },

    /// The request never got an answer (DNS, refused connection, reset)
    #[error("Network error: {message}")]
    Network {
        /// Transport error description
        message: String,
    },

    /// No complete answer within the configured timeout
    #[error("Request timed out after {}s", .timeout.as_secs())]
    Timeout {
        /// Timeout that elapsed
        timeout: Duration,
    },

    /// The caller cancelled the request
    #[error("Request cancelled")]
    Cancelled,

    /// A body could not be encoded or a 2xx body could not be decoded
    #[error("Invalid JSON: {message}")]
    Decode {
        /// Parser error description
        message: String,
    },

    /// Rejected locally before any request was sent
    #[error("Invalid request: {0}")]
    Validation(FieldErrors),

    /// An admin call was attempted without a bearer token
    #[error("Not signed in")]
    NotAuthenticated,

    /// The token store failed
    #[error("Token storage error: {message}")]
    Storage {
        /// Storage error description
        message: String,
    },
}

impl ApiError {
    /// Build the error for a non-2xx answer from its raw body
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        let message = parsed
            .message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {status}"));

        Self::Http {
            status,
            message,
            errors: parsed.errors,
        }
    }

    pub(crate) fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }

    pub(crate) fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }

    /// HTTP status, when the server answered
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the bearer token
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }

    /// Whether the backend could not be reached at all
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }

    /// Field and form-level messages for display next to a form
    #[must_use]
    pub fn form_errors(&self) -> FormErrors {
        match self {
            Self::Http { errors, .. } => FormErrors::from_server(errors),
            Self::Validation(fields) => FormErrors {
                fields: fields.clone(),
                general: Vec::new(),
            },
            _ => FormErrors::default(),
        }
    }
}
