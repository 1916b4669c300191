//! Banner messages shared by the form controllers

use serde::Serialize;
use std::fmt;

/// Shown when client-side validation stops a submission
pub const INVALID_FORM: &str = "Please fix the errors below and try again.";

/// Shown when the server rejects individual fields
pub const SERVER_FIELD_ERRORS: &str = "Please check the form and fix any errors.";

/// Banner above a form after a submission attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Notice {
    /// The submission went through
    Success(String),
    /// Validation failed or the server refused the request
    Error(String),
    /// The backend could not be reached
    Offline(String),
}

impl Notice {
    /// Banner text
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) | Self::Offline(text) => text,
        }
    }

    /// Whether this reports a failure
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::Success(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
