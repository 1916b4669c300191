//! Mapping of backend validation failures onto the form

use crate::field::{FieldErrors, FormField};
use serde::Serialize;
use tourbook_types::ServerErrors;

/// Server-side validation failures split into per-field and form-level messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    /// Messages the server attributed to a known field
    pub fields: FieldErrors,
    /// Everything else, shown above the form
    pub general: Vec<String>,
}

impl FormErrors {
    /// Split server errors
    ///
    /// Only keyed errors land on fields. A flat message list stays
    /// form-level: attributing free text to inputs by keyword is unreliable.
    #[must_use]
    pub fn from_server(errors: &ServerErrors) -> Self {
        let mut result = Self::default();
        match errors {
            ServerErrors::Fields(fields) => {
                for (key, message) in fields {
                    match key.parse::<FormField>() {
                        Ok(field) => result.fields.insert(field, message.clone()),
                        Err(_) => result.general.push(format!("{key}: {message}")),
                    }
                }
            }
            ServerErrors::Messages(messages) => result.general.clone_from(messages),
            ServerErrors::Empty => {}
        }
        result
    }

    /// Whether nothing was reported
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_empty()
    }
}
