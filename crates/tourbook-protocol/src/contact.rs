//! Contact form rules

use crate::field::{FieldErrors, FormField};
use crate::is_valid_email;
use serde::{Deserialize, Serialize};
use tourbook_types::ContactRequest;

const MIN_MESSAGE_LEN: usize = 10;
const MAX_MESSAGE_LEN: usize = 2000;
const MAX_SUBJECT_LEN: usize = 200;

/// Raw contact form input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Optional subject
    pub subject: String,
    /// Message body
    pub message: String,
}

impl ContactForm {
    /// Overwrite one input
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Subject => self.subject = value,
            FormField::Message => self.message = value,
            _ => {}
        }
    }

    /// Check every rule
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().chars().count() < 2 {
            errors.insert(FormField::Name, "Name must be at least 2 characters long");
        }
        if self.email.trim().is_empty() {
            errors.insert(FormField::Email, "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert(FormField::Email, "Please enter a valid email address");
        }
        if self.subject.chars().count() > MAX_SUBJECT_LEN {
            errors.insert(FormField::Subject, "Subject cannot exceed 200 characters");
        }

        let message_len = self.message.trim().chars().count();
        if message_len < MIN_MESSAGE_LEN {
            errors.insert(FormField::Message, "Message must be at least 10 characters long");
        } else if self.message.chars().count() > MAX_MESSAGE_LEN {
            errors.insert(FormField::Message, "Message cannot exceed 2000 characters");
        }

        errors.into_result()
    }

    /// Validate, then produce the cleaned request body
    pub fn to_request(&self) -> Result<ContactRequest, FieldErrors> {
        self.validate()?;
        Ok(ContactRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}
