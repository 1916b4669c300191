//! Form fields and the per-field error map

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An input on the booking or contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    /// Customer name
    Name,
    /// Customer email
    Email,
    /// Phone number
    Phone,
    /// Destination slug
    Destination,
    /// Preferred travel date
    Date,
    /// Number of travellers
    Guests,
    /// Contact subject line
    Subject,
    /// Free text message
    Message,
}

impl FormField {
    /// Key used on the wire and in error maps
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Destination => "destination",
            Self::Date => "date",
            Self::Guests => "guests",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Label shown next to the input
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::Destination => "Destination",
            Self::Date => "Preferred Date",
            Self::Guests => "Number of Guests",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown field key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "destination" => Ok(Self::Destination),
            "date" | "preferred_date" => Ok(Self::Date),
            "guests" => Ok(Self::Guests),
            "subject" => Ok(Self::Subject),
            "message" => Ok(Self::Message),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

/// Validation messages keyed by field, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(transparent)]
#[error("{} field(s) failed validation", .0.len())]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    /// Empty error map
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record an error; the first message for a field wins
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, field: FormField, message: impl Into<String>) -> Self {
        self.insert(field, message);
        self
    }

    /// Message for a field, if any
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether a field has an error
    #[must_use]
    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    /// Drop the error for a field, as when the user edits it
    pub fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    /// Drop every error
    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    /// Whether there are no errors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate in field order
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(())` when empty, otherwise the errors themselves
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a FormField, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, FormField, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_message_wins() {
        let mut errors = FieldErrors::new();
        errors.insert(FormField::Email, "Email is required");
        errors.insert(FormField::Email, "Please enter a valid email address");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::Email), Some("Email is required"));
    }

    #[test]
    fn test_clear_single_field() {
        let mut errors = FieldErrors::new()
            .with(FormField::Name, "too short")
            .with(FormField::Guests, "too many");
        errors.clear(FormField::Name);

        assert!(!errors.contains(FormField::Name));
        assert!(errors.contains(FormField::Guests));
        assert!(errors.clone().into_result().is_err());
        errors.clear_all();
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn test_field_keys() {
        assert_eq!("preferred_date".parse(), Ok(FormField::Date));
        assert_eq!(" Email ".parse(), Ok(FormField::Email));
        assert!("budget".parse::<FormField>().is_err());
    }

    #[test]
    fn test_serializes_as_map() {
        let errors = FieldErrors::new().with(FormField::Phone, "Phone number should be 7-15 digits");
        assert_eq!(
            serde_json::to_value(&errors).unwrap_or_default(),
            serde_json::json!({"phone": "Phone number should be 7-15 digits"})
        );
        assert_eq!(errors.to_string(), "1 field(s) failed validation");
    }
}
