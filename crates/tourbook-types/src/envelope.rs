//! Response envelopes, pagination and authentication payloads

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Standard backend response wrapper
///
/// Every endpoint answers `{success, message?, data?, pagination?, count?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the backend considered the call successful
    #[serde(default = "default_success")]
    pub success: bool,

    /// Human readable status message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Payload
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Pagination block for list endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,

    /// Item count for unpaginated lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

const fn default_success() -> bool {
    true
}

/// Pagination block returned by list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page (1-based)
    pub page: u32,
    /// Total number of pages
    pub pages: u32,
    /// Page size
    pub per_page: u32,
    /// Total number of items
    pub total: u64,
}

impl Pagination {
    /// Pagination for a single page holding `total` items
    #[must_use]
    pub fn single(total: u64, per_page: u32) -> Self {
        Self {
            page: 1,
            pages: u32::from(total > 0),
            per_page,
            total,
        }
    }

    /// Check if there's a next page
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.pages
    }

    /// Check if there's a previous page
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// One page of items together with its pagination block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Pagination info
    pub pagination: Pagination,
}

/// Field errors attached to a failed response
///
/// The structured form is a `{field: message}` map. Older backends send a
/// flat list of messages that cannot be attributed to fields. Decoding never
/// fails: lists under a field keep their first message, a bare string becomes
/// a one-item list and anything else is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ServerErrors {
    /// Messages keyed by form field
    Fields(BTreeMap<String, String>),
    /// Unattributed messages
    Messages(Vec<String>),
    /// No error details
    #[default]
    Empty,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireErrors {
    Fields(BTreeMap<String, WireFieldMessage>),
    Messages(Vec<WireFieldMessage>),
    Single(String),
    Other(de::IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireFieldMessage {
    One(String),
    Many(Vec<String>),
    Other(de::IgnoredAny),
}

impl WireFieldMessage {
    fn into_messages(self) -> Vec<String> {
        match self {
            Self::One(message) => vec![message],
            Self::Many(messages) => messages,
            Self::Other(de::IgnoredAny) => Vec::new(),
        }
    }
}

impl<'de> Deserialize<'de> for ServerErrors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let errors = match WireErrors::deserialize(deserializer)? {
            WireErrors::Fields(fields) => Self::Fields(
                fields
                    .into_iter()
                    .filter_map(|(field, message)| {
                        message
                            .into_messages()
                            .into_iter()
                            .next()
                            .map(|first| (field, first))
                    })
                    .collect(),
            ),
            WireErrors::Messages(messages) => Self::Messages(
                messages
                    .into_iter()
                    .flat_map(WireFieldMessage::into_messages)
                    .collect(),
            ),
            WireErrors::Single(message) => Self::Messages(vec![message]),
            WireErrors::Other(de::IgnoredAny) => Self::Empty,
        };
        Ok(errors)
    }
}

impl ServerErrors {
    /// Whether there is nothing to report
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Fields(fields) => fields.is_empty(),
            Self::Messages(messages) => messages.is_empty(),
            Self::Empty => true,
        }
    }

    /// Every message, field-keyed ones prefixed with their field
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Fields(fields) => fields
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect(),
            Self::Messages(messages) => messages.clone(),
            Self::Empty => Vec::new(),
        }
    }
}

/// Body of a non-2xx response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Server message
    #[serde(default)]
    pub message: Option<String>,
    /// Field errors
    #[serde(default)]
    pub errors: ServerErrors,
}

/// Admin credentials for `POST /auth/login`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Operator account summary returned on login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    /// Account id
    pub id: i64,
    /// Username
    pub username: String,
    /// Email
    #[serde(default)]
    pub email: Option<String>,
    /// Previous login time as sent by the backend
    #[serde(default)]
    pub last_login: Option<String>,
}

/// Payload of a successful login
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token
    pub token: String,
    /// Account details
    #[serde(default)]
    pub admin: Option<AdminProfile>,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"<redacted>")
            .field("admin", &self.admin)
            .finish()
    }
}

/// Payload of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `healthy` when the backend is up
    pub status: String,
    /// Server time
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Backend version
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    /// Whether the backend reports itself healthy
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_structured_field_errors() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"message": "Validation failed", "errors": {"email": "Valid email address is required"}}"#,
        )
        .unwrap();

        assert_eq!(body.message.as_deref(), Some("Validation failed"));
        let ServerErrors::Fields(fields) = &body.errors else {
            panic!("expected structured errors, got {:?}", body.errors);
        };
        assert_eq!(
            fields.get("email").map(String::as_str),
            Some("Valid email address is required")
        );
    }

    #[test]
    fn test_legacy_error_list() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"message": "Validation failed", "errors": ["Name must be at least 2 characters long"]}"#,
        )
        .unwrap();

        assert_eq!(
            body.errors,
            ServerErrors::Messages(vec!["Name must be at least 2 characters long".to_string()])
        );
        assert_eq!(body.errors.messages().len(), 1);
    }

    #[test]
    fn test_field_message_lists_keep_first_message() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"message": "Validation failed", "errors": {"email": ["Valid email address is required", "Too long"], "name": []}}"#,
        )
        .unwrap();

        assert_eq!(body.message.as_deref(), Some("Validation failed"));
        let ServerErrors::Fields(fields) = &body.errors else {
            panic!("expected structured errors, got {:?}", body.errors);
        };
        assert_eq!(fields.len(), 1);
        assert_eq!(
            fields.get("email").map(String::as_str),
            Some("Valid email address is required")
        );
    }

    #[test]
    fn test_odd_error_shapes_keep_message() {
        let single: ErrorBody =
            serde_json::from_str(r#"{"message": "Bad input", "errors": "Name is required"}"#).unwrap();
        assert_eq!(single.message.as_deref(), Some("Bad input"));
        assert_eq!(
            single.errors,
            ServerErrors::Messages(vec!["Name is required".to_string()])
        );

        let number: ErrorBody =
            serde_json::from_str(r#"{"message": "Bad input", "errors": 3}"#).unwrap();
        assert_eq!(number.message.as_deref(), Some("Bad input"));
        assert!(number.errors.is_empty());
    }

    #[test]
    fn test_missing_or_null_errors() {
        let body: ErrorBody = serde_json::from_str(r#"{"message": "Invalid credentials"}"#).unwrap();
        assert!(body.errors.is_empty());

        let body: ErrorBody = serde_json::from_str(r#"{"errors": null}"#).unwrap();
        assert!(body.errors.is_empty());
        assert!(body.message.is_none());
    }

    #[test]
    fn test_envelope_with_pagination() {
        let envelope: Envelope<Vec<u32>> = serde_json::from_str(
            r#"{"success": true, "data": [1, 2], "pagination": {"page": 2, "pages": 3, "per_page": 2, "total": 6}}"#,
        )
        .unwrap();

        let pagination = envelope.pagination.unwrap();
        assert_eq!(envelope.data, Some(vec![1, 2]));
        assert!(pagination.has_next());
        assert!(pagination.has_prev());
    }

    #[test]
    fn test_single_page_pagination() {
        assert_eq!(Pagination::single(0, 20).pages, 0);
        assert_eq!(Pagination::single(5, 20).pages, 1);
        assert!(!Pagination::single(5, 20).has_next());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("admin", "s3cret");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("s3cret"));
    }
}
