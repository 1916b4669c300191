//! Booking records, their status lifecycle and the request bodies that touch them

use crate::error::{TypeError, TypeResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned booking identifier
pub type BookingId = i64;

/// Booking status enumeration
///
/// Allowed transitions are `pending → confirmed → completed` and
/// `pending | confirmed → cancelled`. `completed` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Awaiting operator review
    Pending,
    /// Accepted by the operator
    Confirmed,
    /// Trip has taken place
    Completed,
    /// Withdrawn by the operator
    Cancelled,
}

impl BookingStatus {
    /// Every status, in lifecycle order
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transition is possible
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Actions an operator may apply from this status
    #[must_use]
    pub const fn available_actions(self) -> &'static [StatusAction] {
        match self {
            Self::Pending => &[StatusAction::Confirm, StatusAction::Cancel],
            Self::Confirmed => &[StatusAction::Complete, StatusAction::Cancel],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    /// Whether `action` is offered from this status
    #[must_use]
    pub fn allows(self, action: StatusAction) -> bool {
        self.available_actions().contains(&action)
    }

    /// Whether moving to `next` follows the lifecycle
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.available_actions()
            .iter()
            .any(|action| action.target() == next)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = TypeError;

    fn from_str(s: &str) -> TypeResult<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TypeError::UnknownStatus {
                value: s.to_string(),
            })
    }
}

/// Operator action that moves a booking to a new status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusAction {
    /// `pending → confirmed`
    Confirm,
    /// `confirmed → completed`
    Complete,
    /// `pending | confirmed → cancelled`
    Cancel,
}

impl StatusAction {
    /// Status the booking lands in after this action
    #[must_use]
    pub const fn target(self) -> BookingStatus {
        match self {
            Self::Confirm => BookingStatus::Confirmed,
            Self::Complete => BookingStatus::Completed,
            Self::Cancel => BookingStatus::Cancelled,
        }
    }

    /// Human readable label for menus and prompts
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Confirm => "Confirm",
            Self::Complete => "Mark Complete",
            Self::Cancel => "Cancel",
        }
    }

    /// Command name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
        }
    }
}

impl fmt::Display for StatusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusAction {
    type Err = TypeError;

    fn from_str(s: &str) -> TypeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirm" => Ok(Self::Confirm),
            "complete" => Ok(Self::Complete),
            "cancel" => Ok(Self::Cancel),
            _ => Err(TypeError::UnknownAction {
                value: s.to_string(),
            }),
        }
    }
}

/// Status filter applied to the admin booking list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No filtering
    #[default]
    All,
    /// Only bookings with this status
    Only(BookingStatus),
}

impl StatusFilter {
    /// Status to send as the `status` query parameter, if any
    #[must_use]
    pub const fn status(self) -> Option<BookingStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = TypeError;

    fn from_str(s: &str) -> TypeResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            trimmed.parse().map(Self::Only)
        }
    }
}

/// A customer's trip request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Server-assigned identifier
    pub id: BookingId,

    /// Human facing reference such as `RT202401AB12CD`
    pub booking_reference: String,

    /// Customer name
    pub name: String,

    /// Customer email
    pub email: String,

    /// Customer phone number
    #[serde(default)]
    pub phone: Option<String>,

    /// Destination slug
    #[serde(default)]
    pub destination: Option<String>,

    /// Preferred travel date
    #[serde(default)]
    pub preferred_date: Option<NaiveDate>,

    /// Number of travellers
    #[serde(default = "default_guests")]
    pub guests: u32,

    /// Free text from the customer
    #[serde(default)]
    pub message: Option<String>,

    /// Lifecycle status
    pub status: BookingStatus,

    /// Quote entered by the operator
    #[serde(default)]
    pub estimated_cost: Option<f64>,

    /// When the booking was created
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the booking was last modified
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Actions the operator may apply right now
    #[must_use]
    pub const fn available_actions(&self) -> &'static [StatusAction] {
        self.status.available_actions()
    }
}

const fn default_guests() -> u32 {
    1
}

/// Body of `POST /bookings`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// Customer name
    pub name: String,
    /// Customer email
    pub email: String,
    /// Phone number, empty when not given
    pub phone: String,
    /// Destination slug, empty when not chosen
    pub destination: String,
    /// Preferred date
    pub date: Option<NaiveDate>,
    /// Number of travellers
    pub guests: u32,
    /// Free text message
    pub message: String,
}

impl CreateBookingRequest {
    /// Trim every text field, lower-case the email and coerce a zero guest count to 1
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: self.phone.trim().to_string(),
            destination: self.destination.trim().to_string(),
            date: self.date,
            guests: self.guests.max(1),
            message: self.message.trim().to_string(),
        }
    }
}

/// Data returned by the backend after a booking is accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// Reference the customer quotes in follow-up
    pub booking_reference: String,
    /// Initial status, normally `pending`
    #[serde(default = "pending")]
    pub status: BookingStatus,
}

const fn pending() -> BookingStatus {
    BookingStatus::Pending
}

/// Partial update sent by `PUT /admin/bookings/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingUpdate {
    /// New status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    /// Operator quote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
}

impl BookingUpdate {
    /// Update that only changes the status
    #[must_use]
    pub const fn status(status: BookingStatus) -> Self {
        Self {
            status: Some(status),
            estimated_cost: None,
        }
    }

    /// Attach an estimated cost
    #[must_use]
    pub const fn with_estimated_cost(mut self, cost: f64) -> Self {
        self.estimated_cost = Some(cost);
        self
    }
}

/// Query for `GET /admin/bookings`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingQuery {
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub per_page: u32,
    /// Optional status filter
    pub filter: StatusFilter,
}

impl BookingQuery {
    /// Default page size used by the dashboard
    pub const DEFAULT_PER_PAGE: u32 = 20;

    /// Query parameters in wire order; `status` is omitted when unfiltered
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.max(1).to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(status) = self.filter.status() {
            params.push(("status", status.as_str().to_string()));
        }
        params
    }
}

impl Default for BookingQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: Self::DEFAULT_PER_PAGE,
            filter: StatusFilter::All,
        }
    }
}

/// Body of `POST /contact`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Optional subject line
    pub subject: String,
    /// Message body
    pub message: String,
}
