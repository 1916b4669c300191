//! Form validation and request shaping for tourbook
//!
//! The rules here are advisory: the backend remains the authority. They exist
//! so that obviously broken submissions never leave the client, and so that
//! field errors from either side share one representation.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod booking;
pub mod catalog;
pub mod contact;
pub mod field;
pub mod server;

pub use booking::{BookingForm, MAX_GUESTS, MAX_MESSAGE_LEN, MIN_GUESTS};
pub use catalog::{DESTINATION_OPTIONS, DestinationOption, fallback_destinations};
pub use contact::ContactForm;
pub use field::{FieldErrors, FormField};
pub use server::FormErrors;

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Check an address against the simple `local@domain.tld` shape
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email.trim()))
}

/// Count the digits of a phone number, ignoring separators and symbols
#[must_use]
pub fn phone_digit_count(phone: &str) -> usize {
    phone.chars().filter(char::is_ascii_digit).count()
}
