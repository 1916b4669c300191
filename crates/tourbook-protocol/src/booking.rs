//! Booking form rules and payload cleaning

use crate::field::{FieldErrors, FormField};
use crate::{is_valid_email, phone_digit_count};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tourbook_types::CreateBookingRequest;

/// Smallest accepted party size
pub const MIN_GUESTS: i64 = 1;
/// Largest accepted party size
pub const MAX_GUESTS: i64 = 50;
/// Longest accepted free-text message, in characters
pub const MAX_MESSAGE_LEN: usize = 1000;
/// Shortest accepted name, in characters
pub const MIN_NAME_LEN: usize = 2;
/// Accepted phone digit range
pub const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw booking form input, exactly as typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number, optional
    pub phone: String,
    /// Destination slug, optional
    pub destination: String,
    /// Preferred date as `YYYY-MM-DD`, optional
    pub date: String,
    /// Number of guests as typed
    pub guests: String,
    /// Free text message
    pub message: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            destination: String::new(),
            date: String::new(),
            guests: "1".to_string(),
            message: String::new(),
        }
    }
}

impl BookingForm {
    /// Overwrite one input
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Phone => self.phone = value,
            FormField::Destination => self.destination = value,
            FormField::Date => self.date = value,
            FormField::Guests => self.guests = value,
            FormField::Message => self.message = value,
            FormField::Subject => {}
        }
    }

    /// Check every rule; `today` decides which dates count as past
    pub fn validate(&self, today: NaiveDate) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().chars().count() < MIN_NAME_LEN {
            errors.insert(FormField::Name, "Name must be at least 2 characters long");
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert(FormField::Email, "Email is required");
        } else if !is_valid_email(email) {
            errors.insert(FormField::Email, "Please enter a valid email address");
        }

        if !self.phone.trim().is_empty() && !PHONE_DIGITS.contains(&phone_digit_count(&self.phone)) {
            errors.insert(FormField::Phone, "Phone number should be 7-15 digits");
        }

        match self.parsed_date() {
            Ok(Some(date)) if date < today => {
                errors.insert(FormField::Date, "Please select a future date");
            }
            Ok(_) => {}
            Err(()) => errors.insert(FormField::Date, "Please enter a date as YYYY-MM-DD"),
        }

        match self.parsed_guests() {
            Some(guests) if guests > MAX_GUESTS => {
                errors.insert(FormField::Guests, "Maximum 50 guests allowed");
            }
            Some(guests) if guests >= MIN_GUESTS => {}
            _ => errors.insert(FormField::Guests, "Number of guests must be at least 1"),
        }

        if self.message.chars().count() > MAX_MESSAGE_LEN {
            errors.insert(FormField::Message, "Message cannot exceed 1000 characters");
        }

        errors.into_result()
    }

    /// Validate, then produce the cleaned request body
    pub fn to_request(&self, today: NaiveDate) -> Result<CreateBookingRequest, FieldErrors> {
        self.validate(today)?;
        Ok(self.cleaned())
    }

    /// Cleaned request body without validation
    ///
    /// Text is trimmed, the email lower-cased, an unparsable or empty date
    /// dropped, and the guest count coerced to an integer defaulting to 1.
    #[must_use]
    pub fn cleaned(&self) -> CreateBookingRequest {
        let guests = self
            .parsed_guests()
            .and_then(|guests| u32::try_from(guests).ok())
            .filter(|guests| *guests > 0)
            .unwrap_or(1);

        CreateBookingRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            destination: self.destination.clone(),
            date: self.parsed_date().ok().flatten(),
            guests,
            message: self.message.clone(),
        }
        .normalized()
    }

    fn parsed_date(&self) -> Result<Option<NaiveDate>, ()> {
        let raw = self.date.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Some)
            .map_err(|_| ())
    }

    /// Leading integer of the input, so `"2.5"` reads as 2 and `"abc"` as nothing
    fn parsed_guests(&self) -> Option<i64> {
        let raw = self.guests.trim();
        let (negative, rest) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let digits = rest.get(..end).filter(|digits| !digits.is_empty())?;
        let value = digits.parse::<i64>().unwrap_or(i64::MAX);
        Some(if negative { -value } else { value })
    }
}
