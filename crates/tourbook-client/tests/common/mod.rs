//! Shared helpers for client integration tests

#![allow(dead_code, clippy::unwrap_used)]

use chrono::NaiveDate;
use std::sync::Once;
use tourbook_client::AdminSession;
use tourbook_protocol::BookingForm;

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Fixed "today" so date rules are deterministic
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

/// A form that passes every client-side rule
pub fn valid_booking_form() -> BookingForm {
    BookingForm {
        name: "  Jane Doe ".to_string(),
        email: "Jane@Example.com".to_string(),
        phone: "+254 700 123456".to_string(),
        destination: "maasai-mara-safari".to_string(),
        date: "2026-12-01".to_string(),
        guests: "2".to_string(),
        message: "Honeymoon trip".to_string(),
    }
}

/// In-memory session already holding a token
pub fn signed_in_session(token: &str) -> AdminSession {
    let session = AdminSession::in_memory();
    session.store_token(token).unwrap();
    session
}
