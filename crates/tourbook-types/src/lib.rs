//! Core data types for tourbook
//!
//! Everything in this crate mirrors the JSON contract of the booking backend.
//! There is no I/O here: the types are shared by the validation layer, the
//! HTTP client and the command line front end.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod booking;
pub mod destination;
pub mod envelope;
pub mod error;
pub mod stats;
pub mod timestamp;

pub use booking::{
    Booking, BookingConfirmation, BookingId, BookingQuery, BookingStatus, BookingUpdate,
    ContactRequest, CreateBookingRequest, StatusAction, StatusFilter,
};
pub use destination::{Destination, DifficultyLevel};
pub use envelope::{
    AdminProfile, Credentials, Envelope, ErrorBody, HealthStatus, LoginResponse, Page, Pagination,
    ServerErrors,
};
pub use error::{TypeError, TypeResult};
pub use stats::{
    BookingCounts, DashboardStats, DestinationCount, MonthlyCount, Trends, VisitCounts,
};
