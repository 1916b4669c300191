//! Client side of the tourbook booking service
//!
//! [`ApiClient`] talks to the backend and normalizes every failure into an
//! [`ApiError`]. The controllers ([`BookingFormController`],
//! [`ContactFormController`], [`DestinationCatalog`], [`AdminDashboard`])
//! hold form and view state and depend only on the [`PublicApi`] and
//! [`AdminApi`] traits, so they run the same against the real client and
//! against [`MockApi`].

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod api;
pub mod booking;
pub mod catalog;
pub mod client;
pub mod contact;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod mock;
pub mod session;

pub use api::{AdminApi, PublicApi};
pub use booking::BookingFormController;
pub use catalog::DestinationCatalog;
pub use client::ApiClient;
pub use contact::ContactFormController;
pub use dashboard::{AdminDashboard, AuthState, DashboardError, DashboardSettings, LoadPhase};
pub use error::{ApiError, ApiResult};
pub use form::Notice;
pub use mock::{MockApi, MockCall};
pub use session::{AdminSession, FileTokenStore, MemoryTokenStore, TokenStore};

pub use tokio_util::sync::CancellationToken;
