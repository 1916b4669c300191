//! Backend operations as traits, so controllers can run against a mock

use crate::error::ApiResult;
use crate::session::AdminSession;
use async_trait::async_trait;
use tourbook_types::{
    Booking, BookingConfirmation, BookingId, BookingQuery, BookingUpdate, ContactRequest,
    CreateBookingRequest, Credentials, DashboardStats, Destination, HealthStatus, LoginResponse,
    Page,
};

/// Endpoints open to every visitor
#[async_trait]
pub trait PublicApi: Send + Sync {
    /// `GET /destinations[?featured=true]`
    async fn list_destinations(&self, featured_only: bool) -> ApiResult<Vec<Destination>>;

    /// `GET /destinations/{slug}`
    async fn get_destination(&self, slug: &str) -> ApiResult<Destination>;

    /// `POST /bookings`
    ///
    /// Implementations reject an empty name or email with
    /// [`ApiError::Validation`](crate::ApiError::Validation) before any
    /// request is made.
    async fn create_booking(&self, request: &CreateBookingRequest)
    -> ApiResult<BookingConfirmation>;

    /// `POST /contact`, returning the server's acknowledgement
    async fn send_contact_message(&self, request: &ContactRequest) -> ApiResult<String>;

    /// `GET /health`
    async fn health(&self) -> ApiResult<HealthStatus>;
}

/// Endpoints reserved for operators
///
/// Every call except [`AdminApi::login`] reads the bearer token from the
/// session and fails with
/// [`ApiError::NotAuthenticated`](crate::ApiError::NotAuthenticated) when
/// there is none. A 401 answer clears the session.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `POST /auth/login`; the issued token is stored into `session`
    async fn login(
        &self,
        session: &AdminSession,
        credentials: &Credentials,
    ) -> ApiResult<LoginResponse>;

    /// Forget the session locally; the backend keeps no session state
    fn logout(&self, session: &AdminSession) -> ApiResult<()> {
        session.clear()
    }

    /// `GET /admin/bookings?page=&per_page=&status=`
    async fn list_bookings(
        &self,
        session: &AdminSession,
        query: &BookingQuery,
    ) -> ApiResult<Page<Booking>>;

    /// `PUT /admin/bookings/{id}`
    async fn update_booking(
        &self,
        session: &AdminSession,
        id: BookingId,
        update: &BookingUpdate,
    ) -> ApiResult<Booking>;

    /// `GET /admin/dashboard/stats`
    async fn dashboard_stats(&self, session: &AdminSession) -> ApiResult<DashboardStats>;
}
