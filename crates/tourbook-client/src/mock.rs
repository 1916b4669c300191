//! In-memory backend for exercising controllers without a server

use crate::api::{AdminApi, PublicApi};
use crate::error::{ApiError, ApiResult};
use crate::session::AdminSession;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tourbook_protocol::{FieldErrors, FormField, fallback_destinations};
use tourbook_types::{
    Booking, BookingConfirmation, BookingId, BookingQuery, BookingStatus, BookingUpdate,
    ContactRequest, CreateBookingRequest, Credentials, DashboardStats, Destination, HealthStatus,
    LoginResponse, Page, Pagination,
};

/// A request the mock received
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    /// `GET /destinations`
    ListDestinations {
        /// Featured filter
        featured_only: bool,
    },
    /// `GET /destinations/{slug}`
    GetDestination {
        /// Requested slug
        slug: String,
    },
    /// `POST /bookings`
    CreateBooking(CreateBookingRequest),
    /// `POST /contact`
    SendContactMessage(ContactRequest),
    /// `GET /health`
    Health,
    /// `POST /auth/login`
    Login {
        /// Submitted username
        username: String,
    },
    /// `GET /admin/bookings`
    ListBookings(BookingQuery),
    /// `PUT /admin/bookings/{id}`
    UpdateBooking {
        /// Target booking
        id: BookingId,
        /// Sent body
        update: BookingUpdate,
    },
    /// `GET /admin/dashboard/stats`
    DashboardStats,
}

#[derive(Debug)]
struct MockState {
    destinations: ApiResult<Vec<Destination>>,
    booking: ApiResult<BookingConfirmation>,
    contact: ApiResult<String>,
    health: ApiResult<HealthStatus>,
    login: ApiResult<LoginResponse>,
    bookings: Vec<Booking>,
    bookings_error: Option<ApiError>,
    update_error: Option<ApiError>,
    stats: ApiResult<DashboardStats>,
    calls: Vec<MockCall>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            destinations: Ok(fallback_destinations()),
            booking: Ok(BookingConfirmation {
                booking_reference: "RT202601MOCK01".to_string(),
                status: BookingStatus::Pending,
            }),
            contact: Ok("Message sent successfully".to_string()),
            health: Ok(HealthStatus {
                status: "healthy".to_string(),
                timestamp: None,
                version: Some("1.0.0".to_string()),
            }),
            login: Ok(LoginResponse {
                token: "mock-token".to_string(),
                admin: None,
            }),
            bookings: Vec::new(),
            bookings_error: None,
            update_error: None,
            stats: Ok(DashboardStats::default()),
            calls: Vec::new(),
        }
    }
}

/// Scriptable implementation of [`PublicApi`] and [`AdminApi`]
///
/// Clones share state, so a test can keep a handle to inspect
/// [`MockApi::calls`] after moving another into a controller. Admin calls
/// behave like the real client: no token means no call, and a 401 clears
/// the session.
#[derive(Debug, Clone, Default)]
pub struct MockApi {
    state: Arc<Mutex<MockState>>,
}

/// A 401 as the backend sends it for a bad token
#[must_use]
pub fn unauthorized() -> ApiError {
    ApiError::Http {
        status: 401,
        message: "Token is invalid".to_string(),
        errors: tourbook_types::ServerErrors::Empty,
    }
}

/// A refused connection
#[must_use]
pub fn offline() -> ApiError {
    ApiError::Network {
        message: "error sending request: connection refused".to_string(),
    }
}

/// A 500 as the backend sends it
#[must_use]
pub fn server_error() -> ApiError {
    ApiError::Http {
        status: 500,
        message: "Internal server error".to_string(),
        errors: tourbook_types::ServerErrors::Empty,
    }
}

impl MockApi {
    /// Mock answering with fallback destinations and empty admin data
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer for destination listing and lookup
    pub fn set_destinations(&self, destinations: ApiResult<Vec<Destination>>) {
        self.state.lock().destinations = destinations;
    }

    /// Answer for booking submission
    pub fn set_booking_response(&self, response: ApiResult<BookingConfirmation>) {
        self.state.lock().booking = response;
    }

    /// Answer for contact messages
    pub fn set_contact_response(&self, response: ApiResult<String>) {
        self.state.lock().contact = response;
    }

    /// Answer for health checks
    pub fn set_health(&self, response: ApiResult<HealthStatus>) {
        self.state.lock().health = response;
    }

    /// Answer for login attempts
    pub fn set_login(&self, response: ApiResult<LoginResponse>) {
        self.state.lock().login = response;
    }

    /// Replace the stored bookings
    pub fn set_bookings(&self, bookings: Vec<Booking>) {
        self.state.lock().bookings = bookings;
    }

    /// Make booking listing fail, or succeed again with `None`
    pub fn fail_bookings(&self, error: Option<ApiError>) {
        self.state.lock().bookings_error = error;
    }

    /// Make booking updates fail, or succeed again with `None`
    pub fn fail_updates(&self, error: Option<ApiError>) {
        self.state.lock().update_error = error;
    }

    /// Answer for dashboard statistics
    pub fn set_stats(&self, stats: ApiResult<DashboardStats>) {
        self.state.lock().stats = stats;
    }

    /// Stored bookings as they are now
    #[must_use]
    pub fn bookings(&self) -> Vec<Booking> {
        self.state.lock().bookings.clone()
    }

    /// Every call received so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().calls.clone()
    }

    /// Number of calls received so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn record(&self, call: MockCall) {
        self.state.lock().calls.push(call);
    }

    fn admin<T>(
        &self,
        session: &AdminSession,
        call: MockCall,
        respond: impl FnOnce(&mut MockState) -> ApiResult<T>,
    ) -> ApiResult<T> {
        session.bearer()?;
        let result = {
            let mut state = self.state.lock();
            state.calls.push(call);
            respond(&mut state)
        };
        if result.as_ref().is_err_and(ApiError::is_unauthorized) {
            session.clear().ok();
        }
        result
    }
}

fn list_page(state: &MockState, query: &BookingQuery) -> ApiResult<Page<Booking>> {
    if let Some(err) = &state.bookings_error {
        return Err(err.clone());
    }

    let matching: Vec<&Booking> = state
        .bookings
        .iter()
        .filter(|booking| {
            query
                .filter
                .status()
                .is_none_or(|status| booking.status == status)
        })
        .collect();

    let per_page = query.per_page.max(1) as usize;
    let page = query.page.max(1);
    let total = matching.len();
    let items = matching
        .into_iter()
        .skip((page as usize - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();

    Ok(Page {
        items,
        pagination: Pagination {
            page,
            pages: u32::try_from(total.div_ceil(per_page)).unwrap_or(u32::MAX),
            per_page: query.per_page,
            total: total as u64,
        },
    })
}

fn apply_update(state: &mut MockState, id: BookingId, update: &BookingUpdate) -> ApiResult<Booking> {
    if let Some(err) = &state.update_error {
        return Err(err.clone());
    }

    let booking = state
        .bookings
        .iter_mut()
        .find(|booking| booking.id == id)
        .ok_or_else(|| ApiError::Http {
            status: 404,
            message: "Booking not found".to_string(),
            errors: tourbook_types::ServerErrors::Empty,
        })?;

    if let Some(status) = update.status {
        booking.status = status;
    }
    if update.estimated_cost.is_some() {
        booking.estimated_cost = update.estimated_cost;
    }
    Ok(booking.clone())
}

#[async_trait]
impl PublicApi for MockApi {
    async fn list_destinations(&self, featured_only: bool) -> ApiResult<Vec<Destination>> {
        self.record(MockCall::ListDestinations { featured_only });
        let destinations = self.state.lock().destinations.clone()?;
        Ok(destinations
            .into_iter()
            .filter(|destination| !featured_only || destination.is_featured)
            .collect())
    }

    async fn get_destination(&self, slug: &str) -> ApiResult<Destination> {
        self.record(MockCall::GetDestination {
            slug: slug.to_string(),
        });
        let destinations = self.state.lock().destinations.clone()?;
        destinations
            .into_iter()
            .find(|destination| destination.slug == slug)
            .ok_or_else(|| ApiError::Http {
                status: 404,
                message: "Destination not found".to_string(),
                errors: tourbook_types::ServerErrors::Empty,
            })
    }

    async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> ApiResult<BookingConfirmation> {
        let mut missing = FieldErrors::new();
        if request.name.trim().is_empty() {
            missing.insert(FormField::Name, "Name is required");
        }
        if request.email.trim().is_empty() {
            missing.insert(FormField::Email, "Email is required");
        }
        missing.into_result().map_err(ApiError::Validation)?;

        self.record(MockCall::CreateBooking(request.clone().normalized()));
        self.state.lock().booking.clone()
    }

    async fn send_contact_message(&self, request: &ContactRequest) -> ApiResult<String> {
        self.record(MockCall::SendContactMessage(request.clone()));
        self.state.lock().contact.clone()
    }

    async fn health(&self) -> ApiResult<HealthStatus> {
        self.record(MockCall::Health);
        self.state.lock().health.clone()
    }
}

#[async_trait]
impl AdminApi for MockApi {
    async fn login(
        &self,
        session: &AdminSession,
        credentials: &Credentials,
    ) -> ApiResult<LoginResponse> {
        self.record(MockCall::Login {
            username: credentials.username.clone(),
        });
        let response = self.state.lock().login.clone()?;
        session.store_token(response.token.clone())?;
        Ok(response)
    }

    async fn list_bookings(
        &self,
        session: &AdminSession,
        query: &BookingQuery,
    ) -> ApiResult<Page<Booking>> {
        self.admin(session, MockCall::ListBookings(*query), |state| {
            list_page(state, query)
        })
    }

    async fn update_booking(
        &self,
        session: &AdminSession,
        id: BookingId,
        update: &BookingUpdate,
    ) -> ApiResult<Booking> {
        let call = MockCall::UpdateBooking {
            id,
            update: update.clone(),
        };
        self.admin(session, call, |state| apply_update(state, id, update))
    }

    async fn dashboard_stats(&self, session: &AdminSession) -> ApiResult<DashboardStats> {
        self.admin(session, MockCall::DashboardStats, |state| state.stats.clone())
    }
}

/// Booking fixture with the given id and status
#[must_use]
pub fn sample_booking(id: BookingId, status: BookingStatus) -> Booking {
    Booking {
        id,
        booking_reference: format!("RT202601TEST{id:02}"),
        name: format!("Guest {id}"),
        email: format!("guest{id}@example.com"),
        phone: None,
        destination: Some("maasai-mara-safari".to_string()),
        preferred_date: None,
        guests: 2,
        message: None,
        status,
        estimated_cost: None,
        created_at: None,
        updated_at: None,
    }
}
