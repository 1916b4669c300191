//! Admin dashboard state machine
//!
//! The dashboard is either signed out or signed in. While signed in it holds
//! one page of bookings, the statistics panel and an optional booking detail.
//! Any 401 from the backend signs it out.

use crate::api::AdminApi;
use crate::error::ApiError;
use crate::session::AdminSession;
use thiserror::Error;
use tourbook_core::Config;
use tourbook_types::{
    Booking, BookingId, BookingQuery, BookingStatus, BookingUpdate, Credentials, DashboardStats,
    Pagination, StatusAction, StatusFilter,
};
use tracing::{debug, info, warn};

/// Shown after the backend rejected the stored token
pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

/// Shown when login fails without a server message
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

/// Whether the backend no longer accepts the session
fn session_rejected(err: &ApiError) -> bool {
    err.is_unauthorized() || matches!(err, ApiError::NotAuthenticated)
}

/// Errors from dashboard operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// Backend call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The action is not offered for the booking's status
    #[error("Cannot {action} a {from} booking")]
    InvalidTransition {
        /// Current status
        from: BookingStatus,
        /// Rejected action
        action: StatusAction,
    },

    /// No booking with this id is loaded
    #[error("Booking {0} not found")]
    UnknownBooking(BookingId),
}

/// Dashboard tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Bookings per page
    pub per_page: u32,
    /// Go back to page 1 when the filter changes
    pub reset_page_on_filter_change: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            per_page: BookingQuery::DEFAULT_PER_PAGE,
            reset_page_on_filter_change: false,
        }
    }
}

impl DashboardSettings {
    /// Settings from the loaded configuration
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self {
            per_page: config.api.per_page,
            reset_page_on_filter_change: config.dashboard.reset_page_on_filter_change,
        }
    }
}

/// Whether an operator is signed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// Login form
    Unauthenticated,
    /// Dashboard
    Authenticated,
}

/// Fetch activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing in flight
    Idle,
    /// Bookings and statistics are being fetched
    Loading,
}

/// Operator dashboard
#[derive(Debug)]
pub struct AdminDashboard<A> {
    api: A,
    session: AdminSession,
    settings: DashboardSettings,
    auth: AuthState,
    phase: LoadPhase,
    bookings: Vec<Booking>,
    pagination: Option<Pagination>,
    stats: Option<DashboardStats>,
    filter: StatusFilter,
    page: u32,
    selected: Option<BookingId>,
    error: Option<String>,
    login_error: Option<String>,
}

impl<A: AdminApi> AdminDashboard<A> {
    /// Dashboard over `session`, signed in if a persisted token is found
    pub fn new(api: A, session: AdminSession, settings: DashboardSettings) -> Self {
        let authenticated = session.is_authenticated()
            || session.restore().unwrap_or_else(|err| {
                warn!(error = %err, "could not restore admin session");
                false
            });

        Self {
            api,
            session,
            settings,
            auth: if authenticated {
                AuthState::Authenticated
            } else {
                AuthState::Unauthenticated
            },
            phase: LoadPhase::Idle,
            bookings: Vec::new(),
            pagination: None,
            stats: None,
            filter: StatusFilter::All,
            page: 1,
            selected: None,
            error: None,
            login_error: None,
        }
    }

    /// Sign in and load the first view
    ///
    /// A failed initial load does not fail the login; it shows up in
    /// [`AdminDashboard::error`].
    pub async fn login(&mut self, credentials: &Credentials) -> Result<(), DashboardError> {
        self.login_error = None;
        match self.api.login(&self.session, credentials).await {
            Ok(_) => {
                info!(username = %credentials.username, "dashboard signed in");
                self.auth = AuthState::Authenticated;
                self.error = None;
                if let Err(err) = self.refresh().await {
                    debug!(error = %err, "initial dashboard load failed");
                }
                Ok(())
            }
            Err(err) => {
                self.login_error = Some(match &err {
                    ApiError::Http { message, .. } if !message.is_empty() => message.clone(),
                    _ if err.is_network() => err.to_string(),
                    _ => LOGIN_FAILED.to_string(),
                });
                Err(err.into())
            }
        }
    }

    /// Sign out and drop everything loaded
    pub fn logout(&mut self) {
        if let Err(err) = self.api.logout(&self.session) {
            warn!(error = %err, "logout could not clear stored token");
        }
        self.auth = AuthState::Unauthenticated;
        self.phase = LoadPhase::Idle;
        self.bookings.clear();
        self.pagination = None;
        self.stats = None;
        self.selected = None;
        self.error = None;
        info!("dashboard signed out");
    }

    fn expire_session(&mut self) {
        self.logout();
        self.error = Some(SESSION_EXPIRED.to_string());
    }

    fn ensure_authenticated(&self) -> Result<(), DashboardError> {
        match self.auth {
            AuthState::Authenticated => Ok(()),
            AuthState::Unauthenticated => Err(ApiError::NotAuthenticated.into()),
        }
    }

    /// Query for the current filter and page
    pub const fn query(&self) -> BookingQuery {
        BookingQuery {
            page: self.page,
            per_page: self.settings.per_page,
            filter: self.filter,
        }
    }

    /// Reload bookings and statistics together
    ///
    /// A statistics failure only empties the statistics panel. A list
    /// failure is reported, and a 401 from either call signs out.
    pub async fn refresh(&mut self) -> Result<(), DashboardError> {
        self.ensure_authenticated()?;
        self.phase = LoadPhase::Loading;
        self.error = None;

        let query = self.query();
        let (list, stats) = tokio::join!(
            self.api.list_bookings(&self.session, &query),
            self.api.dashboard_stats(&self.session),
        );
        self.phase = LoadPhase::Idle;

        let stats_rejected = match stats {
            Ok(stats) => {
                self.stats = Some(stats);
                None
            }
            Err(err) => {
                warn!(error = %err, "stats fetch failed");
                self.stats = None;
                Some(err).filter(session_rejected)
            }
        };

        match list {
            Ok(page) => {
                debug!(count = page.items.len(), page = page.pagination.page, "bookings loaded");
                self.bookings = page.items;
                self.pagination = Some(page.pagination);
                if self
                    .selected
                    .is_some_and(|id| !self.bookings.iter().any(|b| b.id == id))
                {
                    self.selected = None;
                }
                if let Some(err) = stats_rejected {
                    self.expire_session();
                    return Err(err.into());
                }
                Ok(())
            }
            Err(err) if session_rejected(&err) => {
                self.expire_session();
                Err(err.into())
            }
            Err(err) => {
                self.error = Some(format!("Failed to load dashboard data: {err}"));
                if stats_rejected.is_some() {
                    self.expire_session();
                }
                Err(err.into())
            }
        }
    }

    /// Show only bookings with this status, then reload
    pub async fn set_filter(&mut self, filter: StatusFilter) -> Result<(), DashboardError> {
        if filter == self.filter {
            return Ok(());
        }
        self.filter = filter;
        if self.settings.reset_page_on_filter_change {
            self.page = 1;
        }
        self.selected = None;
        self.refresh().await
    }

    /// Jump to a page (1-based), then reload
    pub async fn set_page(&mut self, page: u32) -> Result<(), DashboardError> {
        self.page = page.max(1);
        self.refresh().await
    }

    /// Jump straight to a filter and page with a single reload
    pub async fn open(&mut self, filter: StatusFilter, page: u32) -> Result<(), DashboardError> {
        if filter != self.filter {
            self.selected = None;
        }
        self.filter = filter;
        self.page = page.max(1);
        self.refresh().await
    }

    /// Next page, if there is one
    pub async fn next_page(&mut self) -> Result<bool, DashboardError> {
        if !self.pagination.is_some_and(|p| p.has_next()) {
            return Ok(false);
        }
        self.set_page(self.page.saturating_add(1)).await?;
        Ok(true)
    }

    /// Previous page, if there is one
    pub async fn prev_page(&mut self) -> Result<bool, DashboardError> {
        if self.page <= 1 {
            return Ok(false);
        }
        self.set_page(self.page - 1).await?;
        Ok(true)
    }

    /// Page through the current filter until the booking is loaded
    pub async fn locate(&mut self, id: BookingId) -> Result<&Booking, DashboardError> {
        if !self.bookings.iter().any(|b| b.id == id) {
            self.set_page(1).await?;
            while !self.bookings.iter().any(|b| b.id == id) {
                if !self.next_page().await? {
                    return Err(DashboardError::UnknownBooking(id));
                }
            }
        }
        self.select(id)
    }

    /// Open the detail view for a loaded booking
    pub fn select(&mut self, id: BookingId) -> Result<&Booking, DashboardError> {
        let booking = self
            .bookings
            .iter()
            .find(|b| b.id == id)
            .ok_or(DashboardError::UnknownBooking(id))?;
        self.selected = Some(id);
        Ok(booking)
    }

    /// Close the detail view
    pub const fn close_detail(&mut self) {
        self.selected = None;
    }

    /// Apply a status action to a loaded booking
    ///
    /// Actions the booking's status does not offer are rejected without a
    /// request. On success the dashboard reloads and the detail closes; a
    /// positive `estimated_cost` is sent along.
    pub async fn apply_action(
        &mut self,
        id: BookingId,
        action: StatusAction,
        estimated_cost: Option<f64>,
    ) -> Result<Booking, DashboardError> {
        self.ensure_authenticated()?;
        let from = self
            .bookings
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.status)
            .ok_or(DashboardError::UnknownBooking(id))?;
        if !from.allows(action) {
            return Err(DashboardError::InvalidTransition { from, action });
        }

        let mut update = BookingUpdate::status(action.target());
        if let Some(cost) = estimated_cost.filter(|cost| *cost > 0.0) {
            update = update.with_estimated_cost(cost);
        }

        match self.api.update_booking(&self.session, id, &update).await {
            Ok(updated) => {
                info!(id, %action, "booking status changed");
                if let Err(err) = self.refresh().await {
                    debug!(error = %err, "reload after update failed");
                }
                self.selected = None;
                Ok(updated)
            }
            Err(err) => {
                if session_rejected(&err) {
                    self.expire_session();
                } else {
                    self.error = Some(format!("Failed to update booking: {err}"));
                }
                Err(err.into())
            }
        }
    }

    /// Signed in or not
    pub const fn auth_state(&self) -> AuthState {
        self.auth
    }

    /// Whether an operator is signed in
    pub fn is_authenticated(&self) -> bool {
        self.auth == AuthState::Authenticated
    }

    /// Fetch activity
    pub const fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Bookings on the current page
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Pagination of the current page
    pub const fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Statistics panel, absent when its fetch failed
    pub const fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    /// Active status filter
    pub const fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Current page (1-based)
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Booking in the detail view
    pub fn selected(&self) -> Option<&Booking> {
        self.selected
            .and_then(|id| self.bookings.iter().find(|b| b.id == id))
    }

    /// Dashboard-level error banner
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Error under the login form
    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    /// Underlying session
    pub const fn session(&self) -> &AdminSession {
        &self.session
    }

    /// Active settings
    pub const fn settings(&self) -> DashboardSettings {
        self.settings
    }
}
