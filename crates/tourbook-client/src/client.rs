//! HTTP client for the booking backend

use crate::api::{AdminApi, PublicApi};
use crate::error::{ApiError, ApiResult};
use crate::session::AdminSession;
use async_trait::async_trait;
use http::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use http::Method;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tourbook_core::ApiConfig;
use tourbook_protocol::{FieldErrors, FormField};
use tourbook_types::{
    Booking, BookingConfirmation, BookingId, BookingQuery, BookingUpdate, ContactRequest,
    CreateBookingRequest, Credentials, DashboardStats, Destination, Envelope, HealthStatus,
    LoginResponse, Page, Pagination,
};
use tracing::{debug, info, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// One request to send
struct Call {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: Option<serde_json::Value>,
    bearer: Option<String>,
}

impl Call {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    fn query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    fn json(mut self, body: &impl Serialize) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::decode)?);
        Ok(self)
    }

    fn bearer(mut self, token: String) -> Self {
        self.bearer = Some(token);
        self
    }
}

/// API client for the booking backend
///
/// Every request sends and accepts JSON, is bounded by the configured
/// timeout and stops early when the cancellation token fires. Nothing is
/// retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    timeout: Duration,
    cancel: CancellationToken,
}

impl ApiClient {
    /// Client with default timeouts
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::build(base_url.into(), DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Client configured from the `[api]` section
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        Self::build(
            config.base_url.clone(),
            config.timeout(),
            config.connect_timeout(),
        )
    }

    fn build(base_url: String, timeout: Duration, connect_timeout: Duration) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(concat!("tourbook/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            cancel: CancellationToken::new(),
        })
    }

    /// Use `token` to cancel in-flight and future requests
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that cancels this client's requests
    #[must_use]
    pub const fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn transport_error(&self, err: &reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout {
                timeout: self.timeout,
            }
        } else {
            ApiError::Network {
                message: err.to_string(),
            }
        }
    }

    async fn execute<T: DeserializeOwned>(&self, call: Call) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, call.path);
        debug!(method = %call.method, %url, "sending request");

        let mut request = self.http.request(call.method.clone(), &url);
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(token) = &call.bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let exchange = async {
            let response = request.send().await.map_err(|e| self.transport_error(&e))?;
            let status = response.status();
            let body = response.bytes().await.map_err(|e| self.transport_error(&e))?;
            Ok::<_, ApiError>((status, body))
        };

        let (status, body) = tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                debug!(%url, "request cancelled");
                return Err(ApiError::Cancelled);
            }
            result = exchange => result?,
        };

        debug!(method = %call.method, %url, status = status.as_u16(), "received response");

        if status.is_success() {
            serde_json::from_slice(&body).map_err(ApiError::decode)
        } else {
            Err(ApiError::from_response(status.as_u16(), &body))
        }
    }

    /// Send an admin call with the session's token, clearing the session on 401
    async fn execute_admin<T: DeserializeOwned>(
        &self,
        session: &AdminSession,
        call: Call,
    ) -> ApiResult<T> {
        let token = session.bearer()?;
        let path = call.path.clone();
        let result = self.execute(call.bearer(token)).await;
        if result.as_ref().is_err_and(ApiError::is_unauthorized) {
            warn!(%path, "admin token rejected, clearing session");
            if let Err(err) = session.clear() {
                debug!(error = %err, "session cleared in memory only");
            }
        }
        result
    }
}

/// Payload of an envelope that must carry one
fn required_data<T>(envelope: Envelope<T>) -> ApiResult<T> {
    envelope
        .data
        .ok_or_else(|| ApiError::decode("response is missing the `data` field"))
}

#[async_trait]
impl PublicApi for ApiClient {
    async fn list_destinations(&self, featured_only: bool) -> ApiResult<Vec<Destination>> {
        let mut call = Call::get("/destinations");
        if featured_only {
            call = call.query(vec![("featured", "true".to_string())]);
        }
        let envelope: Envelope<Vec<Destination>> = self.execute(call).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn get_destination(&self, slug: &str) -> ApiResult<Destination> {
        let envelope = self.execute(Call::get(format!("/destinations/{slug}"))).await?;
        required_data(envelope)
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

        let body = request.clone().normalized();
        let envelope = self
            .execute(Call::new(Method::POST, "/bookings").json(&body)?)
            .await?;
        let confirmation: BookingConfirmation = required_data(envelope)?;
        info!(reference = %confirmation.booking_reference, "booking submitted");
        Ok(confirmation)
    }

    async fn send_contact_message(&self, request: &ContactRequest) -> ApiResult<String> {
        let envelope: Envelope<serde_json::Value> = self
            .execute(Call::new(Method::POST, "/contact").json(request)?)
            .await?;
        Ok(envelope
            .message
            .unwrap_or_else(|| "Message sent successfully".to_string()))
    }

    async fn health(&self) -> ApiResult<HealthStatus> {
        self.execute(Call::get("/health")).await
    }
}

#[async_trait]
impl AdminApi for ApiClient {
    async fn login(
        &self,
        session: &AdminSession,
        credentials: &Credentials,
    ) -> ApiResult<LoginResponse> {
        let response: LoginResponse = self
            .execute(Call::new(Method::POST, "/auth/login").json(credentials)?)
            .await?;
        session.store_token(response.token.clone())?;
        info!(username = %credentials.username, "admin signed in");
        Ok(response)
    }

    async fn list_bookings(
        &self,
        session: &AdminSession,
        query: &BookingQuery,
    ) -> ApiResult<Page<Booking>> {
        let call = Call::get("/admin/bookings").query(query.to_params());
        let envelope: Envelope<Vec<Booking>> = self.execute_admin(session, call).await?;
        let items = envelope.data.unwrap_or_default();
        let pagination = envelope
            .pagination
            .unwrap_or_else(|| Pagination::single(items.len() as u64, query.per_page));
        Ok(Page { items, pagination })
    }

    async fn update_booking(
        &self,
        session: &AdminSession,
        id: BookingId,
        update: &BookingUpdate,
    ) -> ApiResult<Booking> {
        let call = Call::new(Method::PUT, format!("/admin/bookings/{id}")).json(update)?;
        let envelope = self.execute_admin(session, call).await?;
        let booking: Booking = required_data(envelope)?;
        info!(id, status = %booking.status, "booking updated");
        Ok(booking)
    }

    async fn dashboard_stats(&self, session: &AdminSession) -> ApiResult<DashboardStats> {
        let envelope = self
            .execute_admin(session, Call::get("/admin/dashboard/stats"))
            .await?;
        required_data(envelope)
    }
}
