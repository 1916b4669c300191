//! Destination catalog with an offline fallback

use crate::api::PublicApi;
use crate::error::{ApiError, ApiResult};
use tourbook_protocol::fallback_destinations;
use tourbook_types::Destination;
use tracing::warn;

/// Shown when the list had to come from the built-in fallback
pub const LOAD_FAILED: &str = "Failed to load destinations. Please try again.";

/// Destinations as the visitor sees them
#[derive(Debug)]
pub struct DestinationCatalog<A> {
    api: A,
    destinations: Vec<Destination>,
    notice: Option<String>,
    from_fallback: bool,
}

fn backend_unavailable(err: &ApiError) -> bool {
    err.is_network() || err.status().is_some_and(|status| status >= 500)
}

impl<A: PublicApi> DestinationCatalog<A> {
    /// Catalog with nothing loaded yet
    pub const fn new(api: A) -> Self {
        Self {
            api,
            destinations: Vec::new(),
            notice: None,
            from_fallback: false,
        }
    }

    /// Fetch the list, falling back to the built-in destinations on any failure
    pub async fn load(&mut self, featured_only: bool) -> &[Destination] {
        match self.api.list_destinations(featured_only).await {
            Ok(destinations) => {
                self.destinations = destinations;
                self.notice = None;
                self.from_fallback = false;
            }
            Err(err) => {
                warn!(error = %err, "loading destinations failed, using fallback list");
                self.destinations = fallback_destinations()
                    .into_iter()
                    .filter(|destination| !featured_only || destination.is_featured)
                    .collect();
                self.notice = Some(LOAD_FAILED.to_string());
                self.from_fallback = true;
            }
        }
        &self.destinations
    }

    /// Look up one destination
    ///
    /// When the backend is down the built-in list answers instead. A 404 from
    /// a reachable backend is returned as is.
    pub async fn find(&self, slug: &str) -> ApiResult<Destination> {
        match self.api.get_destination(slug).await {
            Err(err) if backend_unavailable(&err) => {
                warn!(error = %err, slug, "destination lookup failed, trying fallback list");
                fallback_destinations()
                    .into_iter()
                    .find(|destination| destination.slug == slug)
                    .ok_or(err)
            }
            result => result,
        }
    }

    /// Loaded destinations
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Failure notice from the last load
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether the current list is the built-in one
    pub const fn is_fallback(&self) -> bool {
        self.from_fallback
    }
}
