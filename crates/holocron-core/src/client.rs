//! # Reference API Client
//!
//! Fetches collections and single entities from the remote reference API,
//! going through the read-through cache first.
//!
//! The HTTP request itself is delegated to a [`Transport`], so the core stays
//! free of network dependencies and tests can script responses.

use crate::cache::CacheLayer;
use crate::storage::KeyValueStore;
use crate::{Endpoint, FetchError};
use serde_json::Value;

// =============================================================================
// TRANSPORT
// =============================================================================

/// A raw HTTP response as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    /// A `200 OK` response with the given body.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a single HTTP GET.
///
/// Implementations make exactly one attempt: no retries, no backoff.
pub trait Transport {
    /// GET `url`. Only failures to obtain any response are errors here;
    /// non-2xx statuses come back as an `HttpResponse`.
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        (**self).get(url)
    }
}

// =============================================================================
// API CLIENT
// =============================================================================

/// Client for the reference API.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    /// Create a client for `base_url` (trailing slashes are ignored).
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    /// The configured base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The transport in use.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Full request URL for an endpoint, e.g. `https://swapi.dev/api/people/1/`.
    #[must_use]
    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}/{}/", self.base_url, endpoint)
    }

    /// Fetch from the network, bypassing the cache.
    pub fn fetch_remote(&self, endpoint: &Endpoint) -> Result<Value, FetchError> {
        let url = self.url_for(endpoint);
        tracing::info!(endpoint = %endpoint, url = %url, "fetching from API");

        let response = self.transport.get(&url)?;
        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
                status_text: response.status_text,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Fetch a resource, serving it from the cache in `store` when present.
    pub fn fetch_resource<S>(&self, store: &mut S, endpoint: &Endpoint) -> Result<Value, FetchError>
    where
        S: KeyValueStore + ?Sized,
    {
        CacheLayer::new(store).get(endpoint, || self.fetch_remote(endpoint))
    }
}

// =============================================================================
// TESTS
// =============================================================================
