//! HTTP client core.
//!
//! [`Client`] owns the connection configuration and the authentication header,
//! applies the shared [`RateLimiter`] before every request, buffers response
//! bodies and turns failure statuses into [`ApiError`]s. The resource gateways
//! in [`crate::gateway`] build on [`Client::do_request`].

mod endpoint;
mod rate_limit;

pub use endpoint::{Endpoint, Region, LOCAL_BASE_URL};
pub use rate_limit::{RateLimiter, DEFAULT_REQUESTS_PER_SECOND};

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use tracing::{debug, warn};

use crate::error::{ApiError, Error};

/// Highest status treated as success (`226 IM Used`). Anything above is an
/// [`ApiError`].
pub const MAX_SUCCESS_STATUS: StatusCode = StatusCode::IM_USED;

/// Request timeout used unless [`ClientConfig::with_timeout`] overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const APPLICATION_JSON: &str = "application/json";

/// Configuration for a [`Client`].
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The API key sent in the `Authorization` header. `None` sends it empty.
    pub api_key: Option<String>,
    /// The deployment the client talks to.
    pub endpoint: Endpoint,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration for `endpoint` with the default timeout.
    pub fn new(api_key: Option<String>, endpoint: Endpoint) -> Self {
        Self {
            api_key,
            endpoint,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Configuration from an optional region code and an optional override URL.
    ///
    /// See [`Endpoint::select`] for precedence.
    pub fn from_options(
        api_key: Option<String>,
        region: Option<&str>,
        override_url: Option<&str>,
    ) -> Result<Self, Error> {
        Ok(Self::new(api_key, Endpoint::select(region, override_url)?))
    }

    /// Set a custom request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A StatusPal API client bound to one base URL.
///
/// Cloning is cheap: clones share the connection pool and the rate limiter,
/// so one client can serve every concurrent resource operation of the process.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    authorization: HeaderValue,
    limiter: Arc<RateLimiter>,
}

impl Client {
    /// Create a client from `config`, gated by `limiter`.
    ///
    /// Fails if the endpoint URL is unusable or the API key is not a legal
    /// header value. A missing key is not an error here; the service rejects
    /// the request later if it needs one.
    pub fn new(config: ClientConfig, limiter: Arc<RateLimiter>) -> Result<Self, Error> {
        let base_url = config.endpoint.base_url()?;

        let mut authorization = HeaderValue::from_str(config.api_key.as_deref().unwrap_or(""))
            .map_err(|_| {
                Error::Configuration("API key contains characters not allowed in a header".into())
            })?;
        authorization.set_sensitive(true);

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            authorization,
            limiter,
        })
    }

    /// The base URL every request path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The rate limiter this client waits on.
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Build the URL for `segments` below the base URL.
    ///
    /// Each segment is percent-encoded, so identifiers can be passed as-is.
    pub fn url<I>(&self, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        // Base URLs are checked to be http(s) at construction.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Start building a request for `method` and `url`.
    pub fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.http.request(method, url)
    }

    /// Execute a built request and return its full body.
    ///
    /// Waits for the rate limiter, sets the JSON and authorization headers and
    /// reads the whole body. Statuses above [`MAX_SUCCESS_STATUS`] become
    /// [`Error::Api`] carrying the status and body; anything else returns the
    /// body untouched, including empty bodies. Transport failures are returned
    /// as [`Error::Transport`] without retrying.
    ///
    /// Dropping the future cancels both the rate-limit wait and the request.
    pub async fn do_request(&self, mut request: reqwest::Request) -> Result<Bytes, Error> {
        self.limiter.acquire().await;

        let headers = request.headers_mut();
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(AUTHORIZATION, self.authorization.clone());

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "Sending request");

        let response = self.http.execute(request).await.map_err(|e| {
            warn!(%method, %url, error = %e, "Request failed");
            Error::Transport(e)
        })?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.as_u16() > MAX_SUCCESS_STATUS.as_u16() {
            warn!(%method, %url, status = status.as_u16(), "Request returned an error status");
            return Err(ApiError::new(status, &body).into());
        }

        debug!(%method, %url, status = status.as_u16(), bytes = body.len(), "Request completed");
        Ok(body)
    }
}
