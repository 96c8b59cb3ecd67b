//! Testing utilities.
//!
//! Helpers for exercising the provider and the gateways against a mock HTTP
//! server without touching the network or the process-wide rate budget.
//!
//! # Example
//!
//! ```ignore
//! use statuspal_provider::testing::test_client;
//!
//! #[tokio::test]
//! async fn test_get_service() {
//!     let server = httpmock::MockServer::start_async().await;
//!     let client = test_client(&server.base_url()).unwrap();
//!
//!     let service = client.services().get(&"acme".into(), &42.into()).await.unwrap();
//!     assert_eq!(service.name, "API");
//! }
//! ```

use std::num::NonZeroU32;
use std::sync::Arc;

use serde_json::Value;

use crate::client::{Client, ClientConfig, Endpoint, RateLimiter};
use crate::diagnostics::Diagnostic;
use crate::error::Error;
use crate::provider::StatuspalProvider;

/// API key sent by clients built with [`test_client`].
pub const TEST_API_KEY: &str = "test-api-key";

/// Rate used by [`test_client`], high enough that tests never wait.
pub const TEST_REQUESTS_PER_SECOND: NonZeroU32 = match NonZeroU32::new(10_000) {
    Some(rate) => rate,
    None => unreachable!(),
};

/// A client bound to `base_url` with [`TEST_API_KEY`] and its own limiter.
pub fn test_client(base_url: &str) -> Result<Client, Error> {
    test_client_with_limiter(
        base_url,
        Arc::new(RateLimiter::new(TEST_REQUESTS_PER_SECOND)),
    )
}

/// A client bound to `base_url` with [`TEST_API_KEY`], waiting on `limiter`.
pub fn test_client_with_limiter(
    base_url: &str,
    limiter: Arc<RateLimiter>,
) -> Result<Client, Error> {
    let config = ClientConfig::new(Some(TEST_API_KEY.to_string()), Endpoint::custom(base_url)?);
    Client::new(config, limiter)
}

/// A test harness around [`StatuspalProvider`].
///
/// Turns diagnostics into `Result`s so tests can use `?` and `unwrap`.
#[derive(Debug)]
pub struct ProviderTester {
    provider: StatuspalProvider,
}

impl ProviderTester {
    /// Create a new tester for the given provider.
    pub fn new(provider: StatuspalProvider) -> Self {
        Self { provider }
    }

    /// Get a reference to the underlying provider.
    pub fn provider(&self) -> &StatuspalProvider {
        &self.provider
    }

    /// Validate provider configuration.
    ///
    /// Returns `Err` with the error diagnostics if there are any.
    pub fn validate_provider_config(&self, config: &Value) -> Result<(), TestError> {
        check_diagnostics(self.provider.validate_provider_config(config))
    }

    /// Configure the provider.
    ///
    /// Returns `Err` with the error diagnostics if there are any.
    pub fn configure(&self, config: Value) -> Result<(), TestError> {
        check_diagnostics(self.provider.configure(config))
    }

    /// The client built by the last successful [`configure`](Self::configure).
    pub fn client(&self) -> Result<Client, TestError> {
        Ok(self.provider.client()?)
    }
}

/// Error type for test operations that may fail with diagnostics.
#[derive(Debug)]
pub enum TestError {
    /// The operation failed with diagnostics.
    Diagnostics(Vec<Diagnostic>),
    /// The operation failed with a client error.
    Client(Error),
}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestError::Diagnostics(diags) => {
                writeln!(f, "Operation failed with {} diagnostic(s):", diags.len())?;
                for diag in diags {
                    write!(f, "  [{:?}] {}", diag.severity, diag.summary)?;
                    if let Some(detail) = &diag.detail {
                        write!(f, ": {}", detail)?;
                    }
                    if let Some(attr) = &diag.attribute {
                        write!(f, " (at {})", attr)?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
            TestError::Client(e) => write!(f, "Client error: {}", e),
        }
    }
}

impl std::error::Error for TestError {}

impl From<Error> for TestError {
    fn from(e: Error) -> Self {
        TestError::Client(e)
    }
}

fn check_diagnostics(diagnostics: Vec<Diagnostic>) -> Result<(), TestError> {
    let errors: Vec<_> = diagnostics.into_iter().filter(Diagnostic::is_error).collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TestError::Diagnostics(errors))
    }
}

/// Assert that diagnostics contain no errors.
///
/// # Panics
///
/// Panics if there are any error diagnostics.
pub fn assert_no_errors(diagnostics: &[Diagnostic]) {
    let errors: Vec<_> = diagnostics.iter().filter(|d| d.is_error()).collect();

    assert!(
        errors.is_empty(),
        "Expected no errors, but got {} error(s): {:?}",
        errors.len(),
        errors.iter().map(|d| &d.summary).collect::<Vec<_>>()
    );
}

/// Assert that diagnostics contain at least one error.
///
/// # Panics
///
/// Panics if there are no error diagnostics.
pub fn assert_has_errors(diagnostics: &[Diagnostic]) {
    assert!(
        diagnostics.iter().any(Diagnostic::is_error),
        "Expected at least one error, but got none"
    );
}

/// Assert that diagnostics contain an error with the given summary substring.
///
/// # Panics
///
/// Panics if no error diagnostic contains the given substring.
pub fn assert_error_contains(diagnostics: &[Diagnostic], substring: &str) {
    let has_matching_error = diagnostics
        .iter()
        .any(|d| d.is_error() && d.summary.contains(substring));

    assert!(
        has_matching_error,
        "Expected an error containing '{}', but no matching error found. Errors: {:?}",
        substring,
        diagnostics
            .iter()
            .filter(|d| d.is_error())
            .map(|d| &d.summary)
            .collect::<Vec<_>>()
    );
}
