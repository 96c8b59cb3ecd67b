//! Error types for the StatusPal client and provider.

use reqwest::StatusCode;
use thiserror::Error;

/// A failed API call: the remote service answered with a status above
/// [`MAX_SUCCESS_STATUS`](crate::client::MAX_SUCCESS_STATUS).
///
/// Carries the numeric status and the raw body text so callers can branch on
/// specific statuses (most commonly "not found" during read-then-act flows).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("status: {}, body: {}", .status.as_u16(), .body)]
pub struct ApiError {
    /// The HTTP status returned by the service.
    pub status: StatusCode,
    /// The response body, decoded lossily as UTF-8.
    pub body: String,
}

impl ApiError {
    /// Build an error from a status and the raw response bytes.
    pub fn new(status: StatusCode, body: &[u8]) -> Self {
        Self {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Whether the response carried exactly `status`.
    pub fn status_is(&self, status: StatusCode) -> bool {
        self.status == status
    }

    /// Whether the response was a `404 Not Found`.
    pub fn is_not_found(&self) -> bool {
        self.status_is(StatusCode::NOT_FOUND)
    }
}

/// Errors returned by the client, the gateways and provider configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// The client could not be configured (bad region, URL or credential).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The service answered with a failure status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A body could not be encoded or decoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A successful status whose body does not match what the operation expects.
    ///
    /// The message is the unexpected body text.
    #[error("{0}")]
    UnexpectedResponse(String),

    /// The request could not be built from the given arguments.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// The HTTP status of an [`Error::Api`] failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(err) => Some(err.status),
            _ => None,
        }
    }

    /// Whether this is an API failure with exactly `status`.
    pub fn status_is(&self, status: StatusCode) -> bool {
        matches!(self, Self::Api(err) if err.status_is(status))
    }

    /// Whether this is an API failure with a `404 Not Found` status.
    ///
    /// Resource handlers use this to drop vanished resources from state instead
    /// of failing the whole read.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(err) if err.is_not_found())
    }

    /// The API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}
