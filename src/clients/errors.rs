//! HTTP-level error types.
//!
//! Every failure that reaches the network boundary is turned into an
//! [`ApiError`] exactly once, carrying an [`ErrorKind`] assigned by
//! [`classify`](crate::clients::classify). Wrappers further up
//! ([`HttpError`], [`RestError`](crate::clients::RestError),
//! [`ResourceError`](crate::rest::ResourceError)) expose `kind()` by
//! delegating to the original value and never compute a new one.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api::clients::{ErrorKind, HttpError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("{}", response.body),
//!     Err(e) if e.kind() == ErrorKind::Authentication => {
//!         eprintln!("credentials rejected by {}", e.endpoint().unwrap_or("?"));
//!     }
//!     Err(HttpError::MaxRetries(e)) => eprintln!("gave up after {} tries", e.tries),
//!     Err(e) => eprintln!("request failed: {e}"),
//! }
//! ```

use std::fmt;

use thiserror::Error;

/// Classification of a failed upstream call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// HTTP 401: credentials missing or rejected.
    Authentication,
    /// Any other 4xx response.
    Client,
    /// A 5xx response.
    Server,
    /// Connection-level failure before a response was received.
    Network,
    /// The attempt exceeded the configured timeout.
    Timeout,
    /// The response body was not in the expected format.
    Parse,
    /// Anything that fits none of the above.
    Unknown,
}

impl ErrorKind {
    /// Returns the stable name used in log fields.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Client => "client",
            Self::Server => "server",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Parse => "parse",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure from the upstream API.
///
/// `status` is `None` when no response was received (network errors and
/// timeouts). `code` and `details` come from the upstream error payload
/// `{ "message", "code", "data": { "details" } }` when it is present.
///
/// ```rust
/// use storefront_api::clients::{ApiError, ErrorKind};
///
/// let error = ApiError {
///     kind: ErrorKind::Client,
///     status: Some(404),
///     message: "Invalid ID.".to_string(),
///     endpoint: "products/99".to_string(),
///     code: Some("woocommerce_rest_product_invalid_id".to_string()),
///     details: None,
/// };
/// assert!(error.to_string().contains("404"));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{kind} error ({}) on {endpoint}: {message}", status_label(.status))]
pub struct ApiError {
    /// The classification assigned at the client boundary.
    pub kind: ErrorKind,
    /// The HTTP status code, if a response was received.
    pub status: Option<u16>,
    /// Human-readable message.
    pub message: String,
    /// The request path that failed.
    pub endpoint: String,
    /// Machine-readable error code from the payload.
    pub code: Option<String>,
    /// Structured details from the payload.
    pub details: Option<serde_json::Value>,
}

fn status_label(status: &Option<u16>) -> String {
    status.map_or_else(|| "no status".to_string(), |s| format!("status {s}"))
}

/// Error returned when all attempts for a retryable request failed.
///
/// The last attempt's [`ApiError`] is kept unchanged, including its kind.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("Exceeded maximum retry count of {tries}. Last error: {last}")]
pub struct MaxHttpRetriesExceededError {
    /// The number of attempts that were made.
    pub tries: u32,
    /// The error from the final attempt.
    pub last: ApiError,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST, PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path is empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,
}

/// Unified error type for the HTTP layer.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A classified upstream failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Retryable failures persisted through every allowed attempt.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed before sending.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),
}

impl HttpError {
    /// Returns the classification of this error.
    ///
    /// Requests rejected by local validation never reached the upstream and
    /// are reported as [`ErrorKind::Client`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Api(e) => e.kind,
            Self::MaxRetries(e) => e.last.kind,
            Self::InvalidRequest(_) => ErrorKind::Client,
        }
    }

    /// Returns the underlying [`ApiError`], if the request reached the network.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            Self::MaxRetries(e) => Some(&e.last),
            Self::InvalidRequest(_) => None,
        }
    }

    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.api_error().and_then(|e| e.status)
    }

    /// Returns the endpoint that failed, if the request reached the network.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.api_error().map(|e| e.endpoint.as_str())
    }
}
