//! Failure classification.
//!
//! These functions are the only place an [`ErrorKind`] is assigned. They are
//! pure: the same status, body or transport failure always maps to the same
//! classification, and nothing upstream of the client re-derives it.

use std::time::Duration;

use crate::clients::errors::{ApiError, ErrorKind};
use crate::clients::http_response::ParsedBody;

/// Maps an HTTP status code to a classification.
///
/// ```rust
/// use storefront_api::clients::{classify_status, ErrorKind};
///
/// assert_eq!(classify_status(401), ErrorKind::Authentication);
/// assert_eq!(classify_status(404), ErrorKind::Client);
/// assert_eq!(classify_status(503), ErrorKind::Server);
/// assert_eq!(classify_status(302), ErrorKind::Unknown);
/// ```
#[must_use]
pub const fn classify_status(status: u16) -> ErrorKind {
    match status {
        401 => ErrorKind::Authentication,
        400..=499 => ErrorKind::Client,
        500..=599 => ErrorKind::Server,
        _ => ErrorKind::Unknown,
    }
}

/// Builds the error for a non-2xx response.
///
/// An empty body carries nothing to parse, so the status alone decides the
/// kind. When a non-empty body lacks the upstream error shape (an HTML error
/// page, or JSON without a `message`) the failure is [`ErrorKind::Parse`]. A
/// 401 stays [`ErrorKind::Authentication`] regardless of its body.
#[must_use]
pub fn classify_response(status: u16, endpoint: &str, body: &ParsedBody) -> ApiError {
    let by_status = classify_status(status);

    match body.error_payload() {
        Some(payload) => ApiError {
            kind: by_status,
            status: Some(status),
            message: payload.message,
            endpoint: endpoint.to_string(),
            code: payload.code,
            details: payload.data.and_then(|data| data.details),
        },
        None => {
            let kind = if by_status == ErrorKind::Authentication
                || matches!(body, ParsedBody::Empty)
            {
                by_status
            } else {
                ErrorKind::Parse
            };
            ApiError {
                kind,
                status: Some(status),
                message: unexpected_body_message(body),
                endpoint: endpoint.to_string(),
                code: None,
                details: None,
            }
        }
    }
}

/// Builds the error for a 2xx response whose body could not be parsed.
#[must_use]
pub fn classify_invalid_success(status: u16, endpoint: &str, snippet: &str) -> ApiError {
    ApiError {
        kind: ErrorKind::Parse,
        status: Some(status),
        message: format!("Response body is not valid JSON: {snippet}"),
        endpoint: endpoint.to_string(),
        code: None,
        details: None,
    }
}

/// Builds the error for a transport failure (no response received).
#[must_use]
pub fn classify_transport(endpoint: &str, error: &reqwest::Error) -> ApiError {
    let kind = if error.is_timeout() {
        ErrorKind::Timeout
    } else {
        ErrorKind::Network
    };

    ApiError {
        kind,
        status: None,
        message: error.to_string(),
        endpoint: endpoint.to_string(),
        code: None,
        details: None,
    }
}

/// Builds the error for an attempt cut off by the client's timeout.
#[must_use]
pub fn classify_timeout(endpoint: &str, limit: Duration) -> ApiError {
    ApiError {
        kind: ErrorKind::Timeout,
        status: None,
        message: format!("Request timed out after {}ms", limit.as_millis()),
        endpoint: endpoint.to_string(),
        code: None,
        details: None,
    }
}

fn unexpected_body_message(body: &ParsedBody) -> String {
    match body {
        ParsedBody::Invalid { snippet } => format!("Unexpected non-JSON error body: {snippet}"),
        ParsedBody::Json(value) => format!("Unexpected error body: {value}"),
        ParsedBody::Empty => "Empty error body".to_string(),
    }
}
