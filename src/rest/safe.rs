//! Degrade-gracefully wrappers.
//!
//! [`safe`] runs a fallible operation and turns any classified error into
//! `None` after logging it. Use it only where the caller has a sensible
//! fallback, such as an optional sidebar block that can render empty.
//! Failures that matter for observability (authentication, timeouts) are
//! already recorded by the HTTP client before they reach this point.

use std::future::Future;

use crate::clients::{ErrorKind, HttpError, RestError};
use crate::rest::ResourceError;

/// An error that carries the classification assigned at the client boundary.
pub trait ClassifiedError: std::error::Error {
    /// Returns the classification.
    fn kind(&self) -> ErrorKind;

    /// Returns the HTTP status, if a response was received.
    fn status(&self) -> Option<u16>;
}

impl ClassifiedError for HttpError {
    fn kind(&self) -> ErrorKind {
        Self::kind(self)
    }

    fn status(&self) -> Option<u16> {
        Self::status(self)
    }
}

impl ClassifiedError for RestError {
    fn kind(&self) -> ErrorKind {
        Self::kind(self)
    }

    fn status(&self) -> Option<u16> {
        Self::status(self)
    }
}

impl ClassifiedError for ResourceError {
    fn kind(&self) -> ErrorKind {
        Self::kind(self)
    }

    fn status(&self) -> Option<u16> {
        Self::status(self)
    }
}

/// Awaits `operation`, returning `None` instead of an error.
///
/// The error is logged with its classification, status and `endpoint`.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_api::rest::{safe, RestResource};
///
/// let featured = safe("products", Product::all(&client, &query)).await;
/// let items = featured.map(|page| page.into_items()).unwrap_or_default();
/// ```
pub async fn safe<T, E, F>(endpoint: &str, operation: F) -> Option<T>
where
    F: Future<Output = Result<T, E>>,
    E: ClassifiedError,
{
    match operation.await {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(
                kind = %error.kind(),
                status = ?error.status(),
                endpoint,
                error = %error,
                "Upstream call failed, continuing without result"
            );
            None
        }
    }
}

/// Like [`safe`], but falls back to `T::default()` (e.g., an empty list).
pub async fn safe_or_default<T, E, F>(endpoint: &str, operation: F) -> T
where
    F: Future<Output = Result<T, E>>,
    E: ClassifiedError,
    T: Default,
{
    safe(endpoint, operation).await.unwrap_or_default()
}
