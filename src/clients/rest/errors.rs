//! REST-specific error types.
//!
//! - [`RestError::InvalidPath`]: a path was empty after normalization
//! - [`RestError::Http`]: wraps an [`HttpError`] with its original classification
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api::clients::{ErrorKind, RestError};
//!
//! match client.get("products", None).await {
//!     Ok(response) => println!("Products: {}", response.body),
//!     Err(RestError::InvalidPath { path }) => println!("Invalid path: {path}"),
//!     Err(e) if e.kind() == ErrorKind::Timeout => println!("upstream is slow"),
//!     Err(e) => println!("HTTP error: {e}"),
//! }
//! ```

use crate::clients::{ErrorKind, HttpError};
use thiserror::Error;

/// Error type for REST API operations.
///
/// ```rust
/// use storefront_api::clients::{ErrorKind, RestError};
///
/// let error = RestError::InvalidPath { path: String::new() };
/// assert!(error.to_string().contains("Invalid"));
/// assert_eq!(error.kind(), ErrorKind::Client);
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// The REST API path is invalid.
    #[error("Invalid REST API path: '{path}'")]
    InvalidPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl RestError {
    /// Returns the classification assigned at the client boundary.
    ///
    /// An invalid path never reached the upstream and reports
    /// [`ErrorKind::Client`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPath { .. } => ErrorKind::Client,
            Self::Http(e) => e.kind(),
        }
    }

    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidPath { .. } => None,
            Self::Http(e) => e.status(),
        }
    }
}
