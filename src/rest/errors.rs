//! Resource-level error types.
//!
//! [`ResourceError`] adds the failures that only exist at the resource layer
//! (no matching path template, a payload that does not deserialize into the
//! resource type) on top of the wrapped client errors. Upstream failures keep
//! the classification assigned by the HTTP client.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api::clients::ErrorKind;
//! use storefront_api::rest::{ResourceError, RestResource};
//!
//! match Product::find(&client, 123, None).await {
//!     Ok(product) => println!("Found: {}", product.name),
//!     Err(e) if e.is_not_found() => println!("no such product"),
//!     Err(e) if e.kind() == ErrorKind::Parse => println!("upstream sent garbage"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::clients::{ErrorKind, HttpError, RestError};
use crate::config::ApiVersion;
use thiserror::Error;

/// Error type for REST resource operations.
///
/// ```rust
/// use storefront_api::clients::ErrorKind;
/// use storefront_api::rest::ResourceError;
///
/// let error = ResourceError::PathResolutionFailed {
///     resource: "ProductVariation",
///     operation: "all",
/// };
/// assert!(error.to_string().contains("ProductVariation::all"));
/// assert_eq!(error.kind(), ErrorKind::Client);
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No path template matches the provided ids and operation.
    ///
    /// Returned when a nested resource is used without its parent id.
    #[error("Cannot resolve path for {resource}::{operation} with provided IDs")]
    PathResolutionFailed {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted (e.g., "find", "all", "batch").
        operation: &'static str,
    },

    /// The configured API version does not offer this operation.
    #[error("{resource}::{operation} is not available in API version {version}")]
    UnsupportedOperation {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
        /// The client's API version.
        version: ApiVersion,
    },

    /// The resource or its parameters could not be serialized.
    #[error("Failed to serialize {resource}: {source}")]
    Serialize {
        /// The type name of the resource.
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The response body did not match the resource type.
    #[error("Failed to parse {resource} from response: {source}")]
    Deserialize {
        /// The type name of the resource.
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A REST-level error occurred.
    #[error(transparent)]
    Rest(#[from] RestError),
}

impl ResourceError {
    /// Returns the classification of this error.
    ///
    /// Wrapped client errors report the classification assigned when the
    /// response (or lack of one) was first seen. A body that does not fit
    /// the resource type is [`ErrorKind::Parse`]; local misuse is
    /// [`ErrorKind::Client`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::PathResolutionFailed { .. }
            | Self::UnsupportedOperation { .. }
            | Self::Serialize { .. } => ErrorKind::Client,
            Self::Deserialize { .. } => ErrorKind::Parse,
            Self::Http(e) => e.kind(),
            Self::Rest(e) => e.kind(),
        }
    }

    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            Self::Rest(e) => e.status(),
            _ => None,
        }
    }

    /// Returns `true` if the upstream answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ApiError;

    fn http_error(kind: ErrorKind, status: Option<u16>) -> HttpError {
        HttpError::Api(ApiError {
            kind,
            status,
            message: "Invalid ID.".to_string(),
            endpoint: "products/99".to_string(),
            code: Some("woocommerce_rest_product_invalid_id".to_string()),
            details: None,
        })
    }

    #[test]
    fn test_kind_delegates_through_every_wrapper() {
        let direct = ResourceError::from(http_error(ErrorKind::Client, Some(404)));
        let via_rest = ResourceError::from(RestError::from(http_error(ErrorKind::Client, Some(404))));

        assert_eq!(direct.kind(), ErrorKind::Client);
        assert_eq!(via_rest.kind(), ErrorKind::Client);
        assert!(direct.is_not_found());
        assert!(via_rest.is_not_found());
    }

    #[test]
    fn test_deserialize_failure_is_parse() {
        let source = serde_json::from_str::<u64>("\"x\"").unwrap_err();
        let error = ResourceError::Deserialize {
            resource: "Product",
            source,
        };
        assert_eq!(error.kind(), ErrorKind::Parse);
        assert!(error.status().is_none());
        assert!(error.to_string().starts_with("Failed to parse Product"));
    }

    #[test]
    fn test_unsupported_operation_message() {
        let error = ResourceError::UnsupportedOperation {
            resource: "Product",
            operation: "batch",
            version: ApiVersion::V1,
        };
        assert_eq!(
            error.to_string(),
            "Product::batch is not available in API version wc/v1"
        );
        assert_eq!(error.kind(), ErrorKind::Client);
    }

    #[test]
    fn test_timeout_keeps_kind() {
        let error = ResourceError::from(http_error(ErrorKind::Timeout, None));
        assert_eq!(error.kind(), ErrorKind::Timeout);
        assert!(!error.is_not_found());
    }
}
