//! Response wrapper for single-resource operations.
//!
//! [`ResourceResponse<T>`] implements `Deref<Target = T>`, so a found
//! product can be used like the product itself:
//!
//! ```rust,ignore
//! let product = Product::find(&client, 42, None).await?;
//! println!("{} ({})", product.name, product.stock_status);
//! let owned: Product = product.into_inner();
//! ```
//!
//! List operations return [`PaginatedResult`](crate::rest::PaginatedResult)
//! instead, which carries the page totals.

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;

use crate::clients::{CacheHint, HttpResponse};
use crate::rest::ResourceError;

/// A response from a single-resource operation.
///
/// ```rust
/// use storefront_api::rest::ResourceResponse;
///
/// let response = ResourceResponse::new(vec!["red", "blue"], 200, None);
/// assert_eq!(response.len(), 2);
/// assert_eq!(response.status(), 200);
/// assert!(response.cache().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ResourceResponse<T> {
    data: T,
    status: u16,
    cache: Option<CacheHint>,
}

impl<T> ResourceResponse<T> {
    /// Creates a new `ResourceResponse`.
    #[must_use]
    pub const fn new(data: T, status: u16, cache: Option<CacheHint>) -> Self {
        Self {
            data,
            status,
            cache,
        }
    }

    /// Consumes the response and returns the inner data.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns a mutable reference to the inner data.
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Returns the HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the cache metadata forwarded from the request.
    #[must_use]
    pub const fn cache(&self) -> Option<&CacheHint> {
        self.cache.as_ref()
    }

    /// Transforms the inner data while keeping the metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> ResourceResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ResourceResponse {
            data: f(self.data),
            status: self.status,
            cache: self.cache,
        }
    }
}

impl<T: DeserializeOwned> ResourceResponse<T> {
    /// Deserializes the whole response body into `T`.
    ///
    /// The upstream returns resources unwrapped (`{"id": 1, ...}`), so no
    /// envelope key is involved.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deserialize`] if the body does not match `T`.
    pub fn from_http_response(
        response: HttpResponse,
        resource: &'static str,
    ) -> Result<Self, ResourceError> {
        let data = serde_json::from_value(response.body)
            .map_err(|source| ResourceError::Deserialize { resource, source })?;

        Ok(Self::new(data, response.code, response.cache))
    }
}

impl<T> Deref for ResourceResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ResourceResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ErrorKind;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Zone {
        id: u64,
        name: String,
    }

    #[test]
    fn test_from_http_response_deserializes_body() {
        let http = HttpResponse::new(200, HashMap::new(), json!({"id": 2, "name": "Domestic"}));
        let response: ResourceResponse<Zone> =
            ResourceResponse::from_http_response(http, "ShippingZone").unwrap();

        assert_eq!(response.name, "Domestic");
        assert_eq!(response.into_inner().id, 2);
    }

    #[test]
    fn test_from_http_response_reports_parse_kind() {
        let http = HttpResponse::new(200, HashMap::new(), json!({"unexpected": true}));
        let error = ResourceResponse::<Zone>::from_http_response(http, "ShippingZone").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Parse);
        assert!(error.to_string().contains("ShippingZone"));
    }

    #[test]
    fn test_map_keeps_metadata() {
        let response = ResourceResponse::new(3_u32, 201, Some(CacheHint::default()));
        let mapped = response.map(|n| n * 2);

        assert_eq!(*mapped, 6);
        assert_eq!(mapped.status(), 201);
        assert!(mapped.cache().is_some());
    }

    #[test]
    fn test_deref_mut() {
        let mut response = ResourceResponse::new(vec![1, 2], 200, None);
        response.push(3);
        response.data_mut().push(4);
        assert_eq!(response.into_inner(), vec![1, 2, 3, 4]);
    }
}
