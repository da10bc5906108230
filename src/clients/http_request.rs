//! HTTP request types.
//!
//! This module provides [`HttpRequest`], its builder, and the [`CacheHint`]
//! metadata a request can carry for a downstream caching layer.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods supported by the upstream REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and batches.
    Post,
    /// HTTP PUT method for full updates.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for methods that must carry a body.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Cache metadata attached to a request for an external, tag-addressable cache.
///
/// A hint without a `revalidate_after` lifetime means "do not cache". This
/// library only produces the metadata; storage and invalidation belong to
/// the caller's cache.
///
/// ```rust
/// use storefront_api::clients::CacheHint;
/// use std::time::Duration;
///
/// let hint = CacheHint::revalidate(Duration::from_secs(300)).tag("products");
/// assert!(hint.is_cacheable());
/// assert_eq!(hint.tags, vec!["products".to_string()]);
///
/// assert!(!CacheHint::default().is_cacheable());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheHint {
    /// How long a cached response may be served before revalidation.
    pub revalidate_after: Option<Duration>,
    /// Tags under which the response can be invalidated.
    pub tags: Vec<String>,
}

impl CacheHint {
    /// Creates a hint that allows caching for `lifetime`.
    #[must_use]
    pub const fn revalidate(lifetime: Duration) -> Self {
        Self {
            revalidate_after: Some(lifetime),
            tags: Vec::new(),
        }
    }

    /// Adds an invalidation tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Returns `true` if a downstream cache may store the response.
    #[must_use]
    pub const fn is_cacheable(&self) -> bool {
        self.revalidate_after.is_some()
    }
}

/// A request to the upstream REST API.
///
/// Paths are relative to the client's base path (`/wp-json/wc/v3`).
///
/// ```rust
/// use storefront_api::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// let get = HttpRequest::builder(HttpMethod::Get, "products")
///     .query_param("per_page", "12")
///     .build()
///     .unwrap();
/// assert_eq!(get.path, "products");
///
/// let post = HttpRequest::builder(HttpMethod::Post, "products")
///     .body(json!({"name": "Linen Shirt"}))
///     .build()
///     .unwrap();
/// assert!(post.body.is_some());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path relative to the base path.
    pub path: String,
    /// The JSON body, if any.
    pub body: Option<serde_json::Value>,
    /// Query parameters, kept sorted so identical requests produce identical URLs.
    pub query: Option<BTreeMap<String, String>>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<BTreeMap<String, String>>,
    /// Per-request override of the attempt count. `None` uses the client policy.
    pub tries: Option<u32>,
    /// Cache metadata forwarded to the response.
    pub cache: Option<CacheHint>,
}

impl HttpRequest {
    /// Creates a new builder for an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the path is empty or a
    /// POST/PUT/PATCH request has no body.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim_matches('/').is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }

        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    query: Option<BTreeMap<String, String>>,
    extra_headers: Option<BTreeMap<String, String>>,
    tries: Option<u32>,
    cache: Option<CacheHint>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            query: None,
            extra_headers: None,
            tries: None,
            cache: None,
        }
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Overrides the number of attempts for this request.
    ///
    /// The client's policy still caps the value at
    /// [`MAX_TRIES`](crate::config::MAX_TRIES).
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Attaches cache metadata.
    #[must_use]
    pub fn cache(mut self, hint: CacheHint) -> Self {
        self.cache = Some(hint);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            query: self.query,
            extra_headers: self.extra_headers,
            tries: self.tries,
            cache: self.cache,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Patch.to_string(), "patch");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "products")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert!(request.body.is_none());
        assert!(request.tries.is_none());
        assert!(request.cache.is_none());
    }

    #[test]
    fn test_verify_requires_body_for_write_methods() {
        for method in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch] {
            let result = HttpRequest::builder(method, "products/1").build();
            assert!(matches!(
                result,
                Err(InvalidHttpRequestError::MissingBody { method: m }) if m == method.to_string()
            ));
        }
    }

    #[test]
    fn test_verify_rejects_empty_path() {
        let result = HttpRequest::builder(HttpMethod::Get, "/").build();
        assert!(matches!(result, Err(InvalidHttpRequestError::EmptyPath)));
    }

    #[test]
    fn test_delete_does_not_need_body() {
        assert!(HttpRequest::builder(HttpMethod::Delete, "products/1")
            .build()
            .is_ok());
    }

    #[test]
    fn test_query_params_are_sorted() {
        let request = HttpRequest::builder(HttpMethod::Get, "products")
            .query_param("per_page", "12")
            .query_param("order", "desc")
            .query_param("page", "2")
            .build()
            .unwrap();

        let keys: Vec<_> = request.query.unwrap().into_keys().collect();
        assert_eq!(keys, vec!["order", "page", "per_page"]);
    }

    #[test]
    fn test_builder_attaches_cache_hint() {
        let request = HttpRequest::builder(HttpMethod::Get, "products")
            .cache(CacheHint::revalidate(Duration::from_secs(60)).tag("catalog"))
            .build()
            .unwrap();

        let hint = request.cache.unwrap();
        assert!(hint.is_cacheable());
        assert_eq!(hint.tags, vec!["catalog"]);
    }
}
