//! REST client implementation for the upstream commerce API.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::clients::rest::RestError;
use crate::clients::{CacheHint, FailureRecorder, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{ApiVersion, StoreConfig};
use crate::error::ConfigError;
use crate::rest::SortOrder;

/// Query parameters for a REST request.
pub type Query = BTreeMap<String, String>;

/// REST API client for the upstream commerce API.
///
/// Provides convenient methods (`get`, `post`, `put`, `patch`, `delete`)
/// with automatic path normalization. Retries follow the client's policy;
/// the `*_with_tries` variants override the attempt count per call.
///
/// The client also carries the list defaults (page size, sort field and
/// direction) from [`StoreConfig`], used by
/// [`fetch_paginated`](crate::rest::fetch_paginated).
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_api::{RestClient, StoreConfig};
///
/// let client = RestClient::new(&StoreConfig::from_env()?)?;
///
/// let response = client.get("products/42", None).await?;
///
/// let body = serde_json::json!({"name": "Linen Shirt", "regular_price": "39.00"});
/// let response = client.post("products", body, None).await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    api_version: ApiVersion,
    default_page_size: u32,
    default_order_by: String,
    default_order: SortOrder,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if the HTTP transport cannot be
    /// initialized.
    pub fn new(config: &StoreConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(HttpClient::new(config)?, config))
    }

    /// Creates a new REST client that records failures into a shared recorder.
    ///
    /// # Errors
    ///
    /// Same as [`RestClient::new`].
    pub fn with_recorder(
        config: &StoreConfig,
        recorder: Arc<FailureRecorder>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(
            HttpClient::with_recorder(config, recorder)?,
            config,
        ))
    }

    fn from_parts(http_client: HttpClient, config: &StoreConfig) -> Self {
        tracing::debug!(
            store = %config.store_url(),
            api_version = %config.api_version(),
            "Created REST client"
        );

        Self {
            http_client,
            api_version: config.api_version(),
            default_page_size: config.default_page_size(),
            default_order_by: config.default_order_by().to_string(),
            default_order: config.default_order(),
        }
    }

    /// Returns the API version being used by this client.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns the default page size for list requests.
    #[must_use]
    pub const fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// Returns the default sort field for list requests.
    #[must_use]
    pub fn default_order_by(&self) -> &str {
        &self.default_order_by
    }

    /// Returns the default sort direction for list requests.
    #[must_use]
    pub const fn default_order(&self) -> SortOrder {
        self.default_order
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid (e.g., empty).
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn get(&self, path: &str, query: Option<Query>) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Get, path, None, query, None, None)
            .await
    }

    /// Sends a GET request carrying cache metadata for a downstream cache.
    ///
    /// # Errors
    ///
    /// Same as [`RestClient::get`].
    pub async fn get_cached(
        &self,
        path: &str,
        query: Option<Query>,
        cache: Option<CacheHint>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Get, path, None, query, None, cache)
            .await
    }

    /// Sends a GET request with a per-call attempt count.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors, including retry exhaustion.
    pub async fn get_with_tries(
        &self,
        path: &str,
        query: Option<Query>,
        tries: u32,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Get, path, None, query, Some(tries), None)
            .await
    }

    /// Sends a POST request to the specified path.
    ///
    /// Transient failures are retried like any other request. For a POST
    /// that creates records, use [`RestClient::post_with_tries`] with one try
    /// unless duplicates are harmless.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<Query>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Post, path, Some(body), query, None, None)
            .await
    }

    /// Sends a POST request with a per-call attempt count.
    ///
    /// # Errors
    ///
    /// Same as [`RestClient::post`], including retry exhaustion.
    pub async fn post_with_tries(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<Query>,
        tries: u32,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Post, path, Some(body), query, Some(tries), None)
            .await
    }

    /// Sends a PUT request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<Query>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Put, path, Some(body), query, None, None)
            .await
    }

    /// Sends a PATCH request with a partial body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn patch(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<Query>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Patch, path, Some(body), query, None, None)
            .await
    }

    /// Sends a DELETE request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn delete(
        &self,
        path: &str,
        query: Option<Query>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Delete, path, None, query, None, None)
            .await
    }

    async fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<Query>,
        tries: Option<u32>,
        cache: Option<CacheHint>,
    ) -> Result<HttpResponse, RestError> {
        let normalized_path = normalize_path(path)?;

        let mut builder = HttpRequest::builder(method, normalized_path);
        if let Some(body_value) = body {
            builder = builder.body(body_value);
        }
        if let Some(query_params) = query {
            builder = builder.query(query_params);
        }
        if let Some(t) = tries {
            builder = builder.tries(t);
        }
        if let Some(hint) = cache {
            builder = builder.cache(hint);
        }

        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;

        self.http_client.request(request).await.map_err(Into::into)
    }
}

/// Normalizes a REST API path relative to the namespace.
///
/// Strips leading and trailing `/` characters and rejects empty results.
fn normalize_path(path: &str) -> Result<String, RestError> {
    let path = path.trim().trim_matches('/');

    if path.is_empty() {
        return Err(RestError::InvalidPath {
            path: String::new(),
        });
    }

    Ok(path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConsumerKey, ConsumerSecret, StoreUrl};

    fn config() -> StoreConfig {
        StoreConfig::builder()
            .store_url(StoreUrl::new("https://shop.example.com").unwrap())
            .consumer_key(ConsumerKey::new("ck").unwrap())
            .consumer_secret(ConsumerSecret::new("cs").unwrap())
            .default_page_size(24)
            .build()
            .unwrap()
    }

    #[test]
    fn test_normalize_path_strips_slashes() {
        assert_eq!(normalize_path("/products").unwrap(), "products");
        assert_eq!(normalize_path("products/").unwrap(), "products");
        assert_eq!(normalize_path("//shipping/zones/1/locations").unwrap(), "shipping/zones/1/locations");
    }

    #[test]
    fn test_normalize_path_keeps_nested_segments() {
        assert_eq!(
            normalize_path("products/10/variations/11").unwrap(),
            "products/10/variations/11"
        );
    }

    #[test]
    fn test_normalize_path_empty_path_returns_error() {
        for path in ["", "/", " // "] {
            assert!(matches!(
                normalize_path(path),
                Err(RestError::InvalidPath { path }) if path.is_empty()
            ));
        }
    }

    #[test]
    fn test_rest_client_carries_list_defaults() {
        let client = RestClient::new(&config()).unwrap();

        assert_eq!(client.api_version(), ApiVersion::latest());
        assert_eq!(client.default_page_size(), 24);
        assert_eq!(client.default_order_by(), "date");
        assert_eq!(client.default_order(), SortOrder::Desc);
    }

    #[test]
    fn test_rest_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RestClient>();
    }
}
