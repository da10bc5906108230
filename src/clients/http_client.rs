//! HTTP client for the upstream commerce API.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests with a per-attempt timeout and automatic retry handling.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;

use crate::clients::classify::{
    classify_invalid_success, classify_response, classify_timeout, classify_transport,
};
use crate::clients::errors::{ApiError, HttpError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::{HttpResponse, ParsedBody};
use crate::clients::observability::FailureRecorder;
use crate::clients::retry::{RetryDecision, RetryPolicy};
use crate::config::StoreConfig;
use crate::error::ConfigError;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the upstream commerce API.
///
/// The client handles:
/// - Base URI and namespace path construction from [`StoreConfig`]
/// - Default headers including User-Agent and Basic authorization
/// - A hard timeout around each attempt
/// - Exponential backoff for network, timeout and 5xx failures
/// - Recording of authentication failures and timeouts
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_api::{HttpClient, HttpMethod, HttpRequest, StoreConfig};
///
/// let config = StoreConfig::from_env()?;
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "products")
///     .query_param("per_page", "12")
///     .build()?;
///
/// let response = client.request(request).await?;
/// println!("{} products in total", response.total.unwrap_or(0));
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://shop.example.com`).
    base_uri: String,
    /// Base path (e.g., `/wp-json/wc/v3`).
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    timeout: Duration,
    retry: RetryPolicy,
    recorder: Arc<FailureRecorder>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from configuration with its own recorder.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if the TLS backend cannot be
    /// initialized.
    pub fn new(config: &StoreConfig) -> Result<Self, ConfigError> {
        Self::with_recorder(config, Arc::new(FailureRecorder::new()))
    }

    /// Creates a new HTTP client that records into a shared recorder.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::new`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use storefront_api::clients::{FailureRecorder, HttpClient};
    /// use storefront_api::{ConsumerKey, ConsumerSecret, StoreConfig, StoreUrl};
    ///
    /// let config = StoreConfig::builder()
    ///     .store_url(StoreUrl::new("https://shop.example.com/").unwrap())
    ///     .consumer_key(ConsumerKey::new("ck_test").unwrap())
    ///     .consumer_secret(ConsumerSecret::new("cs_test").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let recorder = Arc::new(FailureRecorder::new());
    /// let client = HttpClient::with_recorder(&config, Arc::clone(&recorder)).unwrap();
    /// assert_eq!(client.base_uri(), "https://shop.example.com");
    /// assert_eq!(client.base_path(), "/wp-json/wc/v3");
    /// ```
    pub fn with_recorder(
        config: &StoreConfig,
        recorder: Arc<FailureRecorder>,
    ) -> Result<Self, ConfigError> {
        let base_uri = config.store_url().as_ref().to_string();
        let base_path = format!("/wp-json/{}", config.api_version());

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Storefront API Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let credentials = format!(
            "{}:{}",
            config.consumer_key().as_ref(),
            config.consumer_secret().as_ref()
        );
        let authorization = format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Authorization".to_string(), authorization);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| ConfigError::Transport {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_uri,
            base_path,
            default_headers,
            timeout: config.timeout(),
            retry: RetryPolicy::from_config(config),
            recorder,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the retry policy applied to requests without an override.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Returns the failure recorder.
    #[must_use]
    pub fn recorder(&self) -> &Arc<FailureRecorder> {
        &self.recorder
    }

    /// Sends an HTTP request to the upstream API.
    ///
    /// Attempts are strictly sequential. A failed attempt is classified once;
    /// only network, timeout and server failures are retried, after an
    /// exponentially growing delay.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A non-retryable failure occurs, or retries are disabled (`Api`)
    /// - Every allowed attempt failed with a retryable error (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!(
            "{}{}/{}",
            self.base_uri,
            self.base_path,
            request.path.trim_start_matches('/')
        );
        let policy = self.retry.with_tries(request.tries);

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let error = match self.send_once(&url, &request).await {
                Ok(response) => return Ok(response.with_cache(request.cache.clone())),
                Err(error) => error,
            };

            self.recorder.record(&error);

            match policy.decide(error.kind, attempt) {
                RetryDecision::Retry { delay } => {
                    tracing::warn!(
                        attempt,
                        max_tries = policy.max_tries(),
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        kind = %error.kind,
                        status = ?error.status,
                        endpoint = %error.endpoint,
                        "Upstream request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::Stop => {
                    if RetryPolicy::is_transient(error.kind) && policy.max_tries() > 1 {
                        return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                            tries: attempt,
                            last: error,
                        }));
                    }
                    return Err(HttpError::Api(error));
                }
            }
        }
    }

    /// Performs a single attempt and classifies any failure.
    async fn send_once(&self, url: &str, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let endpoint = request.path.as_str();
        let builder = self.build_request(url, request);

        // Dropping the future on timeout aborts the connection.
        let exchange = async {
            let res = builder.send().await?;
            let code = res.status().as_u16();
            let headers = Self::parse_response_headers(res.headers());
            let text = res.text().await?;
            Ok::<_, reqwest::Error>((code, headers, text))
        };

        let (code, headers, text) = match tokio::time::timeout(self.timeout, exchange).await {
            Err(_) => return Err(classify_timeout(endpoint, self.timeout)),
            Ok(Err(e)) => return Err(classify_transport(endpoint, &e)),
            Ok(Ok(parts)) => parts,
        };

        let body = ParsedBody::parse(&text);
        if !(200..=299).contains(&code) {
            return Err(classify_response(code, endpoint, &body));
        }

        match body {
            ParsedBody::Json(value) => Ok(HttpResponse::new(code, headers, value)),
            ParsedBody::Empty => Ok(HttpResponse::new(code, headers, serde_json::json!({}))),
            ParsedBody::Invalid { snippet } => {
                Err(classify_invalid_success(code, endpoint, &snippet))
            }
        }
    }

    fn build_request(&self, url: &str, request: &HttpRequest) -> reqwest::RequestBuilder {
        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Patch => self.client.patch(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if request.body.is_some() {
            req_builder = req_builder.header("Content-Type", "application/json");
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                req_builder = req_builder.header(key, value);
            }
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        req_builder
    }

    /// Parses response headers into a `HashMap` keyed by lowercase name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
