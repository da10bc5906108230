//! Configuration types for the storefront API library.
//!
//! # Overview
//!
//! - [`StoreConfig`]: all settings needed to talk to the upstream store
//! - [`StoreConfigBuilder`]: builder for [`StoreConfig`]
//! - [`ConsumerKey`] / [`ConsumerSecret`]: validated credentials (secret is masked in `Debug`)
//! - [`StoreUrl`]: validated upstream base URL
//! - [`ApiVersion`]: REST namespace version
//!
//! Credentials are only ever read on the server side. [`StoreConfig::from_env`]
//! loads them from the process environment (and a `.env` file, if present).
//!
//! # Example
//!
//! ```rust
//! use storefront_api::{StoreConfig, StoreUrl, ConsumerKey, ConsumerSecret};
//! use std::time::Duration;
//!
//! let config = StoreConfig::builder()
//!     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
//!     .consumer_key(ConsumerKey::new("ck_live").unwrap())
//!     .consumer_secret(ConsumerSecret::new("cs_live").unwrap())
//!     .timeout(Duration::from_secs(45))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_tries(), 3);
//! ```

mod newtypes;
mod version;

use std::env::VarError;
use std::time::Duration;

pub use newtypes::{ConsumerKey, ConsumerSecret, StoreUrl};
pub use version::ApiVersion;

use crate::error::ConfigError;
use crate::rest::SortOrder;

/// Default per-attempt timeout. Catalog calls upstream can be slow.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Hard upper bound on the number of attempts for one request.
pub const MAX_TRIES: u32 = 3;

/// Default base delay for exponential backoff.
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Default number of items per page for list requests.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Default sort field for list requests.
pub const DEFAULT_ORDER_BY: &str = "date";

/// Configuration for the upstream commerce API.
///
/// `StoreConfig` is `Clone + Send + Sync` and meant to be built once at
/// startup and shared.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    store_url: StoreUrl,
    consumer_key: ConsumerKey,
    consumer_secret: ConsumerSecret,
    api_version: ApiVersion,
    timeout: Duration,
    max_tries: u32,
    retry_base_delay: Duration,
    user_agent_prefix: Option<String>,
    default_page_size: u32,
    default_order_by: String,
    default_order: SortOrder,
}

impl StoreConfig {
    /// Creates a new builder for constructing a `StoreConfig`.
    #[must_use]
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::new()
    }

    /// Loads configuration from the environment, reading a `.env` file first
    /// if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if a required variable is unset,
    /// or a validation error if a value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Builds configuration using the provided variable lookup.
    ///
    /// Required: `COMMERCE_API_URL`, `COMMERCE_CONSUMER_KEY`,
    /// `COMMERCE_CONSUMER_SECRET`. Everything else falls back to defaults.
    ///
    /// # Errors
    ///
    /// Same as [`StoreConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let require = |var: &str| -> Result<String, ConfigError> {
            lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
        };
        let optional = |var: &str| lookup(var).ok().filter(|v| !v.trim().is_empty());
        let parse_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
            optional(var)
                .map(|raw| {
                    raw.trim()
                        .parse::<u64>()
                        .map_err(|e| ConfigError::InvalidEnvVar {
                            var: var.to_string(),
                            reason: e.to_string(),
                        })
                })
                .transpose()
        };
        let parse_u32 = |var: &str| -> Result<Option<u32>, ConfigError> {
            parse_u64(var)?
                .map(|v| {
                    u32::try_from(v).map_err(|e| ConfigError::InvalidEnvVar {
                        var: var.to_string(),
                        reason: e.to_string(),
                    })
                })
                .transpose()
        };

        let mut builder = Self::builder()
            .store_url(StoreUrl::new(require("COMMERCE_API_URL")?)?)
            .consumer_key(ConsumerKey::new(require("COMMERCE_CONSUMER_KEY")?)?)
            .consumer_secret(ConsumerSecret::new(require("COMMERCE_CONSUMER_SECRET")?)?);

        if let Some(version) = optional("COMMERCE_API_VERSION") {
            builder = builder.api_version(version.parse()?);
        }
        if let Some(secs) = parse_u64("COMMERCE_TIMEOUT_SECS")? {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(tries) = parse_u32("COMMERCE_MAX_TRIES")? {
            builder = builder.max_tries(tries);
        }
        if let Some(ms) = parse_u64("COMMERCE_RETRY_BASE_DELAY_MS")? {
            builder = builder.retry_base_delay(Duration::from_millis(ms));
        }
        if let Some(size) = parse_u32("COMMERCE_PAGE_SIZE")? {
            builder = builder.default_page_size(size);
        }
        if let Some(prefix) = optional("COMMERCE_USER_AGENT_PREFIX") {
            builder = builder.user_agent_prefix(prefix);
        }

        builder.build()
    }

    /// Returns the upstream base URL.
    #[must_use]
    pub const fn store_url(&self) -> &StoreUrl {
        &self.store_url
    }

    /// Returns the consumer key.
    #[must_use]
    pub const fn consumer_key(&self) -> &ConsumerKey {
        &self.consumer_key
    }

    /// Returns the consumer secret.
    #[must_use]
    pub const fn consumer_secret(&self) -> &ConsumerSecret {
        &self.consumer_secret
    }

    /// Returns the REST namespace version.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns the per-attempt request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the maximum number of attempts per request (never above [`MAX_TRIES`]).
    #[must_use]
    pub const fn max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Returns the base delay for exponential backoff.
    #[must_use]
    pub const fn retry_base_delay(&self) -> Duration {
        self.retry_base_delay
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
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
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StoreConfig>();
};

/// Builder for [`StoreConfig`].
///
/// Required: `store_url`, `consumer_key`, `consumer_secret`.
///
/// # Defaults
///
/// - `api_version`: [`ApiVersion::latest`]
/// - `timeout`: [`DEFAULT_TIMEOUT`]
/// - `max_tries`: [`MAX_TRIES`]
/// - `retry_base_delay`: [`DEFAULT_RETRY_BASE_DELAY`]
/// - `default_page_size`: [`DEFAULT_PAGE_SIZE`]
/// - `default_order_by`: [`DEFAULT_ORDER_BY`]
/// - `default_order`: [`SortOrder::Desc`]
#[derive(Debug, Default)]
pub struct StoreConfigBuilder {
    store_url: Option<StoreUrl>,
    consumer_key: Option<ConsumerKey>,
    consumer_secret: Option<ConsumerSecret>,
    api_version: Option<ApiVersion>,
    timeout: Option<Duration>,
    max_tries: Option<u32>,
    retry_base_delay: Option<Duration>,
    user_agent_prefix: Option<String>,
    default_page_size: Option<u32>,
    default_order_by: Option<String>,
    default_order: Option<SortOrder>,
}

impl StoreConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the upstream base URL (required).
    #[must_use]
    pub fn store_url(mut self, url: StoreUrl) -> Self {
        self.store_url = Some(url);
        self
    }

    /// Sets the consumer key (required).
    #[must_use]
    pub fn consumer_key(mut self, key: ConsumerKey) -> Self {
        self.consumer_key = Some(key);
        self
    }

    /// Sets the consumer secret (required).
    #[must_use]
    pub fn consumer_secret(mut self, secret: ConsumerSecret) -> Self {
        self.consumer_secret = Some(secret);
        self
    }

    /// Sets the REST namespace version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the per-attempt request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the maximum attempts per request. Values are clamped to `1..=MAX_TRIES`.
    #[must_use]
    pub const fn max_tries(mut self, tries: u32) -> Self {
        self.max_tries = Some(tries);
        self
    }

    /// Sets the base delay for exponential backoff.
    #[must_use]
    pub const fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = Some(delay);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the default page size for list requests.
    #[must_use]
    pub const fn default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = Some(size);
        self
    }

    /// Sets the default sort field for list requests.
    #[must_use]
    pub fn default_order_by(mut self, field: impl Into<String>) -> Self {
        self.default_order_by = Some(field.into());
        self
    }

    /// Sets the default sort direction for list requests.
    #[must_use]
    pub const fn default_order(mut self, order: SortOrder) -> Self {
        self.default_order = Some(order);
        self
    }

    /// Builds the [`StoreConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if the URL or either
    /// credential is not set.
    pub fn build(self) -> Result<StoreConfig, ConfigError> {
        let store_url = self
            .store_url
            .ok_or(ConfigError::MissingRequiredField { field: "store_url" })?;
        let consumer_key = self.consumer_key.ok_or(ConfigError::MissingRequiredField {
            field: "consumer_key",
        })?;
        let consumer_secret = self
            .consumer_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "consumer_secret",
            })?;

        Ok(StoreConfig {
            store_url,
            consumer_key,
            consumer_secret,
            api_version: self.api_version.unwrap_or_default(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            max_tries: self.max_tries.unwrap_or(MAX_TRIES).clamp(1, MAX_TRIES),
            retry_base_delay: self.retry_base_delay.unwrap_or(DEFAULT_RETRY_BASE_DELAY),
            user_agent_prefix: self.user_agent_prefix,
            default_page_size: self.default_page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
            default_order_by: self
                .default_order_by
                .unwrap_or_else(|| DEFAULT_ORDER_BY.to_string()),
            default_order: self.default_order.unwrap_or(SortOrder::Desc),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    fn required_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("COMMERCE_API_URL", "https://shop.example.com");
        m.insert("COMMERCE_CONSUMER_KEY", "ck_test");
        m.insert("COMMERCE_CONSUMER_SECRET", "cs_test");
        m
    }

    fn base_builder() -> StoreConfigBuilder {
        StoreConfig::builder()
            .store_url(StoreUrl::new("https://shop.example.com").unwrap())
            .consumer_key(ConsumerKey::new("ck").unwrap())
            .consumer_secret(ConsumerSecret::new("cs").unwrap())
    }

    #[test]
    fn test_builder_requires_consumer_key() {
        let result = StoreConfig::builder()
            .store_url(StoreUrl::new("https://shop.example.com").unwrap())
            .consumer_secret(ConsumerSecret::new("cs").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "consumer_key"
            })
        ));
    }

    #[test]
    fn test_builder_requires_consumer_secret() {
        let result = StoreConfig::builder()
            .store_url(StoreUrl::new("https://shop.example.com").unwrap())
            .consumer_key(ConsumerKey::new("ck").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "consumer_secret"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = base_builder().build().unwrap();

        assert_eq!(config.api_version(), ApiVersion::V3);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.max_tries(), MAX_TRIES);
        assert_eq!(config.retry_base_delay(), DEFAULT_RETRY_BASE_DELAY);
        assert_eq!(config.default_page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(config.default_order_by(), "date");
        assert_eq!(config.default_order(), SortOrder::Desc);
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_max_tries_is_clamped() {
        assert_eq!(base_builder().max_tries(10).build().unwrap().max_tries(), 3);
        assert_eq!(base_builder().max_tries(0).build().unwrap().max_tries(), 1);
        assert_eq!(base_builder().max_tries(2).build().unwrap().max_tries(), 2);
    }

    #[test]
    fn test_debug_output_masks_secret() {
        let config = StoreConfig::builder()
            .store_url(StoreUrl::new("https://shop.example.com").unwrap())
            .consumer_key(ConsumerKey::new("ck").unwrap())
            .consumer_secret(ConsumerSecret::new("cs_do_not_print").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("StoreConfig"));
        assert!(!debug_str.contains("cs_do_not_print"));
    }

    #[test]
    fn test_from_lookup_requires_credentials() {
        let mut map = required_env();
        map.remove("COMMERCE_CONSUMER_SECRET");
        let result = StoreConfig::from_lookup(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "COMMERCE_CONSUMER_SECRET"),
            "got: {result:?}"
        );
    }

    #[test]
    fn test_from_lookup_rejects_blank_credential() {
        let mut map = required_env();
        map.insert("COMMERCE_CONSUMER_KEY", "");
        let result = StoreConfig::from_lookup(lookup_from_map(&map));
        assert!(matches!(result, Err(ConfigError::EmptyConsumerKey)));
    }

    #[test]
    fn test_from_lookup_reads_optional_values() {
        let mut map = required_env();
        map.insert("COMMERCE_API_VERSION", "wc/v2");
        map.insert("COMMERCE_TIMEOUT_SECS", "45");
        map.insert("COMMERCE_MAX_TRIES", "2");
        map.insert("COMMERCE_RETRY_BASE_DELAY_MS", "250");
        map.insert("COMMERCE_PAGE_SIZE", "24");
        map.insert("COMMERCE_USER_AGENT_PREFIX", "Storefront/2.0");

        let config = StoreConfig::from_lookup(lookup_from_map(&map)).unwrap();
        assert_eq!(config.api_version(), ApiVersion::V2);
        assert_eq!(config.timeout(), Duration::from_secs(45));
        assert_eq!(config.max_tries(), 2);
        assert_eq!(config.retry_base_delay(), Duration::from_millis(250));
        assert_eq!(config.default_page_size(), 24);
        assert_eq!(config.user_agent_prefix(), Some("Storefront/2.0"));
    }

    #[test]
    fn test_from_lookup_rejects_non_numeric_timeout() {
        let mut map = required_env();
        map.insert("COMMERCE_TIMEOUT_SECS", "soon");
        let result = StoreConfig::from_lookup(lookup_from_map(&map));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "COMMERCE_TIMEOUT_SECS"
        ));
    }
}
