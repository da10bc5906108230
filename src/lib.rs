//! # Storefront API
//!
//! A client library for a WooCommerce-style storefront REST API
//! (`/wp-json/wc/v3`), with the resolution logic a storefront needs on top
//! of it.
//!
//! ## Overview
//!
//! This library provides:
//! - Type-safe configuration via [`StoreConfig`] and [`StoreConfigBuilder`],
//!   or from the environment with [`StoreConfig::from_env`]
//! - An async HTTP client with Basic authentication, per-attempt timeouts,
//!   classified errors and exponential-backoff retries of transient failures
//! - Recording of authentication failures and timeouts via
//!   [`clients::FailureRecorder`]
//! - Typed REST resources with pagination, batch writes and a
//!   degrade-to-`None` wrapper ([`rest`])
//! - Shipping zone resolution by postcode and country ([`shipping`])
//! - Variant selection with stock-aware option availability ([`variants`])
//!
//! ## Quick Start
//!
//! ```rust
//! use storefront_api::{ApiVersion, ConsumerKey, ConsumerSecret, StoreConfig, StoreUrl};
//!
//! let config = StoreConfig::builder()
//!     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
//!     .consumer_key(ConsumerKey::new("ck_example").unwrap())
//!     .consumer_secret(ConsumerSecret::new("cs_example").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_tries(), 3);
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use storefront_api::{RestClient, StoreConfig};
//! use storefront_api::rest::{PageQuery, RestResource};
//! use storefront_api::rest::resources::Product;
//!
//! let config = StoreConfig::from_env()?;
//! let client = RestClient::new(&config)?;
//!
//! let page = Product::all(&client, &PageQuery::new().per_page(24)).await?;
//! println!("{} products in {} pages", page.total, page.total_pages);
//! ```
//!
//! ## Resolving Shipping Zones
//!
//! ```rust,ignore
//! use storefront_api::shipping::load_zones;
//!
//! let resolver = load_zones(&client).await?;
//! if let Some(zone) = resolver.resolve("111 22", "SE") {
//!     println!("ships via {}", zone.zone_name);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration, clients and resolvers are explicit values
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: clients and resolvers are `Send + Sync`
//! - **Async-first**: designed for the Tokio runtime
//! - **Classified errors**: every failure carries an [`clients::ErrorKind`]
//!   assigned once, where the response or transport error is first seen

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod shipping;
pub mod variants;

// Re-export public types at crate root for convenience
pub use config::{
    ApiVersion, ConsumerKey, ConsumerSecret, StoreConfig, StoreConfigBuilder, StoreUrl,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, CacheHint, ErrorKind, FailureRecorder, HttpClient, HttpError, HttpMethod,
    HttpRequest, HttpRequestBuilder, HttpResponse, InvalidHttpRequestError,
    MaxHttpRetriesExceededError, RestClient, RestError,
};
