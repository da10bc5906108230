//! REST API client for the upstream commerce API.
//!
//! This module provides a higher-level REST client built on top of the
//! [`HttpClient`](crate::clients::HttpClient) with `get()`, `post()`,
//! `put()`, `patch()` and `delete()` methods and path normalization.
//!
//! # Path Normalization
//!
//! - Leading and trailing slashes are stripped: `/products/` -> `products`
//! - Paths are relative to the namespace: `products` -> `/wp-json/wc/v3/products`
//! - A path that is empty after normalization is rejected
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api::{RestClient, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let client = RestClient::new(&config)?;
//!
//! let response = client.get("products/42", None).await?;
//! println!("Product: {}", response.body);
//! ```

mod client;
mod errors;

pub use client::{Query, RestClient};
pub use errors::RestError;
