//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction so an empty
//! credential or a scheme-less URL never reaches the HTTP layer.

use crate::error::ConfigError;
use std::fmt;

/// A validated API consumer key.
///
/// # Example
///
/// ```rust
/// use storefront_api::ConsumerKey;
///
/// let key = ConsumerKey::new("ck_1234").unwrap();
/// assert_eq!(key.as_ref(), "ck_1234");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumerKey(String);

impl ConsumerKey {
    /// Creates a new validated consumer key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyConsumerKey`] if the key is empty or blank.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyConsumerKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ConsumerKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated API consumer secret.
///
/// The `Debug` implementation masks the value so the secret never lands in
/// logs.
///
/// ```rust
/// use storefront_api::ConsumerSecret;
///
/// let secret = ConsumerSecret::new("cs_secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ConsumerSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ConsumerSecret(String);

impl ConsumerSecret {
    /// Creates a new validated consumer secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyConsumerSecret`] if the secret is empty or blank.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::EmptyConsumerSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ConsumerSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ConsumerSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConsumerSecret(*****)")
    }
}

/// A validated base URL of the upstream store.
///
/// Trailing slashes are stripped so paths can be appended directly.
///
/// ```rust
/// use storefront_api::StoreUrl;
///
/// let url = StoreUrl::new("https://shop.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://shop.example.com");
/// assert_eq!(url.host_name(), "shop.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl StoreUrl {
    /// Creates a new validated store URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStoreUrl`] if the URL has no scheme,
    /// a non-alphabetic scheme, or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidStoreUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        let host_end = url[host_start..]
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for StoreUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumer_key_rejects_empty_and_blank() {
        assert!(matches!(ConsumerKey::new(""), Err(ConfigError::EmptyConsumerKey)));
        assert!(matches!(ConsumerKey::new("   "), Err(ConfigError::EmptyConsumerKey)));
    }

    #[test]
    fn test_consumer_secret_masks_value_in_debug() {
        let secret = ConsumerSecret::new("cs_super_secret").unwrap();
        let debug_output = format!("{secret:?}");
        assert_eq!(debug_output, "ConsumerSecret(*****)");
        assert!(!debug_output.contains("cs_super_secret"));
    }

    #[test]
    fn test_consumer_secret_rejects_empty() {
        assert!(matches!(
            ConsumerSecret::new(""),
            Err(ConfigError::EmptyConsumerSecret)
        ));
    }

    #[test]
    fn test_store_url_validates_format() {
        let url = StoreUrl::new("https://shop.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), "shop.example.com");

        let url = StoreUrl::new("http://localhost:8080").unwrap();
        assert_eq!(url.host_name(), "localhost");
        assert_eq!(url.as_ref(), "http://localhost:8080");

        let url = StoreUrl::new("https://example.com/shop/").unwrap();
        assert_eq!(url.as_ref(), "https://example.com/shop");
    }

    #[test]
    fn test_store_url_rejects_invalid() {
        assert!(StoreUrl::new("shop.example.com").is_err());
        assert!(StoreUrl::new("https://").is_err());
        assert!(StoreUrl::new("://example.com").is_err());
        assert!(StoreUrl::new("https:///path").is_err());
    }
}
