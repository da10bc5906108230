//! Configuration error types for the storefront API library.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! missing credential or malformed URL is reported before any request is
//! attempted.
//!
//! # Example
//!
//! ```rust
//! use storefront_api::{ConsumerKey, ConfigError};
//!
//! let result = ConsumerKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyConsumerKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building or loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Consumer key cannot be empty.
    #[error("Consumer key cannot be empty. Please provide a valid API consumer key.")]
    EmptyConsumerKey,

    /// Consumer secret cannot be empty.
    #[error("Consumer secret cannot be empty. Please provide a valid API consumer secret.")]
    EmptyConsumerSecret,

    /// Store URL is invalid.
    #[error("Invalid store URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://shop.example.com').")]
    InvalidStoreUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected 'wc/v1', 'wc/v2' or 'wc/v3'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A required environment variable is not set.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable is set but its value cannot be used.
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar {
        /// The variable name.
        var: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The underlying HTTP transport could not be initialized.
    #[error("Failed to initialize HTTP transport: {reason}")]
    Transport {
        /// The transport error message.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_consumer_key_error_message() {
        let message = ConfigError::EmptyConsumerKey.to_string();
        assert!(message.contains("Consumer key cannot be empty"));
    }

    #[test]
    fn test_invalid_store_url_error_message() {
        let error = ConfigError::InvalidStoreUrl {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("scheme and host"));
    }

    #[test]
    fn test_missing_env_var_names_variable() {
        let error = ConfigError::MissingEnvVar("COMMERCE_CONSUMER_KEY".to_string());
        assert!(error.to_string().contains("COMMERCE_CONSUMER_KEY"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyConsumerSecret;
        let _: &dyn std::error::Error = &error;
    }
}
