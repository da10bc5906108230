//! REST API namespace versions exposed by the upstream store.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Version of the upstream REST namespace.
///
/// The version determines the path prefix of every request, e.g.
/// `/wp-json/wc/v3/products`.
///
/// ```rust
/// use storefront_api::ApiVersion;
///
/// let version: ApiVersion = "wc/v3".parse().unwrap();
/// assert_eq!(version, ApiVersion::latest());
/// assert_eq!(version.to_string(), "wc/v3");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// Legacy `wc/v1` namespace.
    V1,
    /// `wc/v2` namespace.
    V2,
    /// `wc/v3` namespace, the current one.
    V3,
}

impl ApiVersion {
    /// Returns the latest namespace version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V3
    }

    /// Returns the namespace string used in request paths.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "wc/v1",
            Self::V2 => "wc/v2",
            Self::V3 => "wc/v3",
        }
    }

    /// Returns `true` if the namespace supports the batch endpoints.
    #[must_use]
    pub const fn supports_batch(&self) -> bool {
        !matches!(self, Self::V1)
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_matches('/').to_ascii_lowercase().as_str() {
            "wc/v1" | "v1" => Ok(Self::V1),
            "wc/v2" | "v2" => Ok(Self::V2),
            "wc/v3" | "v3" => Ok(Self::V3),
            _ => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_short_and_full_forms() {
        assert_eq!("v2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
        assert_eq!("/wc/v3/".parse::<ApiVersion>().unwrap(), ApiVersion::V3);
        assert_eq!("WC/V1".parse::<ApiVersion>().unwrap(), ApiVersion::V1);
    }

    #[test]
    fn test_parse_rejects_unknown_versions() {
        assert!(matches!(
            "wc/v9".parse::<ApiVersion>(),
            Err(ConfigError::InvalidApiVersion { version }) if version == "wc/v9"
        ));
    }

    #[test]
    fn test_batch_support() {
        assert!(!ApiVersion::V1.supports_batch());
        assert!(ApiVersion::V3.supports_batch());
    }
}
