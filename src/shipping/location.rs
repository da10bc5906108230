//! Compiled zone location rules.
//!
//! Location codes are parsed once when a resolver is built, so matching a
//! postcode never re-parses ranges or recompiles wildcard patterns.

use regex::Regex;

use crate::rest::resources::{LocationKind, ShippingZoneLocation};

/// Delimiters that turn a postcode code into a numeric range.
const RANGE_DELIMITERS: [&str; 2] = ["...", "-"];

/// Wildcard character in postcode codes.
const WILDCARD: char = '*';

/// Normalizes a postcode: all whitespace removed, uppercased.
#[must_use]
pub fn normalize_postcode(postcode: &str) -> String {
    postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Normalizes a country code: trimmed, uppercased.
#[must_use]
pub fn normalize_country(country: &str) -> String {
    country.trim().to_uppercase()
}

/// How a single location code is tested against input.
#[derive(Debug, Clone)]
pub(crate) enum LocationRule {
    /// Exact normalized postcode.
    PostcodeExact(String),
    /// Inclusive numeric postcode range.
    PostcodeRange { low: u64, high: u64 },
    /// Anchored wildcard pattern.
    PostcodeWildcard(Regex),
    /// Country code, already uppercased.
    Country(String),
    /// A rule that can never match: state and continent locations, or a
    /// postcode code that failed to parse.
    Inert,
}

impl LocationRule {
    /// Compiles a location record.
    pub(crate) fn compile(location: &ShippingZoneLocation) -> Self {
        match location.kind {
            LocationKind::Postcode => compile_postcode(&location.code),
            LocationKind::Country => Self::Country(normalize_country(&location.code)),
            LocationKind::State | LocationKind::Continent => Self::Inert,
        }
    }

    /// Tests normalized input against this rule.
    pub(crate) fn matches(&self, postcode: &str, country: &str) -> bool {
        match self {
            Self::PostcodeExact(code) => !postcode.is_empty() && code == postcode,
            Self::PostcodeRange { low, high } => postcode
                .parse::<u64>()
                .is_ok_and(|value| (*low..=*high).contains(&value)),
            Self::PostcodeWildcard(pattern) => !postcode.is_empty() && pattern.is_match(postcode),
            Self::Country(code) => !country.is_empty() && code == country,
            Self::Inert => false,
        }
    }
}

fn compile_postcode(code: &str) -> LocationRule {
    let code = normalize_postcode(code);

    if let Some((low, high)) = RANGE_DELIMITERS
        .iter()
        .find_map(|delimiter| code.split_once(delimiter))
    {
        return match (low.parse::<u64>(), high.parse::<u64>()) {
            (Ok(low), Ok(high)) => LocationRule::PostcodeRange { low, high },
            _ => {
                tracing::debug!(code = %code, "Ignoring malformed postcode range");
                LocationRule::Inert
            }
        };
    }

    if code.contains(WILDCARD) {
        let pattern = code
            .split(WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        return match Regex::new(&format!("^{pattern}$")) {
            Ok(regex) => LocationRule::PostcodeWildcard(regex),
            Err(error) => {
                tracing::debug!(code = %code, %error, "Ignoring invalid postcode pattern");
                LocationRule::Inert
            }
        };
    }

    LocationRule::PostcodeExact(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postcode(code: &str) -> LocationRule {
        LocationRule::compile(&ShippingZoneLocation::new(LocationKind::Postcode, code))
    }

    #[test]
    fn test_normalization() {
        assert_eq!(normalize_postcode(" sw1a 1aa "), "SW1A1AA");
        assert_eq!(normalize_country(" se "), "SE");
    }

    #[test]
    fn test_exact_postcode() {
        let rule = postcode("111 22");
        assert!(rule.matches("11122", ""));
        assert!(!rule.matches("11123", ""));
        assert!(!rule.matches("", ""));
    }

    #[test]
    fn test_range_with_either_delimiter() {
        for code in ["11100...11199", "11100-11199"] {
            let rule = postcode(code);
            assert!(rule.matches("11100", ""));
            assert!(rule.matches("11150", ""));
            assert!(rule.matches("11199", ""));
            assert!(!rule.matches("11200", ""));
        }
    }

    #[test]
    fn test_range_rejects_non_numeric_input() {
        assert!(!postcode("11100...11199").matches("SW1A", ""));
    }

    #[test]
    fn test_malformed_range_never_matches() {
        let rule = postcode("AB1...AB9");
        assert!(matches!(rule, LocationRule::Inert));
        assert!(!rule.matches("AB5", ""));
    }

    #[test]
    fn test_wildcard_is_anchored() {
        let rule = postcode("111*");
        assert!(rule.matches("11199", ""));
        assert!(rule.matches("11100", ""));
        assert!(!rule.matches("22199", ""));
        assert!(!rule.matches("011199", ""));
    }

    #[test]
    fn test_wildcard_escapes_other_characters() {
        let rule = postcode("SW1A.*");
        assert!(rule.matches("SW1A.1AA", ""));
        assert!(!rule.matches("SW1AX1AA", ""));
    }

    #[test]
    fn test_country_ignores_postcode() {
        let rule = LocationRule::compile(&ShippingZoneLocation::new(LocationKind::Country, "se"));
        assert!(rule.matches("", "SE"));
        assert!(rule.matches("11122", "SE"));
        assert!(!rule.matches("11122", "NO"));
    }

    #[test]
    fn test_state_and_continent_are_inert() {
        for kind in [LocationKind::State, LocationKind::Continent] {
            let rule = LocationRule::compile(&ShippingZoneLocation::new(kind, "EU"));
            assert!(!rule.matches("EU", "EU"));
        }
    }
}
