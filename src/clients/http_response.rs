//! HTTP response types.
//!
//! Bodies are parsed into a [`ParsedBody`] value rather than failing inside
//! the transport: an HTML error page from a proxy is an expected condition,
//! and callers branch on `ParsedBody::Invalid` instead of catching a decode
//! error.

use std::collections::HashMap;

use serde::Deserialize;

use crate::clients::CacheHint;

/// Header carrying the total number of items across all pages.
pub const TOTAL_HEADER: &str = "x-wp-total";

/// Header carrying the total number of pages.
pub const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";

/// Maximum length of the raw body kept on a parse failure.
const SNIPPET_LEN: usize = 200;

/// Result of parsing a response body.
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedBody {
    /// The body was valid JSON.
    Json(serde_json::Value),
    /// The body was empty or whitespace only.
    Empty,
    /// The body was not JSON. Holds the leading part of the raw text.
    Invalid {
        /// Up to 200 characters of the raw body.
        snippet: String,
    },
}

impl ParsedBody {
    /// Parses raw body text.
    ///
    /// ```rust
    /// use storefront_api::clients::ParsedBody;
    ///
    /// assert!(matches!(ParsedBody::parse(r#"{"id": 1}"#), ParsedBody::Json(_)));
    /// assert!(matches!(
    ///     ParsedBody::parse("<html>Bad Gateway</html>"),
    ///     ParsedBody::Invalid { .. }
    /// ));
    /// assert_eq!(ParsedBody::parse(""), ParsedBody::Empty);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::Empty;
        }
        serde_json::from_str(text).map_or_else(
            |_| Self::Invalid {
                snippet: text.chars().take(SNIPPET_LEN).collect(),
            },
            Self::Json,
        )
    }

    /// Returns the upstream error payload, if the body has that shape.
    #[must_use]
    pub fn error_payload(&self) -> Option<ErrorPayload> {
        match self {
            Self::Json(value) => ErrorPayload::deserialize(value).ok(),
            Self::Empty | Self::Invalid { .. } => None,
        }
    }
}

/// Error body returned by the upstream on non-2xx responses.
///
/// Shape: `{ "message": string, "code": string, "data"?: { "status"?, "details"? } }`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ErrorPayload {
    /// Human-readable message.
    pub message: String,
    /// Machine-readable error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Optional extra data.
    #[serde(default)]
    pub data: Option<ErrorData>,
}

/// The `data` member of an [`ErrorPayload`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ErrorData {
    /// Status echoed by the upstream.
    #[serde(default)]
    pub status: Option<u16>,
    /// Structured details, e.g. per-field validation messages.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// A successful response from the upstream API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased names (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed JSON body.
    pub body: serde_json::Value,
    /// Total item count from [`TOTAL_HEADER`].
    pub total: Option<u64>,
    /// Total page count from [`TOTAL_PAGES_HEADER`].
    pub total_pages: Option<u64>,
    /// Cache metadata forwarded from the request.
    pub cache: Option<CacheHint>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, reading pagination totals from the headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let total = Self::numeric_header(&headers, TOTAL_HEADER);
        let total_pages = Self::numeric_header(&headers, TOTAL_PAGES_HEADER);

        Self {
            code,
            headers,
            body,
            total,
            total_pages,
            cache: None,
        }
    }

    /// Attaches cache metadata.
    #[must_use]
    pub fn with_cache(mut self, cache: Option<CacheHint>) -> Self {
        self.cache = cache;
        self
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, by lowercase name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    fn numeric_header(headers: &HashMap<String, Vec<String>>, name: &str) -> Option<u64> {
        headers
            .get(name)
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse().ok())
    }
}
