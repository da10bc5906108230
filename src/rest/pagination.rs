//! Paginated list fetching.
//!
//! List endpoints take `page`, `per_page`, `orderby` and `order` query
//! parameters and report totals in the `X-WP-Total` and `X-WP-TotalPages`
//! response headers. [`fetch_paginated`] turns one such call into a
//! [`PaginatedResult`].
//!
//! Totals are read from the headers only. When a header is missing or
//! malformed the total is 0; it is never inferred from the number of items
//! returned.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

use serde::de::DeserializeOwned;

use crate::clients::{CacheHint, HttpResponse, RestClient};
use crate::rest::ResourceError;

/// Sort direction for list requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortOrder {
    /// Returns the query parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one page of a list request.
///
/// Unset fields fall back to the client's defaults (page size 12, ordered
/// by `date`, descending, unless configured otherwise).
///
/// ```rust
/// use storefront_api::rest::{PageQuery, SortOrder};
/// use storefront_api::clients::CacheHint;
/// use std::time::Duration;
///
/// let query = PageQuery::new()
///     .page(2)
///     .per_page(24)
///     .order(SortOrder::Asc)
///     .param("category", "15")
///     .cache(CacheHint::revalidate(Duration::from_secs(600)).tag("products"));
/// assert_eq!(query.page_number(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageQuery {
    page: Option<u32>,
    per_page: Option<u32>,
    order_by: Option<String>,
    order: Option<SortOrder>,
    params: BTreeMap<String, String>,
    cache: Option<CacheHint>,
}

impl PageQuery {
    /// Creates a query for the first page with client defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the 1-based page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Sets the sort field (e.g., `date`, `price`, `title`).
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    /// Sets the sort direction.
    #[must_use]
    pub const fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Adds an endpoint-specific filter parameter.
    ///
    /// The paging keys `page`, `per_page`, `orderby` and `order` are routed to
    /// their typed setters, so the last value given for one of them wins
    /// whichever way it was set. A paging value that does not parse is
    /// dropped with a warning.
    ///
    /// ```rust
    /// use storefront_api::rest::PageQuery;
    ///
    /// assert_eq!(PageQuery::new().param("page", "4").page_number(), 4);
    /// assert_eq!(PageQuery::new().param("page", "4").page(2).page_number(), 2);
    /// ```
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();

        match key.as_str() {
            "page" => match value.parse() {
                Ok(page) => self.page = Some(page),
                Err(_) => Self::ignore_paging_value(&key, &value),
            },
            "per_page" => match value.parse() {
                Ok(per_page) => self.per_page = Some(per_page),
                Err(_) => Self::ignore_paging_value(&key, &value),
            },
            "orderby" => self.order_by = Some(value),
            "order" => match value.to_ascii_lowercase().as_str() {
                "asc" => self.order = Some(SortOrder::Asc),
                "desc" => self.order = Some(SortOrder::Desc),
                _ => Self::ignore_paging_value(&key, &value),
            },
            _ => {
                self.params.insert(key, value);
            }
        }
        self
    }

    fn ignore_paging_value(key: &str, value: &str) {
        tracing::warn!(key = %key, value = %value, "Ignoring unparseable paging parameter");
    }

    /// Attaches cache metadata to the request and the result.
    #[must_use]
    pub fn cache(mut self, hint: CacheHint) -> Self {
        self.cache = Some(hint);
        self
    }

    /// Returns the requested page, at least 1.
    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Resolves the query against the client's defaults.
    ///
    /// Returns the effective page size and the full parameter map.
    fn resolve(&self, client: &RestClient) -> (u32, BTreeMap<String, String>) {
        let per_page = self
            .per_page
            .unwrap_or_else(|| client.default_page_size())
            .max(1);
        let order_by = self
            .order_by
            .clone()
            .unwrap_or_else(|| client.default_order_by().to_string());
        let order = self.order.unwrap_or_else(|| client.default_order());

        let mut params = self.params.clone();
        params.insert("page".to_string(), self.page_number().to_string());
        params.insert("per_page".to_string(), per_page.to_string());
        params.insert("orderby".to_string(), order_by);
        params.insert("order".to_string(), order.to_string());

        (per_page, params)
    }
}

/// One page of a list request.
///
/// Derefs to the slice of items.
#[derive(Clone, Debug)]
pub struct PaginatedResult<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total item count across all pages, from `X-WP-Total`.
    pub total: u64,
    /// Total page count, from `X-WP-TotalPages`.
    pub total_pages: u64,
    /// The page that was requested.
    pub page: u32,
    /// The page size that was requested.
    pub per_page: u32,
    /// Cache metadata from the query.
    pub cache: Option<CacheHint>,
}

impl<T> PaginatedResult<T> {
    /// Returns `true` if a later page exists.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }

    /// Returns `true` if an earlier page exists.
    #[must_use]
    pub const fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    /// Consumes the result and returns the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: DeserializeOwned> PaginatedResult<T> {
    /// Builds a page from a list response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deserialize`] if the body is not an array of `T`.
    pub fn from_http_response(
        response: HttpResponse,
        page: u32,
        per_page: u32,
        resource: &'static str,
    ) -> Result<Self, ResourceError> {
        let items: Vec<T> = serde_json::from_value(response.body)
            .map_err(|source| ResourceError::Deserialize { resource, source })?;

        Ok(Self {
            items,
            total: response.total.unwrap_or(0),
            total_pages: response.total_pages.unwrap_or(0),
            page,
            per_page,
            cache: response.cache,
        })
    }
}

impl<T> Deref for PaginatedResult<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

/// Fetches one page of `endpoint`.
///
/// # Errors
///
/// Returns [`ResourceError::Rest`] for request failures and
/// [`ResourceError::Deserialize`] if the items do not match `T`.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_api::rest::{fetch_paginated, PageQuery};
///
/// let page: PaginatedResult<Product> =
///     fetch_paginated(&client, "products", &PageQuery::new().page(2), "Product").await?;
/// println!("page {} of {}", page.page, page.total_pages);
/// ```
pub async fn fetch_paginated<T: DeserializeOwned>(
    client: &RestClient,
    endpoint: &str,
    query: &PageQuery,
    resource: &'static str,
) -> Result<PaginatedResult<T>, ResourceError> {
    let (per_page, params) = query.resolve(client);
    let page = query.page_number();

    let response = client
        .get_cached(endpoint, Some(params), query.cache.clone())
        .await?;

    tracing::debug!(
        endpoint,
        page,
        per_page,
        total = ?response.total,
        total_pages = ?response.total_pages,
        "Fetched list page"
    );

    PaginatedResult::from_http_response(response, page, per_page, resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{TOTAL_HEADER, TOTAL_PAGES_HEADER};
    use serde_json::json;
    use std::collections::HashMap;

    fn response_with_headers(headers: &[(&str, &str)], body: serde_json::Value) -> HttpResponse {
        let mut map = HashMap::new();
        for (name, value) in headers {
            map.insert((*name).to_string(), vec![(*value).to_string()]);
        }
        HttpResponse::new(200, map, body)
    }

    #[test]
    fn test_totals_come_from_headers_not_items() {
        let response = response_with_headers(
            &[(TOTAL_HEADER, "40"), (TOTAL_PAGES_HEADER, "4")],
            json!([1, 2, 3]),
        );
        let result: PaginatedResult<u32> =
            PaginatedResult::from_http_response(response, 2, 10, "Product").unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result.total, 40);
        assert_eq!(result.total_pages, 4);
        assert!(result.has_next_page());
        assert!(result.has_prev_page());
    }

    #[test]
    fn test_missing_headers_yield_zero() {
        let response = response_with_headers(&[], json!([1, 2, 3]));
        let result: PaginatedResult<u32> =
            PaginatedResult::from_http_response(response, 1, 12, "Product").unwrap();

        assert_eq!(result.total, 0);
        assert_eq!(result.total_pages, 0);
        assert!(!result.has_next_page());
        assert!(!result.has_prev_page());
    }

    #[test]
    fn test_non_array_body_is_deserialize_error() {
        let response = response_with_headers(&[], json!({"id": 1}));
        let result = PaginatedResult::<u32>::from_http_response(response, 1, 12, "Product");
        assert!(matches!(result, Err(ResourceError::Deserialize { resource: "Product", .. })));
    }

    #[test]
    fn test_paging_keys_route_to_typed_fields() {
        let query = PageQuery::new()
            .param("page", "3")
            .param("per_page", "50")
            .param("orderby", "price")
            .param("order", "ASC")
            .param("category", "15");

        assert_eq!(query.page, Some(3));
        assert_eq!(query.per_page, Some(50));
        assert_eq!(query.order_by.as_deref(), Some("price"));
        assert_eq!(query.order, Some(SortOrder::Asc));
        assert_eq!(query.params.len(), 1);
        assert_eq!(query.params.get("category").map(String::as_str), Some("15"));
    }

    #[test]
    fn test_later_paging_setter_wins() {
        let query = PageQuery::new().per_page(10).param("per_page", "40");
        assert_eq!(query.per_page, Some(40));

        let query = PageQuery::new().param("order", "asc").order(SortOrder::Desc);
        assert_eq!(query.order, Some(SortOrder::Desc));
    }

    #[test]
    fn test_unparseable_paging_value_is_dropped() {
        let query = PageQuery::new().page(2).param("page", "last").param("order", "random");

        assert_eq!(query.page, Some(2));
        assert!(query.order.is_none());
        assert!(query.params.is_empty());
    }

    #[test]
    fn test_page_number_is_at_least_one() {
        assert_eq!(PageQuery::new().page_number(), 1);
        assert_eq!(PageQuery::new().page(0).page_number(), 1);
    }

    #[test]
    fn test_sort_order_names() {
        assert_eq!(SortOrder::Asc.to_string(), "asc");
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }
}
