//! Path templates for REST resources.
//!
//! Resources declare their endpoints as a constant table of [`ResourcePath`]
//! entries. Nested resources such as product variations or zone locations
//! list the parent id first:
//!
//! - `products/{product_id}/variations/{id}`
//! - `shipping/zones/{zone_id}/locations`
//!
//! [`get_path`] picks the most specific template whose ids are all
//! available, and [`build_path`] fills the placeholders.
//!
//! # Example
//!
//! ```rust
//! use storefront_api::rest::{build_path, get_path, ResourceOperation, ResourcePath};
//! use storefront_api::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::Find,
//!         &["product_id", "id"],
//!         "products/{product_id}/variations/{id}",
//!     ),
//!     ResourcePath::new(
//!         HttpMethod::Post,
//!         ResourceOperation::Batch,
//!         &["product_id"],
//!         "products/{product_id}/variations/batch",
//!     ),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::Find, &["product_id", "id"]).unwrap();
//!
//! let mut ids = HashMap::new();
//! ids.insert("product_id", "10");
//! ids.insert("id", "11");
//! assert_eq!(build_path(path.template, &ids), "products/10/variations/11");
//! ```

use crate::clients::HttpMethod;
use std::collections::HashMap;
use std::fmt::Display;

/// Operations that can be performed on a REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// GET one resource by id.
    Find,
    /// GET a page of resources.
    All,
    /// POST a new resource.
    Create,
    /// PUT a full update.
    Update,
    /// PATCH a partial update.
    Patch,
    /// DELETE a resource.
    Delete,
    /// POST `{create, update, delete}` to the collection's batch endpoint.
    Batch,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Find | Self::All => HttpMethod::Get,
            Self::Create | Self::Batch => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
            Self::Patch => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::All => "all",
            Self::Create => "create",
            Self::Update => "update",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Batch => "batch",
        }
    }
}

/// A path template for one resource operation.
///
/// Templates use `{id_name}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Required id parameters, outermost first (e.g., `["product_id", "id"]`).
    pub ids: &'static [&'static str],
    /// The URL template with `{id}` placeholders.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`. Usable in constants.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            ids,
            template,
        }
    }

    /// Returns the number of required ids for this path.
    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Checks if all required ids are available.
    #[must_use]
    pub fn matches_ids(&self, available_ids: &[&str]) -> bool {
        self.ids.iter().all(|id| available_ids.contains(id))
    }
}

/// Selects the most specific path for an operation whose ids are all
/// available. Returns `None` if no path matches.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available_ids: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_ids(available_ids))
        .max_by_key(|p| p.id_count())
}

/// Fills `{name}` placeholders in `template`.
///
/// Values are percent-encoded, so an id can never add a path segment.
/// Placeholders without a value are left untouched.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        let value = value.to_string();
        result = result.replace(&placeholder, &urlencoding::encode(&value));
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};
