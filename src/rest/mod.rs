//! REST resource layer.
//!
//! - **[`RestResource`]**: CRUD and batch operations from a path table
//! - **[`PageQuery`] / [`PaginatedResult`]**: page-number pagination with
//!   totals read from response headers
//! - **[`BatchRequest`] / [`BatchResult`]**: non-atomic batch writes with
//!   per-entry outcomes
//! - **[`safe`]**: turn a failed call into `None` plus a log entry
//! - **[`resources`]**: typed store resources (products, variations,
//!   shipping zones)
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api::rest::{safe, PageQuery, RestResource};
//! use storefront_api::rest::resources::Product;
//!
//! let page = Product::all(&client, &PageQuery::new().per_page(24)).await?;
//! println!("page {} of {}", page.page, page.total_pages);
//!
//! // Degrade to an empty block when the store is unreachable.
//! let featured = safe("products", Product::all(&client, &PageQuery::new().param("featured", "true")))
//!     .await
//!     .map(|page| page.into_items())
//!     .unwrap_or_default();
//! ```

mod batch;
mod errors;
mod pagination;
mod path;
mod resource;
mod response;
mod safe;

pub mod resources;

pub use batch::{BatchItemError, BatchRequest, BatchResult};
pub use errors::ResourceError;
pub use pagination::{fetch_paginated, PageQuery, PaginatedResult, SortOrder};
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use resource::RestResource;
pub use response::ResourceResponse;
pub use safe::{safe, safe_or_default, ClassifiedError};
