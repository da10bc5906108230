//! Product variation resource implementation.
//!
//! Variations are nested under a product. The parent id is not part of the
//! upstream body, so it is tracked on the struct and restored by the
//! nested operations.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api::rest::{PageQuery, RestResource};
//! use storefront_api::rest::resources::ProductVariation;
//!
//! let page = ProductVariation::all_with_parent(&client, "product_id", 794, &PageQuery::new()).await?;
//! for variation in page.iter() {
//!     println!("{:?} {}", variation.id, variation.stock_status);
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::common::{ProductImage, StockStatus};
use crate::rest::{ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

/// The option a variation binds for one attribute.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct VariationAttribute {
    /// Global attribute id, 0 for custom attributes.
    #[serde(default)]
    pub id: u64,
    /// Attribute name (e.g., "Color").
    pub name: String,
    /// Selected option (e.g., "Red").
    pub option: String,
}

/// A product variation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProductVariation {
    /// The unique identifier. Sent only in batch updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// The parent product id. Not part of the upstream body.
    #[serde(skip)]
    pub product_id: Option<u64>,

    /// Stock keeping unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Description (HTML).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Current price. Read-only.
    #[serde(default, skip_serializing)]
    pub price: Option<String>,

    /// Regular price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<String>,

    /// Sale price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<String>,

    /// Whether the variation is on sale. Read-only.
    #[serde(default, skip_serializing)]
    pub on_sale: bool,

    /// Stock status.
    #[serde(default, skip_serializing_if = "StockStatus::is_other")]
    pub stock_status: StockStatus,

    /// Stock quantity, when stock is managed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,

    /// Variation image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ProductImage>,

    /// Bound options. An attribute missing here matches any option.
    #[serde(default)]
    pub attributes: Vec<VariationAttribute>,
}

impl ProductVariation {
    /// Returns the option bound for `attribute`, compared case-insensitively.
    #[must_use]
    pub fn option_for(&self, attribute: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(attribute))
            .map(|a| a.option.as_str())
    }
}

impl RestResource for ProductVariation {
    type Id = u64;
    type FindParams = VariationFindParams;

    const NAME: &'static str = "ProductVariation";
    const PLURAL: &'static str = "variations";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["product_id", "id"],
            "products/{product_id}/variations/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::All,
            &["product_id"],
            "products/{product_id}/variations",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &["product_id"],
            "products/{product_id}/variations",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["product_id", "id"],
            "products/{product_id}/variations/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Patch,
            &["product_id", "id"],
            "products/{product_id}/variations/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["product_id", "id"],
            "products/{product_id}/variations/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Batch,
            &["product_id"],
            "products/{product_id}/variations/batch",
        ),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }

    fn parent_ids(&self) -> Vec<(&'static str, String)> {
        self.product_id
            .map(|id| vec![("product_id", id.to_string())])
            .unwrap_or_default()
    }

    fn set_parent_id(&mut self, name: &str, value: &str) {
        if name == "product_id" {
            self.product_id = value.parse().ok();
        }
    }
}

/// Query parameters for finding a single variation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct VariationFindParams {
    /// Response context: "view" or "edit".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}
