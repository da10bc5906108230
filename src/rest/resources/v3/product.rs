//! Product resource implementation.
//!
//! A product declares its attributes; those flagged `variation: true` are
//! the axes along which its variations differ (see
//! [`VariantMatcher`](crate::variants::VariantMatcher)).
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api::rest::{PageQuery, RestResource};
//! use storefront_api::rest::resources::Product;
//!
//! let product = Product::find(&client, 794, None).await?;
//! println!("{}: {} variations", product.name, product.variations.len());
//!
//! let on_sale = Product::all(&client, &PageQuery::new().param("on_sale", "true")).await?;
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::common::{ProductImage, StockStatus, TermRef};
use crate::rest::{ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

/// Product type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// A single purchasable item.
    #[default]
    Simple,
    /// A product with variations.
    Variable,
    /// A set of other products.
    Grouped,
    /// A product sold elsewhere.
    External,
}

/// An attribute declared on a product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductAttribute {
    /// Global attribute id, 0 for custom attributes.
    #[serde(default)]
    pub id: u64,
    /// Display name (e.g., "Color").
    pub name: String,
    /// Sort position.
    #[serde(default)]
    pub position: u32,
    /// Shown on the product page.
    #[serde(default)]
    pub visible: bool,
    /// Used to define variations.
    #[serde(default)]
    pub variation: bool,
    /// Available option values, in display order.
    #[serde(default)]
    pub options: Vec<String>,
}

/// A product in the store catalog.
///
/// Prices are strings, as the upstream sends them. Read-only fields are
/// skipped when serializing a write body.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Product {
    /// The unique identifier. Sent only in batch updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Product name.
    #[serde(default)]
    pub name: String,

    /// URL slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Public URL. Read-only.
    #[serde(default, skip_serializing)]
    pub permalink: Option<String>,

    /// Product type.
    #[serde(rename = "type", default)]
    pub product_type: ProductType,

    /// Publication status (e.g., "publish", "draft").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Whether the product is featured.
    #[serde(default)]
    pub featured: bool,

    /// Full description (HTML).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Short description (HTML).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    /// Stock keeping unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Current price. Read-only.
    #[serde(default, skip_serializing)]
    pub price: Option<String>,

    /// Regular price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<String>,

    /// Sale price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<String>,

    /// Whether the product is on sale. Read-only.
    #[serde(default, skip_serializing)]
    pub on_sale: bool,

    /// Stock status.
    #[serde(default, skip_serializing_if = "StockStatus::is_other")]
    pub stock_status: StockStatus,

    /// Stock quantity, when stock is managed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,

    /// Categories.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<TermRef>,

    /// Tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TermRef>,

    /// Images; the first is the featured image.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ProductImage>,

    /// Declared attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<ProductAttribute>,

    /// Ids of the product's variations. Read-only.
    #[serde(default, skip_serializing)]
    pub variations: Vec<u64>,

    /// Creation time in the store's timezone. Read-only.
    #[serde(default, skip_serializing)]
    pub date_created: Option<NaiveDateTime>,

    /// Last modification time in the store's timezone. Read-only.
    #[serde(default, skip_serializing)]
    pub date_modified: Option<NaiveDateTime>,
}

impl Product {
    /// Returns the attributes flagged as defining variations.
    pub fn variation_attributes(&self) -> impl Iterator<Item = &ProductAttribute> {
        self.attributes.iter().filter(|a| a.variation)
    }
}

impl RestResource for Product {
    type Id = u64;
    type FindParams = ProductFindParams;

    const NAME: &'static str = "Product";
    const PLURAL: &'static str = "products";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "products/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "products"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "products"),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "products/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Patch,
            &["id"],
            "products/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "products/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Batch,
            &[],
            "products/batch",
        ),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }
}

/// Query parameters for finding a single product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductFindParams {
    /// Response context: "view" or "edit".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::get_path;

    const PRODUCT_JSON: &str = r#"{
        "id": 794,
        "name": "Linen Shirt",
        "slug": "linen-shirt",
        "permalink": "https://shop.example.com/product/linen-shirt/",
        "type": "variable",
        "status": "publish",
        "featured": false,
        "price": "39.00",
        "regular_price": "",
        "sale_price": "",
        "on_sale": false,
        "stock_status": "instock",
        "stock_quantity": null,
        "categories": [{"id": 9, "name": "Shirts", "slug": "shirts"}],
        "images": [{"id": 792, "src": "https://shop.example.com/shirt.jpg", "name": "", "alt": ""}],
        "attributes": [
            {"id": 6, "name": "Color", "position": 0, "visible": true, "variation": true, "options": ["Red", "Blue"]},
            {"id": 0, "name": "Material", "position": 1, "visible": true, "variation": false, "options": ["Linen"]}
        ],
        "variations": [795, 796],
        "date_created": "2024-03-01T10:15:00",
        "date_modified": "2024-03-02T08:00:00"
    }"#;

    #[test]
    fn test_product_deserialization_from_api_response() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();

        assert_eq!(product.id, Some(794));
        assert_eq!(product.product_type, ProductType::Variable);
        assert_eq!(product.stock_status, StockStatus::InStock);
        assert_eq!(product.categories[0].name.as_deref(), Some("Shirts"));
        assert_eq!(product.variations, vec![795, 796]);
        assert!(product.date_created.is_some());

        let names: Vec<_> = product.variation_attributes().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Color"]);
    }

    #[test]
    fn test_product_serialization_omits_read_only_fields() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        let body = serde_json::to_value(&product).unwrap();

        assert_eq!(body["name"], "Linen Shirt");
        assert_eq!(body["type"], "variable");
        assert_eq!(body["categories"], serde_json::json!([{"id": 9}]));
        assert!(body.get("permalink").is_none());
        assert!(body.get("price").is_none());
        assert!(body.get("variations").is_none());
        assert!(body.get("date_created").is_none());
    }

    #[test]
    fn test_product_paths() {
        let find = get_path(Product::PATHS, ResourceOperation::Find, &["id"]).unwrap();
        assert_eq!(find.template, "products/{id}");

        let batch = get_path(Product::PATHS, ResourceOperation::Batch, &[]).unwrap();
        assert_eq!(batch.template, "products/batch");
        assert_eq!(batch.http_method, HttpMethod::Post);
    }
}
