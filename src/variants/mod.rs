//! Variant selection for variable products.
//!
//! A variable product declares attributes (color, size, ...) and a sparse
//! matrix of variations, each binding some of those attributes. Given the
//! shopper's [`AttributeSelection`], [`VariantMatcher`] answers two
//! questions: which variation is selected, and which options can still be
//! bought.
//!
//! ```rust,ignore
//! use storefront_api::rest::{PageQuery, RestResource};
//! use storefront_api::rest::resources::{Product, ProductVariation};
//! use storefront_api::variants::{AttributeSelection, VariantMatcher};
//!
//! let product = Product::find(&client, 794, None).await?.into_inner();
//! let variations = ProductVariation::all_with_parent(&client, "product_id", 794, &PageQuery::new().per_page(100))
//!     .await?
//!     .into_items();
//!
//! let matcher = VariantMatcher::new(&product, &variations);
//! let mut selection = AttributeSelection::new();
//! selection.select("Color", "Red");
//! selection.select("Size", "M");
//!
//! if let Some(variation) = matcher.find_variant(&selection) {
//!     println!("{:?} costs {:?}", variation.id, variation.price);
//! }
//! ```

mod matcher;
mod presentation;
mod selection;

pub use matcher::{AttributeState, OptionState, VariantAttribute, VariantMatcher};
pub use presentation::{PresentationKind, PresentationTable};
pub use selection::AttributeSelection;
