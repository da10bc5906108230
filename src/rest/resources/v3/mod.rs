//! Resources of the `wc/v3` API.

mod common;
mod product;
mod shipping_zone;
mod variation;

pub use common::{ProductImage, StockStatus, TermRef};
pub use product::{Product, ProductAttribute, ProductFindParams, ProductType};
pub use shipping_zone::{
    LocationKind, ShippingZone, ShippingZoneLocation, FALLBACK_ZONE_ID,
};
pub use variation::{ProductVariation, VariationAttribute, VariationFindParams};

pub(crate) use shipping_zone::locations_from_value;
