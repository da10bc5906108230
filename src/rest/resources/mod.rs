//! Version-specific REST resource implementations.
//!
//! ```text
//! resources/
//!   mod.rs   <- re-exports the latest version
//!   v3/      <- wc/v3 resources
//! ```
//!
//! The latest version is re-exported here:
//!
//! ```rust,ignore
//! use storefront_api::rest::resources::Product;
//! // or, explicitly:
//! use storefront_api::rest::resources::v3::Product;
//! ```
//!
//! # Available Resources
//!
//! | Resource | Collection | Batch |
//! |----------|------------|-------|
//! | [`Product`] | `products` | yes |
//! | [`ProductVariation`] | `products/{product_id}/variations` | yes |
//! | [`ShippingZone`] | `shipping/zones` | no |
//! | [`ShippingZoneLocation`] | `shipping/zones/{zone_id}/locations` | no |

pub mod v3;

pub use v3::*;
