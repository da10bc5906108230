//! Types shared by several `wc/v3` resources.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock status of a product or variation.
///
/// Unknown values from plugins, and records without a status, deserialize as
/// [`StockStatus::Other`]. `Other` is never sent back: it is left out of
/// request bodies so the store keeps (or defaults) its own value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    /// In stock and purchasable.
    InStock,
    /// Out of stock.
    OutOfStock,
    /// Out of stock but accepting backorders.
    OnBackorder,
    /// Any status this library does not know, or none at all.
    #[default]
    #[serde(other)]
    Other,
}

impl StockStatus {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "instock",
            Self::OutOfStock => "outofstock",
            Self::OnBackorder => "onbackorder",
            Self::Other => "other",
        }
    }

    /// Returns `true` for [`StockStatus::Other`].
    #[must_use]
    pub const fn is_other(&self) -> bool {
        matches!(self, Self::Other)
    }

    /// Returns `true` only for [`StockStatus::InStock`].
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        matches!(self, Self::InStock)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image attached to a product or variation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductImage {
    /// Image id. Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Image name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Alternative text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// A reference to a taxonomy term (category or tag).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TermRef {
    /// Term id.
    pub id: u64,
    /// Term name. Read-only.
    #[serde(default, skip_serializing)]
    pub name: Option<String>,
    /// Term slug. Read-only.
    #[serde(default, skip_serializing)]
    pub slug: Option<String>,
}
