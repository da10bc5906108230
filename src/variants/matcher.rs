//! Matching a selection against a product's variation matrix.

use crate::rest::resources::{Product, ProductVariation};

use super::presentation::{PresentationKind, PresentationTable};
use super::selection::AttributeSelection;

/// An attribute the shopper has to choose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantAttribute {
    /// Attribute name.
    pub name: String,
    /// Options in display order.
    pub options: Vec<String>,
    /// How the options are presented.
    pub presentation: PresentationKind,
}

/// One option as the storefront should render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionState {
    /// Option value.
    pub value: String,
    /// Some in-stock variation can be bought with this option.
    pub available: bool,
    /// Currently chosen.
    pub selected: bool,
}

/// An attribute with the state of each of its options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeState {
    /// Attribute name.
    pub name: String,
    /// How the options are presented.
    pub presentation: PresentationKind,
    /// Options in display order.
    pub options: Vec<OptionState>,
}

/// Finds the variation matching a selection.
///
/// Variations are tried most specific first (most bound attributes), so an
/// exact combination beats a variation that leaves an attribute open ("any
/// size"). A variation with no bindings matches every complete selection.
///
/// ```rust
/// use storefront_api::rest::resources::{Product, ProductAttribute, ProductVariation, VariationAttribute};
/// use storefront_api::variants::{AttributeSelection, VariantMatcher};
///
/// let product = Product {
///     attributes: vec![ProductAttribute {
///         name: "Color".into(),
///         variation: true,
///         options: vec!["Red".into(), "Blue".into()],
///         ..Default::default()
///     }],
///     ..Default::default()
/// };
/// let red = ProductVariation {
///     id: Some(11),
///     attributes: vec![VariationAttribute { id: 0, name: "Color".into(), option: "Red".into() }],
///     ..Default::default()
/// };
///
/// let variations = [red];
/// let matcher = VariantMatcher::new(&product, &variations);
/// let mut selection = AttributeSelection::new();
/// assert!(matcher.find_variant(&selection).is_none());
///
/// selection.select("Color", "Red");
/// assert_eq!(matcher.find_variant(&selection).and_then(|v| v.id), Some(11));
/// ```
#[derive(Debug, Clone)]
pub struct VariantMatcher<'a> {
    attributes: Vec<VariantAttribute>,
    candidates: Vec<&'a ProductVariation>,
}

impl<'a> VariantMatcher<'a> {
    /// Builds a matcher with every attribute presented as a dropdown.
    #[must_use]
    pub fn new(product: &Product, variations: &'a [ProductVariation]) -> Self {
        Self::with_presentation(product, variations, &PresentationTable::default())
    }

    /// Builds a matcher, assigning presentation kinds from `table`.
    ///
    /// When the product declares no attributes, they are derived from the
    /// variations' bindings in first-seen order.
    #[must_use]
    pub fn with_presentation(
        product: &Product,
        variations: &'a [ProductVariation],
        table: &PresentationTable,
    ) -> Self {
        let declared: Vec<(String, Vec<String>)> = if product.attributes.is_empty() {
            synthesize_attributes(variations)
        } else {
            product
                .variation_attributes()
                .map(|a| (a.name.clone(), a.options.clone()))
                .collect()
        };

        let attributes: Vec<VariantAttribute> = declared
            .into_iter()
            .map(|(name, options)| VariantAttribute {
                presentation: table.lookup(&name),
                name,
                options,
            })
            .collect();

        let mut candidates: Vec<&ProductVariation> = variations.iter().collect();
        candidates.sort_by(|a, b| b.attributes.len().cmp(&a.attributes.len()));

        if attributes.is_empty() {
            tracing::debug!(
                product_id = ?product.id,
                "Product has no variation attributes, matcher is inactive"
            );
        }

        Self {
            attributes,
            candidates,
        }
    }

    /// Returns `false` when the product has nothing to choose.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// The attributes the shopper has to choose, in display order.
    #[must_use]
    pub fn attributes(&self) -> &[VariantAttribute] {
        &self.attributes
    }

    /// Returns `true` once every attribute has a choice.
    #[must_use]
    pub fn is_complete(&self, selection: &AttributeSelection) -> bool {
        self.attributes
            .iter()
            .all(|attribute| selection.get(&attribute.name).is_some())
    }

    /// Returns the variation for a complete selection.
    ///
    /// `None` while any attribute is unchosen, when no variation matches,
    /// or when the matcher is inactive.
    #[must_use]
    pub fn find_variant(&self, selection: &AttributeSelection) -> Option<&'a ProductVariation> {
        if !self.is_active() || !self.is_complete(selection) {
            return None;
        }

        self.candidates.iter().copied().find(|variation| {
            variation
                .attributes
                .iter()
                .all(|binding| selection.get(&binding.name) == Some(binding.option.as_str()))
        })
    }

    /// Returns `true` if some in-stock variation can be bought with
    /// `option` for `attribute`.
    ///
    /// A variation qualifies when it binds `attribute` to `option` or leaves
    /// `attribute` open. Backordered variations do not count.
    #[must_use]
    pub fn is_option_available(&self, attribute: &str, option: &str) -> bool {
        self.candidates.iter().any(|variation| {
            variation.stock_status.is_in_stock()
                && variation
                    .option_for(attribute)
                    .map_or(true, |bound| bound == option)
        })
    }

    /// Every attribute with the availability and selection of each option.
    #[must_use]
    pub fn option_states(&self, selection: &AttributeSelection) -> Vec<AttributeState> {
        self.attributes
            .iter()
            .map(|attribute| AttributeState {
                name: attribute.name.clone(),
                presentation: attribute.presentation,
                options: attribute
                    .options
                    .iter()
                    .map(|option| OptionState {
                        value: option.clone(),
                        available: self.is_option_available(&attribute.name, option),
                        selected: selection.is_selected(&attribute.name, option),
                    })
                    .collect(),
            })
            .collect()
    }
}

fn synthesize_attributes(variations: &[ProductVariation]) -> Vec<(String, Vec<String>)> {
    let mut attributes: Vec<(String, Vec<String>)> = Vec::new();

    for binding in variations.iter().flat_map(|v| &v.attributes) {
        let existing = attributes
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(&binding.name));
        let index = match existing {
            Some(index) => index,
            None => {
                attributes.push((binding.name.clone(), Vec::new()));
                attributes.len() - 1
            }
        };

        let options = &mut attributes[index].1;
        if !options.contains(&binding.option) {
            options.push(binding.option.clone());
        }
    }

    attributes
}
