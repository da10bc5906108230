//! How attribute options are presented.
//!
//! The kind is decided once per attribute when the matcher is built, by
//! looking the attribute name up in a [`PresentationTable`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Widget used to present an attribute's options.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PresentationKind {
    /// Thumbnail image per option.
    SwatchImage,
    /// Solid color per option.
    ColorSwatch,
    /// Text button per option.
    LabelButton,
    /// A select box.
    #[default]
    Dropdown,
}

impl PresentationKind {
    /// Returns the snake case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SwatchImage => "swatch_image",
            Self::ColorSwatch => "color_swatch",
            Self::LabelButton => "label_button",
            Self::Dropdown => "dropdown",
        }
    }
}

impl fmt::Display for PresentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute name to presentation kind, compared case-insensitively.
///
/// ```rust
/// use storefront_api::variants::{PresentationKind, PresentationTable};
///
/// let table = PresentationTable::new()
///     .with("Color", PresentationKind::ColorSwatch)
///     .with("Size", PresentationKind::LabelButton);
///
/// assert_eq!(table.lookup("color"), PresentationKind::ColorSwatch);
/// assert_eq!(table.lookup("Material"), PresentationKind::Dropdown);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "HashMap<String, PresentationKind>",
    into = "HashMap<String, PresentationKind>"
)]
pub struct PresentationTable {
    entries: HashMap<String, PresentationKind>,
}

impl From<HashMap<String, PresentationKind>> for PresentationTable {
    fn from(entries: HashMap<String, PresentationKind>) -> Self {
        entries
            .into_iter()
            .fold(Self::new(), |table, (name, kind)| table.with(&name, kind))
    }
}

impl From<PresentationTable> for HashMap<String, PresentationKind> {
    fn from(table: PresentationTable) -> Self {
        table.entries
    }
}

impl PresentationTable {
    /// Creates an empty table; every attribute is a dropdown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry.
    #[must_use]
    pub fn with(mut self, attribute: &str, kind: PresentationKind) -> Self {
        self.entries.insert(attribute.to_lowercase(), kind);
        self
    }

    /// Returns the kind for `attribute`, or [`PresentationKind::Dropdown`].
    #[must_use]
    pub fn lookup(&self, attribute: &str) -> PresentationKind {
        self.entries
            .get(&attribute.to_lowercase())
            .copied()
            .unwrap_or_default()
    }
}
