//! The shopper's in-progress attribute selection.

use std::collections::BTreeMap;

/// Attribute name to chosen option for one browsing session.
///
/// Created empty when a variable product is shown and mutated as the shopper
/// picks options. Lookups fall back to a case-insensitive name comparison,
/// since variation bindings and product attributes do not always agree on
/// capitalization.
///
/// ```rust
/// use storefront_api::variants::AttributeSelection;
///
/// let mut selection = AttributeSelection::new();
/// selection.select("Color", "Red");
/// assert_eq!(selection.get("color"), Some("Red"));
///
/// selection.deselect("Color");
/// assert!(selection.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSelection {
    choices: BTreeMap<String, String>,
}

impl AttributeSelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses `option` for `attribute`, replacing any earlier choice.
    pub fn select(&mut self, attribute: impl Into<String>, option: impl Into<String>) {
        let attribute = attribute.into();
        self.choices
            .retain(|name, _| !name.eq_ignore_ascii_case(&attribute));
        self.choices.insert(attribute, option.into());
    }

    /// Removes the choice for `attribute`, returning it.
    pub fn deselect(&mut self, attribute: &str) -> Option<String> {
        let key = self.key_for(attribute)?.to_string();
        self.choices.remove(&key)
    }

    /// Removes every choice.
    pub fn clear(&mut self) {
        self.choices.clear();
    }

    /// Returns the option chosen for `attribute`.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&str> {
        let key = self.key_for(attribute)?;
        self.choices.get(key).map(String::as_str)
    }

    /// Returns `true` if `option` is the current choice for `attribute`.
    #[must_use]
    pub fn is_selected(&self, attribute: &str, option: &str) -> bool {
        self.get(attribute) == Some(option)
    }

    /// Number of attributes with a choice.
    #[must_use]
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Returns `true` if nothing is chosen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Iterates over `(attribute, option)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.choices.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn key_for(&self, attribute: &str) -> Option<&str> {
        if let Some((key, _)) = self.choices.get_key_value(attribute) {
            return Some(key);
        }
        self.choices
            .keys()
            .find(|name| name.eq_ignore_ascii_case(attribute))
            .map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeSelection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut selection = Self::new();
        for (attribute, option) in iter {
            selection.select(attribute, option);
        }
        selection
    }
}
