//! # Variation Matching
//!
//! Resolves a variable product's attribute selections to a single
//! [`ProductVariation`], and tells a picker which options are still
//! selectable.
//!
//! ## Matching Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  variation matches selection  ⇔  for EVERY (name, option) on variation: │
//! │                                                                         │
//! │        option == ""                      (wildcard: any value)          │
//! │     OR selection[lower(name)] == option                                 │
//! │                                                                         │
//! │  Variations                          Selection            Match         │
//! │  ──────────                          ─────────            ─────         │
//! │  #1 {color: red,  size: ""}          {red, M}             #1            │
//! │  #2 {color: blue, size: M }          {blue, L}            none          │
//! │                                      {blue, M}            #2            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Attribute names are compared case-insensitively by normalizing them once,
//! through [`AttributeName`], wherever a selection is written or a
//! variation attribute is looked up. Option values are compared exactly.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use ts_rs::TS;

use crate::types::{AttributeOption, Product, ProductAttribute, ProductVariation};

// =============================================================================
// Attribute Name
// =============================================================================

/// A lower-cased, trimmed attribute name.
///
/// Constructing one is the only way to key a [`VariationSelection`], so
/// "Color", "color" and " COLOR " always address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AttributeName(String);

impl AttributeName {
    pub fn new(name: &str) -> Self {
        AttributeName(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AttributeName {
    fn from(name: &str) -> Self {
        AttributeName::new(name)
    }
}

impl From<String> for AttributeName {
    fn from(name: String) -> Self {
        AttributeName::new(&name)
    }
}

impl From<AttributeName> for String {
    fn from(name: AttributeName) -> Self {
        name.0
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Selection
// =============================================================================

/// The options a shopper has chosen so far, keyed by normalized name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariationSelection(BTreeMap<AttributeName, String>);

impl VariationSelection {
    pub fn new() -> Self {
        VariationSelection::default()
    }

    /// Seeds a selection from a product's default attributes.
    ///
    /// Defaults with an empty option are skipped: they leave the attribute
    /// unselected.
    pub fn from_defaults(defaults: &[AttributeOption]) -> Self {
        let mut selection = VariationSelection::new();
        for default in defaults.iter().filter(|d| !d.is_wildcard()) {
            selection.set(&default.name, &default.option);
        }
        selection
    }

    /// Records a choice. An empty option clears the attribute instead.
    pub fn set(&mut self, name: &str, option: &str) {
        let name = AttributeName::new(name);
        if option.is_empty() {
            self.0.remove(&name);
        } else {
            self.0.insert(name, option.to_string());
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(&AttributeName::new(name))
    }

    pub fn get(&self, name: &AttributeName) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &AttributeName) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, AttributeName, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: AsRef<str>, O: AsRef<str>> FromIterator<(N, O)> for VariationSelection {
    fn from_iter<I: IntoIterator<Item = (N, O)>>(iter: I) -> Self {
        let mut selection = VariationSelection::new();
        for (name, option) in iter {
            selection.set(name.as_ref(), option.as_ref());
        }
        selection
    }
}

// =============================================================================
// Matching
// =============================================================================

fn option_of<'v>(
    variation: &'v ProductVariation,
    name: &AttributeName,
) -> Option<&'v AttributeOption> {
    variation.option_for(name.as_str())
}

/// The raw matching rule: every attribute on the variation is either a
/// wildcard or equals the selected option for that name.
///
/// A variation whose attributes are all wildcards matches any selection.
pub fn matches(variation: &ProductVariation, selection: &VariationSelection) -> bool {
    variation.attributes.iter().all(|attr| {
        attr.is_wildcard()
            || selection.get(&AttributeName::new(&attr.name)) == Some(attr.option.as_str())
    })
}

/// True when the variation agrees with every selection except `target`.
///
/// A variation that is silent or wildcard on a selected attribute agrees
/// with it.
fn consistent_except(
    variation: &ProductVariation,
    selection: &VariationSelection,
    target: &AttributeName,
) -> bool {
    selection
        .iter()
        .filter(|(name, _)| *name != target)
        .all(|(name, value)| match option_of(variation, name) {
            Some(attr) if !attr.is_wildcard() => attr.option == *value,
            _ => true,
        })
}

// =============================================================================
// Option State
// =============================================================================

/// How a picker should render one option button.
///
/// Unavailable options are still listed (rendered disabled) so the picker
/// layout never shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OptionState {
    pub option: String,
    pub available: bool,
    pub selected: bool,
}

// =============================================================================
// Variation Selector
// =============================================================================

/// Selection state for one variable product.
///
/// ## Lifecycle
/// ```text
/// ┌──────────────────────────────────────────────────────────────────┐
/// │  new(product, variations)                                        │
/// │     ├── not variable / no variation attributes ──► None          │
/// │     └── Some(selector) seeded from default_attributes            │
/// │                                                                  │
/// │  select("Color", "Red") ─► option_states / available_options     │
/// │                         ─► matched_variation()                   │
/// │                              None until every variation          │
/// │                              attribute has a selection           │
/// └──────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone)]
pub struct VariationSelector {
    attributes: Vec<ProductAttribute>,
    variations: Vec<ProductVariation>,
    selection: VariationSelection,
}

impl VariationSelector {
    /// Builds a selector, or `None` when the product has nothing to select
    /// (the product's simple price applies).
    pub fn new(product: &Product, variations: Vec<ProductVariation>) -> Option<Self> {
        if !product.is_variable() {
            return None;
        }

        let attributes: Vec<ProductAttribute> = product.variation_attributes().cloned().collect();
        if attributes.is_empty() {
            return None;
        }

        Some(VariationSelector {
            attributes,
            variations,
            selection: VariationSelection::from_defaults(&product.default_attributes),
        })
    }

    /// Variation-bearing attributes, in declaration order.
    pub fn attributes(&self) -> &[ProductAttribute] {
        &self.attributes
    }

    pub fn variations(&self) -> &[ProductVariation] {
        &self.variations
    }

    pub fn selection(&self) -> &VariationSelection {
        &self.selection
    }

    pub fn select(&mut self, name: &str, option: &str) {
        self.selection.set(name, option);
    }

    pub fn deselect(&mut self, name: &str) -> Option<String> {
        self.selection.remove(name)
    }

    /// True once every variation-bearing attribute has a selection.
    pub fn is_complete(&self) -> bool {
        self.attributes
            .iter()
            .all(|attr| self.selection.contains(&AttributeName::new(&attr.name)))
    }

    /// The variation for the current selection.
    ///
    /// If the catalog data lets several variations match, the first one
    /// wins.
    pub fn matched_variation(&self) -> Option<&ProductVariation> {
        if !self.is_complete() {
            return None;
        }
        self.variations
            .iter()
            .find(|variation| matches(variation, &self.selection))
    }

    /// Options of `name` still reachable given the OTHER selections.
    ///
    /// ## Algorithm
    /// 1. Keep variations consistent with every selection except `name`.
    /// 2. Collect their non-wildcard options for `name` (first-seen order).
    /// 3. If any kept variation is wildcard on `name`, every option the
    ///    product declares for `name` is reachable too.
    pub fn available_options(&self, name: &str) -> Vec<String> {
        let target = AttributeName::new(name);
        let mut options: Vec<String> = Vec::new();
        let mut accepts_any = false;

        for variation in self
            .variations
            .iter()
            .filter(|variation| consistent_except(variation, &self.selection, &target))
        {
            match option_of(variation, &target) {
                Some(attr) if !attr.is_wildcard() => {
                    if !options.contains(&attr.option) {
                        options.push(attr.option.clone());
                    }
                }
                _ => accepts_any = true,
            }
        }

        if accepts_any {
            let mut all: Vec<String> = self
                .declared_options(&target)
                .map(|declared| declared.to_vec())
                .unwrap_or_default();
            for option in options {
                if !all.contains(&option) {
                    all.push(option);
                }
            }
            return all;
        }

        options
    }

    /// Every declared option of `name`, flagged for rendering.
    ///
    /// Returns an empty list for names that are not variation attributes.
    pub fn option_states(&self, name: &str) -> Vec<OptionState> {
        let target = AttributeName::new(name);
        let Some(declared) = self.declared_options(&target) else {
            return Vec::new();
        };

        let available = self.available_options(name);
        let selected = self.selection.get(&target);

        declared
            .iter()
            .map(|option| OptionState {
                option: option.clone(),
                available: available.contains(option),
                selected: selected == Some(option.as_str()),
            })
            .collect()
    }

    fn declared_options(&self, name: &AttributeName) -> Option<&[String]> {
        self.attributes
            .iter()
            .find(|attr| AttributeName::new(&attr.name) == *name)
            .map(|attr| attr.options.as_slice())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductType;

    fn attribute(name: &str, options: &[&str]) -> ProductAttribute {
        ProductAttribute {
            name: name.to_string(),
            variation: true,
            options: options.iter().map(|o| o.to_string()).collect(),
            ..ProductAttribute::default()
        }
    }

    fn variation(id: u64, pairs: &[(&str, &str)]) -> ProductVariation {
        ProductVariation {
            id,
            price: "10.00".to_string(),
            attributes: pairs
                .iter()
                .map(|(name, option)| AttributeOption::new(*name, *option))
                .collect(),
            ..ProductVariation::default()
        }
    }

    fn shirt() -> Product {
        Product {
            id: 1,
            name: "Shirt".to_string(),
            product_type: ProductType::Variable,
            attributes: vec![
                attribute("Color", &["red", "blue"]),
                attribute("Size", &["S", "M", "L"]),
            ],
            ..Product::default()
        }
    }

    fn shirt_variations() -> Vec<ProductVariation> {
        vec![
            variation(11, &[("Color", "red"), ("Size", "")]),
            variation(12, &[("Color", "blue"), ("Size", "M")]),
        ]
    }

    fn selection(pairs: &[(&str, &str)]) -> VariationSelection {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_attribute_name_normalizes() {
        assert_eq!(AttributeName::new(" Color "), AttributeName::new("COLOR"));
        assert_eq!(AttributeName::new("Color").as_str(), "color");

        let name: AttributeName = serde_json::from_str("\"Size\"").unwrap();
        assert_eq!(name.as_str(), "size");
    }

    #[test]
    fn test_wildcard_accepts_any_value() {
        let variations = shirt_variations();
        let sel = selection(&[("color", "red"), ("size", "M")]);
        assert!(matches(&variations[0], &sel));
        assert!(!matches(&variations[1], &sel));
    }

    #[test]
    fn test_no_match_for_unknown_combination() {
        let variations = shirt_variations();
        let sel = selection(&[("color", "blue"), ("size", "L")]);
        assert!(variations.iter().all(|v| !matches(v, &sel)));
    }

    #[test]
    fn test_all_wildcard_variation_matches_anything() {
        let any = variation(1, &[("Color", ""), ("Size", "")]);
        assert!(matches(&any, &VariationSelection::new()));
        assert!(matches(&any, &selection(&[("color", "green")])));
    }

    #[test]
    fn test_selection_keys_are_case_insensitive() {
        let variations = shirt_variations();
        let sel = selection(&[("COLOR", "blue"), ("Size", "M")]);
        assert!(matches(&variations[1], &sel));
    }

    #[test]
    fn test_selector_matches_first_variation() {
        let mut selector = VariationSelector::new(&shirt(), shirt_variations()).unwrap();
        selector.select("Color", "red");
        selector.select("Size", "M");
        assert_eq!(selector.matched_variation().map(|v| v.id), Some(11));

        selector.select("color", "blue");
        selector.select("size", "L");
        assert!(selector.matched_variation().is_none());

        selector.select("size", "M");
        assert_eq!(selector.matched_variation().map(|v| v.id), Some(12));
    }

    #[test]
    fn test_incomplete_selection_matches_nothing() {
        let mut selector = VariationSelector::new(&shirt(), shirt_variations()).unwrap();
        selector.select("Color", "red");
        assert!(!selector.is_complete());
        assert!(selector.matched_variation().is_none());
    }

    #[test]
    fn test_first_match_wins_on_ambiguous_data() {
        let variations = vec![
            variation(21, &[("Color", "red"), ("Size", "")]),
            variation(22, &[("Color", "red"), ("Size", "S")]),
        ];
        let mut selector = VariationSelector::new(&shirt(), variations).unwrap();
        selector.select("color", "red");
        selector.select("size", "S");
        assert_eq!(selector.matched_variation().map(|v| v.id), Some(21));
    }

    #[test]
    fn test_available_options_include_wildcard_reachable() {
        let mut selector = VariationSelector::new(&shirt(), shirt_variations()).unwrap();
        selector.select("color", "red");

        let sizes = selector.available_options("size");
        assert_eq!(sizes, vec!["S", "M", "L"]);
    }

    #[test]
    fn test_available_options_ignore_own_selection() {
        let mut selector = VariationSelector::new(&shirt(), shirt_variations()).unwrap();
        selector.select("color", "red");
        selector.select("size", "M");

        // Changing color stays possible: both colors offer a size M path.
        assert_eq!(selector.available_options("Color"), vec!["red", "blue"]);
    }

    #[test]
    fn test_available_options_narrow_by_other_selections() {
        let mut selector = VariationSelector::new(&shirt(), shirt_variations()).unwrap();
        selector.select("color", "blue");
        assert_eq!(selector.available_options("size"), vec!["M"]);

        selector.deselect("color");
        selector.select("size", "L");
        // only the red wildcard variation can still produce size L
        assert_eq!(selector.available_options("color"), vec!["red"]);
    }

    #[test]
    fn test_option_states_keep_unavailable_options() {
        let mut selector = VariationSelector::new(&shirt(), shirt_variations()).unwrap();
        selector.select("color", "blue");
        selector.select("size", "M");

        let states = selector.option_states("Size");
        assert_eq!(states.len(), 3);
        assert_eq!(
            states[0],
            OptionState {
                option: "S".to_string(),
                available: false,
                selected: false
            }
        );
        assert!(states[1].available && states[1].selected);
        assert!(!states[2].available);

        assert!(selector.option_states("material").is_empty());
    }

    #[test]
    fn test_defaults_seed_selection() {
        let mut product = shirt();
        product.default_attributes = vec![
            AttributeOption::new("Color", "blue"),
            AttributeOption::new("Size", "M"),
        ];
        let selector = VariationSelector::new(&product, shirt_variations()).unwrap();
        assert_eq!(selector.matched_variation().map(|v| v.id), Some(12));
    }

    #[test]
    fn test_empty_default_leaves_attribute_unselected() {
        let mut product = shirt();
        product.default_attributes = vec![
            AttributeOption::new("Color", "red"),
            AttributeOption::new("Size", ""),
        ];
        let selector = VariationSelector::new(&product, shirt_variations()).unwrap();
        assert_eq!(selector.selection().len(), 1);
        assert!(selector.matched_variation().is_none());
    }

    #[test]
    fn test_no_selector_for_simple_products() {
        let mut simple = shirt();
        simple.product_type = ProductType::Simple;
        assert!(VariationSelector::new(&simple, shirt_variations()).is_none());

        let mut no_variation_attributes = shirt();
        for attr in &mut no_variation_attributes.attributes {
            attr.variation = false;
        }
        assert!(VariationSelector::new(&no_variation_attributes, Vec::new()).is_none());
    }
}
