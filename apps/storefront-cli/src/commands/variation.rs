//! # Variation Commands
//!
//! Resolves a product page's option picker without touching the cart.
//!
//! ```text
//! storefront match --product-file hoodie.json --variations-file v.json \
//!                  --select color=Red
//!
//! {
//!   "productId": 5,
//!   "selection": {"color": "Red"},
//!   "complete": false,
//!   "attributes": [
//!     {"name": "Color", "options": [{"option": "Red", "available": true, "selected": true}, ...]},
//!     {"name": "Size",  "options": [...]}
//!   ],
//!   "variation": null
//! }
//! ```

use serde::Serialize;
use storefront_core::{
    OptionState, Product, ProductVariation, Stocked, VariationSelection, VariationSelector,
};
use tracing::debug;

use crate::error::ApiError;
use crate::state::StorefrontConfig;

/// Picker state for one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeChoices {
    pub name: String,
    pub options: Vec<OptionState>,
}

/// The variation the current selection resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedVariation {
    pub id: u64,
    /// Formatted price; the product's price when the variation has none.
    pub price: Option<String>,
    pub discount_percentage: u32,
    pub stock_message: String,
    pub purchasable: bool,
    pub max_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub product_id: u64,
    pub selection: VariationSelection,
    pub complete: bool,
    pub attributes: Vec<AttributeChoices>,
    pub variation: Option<MatchedVariation>,
}

/// Applies selections on top of the product's defaults and reports the
/// picker state.
///
/// ## Errors
/// `VALIDATION_ERROR` when the product has nothing to select.
pub fn match_variation(
    config: &StorefrontConfig,
    product: &Product,
    variations: Vec<ProductVariation>,
    selections: &[(String, String)],
) -> Result<MatchResponse, ApiError> {
    debug!(
        product_id = product.id,
        variations = variations.len(),
        selections = selections.len(),
        "match_variation command"
    );

    let mut selector = VariationSelector::new(product, variations).ok_or_else(|| {
        ApiError::validation(format!("Product {} has no variations to select", product.id))
    })?;

    for (name, option) in selections {
        selector.select(name, option);
    }

    let attributes = selector
        .attributes()
        .iter()
        .map(|attr| AttributeChoices {
            name: attr.name.clone(),
            options: selector.option_states(&attr.name),
        })
        .collect();

    let variation = selector.matched_variation().map(|variation| {
        let price = if variation.has_own_price() {
            variation.unit_price()
        } else {
            product.unit_price()
        };
        let price = price.ok().map(|price| config.format_currency(&price));

        MatchedVariation {
            id: variation.id,
            price,
            discount_percentage: variation.discount_percentage(),
            stock_message: variation.stock_message(),
            purchasable: variation.is_purchasable(),
            max_quantity: variation.max_purchasable_quantity(),
        }
    });

    Ok(MatchResponse {
        product_id: product.id,
        selection: selector.selection().clone(),
        complete: selector.is_complete(),
        attributes,
        variation,
    })
}
