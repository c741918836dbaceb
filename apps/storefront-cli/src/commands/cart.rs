//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │submission│     │confirmed │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                  │             │
//! │                   add_to_cart                      complete_order      │
//! │                   update_cart_item                 (checkout.rs)       │
//! │                   remove_from_cart                        │             │
//! │                        │                                  │             │
//! │                        ▼                                  ▼             │
//! │                   clear_cart ──────────────────────► (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::validation::{validate_price, validate_product_name, validate_quantity};
use storefront_core::{
    CartLine, CartTotals, CoreError, Product, ProductVariation, VariationSelector,
};
use storefront_store::{CartStorage, CartStore};
use tracing::debug;

use crate::error::ApiError;
use crate::state::StorefrontConfig;

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
    /// `totals.total` with the configured currency symbol, e.g. "$29.97".
    pub display_total: String,
    pub is_open: bool,
}

impl CartResponse {
    pub fn new<S: CartStorage>(store: &CartStore<S>, config: &StorefrontConfig) -> Self {
        let totals = store.totals().clone();

        CartResponse {
            items: store.lines().to_vec(),
            display_total: config.format_amount(&totals.total),
            totals,
            is_open: store.is_open(),
        }
    }
}

/// Item count response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    pub item_count: u64,
}

/// A line described directly on the command line.
#[derive(Debug, Clone)]
pub struct AddLineRequest {
    pub product_id: u64,
    pub variation_id: Option<u64>,
    pub quantity: i64,
    pub name: String,
    pub price: String,
    pub image: Option<String>,
}

/// Gets the current cart contents.
pub fn get_cart<S: CartStorage>(store: &CartStore<S>, config: &StorefrontConfig) -> CartResponse {
    debug!("get_cart command");
    CartResponse::new(store, config)
}

/// Gets the total quantity in the cart.
pub fn cart_count<S: CartStorage>(store: &CartStore<S>) -> CountResponse {
    debug!("cart_count command");
    CountResponse {
        item_count: store.item_count(),
    }
}

/// Adds a line built from explicit values.
///
/// ## Behavior
/// - Same product/variation already in cart: quantity increases
/// - Otherwise: appended as a new line
/// - Price and name are validated before the cart sees them
pub fn add_to_cart<S: CartStorage>(
    store: &mut CartStore<S>,
    config: &StorefrontConfig,
    request: AddLineRequest,
) -> Result<CartResponse, ApiError> {
    debug!(
        product_id = request.product_id,
        variation_id = ?request.variation_id,
        quantity = request.quantity,
        "add_to_cart command"
    );

    let quantity = validate_quantity(request.quantity)?;
    let price = validate_price(&request.price)?;
    validate_product_name(&request.name)?;

    let mut line = CartLine::new(request.product_id, request.name.trim(), price, quantity);
    if let Some(variation_id) = request.variation_id {
        line = line.with_variation(variation_id);
    }
    if let Some(image) = request.image {
        line = line.with_image(image);
    }

    store.add_line(line);
    Ok(CartResponse::new(store, config))
}

/// Adds a catalog product, resolving the variation from the selections.
///
/// ## Flow
/// ```text
/// simple product ───────────────────────────► CartLine::from_product
/// variable product ─► VariationSelector
///                       select(name, option) for each selection
///                       matched_variation() ─► CartLine::from_product
///                       none matched ───────► CART_ERROR
/// ```
pub fn add_product_to_cart<S: CartStorage>(
    store: &mut CartStore<S>,
    config: &StorefrontConfig,
    product: &Product,
    variations: Vec<ProductVariation>,
    selections: &[(String, String)],
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = product.id, quantity, "add_product_to_cart command");

    let quantity = validate_quantity(quantity)?;

    let line = match VariationSelector::new(product, variations) {
        Some(mut selector) => {
            for (name, option) in selections {
                selector.select(name, option);
            }
            let variation = selector
                .matched_variation()
                .ok_or(CoreError::VariationRequired {
                    product_id: product.id,
                })?;
            CartLine::from_product(product, Some(variation), quantity)?
        }
        None => CartLine::from_product(product, None, quantity)?,
    };

    store.add_line(line);
    Ok(CartResponse::new(store, config))
}

/// Updates the quantity of a line.
///
/// ## Behavior
/// - Quantity ≤ 0: removes the line
/// - Line not in cart: nothing changes
pub fn update_cart_item<S: CartStorage>(
    store: &mut CartStore<S>,
    config: &StorefrontConfig,
    product_id: u64,
    quantity: i64,
    variation_id: Option<u64>,
) -> CartResponse {
    debug!(product_id, quantity, variation_id = ?variation_id, "update_cart_item command");

    store.set_quantity(product_id, quantity, variation_id);
    CartResponse::new(store, config)
}

/// Removes a line from the cart. Removing an absent line is not an error.
pub fn remove_from_cart<S: CartStorage>(
    store: &mut CartStore<S>,
    config: &StorefrontConfig,
    product_id: u64,
    variation_id: Option<u64>,
) -> CartResponse {
    debug!(product_id, variation_id = ?variation_id, "remove_from_cart command");

    store.remove_line(product_id, variation_id);
    CartResponse::new(store, config)
}

/// Clears all lines from the cart.
pub fn clear_cart<S: CartStorage>(
    store: &mut CartStore<S>,
    config: &StorefrontConfig,
) -> CartResponse {
    debug!("clear_cart command");

    store.clear();
    CartResponse::new(store, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::{AttributeOption, ProductAttribute, ProductType};
    use storefront_store::MemoryStorage;

    fn request(quantity: i64, price: &str) -> AddLineRequest {
        AddLineRequest {
            product_id: 10,
            variation_id: None,
            quantity,
            name: "Mug".to_string(),
            price: price.to_string(),
            image: None,
        }
    }

    fn hoodie() -> (Product, Vec<ProductVariation>) {
        let product = Product {
            id: 5,
            name: "Hoodie".to_string(),
            product_type: ProductType::Variable,
            price: "20.00".to_string(),
            attributes: vec![ProductAttribute {
                name: "Color".to_string(),
                variation: true,
                options: vec!["Red".to_string(), "Blue".to_string()],
                ..ProductAttribute::default()
            }],
            ..Product::default()
        };
        let variations = vec![
            ProductVariation {
                id: 50,
                price: "20.00".to_string(),
                attributes: vec![AttributeOption::new("Color", "Red")],
                ..ProductVariation::default()
            },
            ProductVariation {
                id: 51,
                price: "25.00".to_string(),
                attributes: vec![AttributeOption::new("Color", "Blue")],
                ..ProductVariation::default()
            },
        ];
        (product, variations)
    }

    #[test]
    fn test_add_to_cart_merges() {
        let mut store = CartStore::hydrate(MemoryStorage::new());
        let config = StorefrontConfig::default();

        add_to_cart(&mut store, &config, request(2, "9.99")).unwrap();
        let response = add_to_cart(&mut store, &config, request(1, "9.99")).unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.totals.subtotal, "29.97");
        assert_eq!(response.display_total, "$29.97");
        assert!(response.is_open);
        assert_eq!(cart_count(&store).item_count, 3);
    }

    #[test]
    fn test_add_to_cart_rejects_bad_input() {
        let mut store = CartStore::hydrate(MemoryStorage::new());
        let config = StorefrontConfig::default();

        let err = add_to_cart(&mut store, &config, request(0, "9.99")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_to_cart(&mut store, &config, request(1, "nine")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(store.item_count(), 0);
    }

    #[test]
    fn test_add_product_resolves_variation() {
        let mut store = CartStore::hydrate(MemoryStorage::new());
        let config = StorefrontConfig::default();
        let (product, variations) = hoodie();

        let selections = vec![("color".to_string(), "Blue".to_string())];
        let response =
            add_product_to_cart(&mut store, &config, &product, variations, &selections, 1)
                .unwrap();

        assert_eq!(response.items[0].variation_id, Some(51));
        assert_eq!(response.items[0].name, "Hoodie - Blue");
        assert_eq!(response.totals.subtotal, "25.00");
    }

    #[test]
    fn test_add_product_without_selection_fails() {
        let mut store = CartStore::hydrate(MemoryStorage::new());
        let config = StorefrontConfig::default();
        let (product, variations) = hoodie();

        let err =
            add_product_to_cart(&mut store, &config, &product, variations, &[], 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert!(store.lines().is_empty());
    }

    #[test]
    fn test_update_and_remove() {
        let mut store = CartStore::hydrate(MemoryStorage::new());
        let config = StorefrontConfig::default();
        add_to_cart(&mut store, &config, request(2, "9.99")).unwrap();

        let response = update_cart_item(&mut store, &config, 10, 5, None);
        assert_eq!(response.totals.item_count, 5);

        let response = remove_from_cart(&mut store, &config, 99, None);
        assert_eq!(response.totals.item_count, 5);

        let response = update_cart_item(&mut store, &config, 10, 0, None);
        assert!(response.items.is_empty());
        assert_eq!(response.display_total, "$0.00");
    }

    #[test]
    fn test_clear_cart() {
        let mut store = CartStore::hydrate(MemoryStorage::new());
        let config = StorefrontConfig::default();
        add_to_cart(&mut store, &config, request(2, "9.99")).unwrap();

        let response = clear_cart(&mut store, &config);
        assert!(response.items.is_empty());
        assert_eq!(response.totals.total, "0.00");
    }

    #[test]
    fn test_display_total_follows_cart_totals() {
        let mut store = CartStore::hydrate(MemoryStorage::new());
        let config = StorefrontConfig::from_lookup(|name| {
            (name == "STOREFRONT_CURRENCY_SYMBOL").then(|| "€".to_string())
        });
        add_to_cart(&mut store, &config, request(3, "0.335")).unwrap();

        let response = get_cart(&store, &config);
        assert_eq!(response.totals.total, "1.01");
        assert_eq!(response.display_total, "€1.01");
    }
}
