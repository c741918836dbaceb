//! # Cart Module
//!
//! The pure cart state machine: lines, identity-key merging, and totals.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Transitions                               │
//! │                                                                         │
//! │  Operation                 Lines                         Totals         │
//! │  ─────────                 ─────                         ──────         │
//! │  add_line(l)       key exists? qty += l.qty : push(l)    recompute      │
//! │  remove_line(p,v)  retain(key != (p,v))                  recompute      │
//! │  set_quantity(p,q) q ≤ 0 ? remove_line : qty = q         recompute      │
//! │  clear()           []                                    recompute      │
//! │                                                                         │
//! │  Totals are NEVER stored independently: every transition ends with      │
//! │  `CartTotals::compute(&items)`.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This module does no I/O. Persistence and UI notifications live in the
//! `storefront-store` crate, which wraps a [`Cart`].
//!
//! ## Example
//! ```rust
//! use storefront_core::cart::{Cart, CartLine};
//! use storefront_core::money::Money;
//!
//! let mut cart = Cart::new();
//! let price = Money::parse("9.99").unwrap();
//! cart.add_line(CartLine::new(10, "Mug", price, 2));
//! cart.add_line(CartLine::new(10, "Mug", price, 1));
//!
//! assert_eq!(cart.items().len(), 1);
//! assert_eq!(cart.totals().subtotal, "29.97");
//! assert_eq!(cart.item_count(), 3);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{AttributeOption, Product, ProductVariation, Stocked};
use crate::validation::validate_product_name;

/// Placeholder for amounts only the Order Service can compute.
const NOT_COMPUTED: &str = "0.00";

// =============================================================================
// Line Identity
// =============================================================================

/// Identity of a cart line: one product, optionally one variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    pub product_id: u64,
    pub variation_id: Option<u64>,
}

impl LineKey {
    pub const fn new(product_id: u64, variation_id: Option<u64>) -> Self {
        LineKey {
            product_id,
            variation_id,
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product (optionally one variation) and its requested quantity.
///
/// ## Design Notes
/// - `name`, `price` and `image` are a snapshot taken when the line was
///   added; the Order Service re-prices at checkout.
/// - The serialized shape (camelCase) is also the persisted layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[ts(type = "number")]
    pub product_id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub variation_id: Option<u64>,

    pub quantity: u32,

    pub name: String,

    /// Unit price at the time the line was added.
    pub price: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Selected `(name, option)` pairs of the variation, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeOption>,
}

impl CartLine {
    /// Creates a line for a simple product.
    pub fn new(product_id: u64, name: impl Into<String>, price: Money, quantity: u32) -> Self {
        CartLine {
            product_id,
            variation_id: None,
            quantity,
            name: name.into(),
            price,
            image: None,
            attributes: Vec::new(),
        }
    }

    pub fn with_variation(mut self, variation_id: u64) -> Self {
        self.variation_id = Some(variation_id);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<AttributeOption>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builds a line from catalog data, the way the add-to-cart button does.
    ///
    /// ## Rules
    /// ```text
    /// ┌──────────────────────────────────────────────────────────────────┐
    /// │  variable product, no variation ──► VariationRequired            │
    /// │  not purchasable (out of stock) ──► OutOfStock                   │
    /// │  quantity = 0                    ──► Validation(MustBePositive)  │
    /// │  quantity > max purchasable      ──► QuantityTooLarge            │
    /// │                                                                  │
    /// │  name  = product.name [+ " - " + variation options]              │
    /// │  price = variation.price ?? product.price                        │
    /// │  image = variation.image ?? product.images[0]                    │
    /// └──────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn from_product(
        product: &Product,
        variation: Option<&ProductVariation>,
        quantity: u32,
    ) -> CoreResult<Self> {
        if product.is_variable() && variation.is_none() {
            return Err(CoreError::VariationRequired {
                product_id: product.id,
            });
        }

        let (purchasable, max) = match variation {
            Some(v) => (v.is_purchasable(), v.max_purchasable_quantity()),
            None => (product.is_purchasable(), product.max_purchasable_quantity()),
        };

        if !purchasable {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }

        crate::validation::validate_quantity(i64::from(quantity))?;
        if quantity > max {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max,
            });
        }

        validate_product_name(&product.name)?;

        let line = match variation {
            Some(v) => {
                let options = v.describe_options();
                let name = if options.is_empty() {
                    product.name.clone()
                } else {
                    format!("{} - {}", product.name, options)
                };
                let price = if v.has_own_price() {
                    v.unit_price()?
                } else {
                    product.unit_price()?
                };
                let image = v
                    .image
                    .as_ref()
                    .map(|image| image.src.clone())
                    .or_else(|| product.primary_image().map(str::to_string));

                CartLine {
                    product_id: product.id,
                    variation_id: Some(v.id),
                    quantity,
                    name,
                    price,
                    image,
                    attributes: v.attributes.clone(),
                }
            }
            None => CartLine {
                product_id: product.id,
                variation_id: None,
                quantity,
                name: product.name.clone(),
                price: product.unit_price()?,
                image: product.primary_image().map(str::to_string),
                attributes: Vec::new(),
            },
        };

        Ok(line)
    }

    #[inline]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id, self.variation_id)
    }

    /// Unit price × quantity, unrounded.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Totals derived from the line list.
///
/// Shipping and tax are placeholders ("0.00"): only the Order Service
/// knows them, so `total` equals `subtotal` on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
    #[ts(type = "number")]
    pub item_count: u64,
}

impl CartTotals {
    /// Computes totals from scratch.
    ///
    /// ## Algorithm
    /// ```text
    /// subtotal   = round_2dp( Σ price_i × quantity_i )   (half away from 0)
    /// total      = subtotal
    /// item_count = Σ quantity_i
    /// ```
    pub fn compute(lines: &[CartLine]) -> Self {
        let subtotal: Money = lines.iter().map(CartLine::line_total).sum();
        let item_count = lines.iter().map(|line| u64::from(line.quantity)).sum();
        let subtotal = subtotal.to_fixed_2();

        CartTotals {
            total: subtotal.clone(),
            subtotal,
            shipping: NOT_COMPUTED.to_string(),
            tax: NOT_COMPUTED.to_string(),
            item_count,
        }
    }
}

impl Default for CartTotals {
    fn default() -> Self {
        CartTotals::compute(&[])
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The client-side cart.
///
/// ## Invariants
/// - Lines are unique by [`LineKey`] (adding an existing key merges
///   quantities)
/// - Every line has quantity ≥ 1
/// - Lines keep insertion order
/// - `totals` always equals `CartTotals::compute(items)`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartLine>,
    totals: CartTotals,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuilds a cart from a persisted line list.
    ///
    /// Lines with quantity 0 are dropped and repeated keys are merged, so
    /// a hand-edited or stale record still satisfies the invariants.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Cart::new();
        for line in lines {
            cart.merge(line);
        }
        cart.recompute();
        cart
    }

    /// Adds a line, merging with an existing line of the same key.
    ///
    /// No stock cap is applied here. A zero-quantity line is ignored.
    ///
    /// ## Returns
    /// `true` if the cart changed.
    pub fn add_line(&mut self, line: CartLine) -> bool {
        if line.quantity == 0 {
            return false;
        }
        self.merge(line);
        self.recompute();
        true
    }

    /// Removes the line with the given key.
    ///
    /// ## Returns
    /// `true` if a line was removed; removing an absent line is a no-op.
    pub fn remove_line(&mut self, product_id: u64, variation_id: Option<u64>) -> bool {
        let key = LineKey::new(product_id, variation_id);
        let before = self.items.len();
        self.items.retain(|line| line.key() != key);
        self.recompute();
        self.items.len() != before
    }

    /// Overwrites the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: identical to [`Cart::remove_line`]
    /// - no matching line: no-op
    pub fn set_quantity(
        &mut self,
        product_id: u64,
        quantity: i64,
        variation_id: Option<u64>,
    ) -> bool {
        if quantity <= 0 {
            return self.remove_line(product_id, variation_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let key = LineKey::new(product_id, variation_id);
        let changed = match self.items.iter_mut().find(|line| line.key() == key) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        };
        self.recompute();
        changed
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute();
    }

    /// Total quantity across all lines.
    #[inline]
    pub fn item_count(&self) -> u64 {
        self.totals.item_count
    }

    #[inline]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    #[inline]
    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line(&self, key: LineKey) -> Option<&CartLine> {
        self.items.iter().find(|line| line.key() == key)
    }

    fn merge(&mut self, line: CartLine) {
        if line.quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|existing| existing.key() == line.key()) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => self.items.push(line),
        }
    }

    fn recompute(&mut self) {
        self.totals = CartTotals::compute(&self.items);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
