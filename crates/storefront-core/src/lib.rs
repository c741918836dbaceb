//! # storefront-core: Pure Cart and Variation Logic
//!
//! This crate holds the storefront's client-side rules as plain functions
//! over plain data. It never touches the disk or the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    storefront-cli (apps/)                       │   │
//! │  │    show, add, remove, set, clear, match, checkout, complete     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront-store                             │   │
//! │  │    CartStore: persistence, observers, drawer visibility         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │ variation │  │   order   │  │   money   │  │   │
//! │  │   │ CartLine  │  │ Selector  │  │Submission │  │  Decimal  │  │   │
//! │  │   │ CartTotals│  │ matches() │  │Confirmation│ │  rounding │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - Cart lines, totals and the mutation rules
//! - [`variation`] - Matching a partial attribute selection to a variation
//! - [`order`] - Order submission built from the cart
//! - [`types`] - Catalog types (Product, ProductVariation, attributes)
//! - [`money`] - Exact decimal money, rounded half away from zero
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, CartLine, Money};
//!
//! let mut cart = Cart::new();
//! cart.add_line(CartLine::new(10, "Mug", Money::parse("9.99").unwrap(), 2));
//! cart.add_line(CartLine::new(10, "Mug", Money::parse("9.99").unwrap(), 1));
//!
//! assert_eq!(cart.items().len(), 1);
//! assert_eq!(cart.totals().subtotal, "29.97");
//! assert_eq!(cart.item_count(), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;
pub mod variation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals, LineKey};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{
    BillingAddress, OrderConfirmation, OrderLineItem, OrderSubmission, ShippingAddress,
};
pub use types::*;
pub use variation::{matches, AttributeName, OptionState, VariationSelection, VariationSelector};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantity cap for a line whose stock is not tracked.
pub const DEFAULT_MAX_PURCHASABLE_QUANTITY: u32 = 99;

/// Stock level at or below which a tracked product counts as "low stock"
/// when it has no threshold of its own.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 3;
