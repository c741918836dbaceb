//! # Checkout Commands
//!
//! Builds the order submission from the cart and clears the cart once the
//! Order Service confirmed the order.
//!
//! ## Checkout Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront checkout --billing-file billing.json                       │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  OrderSubmission JSON ──► (caller POSTs it to the Order Service)       │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │  storefront complete --confirmation-file order.json                    │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  cart cleared, empty CartResponse                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::{BillingAddress, OrderConfirmation, OrderSubmission, ShippingAddress};
use storefront_store::{CartStorage, CartStore};
use tracing::{debug, info};

use crate::commands::cart::CartResponse;
use crate::error::ApiError;
use crate::state::StorefrontConfig;

/// Assembles the order submission for the current cart.
///
/// The cart is not cleared here; the order is not placed until the
/// Order Service accepts it.
pub fn checkout<S: CartStorage>(
    store: &CartStore<S>,
    billing: BillingAddress,
    ship_to_billing: bool,
    customer_note: Option<String>,
) -> Result<OrderSubmission, ApiError> {
    debug!(lines = store.lines().len(), ship_to_billing, "checkout command");

    let shipping = ship_to_billing.then(|| ShippingAddress::from(&billing));
    let submission = store.order_submission(billing, shipping, customer_note)?;

    info!(
        line_items = submission.line_items.len(),
        advisory_total = %store.totals().total,
        "Order submission prepared"
    );
    Ok(submission)
}

/// Clears the cart after the Order Service confirmed the order.
pub fn complete_order<S: CartStorage>(
    store: &mut CartStore<S>,
    config: &StorefrontConfig,
    confirmation: &OrderConfirmation,
) -> CartResponse {
    debug!(order_id = confirmation.id, "complete_order command");

    store.complete_order(confirmation);
    CartResponse::new(store, config)
}
