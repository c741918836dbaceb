//! # Order Submission
//!
//! The contract between the cart and the Order Service.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout                                             │
//! │                                                                         │
//! │  Cart lines ──► OrderSubmission::from_cart ──► Order Service            │
//! │  (advisory                │                        │                    │
//! │   totals)                 │ line_items:            │ re-prices,         │
//! │                           │ (product, variation,   │ adds tax and       │
//! │                           │  quantity) ONLY        │ shipping           │
//! │                           │                        ▼                    │
//! │                           │                OrderConfirmation            │
//! │                           │                        │                    │
//! │                           └──────────────► cart cleared                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are deliberately absent from the submission: the Order Service
//! is the only source of authoritative totals.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartLine};
use crate::error::{CoreError, CoreResult};
use crate::validation::validate_email;

/// Payment method sent with every submission (bank transfer).
pub const DEFAULT_PAYMENT_METHOD: &str = "bacs";
pub const DEFAULT_PAYMENT_METHOD_TITLE: &str = "Direct Bank Transfer";

// =============================================================================
// Addresses
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct BillingAddress {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    pub phone: String,
}

/// Ship to the billing address.
impl From<&BillingAddress> for ShippingAddress {
    fn from(billing: &BillingAddress) -> Self {
        ShippingAddress {
            first_name: billing.first_name.clone(),
            last_name: billing.last_name.clone(),
            company: billing.company.clone(),
            address_1: billing.address_1.clone(),
            address_2: billing.address_2.clone(),
            city: billing.city.clone(),
            state: billing.state.clone(),
            postcode: billing.postcode.clone(),
            country: billing.country.clone(),
            phone: billing.phone.clone(),
        }
    }
}

// =============================================================================
// Submission
// =============================================================================

/// One line of an order submission. Never carries a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLineItem {
    #[ts(type = "number")]
    pub product_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub variation_id: Option<u64>,
    pub quantity: u32,
}

impl From<&CartLine> for OrderLineItem {
    fn from(line: &CartLine) -> Self {
        OrderLineItem {
            product_id: line.product_id,
            variation_id: line.variation_id,
            quantity: line.quantity,
        }
    }
}

/// The order-creation request sent to the Order Service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderSubmission {
    pub payment_method: String,
    pub payment_method_title: String,
    pub set_paid: bool,
    pub billing: BillingAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ShippingAddress>,
    pub line_items: Vec<OrderLineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<String>,
}

impl OrderSubmission {
    /// Assembles a submission from the current cart.
    ///
    /// ## Errors
    /// - `Validation(Required { "billing.email" })` for a missing email
    /// - `Validation(InvalidFormat { .. })` for a malformed email
    /// - `EmptyCart` when there is nothing to order
    ///
    /// A blank customer note is dropped.
    pub fn from_cart(
        cart: &Cart,
        billing: BillingAddress,
        shipping: Option<ShippingAddress>,
        customer_note: Option<String>,
    ) -> CoreResult<Self> {
        validate_email(&billing.email)?;

        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        Ok(OrderSubmission {
            payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
            payment_method_title: DEFAULT_PAYMENT_METHOD_TITLE.to_string(),
            set_paid: false,
            billing,
            shipping,
            line_items: cart.items().iter().map(OrderLineItem::from).collect(),
            customer_note: customer_note.filter(|note| !note.trim().is_empty()),
        })
    }
}

// =============================================================================
// Confirmation
// =============================================================================

/// What the Order Service returns once it accepted a submission.
///
/// `total` is the authoritative amount, tax and shipping included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderConfirmation {
    #[ts(type = "number")]
    pub id: u64,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
