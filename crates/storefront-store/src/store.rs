//! # Cart Store
//!
//! The session's single cart: hydrated once from storage, persisted after
//! every mutation, observable by the UI.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Caller                  CartStore                 Side effects         │
//! │  ──────                  ─────────                 ────────────         │
//! │                                                                         │
//! │  add_line(line) ───────► cart.add_line ──┐                              │
//! │  remove_line(p, v) ────► cart.remove ────┤                              │
//! │  set_quantity(p, q, v) ► cart.set_qty ───┼──► storage.save(lines)       │
//! │  clear() ──────────────► cart.clear ─────┘    (warn! on failure)        │
//! │                                                    │                    │
//! │                                                    ▼                    │
//! │                                          observers: Changed             │
//! │                                          (+ RevealRequested on add)     │
//! │                                                                         │
//! │  NOTE: `&mut self` on every mutation; there is one writer at a time.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use storefront_core::{
    BillingAddress, Cart, CartLine, CartTotals, CoreResult, OrderConfirmation, OrderSubmission,
    ShippingAddress,
};
use tracing::{debug, info, warn};

use crate::storage::CartStorage;

// =============================================================================
// Events
// =============================================================================

/// Notification sent to observers after a cart operation completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Lines changed (or were re-written unchanged). Carries the new totals.
    Changed { totals: CartTotals },

    /// The cart panel should be shown. Sent after every add.
    RevealRequested,

    /// The cart panel was hidden.
    Dismissed,
}

/// Receives cart events.
///
/// Closures taking `&CartEvent` implement this directly.
pub trait CartObserver: Send {
    fn on_event(&self, event: &CartEvent);
}

impl<F> CartObserver for F
where
    F: Fn(&CartEvent) + Send,
{
    fn on_event(&self, event: &CartEvent) {
        self(event)
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// The session-scoped cart with best-effort persistence.
///
/// ## Persistence
/// - [`CartStore::hydrate`] reads the record once. A missing or unreadable
///   record yields an empty cart.
/// - Every mutation writes the full line list before returning, even when
///   nothing changed.
/// - A failed write is logged and ignored: the in-memory cart stays as
///   mutated.
///
/// ## Usage
/// ```rust
/// use storefront_core::{CartLine, Money};
/// use storefront_store::{CartStore, MemoryStorage};
///
/// let mut store = CartStore::hydrate(MemoryStorage::new());
/// store.add_line(CartLine::new(10, "Mug", Money::from_cents(999), 2));
///
/// assert_eq!(store.item_count(), 2);
/// assert!(store.is_open());
/// ```
pub struct CartStore<S: CartStorage> {
    cart: Cart,
    storage: S,
    is_open: bool,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<S: CartStorage> CartStore<S> {
    /// Loads the cart from storage.
    pub fn hydrate(storage: S) -> Self {
        let cart = match storage.load() {
            Ok(Some(lines)) => {
                let cart = Cart::from_lines(lines);
                info!(
                    key = storage.key(),
                    lines = cart.items().len(),
                    item_count = cart.item_count(),
                    "Cart hydrated"
                );
                cart
            }
            Ok(None) => {
                debug!(key = storage.key(), "No saved cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                warn!(
                    key = storage.key(),
                    error = %e,
                    "Saved cart unreadable, starting empty"
                );
                Cart::new()
            }
        };

        CartStore {
            cart,
            storage,
            is_open: false,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for all subsequent events.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds a line, merging with an existing line of the same identity.
    ///
    /// Opens the cart panel. A zero-quantity line is ignored entirely.
    pub fn add_line(&mut self, line: CartLine) {
        if line.quantity == 0 {
            warn!(
                product_id = line.product_id,
                variation_id = ?line.variation_id,
                "Ignoring cart line with zero quantity"
            );
            return;
        }

        debug!(
            product_id = line.product_id,
            variation_id = ?line.variation_id,
            quantity = line.quantity,
            "Adding line to cart"
        );

        self.cart.add_line(line);
        self.persist();
        self.is_open = true;
        self.notify_changed();
        self.notify(&CartEvent::RevealRequested);
    }

    /// Removes a line. Absent lines are a no-op.
    ///
    /// ## Returns
    /// `true` if a line was removed.
    pub fn remove_line(&mut self, product_id: u64, variation_id: Option<u64>) -> bool {
        let removed = self.cart.remove_line(product_id, variation_id);
        debug!(product_id, variation_id = ?variation_id, removed, "Remove line");

        self.persist();
        self.notify_changed();
        removed
    }

    /// Overwrites a line's quantity; `quantity <= 0` removes the line.
    ///
    /// ## Returns
    /// `true` if a line was updated or removed.
    pub fn set_quantity(
        &mut self,
        product_id: u64,
        quantity: i64,
        variation_id: Option<u64>,
    ) -> bool {
        let changed = self.cart.set_quantity(product_id, quantity, variation_id);
        debug!(product_id, variation_id = ?variation_id, quantity, changed, "Set line quantity");

        self.persist();
        self.notify_changed();
        changed
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        debug!(lines = self.cart.items().len(), "Clearing cart");

        self.cart.clear();
        self.persist();
        self.notify_changed();
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Total quantity across all lines.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.items()
    }

    pub fn totals(&self) -> &CartTotals {
        self.cart.totals()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // -------------------------------------------------------------------------
    // Panel Visibility
    // -------------------------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self) {
        self.is_open = true;
        self.notify(&CartEvent::RevealRequested);
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.notify(&CartEvent::Dismissed);
    }

    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Builds the order submission for the current lines.
    ///
    /// The cart is left untouched; call [`CartStore::complete_order`] once
    /// the Order Service accepted it.
    pub fn order_submission(
        &self,
        billing: BillingAddress,
        shipping: Option<ShippingAddress>,
        customer_note: Option<String>,
    ) -> CoreResult<OrderSubmission> {
        OrderSubmission::from_cart(&self.cart, billing, shipping, customer_note)
    }

    /// Clears the cart after a confirmed order.
    pub fn complete_order(&mut self, confirmation: &OrderConfirmation) {
        info!(
            order_id = confirmation.id,
            number = %confirmation.number,
            status = %confirmation.status,
            total = %confirmation.total,
            "Order confirmed, clearing cart"
        );
        self.clear();
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn persist(&mut self) {
        if let Err(e) = self.storage.save(self.cart.items()) {
            warn!(
                key = self.storage.key(),
                error = %e,
                "Failed to persist cart, keeping in-memory state"
            );
        }
    }

    fn notify_changed(&self) {
        self.notify(&CartEvent::Changed {
            totals: self.cart.totals().clone(),
        });
    }

    fn notify(&self, event: &CartEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}

impl<S: CartStorage + fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("storage", &self.storage)
            .field("is_open", &self.is_open)
            .field("observers", &self.observers.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::{Arc, Mutex};
    use storefront_core::Money;

    fn recorder(store: &mut CartStore<MemoryStorage>) -> Arc<Mutex<Vec<CartEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        store.subscribe(move |event: &CartEvent| sink.lock().unwrap().push(event.clone()));
        events
    }

    fn mug(quantity: u32) -> CartLine {
        CartLine::new(10, "Mug", Money::from_cents(999), quantity)
    }

    #[test]
    fn test_add_opens_panel_and_notifies() {
        let mut store = CartStore::hydrate(MemoryStorage::new());
        let events = recorder(&mut store);

        store.add_line(mug(2));

        assert!(store.is_open());
        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], CartEvent::Changed { totals } if totals.item_count == 2));
        assert_eq!(events[1], CartEvent::RevealRequested);
    }

    #[test]
    fn test_zero_quantity_add_is_ignored() {
        let mut store = CartStore::hydrate(MemoryStorage::new());
        let events = recorder(&mut store);

        store.add_line(mug(0));

        assert!(store.lines().is_empty());
        assert!(!store.is_open());
        assert!(events.lock().unwrap().is_empty());
        assert!(store.storage().record().is_none());
    }

    #[test]
    fn test_mutations_persist_lines() {
        let mut store = CartStore::hydrate(MemoryStorage::new());
        store.add_line(mug(2));
        store.set_quantity(10, 5, None);

        let record = store.storage().record().unwrap();
        assert_eq!(
            record,
            r#"[{"productId":10,"quantity":5,"name":"Mug","price":"9.99"}]"#
        );
    }

    #[test]
    fn test_absent_remove_still_rewrites_record() {
        let mut store = CartStore::hydrate(MemoryStorage::new());
        let events = recorder(&mut store);

        assert!(!store.remove_line(99, None));
        assert_eq!(store.storage().record(), Some("[]"));
        assert_eq!(events.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_toggle_panel() {
        let mut store = CartStore::hydrate(MemoryStorage::new());
        let events = recorder(&mut store);

        store.toggle();
        assert!(store.is_open());
        store.toggle();
        assert!(!store.is_open());

        assert_eq!(
            *events.lock().unwrap(),
            vec![CartEvent::RevealRequested, CartEvent::Dismissed]
        );
    }

    #[test]
    fn test_complete_order_clears() {
        let mut store = CartStore::hydrate(MemoryStorage::new());
        store.add_line(mug(3));

        let confirmation = OrderConfirmation {
            id: 981,
            number: "981".to_string(),
            status: "pending".to_string(),
            total: "29.97".to_string(),
        };
        store.complete_order(&confirmation);

        assert_eq!(store.item_count(), 0);
        assert_eq!(store.storage().record(), Some("[]"));
    }
}
