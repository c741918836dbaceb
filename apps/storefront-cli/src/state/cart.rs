//! # Cart State
//!
//! Opens the session's cart store for one CLI invocation.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StorefrontConfig ──► FileStorage::open ──► CartStore::hydrate          │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                                     subscribe(log_cart_event)           │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                                     command runs with &mut store        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_store::{CartEvent, CartStore, FileStorage};
use tracing::{debug, info};

use super::StorefrontConfig;

/// The cart store as the CLI uses it.
pub type CartState = CartStore<FileStorage>;

/// Opens file storage and hydrates the cart from it.
///
/// Never fails: an unreadable record hydrates an empty cart and failed
/// writes are logged by the store.
pub fn open_cart(config: &StorefrontConfig) -> CartState {
    let storage = FileStorage::open(config.storage());
    let mut store = CartStore::hydrate(storage);
    store.subscribe(log_cart_event);
    store
}

/// Observer writing cart events to the log.
pub fn log_cart_event(event: &CartEvent) {
    match event {
        CartEvent::Changed { totals } => debug!(
            item_count = totals.item_count,
            subtotal = %totals.subtotal,
            "Cart changed"
        ),
        CartEvent::RevealRequested => info!("Cart panel opened"),
        CartEvent::Dismissed => debug!("Cart panel closed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use storefront_core::{CartLine, Money};

    fn config_for(data_dir: PathBuf) -> StorefrontConfig {
        StorefrontConfig::default().with_overrides(Some(data_dir), None)
    }

    #[test]
    fn test_open_cart_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path().to_path_buf());

        let mut store = open_cart(&config);
        store.add_line(CartLine::new(10, "Mug", Money::from_cents(999), 2));

        let store = open_cart(&config);
        assert_eq!(store.item_count(), 2);
        assert!(dir.path().join("woo-cart.json").exists());
    }

    #[test]
    fn test_open_cart_with_unusable_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let config = config_for(blocker.join("cart"));

        let mut store = open_cart(&config);
        assert_eq!(store.item_count(), 0);

        store.add_line(CartLine::new(10, "Mug", Money::from_cents(999), 2));
        assert_eq!(store.item_count(), 2);
        assert_eq!(store.totals().subtotal, "19.98");
    }

    #[test]
    fn test_commands_run_with_unusable_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let config = config_for(blocker.join("cart"));

        let mut store = open_cart(&config);
        let value = crate::dispatch(crate::cli::Command::Count, &mut store, &config).unwrap();
        assert_eq!(value["itemCount"], 0);
    }
}
