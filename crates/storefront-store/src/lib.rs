//! # storefront-store: Cart Persistence for the Storefront
//!
//! This crate owns the session's cart: it hydrates the line list from local
//! storage, applies mutations through `storefront-core`, writes the result
//! back and tells observers about it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  CLI command (add, remove, set, clear, checkout)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storefront-store (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  CartStore    │    │  CartStorage  │    │  CartEvent   │  │   │
//! │  │   │  (store.rs)   │───►│ (storage.rs)  │    │  observers   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ hydrate       │    │ FileStorage   │    │ Changed      │  │   │
//! │  │   │ mutate        │    │ MemoryStorage │    │ Reveal...    │  │   │
//! │  │   │ notify        │    │               │    │ Dismissed    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     JSON record file                            │   │
//! │  │   ~/.local/share/cart/woo-cart.json                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The cart store, events and observers
//! - [`storage`] - Storage trait and its file / memory backends
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use storefront_store::{CartStore, FileStorage, StorageConfig};
//!
//! let storage = FileStorage::open(StorageConfig::new("./data"));
//! let mut store = CartStore::hydrate(storage);
//!
//! store.set_quantity(10, 0, None);
//! println!("{} items", store.item_count());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageConfig, DEFAULT_CART_KEY};
pub use store::{CartEvent, CartObserver, CartStore};
