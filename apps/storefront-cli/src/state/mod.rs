//! # State Module
//!
//! What a command needs besides its arguments.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐  ┌──────────────────────────────┐    │
//! │  │   CartState                  │  │   StorefrontConfig           │    │
//! │  │                              │  │                              │    │
//! │  │   CartStore<FileStorage>     │  │   data_dir, cart_key         │    │
//! │  │   hydrated once per run      │  │   currency symbol / code     │    │
//! │  │   passed as &mut             │  │   read-only                  │    │
//! │  └──────────────────────────────┘  └──────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::{log_cart_event, open_cart, CartState};
pub use config::StorefrontConfig;
