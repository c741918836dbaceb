//! # Configuration State
//!
//! Stores configuration resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--data-dir`, `--cart-key`)
//! 2. Environment variables (`STOREFRONT_*`)
//! 3. Defaults (this file)

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use storefront_core::Money;
use storefront_store::{StorageConfig, DEFAULT_CART_KEY};

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// Directory holding the cart record.
    pub data_dir: PathBuf,

    /// Key of the cart record (file `<key>.json`).
    pub cart_key: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for StorefrontConfig {
    /// ## Default Values
    /// - Data dir: platform data dir (`com.storefront.cart`), else `./.storefront`
    /// - Cart key: "woo-cart"
    /// - Currency: USD ($)
    fn default() -> Self {
        StorefrontConfig {
            data_dir: default_data_dir(),
            cart_key: DEFAULT_CART_KEY.to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

/// Platform-specific data directory.
///
/// - **macOS**: `~/Library/Application Support/com.storefront.cart`
/// - **Windows**: `%APPDATA%\storefront\cart\data`
/// - **Linux**: `~/.local/share/cart`
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "storefront", "cart")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".storefront"))
}

impl StorefrontConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_DATA_DIR`: Override the data directory
    /// - `STOREFRONT_CART_KEY`: Override the cart record key
    /// - `STOREFRONT_CURRENCY_SYMBOL`: Override the display symbol
    /// - `STOREFRONT_CURRENCY_CODE`: Override the currency code
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`StorefrontConfig::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = StorefrontConfig::default();
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(data_dir) = value("STOREFRONT_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        if let Some(cart_key) = value("STOREFRONT_CART_KEY") {
            config.cart_key = cart_key;
        }

        if let Some(symbol) = value("STOREFRONT_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(code) = value("STOREFRONT_CURRENCY_CODE") {
            config.currency_code = code;
        }

        config
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, cart_key: Option<String>) -> Self {
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }
        if let Some(cart_key) = cart_key {
            self.cart_key = cart_key;
        }
        self
    }

    /// Storage settings for the cart record.
    pub fn storage(&self) -> StorageConfig {
        StorageConfig::new(&self.data_dir).key(&self.cart_key)
    }

    /// Formats an amount for display, rounded to cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_cli::state::StorefrontConfig;
    /// use storefront_core::Money;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(&Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: &Money) -> String {
        self.format_amount(&amount.to_fixed_2())
    }

    /// Prefixes an already formatted amount (such as a cart total) with
    /// the currency symbol.
    pub fn format_amount(&self, amount: &str) -> String {
        format!("{}{}", self.currency_symbol, amount)
    }
}
