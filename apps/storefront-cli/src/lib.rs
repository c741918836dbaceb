//! # Storefront CLI Library
//!
//! Composition root of the storefront: parses the command line, resolves
//! configuration, owns the cart store and prints JSON responses.
//!
//! ## Module Organization
//! ```text
//! storefront_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Opening the cart store
//! │   └── config.rs   ◄─── StorefrontConfig
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports, JSON input files
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── variation.rs◄─── Variation matching
//! │   └── checkout.rs ◄─── Order submission / completion
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use storefront_core::{BillingAddress, OrderConfirmation, Product, ProductVariation};
use storefront_store::{CartStorage, CartStore};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::cart::AddLineRequest;
use commands::read_json;
use error::ApiError;
use state::{open_cart, StorefrontConfig};

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Command Startup                                   │
/// │                                                                         │
/// │  1. Parse Arguments ──────────────────────────────────────────────────► │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: info,storefront=debug; override with RUST_LOG            │
/// │  3. Resolve Config ───────────────────────────────────────────────────► │
/// │     • defaults → STOREFRONT_* → --data-dir / --cart-key                 │
/// │  4. Hydrate Cart ─────────────────────────────────────────────────────► │
/// │     • FileStorage at <data_dir>/<cart_key>.json                         │
/// │  5. Dispatch & Print JSON ────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let config = StorefrontConfig::from_env().with_overrides(cli.data_dir, cli.cart_key);
    info!(
        data_dir = %config.data_dir.display(),
        cart_key = %config.cart_key,
        "Starting storefront"
    );

    let mut store = open_cart(&config);

    match dispatch(cli.command, &mut store, &config) {
        Ok(value) => {
            println!("{}", pretty(&value));
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(code = ?err.code, message = %err.message, "Command failed");
            println!("{}", pretty(&err));
            ExitCode::FAILURE
        }
    }
}

/// Runs a parsed command against a cart store.
pub fn dispatch<S: CartStorage>(
    command: Command,
    store: &mut CartStore<S>,
    config: &StorefrontConfig,
) -> Result<Value, ApiError> {
    match command {
        Command::Show => to_json(&commands::cart::get_cart(store, config)),

        Command::Add {
            product,
            variation,
            quantity,
            name,
            price,
            image,
        } => {
            let request = AddLineRequest {
                product_id: product,
                variation_id: variation,
                quantity,
                name,
                price,
                image,
            };
            to_json(&commands::cart::add_to_cart(store, config, request)?)
        }

        Command::AddFromCatalog {
            product_file,
            variations_file,
            selections,
            quantity,
        } => {
            let product: Product = read_json(&product_file)?;
            let variations: Vec<ProductVariation> = match variations_file {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };
            to_json(&commands::cart::add_product_to_cart(
                store,
                config,
                &product,
                variations,
                &selections,
                quantity,
            )?)
        }

        Command::Remove { product, variation } => {
            to_json(&commands::cart::remove_from_cart(store, config, product, variation))
        }

        Command::Set {
            product,
            quantity,
            variation,
        } => to_json(&commands::cart::update_cart_item(
            store, config, product, quantity, variation,
        )),

        Command::Clear => to_json(&commands::cart::clear_cart(store, config)),

        Command::Count => to_json(&commands::cart::cart_count(store)),

        Command::Match {
            product_file,
            variations_file,
            selections,
        } => {
            let product: Product = read_json(&product_file)?;
            let variations: Vec<ProductVariation> = read_json(&variations_file)?;
            to_json(&commands::variation::match_variation(
                config,
                &product,
                variations,
                &selections,
            )?)
        }

        Command::Checkout {
            billing_file,
            ship_to_billing,
            note,
        } => {
            let billing: BillingAddress = read_json(&billing_file)?;
            to_json(&commands::checkout::checkout(
                store,
                billing,
                ship_to_billing,
                note,
            )?)
        }

        Command::Complete { confirmation_file } => {
            let confirmation: OrderConfirmation = read_json(&confirmation_file)?;
            to_json(&commands::checkout::complete_order(
                store,
                config,
                &confirmation,
            ))
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

fn pretty<T: Serialize + std::fmt::Debug>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{:?}", value))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_store=trace` - Trace the store only
/// - Default: `info,storefront=debug`
///
/// Logs go to stderr; stdout carries only the JSON response.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_store::MemoryStorage;

    fn run_args(store: &mut CartStore<MemoryStorage>, args: &[&str]) -> Result<Value, ApiError> {
        let cli = Cli::try_parse_from(std::iter::once("storefront").chain(args.iter().copied()))
            .unwrap();
        dispatch(cli.command, store, &StorefrontConfig::default())
    }

    #[test]
    fn test_dispatch_cart_session() {
        let mut store = CartStore::hydrate(MemoryStorage::new());

        run_args(
            &mut store,
            &["add", "--product", "10", "--quantity", "2", "--name", "Mug", "--price", "9.99"],
        )
        .unwrap();
        let value = run_args(
            &mut store,
            &["add", "--product", "10", "--name", "Mug", "--price", "9.99"],
        )
        .unwrap();
        assert_eq!(value["totals"]["subtotal"], "29.97");
        assert_eq!(value["totals"]["itemCount"], 3);

        let value = run_args(&mut store, &["count"]).unwrap();
        assert_eq!(value["itemCount"], 3);

        let value = run_args(&mut store, &["set", "--product", "10", "--quantity", "0"]).unwrap();
        assert_eq!(value["items"], serde_json::json!([]));
    }

    #[test]
    fn test_dispatch_match_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let product = dir.path().join("product.json");
        let variations = dir.path().join("variations.json");
        std::fs::write(
            &product,
            r#"{"id": 5, "name": "Shirt", "type": "variable", "price": "20.00",
                "attributes": [
                    {"name": "Color", "variation": true, "options": ["red", "blue"]},
                    {"name": "Size", "variation": true, "options": ["S", "M", "L"]}
                ]}"#,
        )
        .unwrap();
        std::fs::write(
            &variations,
            r#"[
                {"id": 11, "price": "20.00", "attributes": [{"name": "Color", "option": "red"}, {"name": "Size", "option": ""}]},
                {"id": 12, "price": "25.00", "attributes": [{"name": "Color", "option": "blue"}, {"name": "Size", "option": "M"}]}
            ]"#,
        )
        .unwrap();

        let mut store = CartStore::hydrate(MemoryStorage::new());
        let product = product.to_string_lossy().to_string();
        let variations = variations.to_string_lossy().to_string();

        let value = run_args(
            &mut store,
            &[
                "match", "--product-file", &product, "--variations-file", &variations,
                "--select", "color=blue", "--select", "size=L",
            ],
        )
        .unwrap();
        assert_eq!(value["complete"], true);
        assert_eq!(value["variation"], Value::Null);

        let value = run_args(
            &mut store,
            &[
                "add-from-catalog", "--product-file", &product, "--variations-file", &variations,
                "--select", "color=red", "--select", "size=M",
            ],
        )
        .unwrap();
        assert_eq!(value["items"][0]["variationId"], 11);
        assert_eq!(value["totals"]["subtotal"], "20.00");
    }
}
