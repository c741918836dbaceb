//! Command-line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront cart command line", version)]
pub struct Cli {
    /// Directory holding the cart record (overrides STOREFRONT_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Key of the cart record (overrides STOREFRONT_CART_KEY)
    #[arg(long, global = true)]
    pub cart_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the cart
    Show,

    /// Add a line described on the command line
    Add {
        #[arg(long)]
        product: u64,
        #[arg(long)]
        variation: Option<u64>,
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
        #[arg(long)]
        name: String,
        /// Unit price as a decimal string, e.g. 9.99
        #[arg(long)]
        price: String,
        #[arg(long)]
        image: Option<String>,
    },

    /// Add a product from catalog JSON, resolving its variation
    AddFromCatalog {
        #[arg(long)]
        product_file: PathBuf,
        #[arg(long)]
        variations_file: Option<PathBuf>,
        /// Attribute selection as name=option (repeatable)
        #[arg(long = "select", value_parser = parse_selection)]
        selections: Vec<(String, String)>,
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a line
    Remove {
        #[arg(long)]
        product: u64,
        #[arg(long)]
        variation: Option<u64>,
    },

    /// Set a line's quantity (0 or less removes it)
    Set {
        #[arg(long)]
        product: u64,
        #[arg(long, allow_negative_numbers = true)]
        quantity: i64,
        #[arg(long)]
        variation: Option<u64>,
    },

    /// Remove every line
    Clear,

    /// Print the total item count
    Count,

    /// Resolve a variation from selections without touching the cart
    Match {
        #[arg(long)]
        product_file: PathBuf,
        #[arg(long)]
        variations_file: PathBuf,
        #[arg(long = "select", value_parser = parse_selection)]
        selections: Vec<(String, String)>,
    },

    /// Print the order submission for the cart
    Checkout {
        #[arg(long)]
        billing_file: PathBuf,
        /// Ship to the billing address
        #[arg(long)]
        ship_to_billing: bool,
        #[arg(long)]
        note: Option<String>,
    },

    /// Clear the cart after the Order Service confirmed the order
    Complete {
        #[arg(long)]
        confirmation_file: PathBuf,
    },
}

/// Parses `name=option`. An empty option clears that attribute.
fn parse_selection(raw: &str) -> Result<(String, String), String> {
    let (name, option) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=option, got '{raw}'"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing attribute name in '{raw}'"));
    }

    Ok((name.to_string(), option.trim().to_string()))
}
