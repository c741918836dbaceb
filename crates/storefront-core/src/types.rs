//! # Catalog Types
//!
//! Data shapes consumed from the Catalog Service (WooCommerce REST v3 field
//! names), plus the stock and price rules the storefront applies to them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────────┐          ┌─────────────────────┐               │
//! │  │      Product        │ 1      * │  ProductVariation   │               │
//! │  │  ─────────────────  │─────────►│  ─────────────────  │               │
//! │  │  id, name, type     │          │  id, price          │               │
//! │  │  price fields       │          │  stock fields       │               │
//! │  │  stock fields       │          │  attributes ────────┼──┐            │
//! │  │  attributes ──┐     │          └─────────────────────┘  │            │
//! │  │  default_attributes─┼──┐                                 │            │
//! │  └───────────────┼─────┘  │       ┌─────────────────────┐  │            │
//! │                  │        └──────►│  AttributeOption    │◄─┘            │
//! │                  ▼                │  name + option      │               │
//! │  ┌─────────────────────┐          │  ("" = wildcard)    │               │
//! │  │  ProductAttribute   │          └─────────────────────┘               │
//! │  │  name, options[]    │                                                │
//! │  │  variation: bool    │                                                │
//! │  └─────────────────────┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These types are inputs only: the storefront never writes them back.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::variation::AttributeName;
use crate::{DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_MAX_PURCHASABLE_QUANTITY};

// =============================================================================
// Enumerations
// =============================================================================

/// Catalog product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Simple,
    Grouped,
    External,
    /// Sold in option combinations, each backed by a `ProductVariation`.
    Variable,
}

/// Stock status as reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    #[default]
    InStock,
    OutOfStock,
    OnBackorder,
}

/// Whether stock quantity is tracked.
///
/// Variations may report `"parent"`, meaning the parent product's stock
/// quantity applies. On the wire this is `true`, `false` or `"parent"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManageStock {
    #[default]
    Unmanaged,
    Managed,
    Parent,
}

impl ManageStock {
    /// True when a stock quantity is tracked, either here or on the parent.
    pub fn is_managed(&self) -> bool {
        !matches!(self, ManageStock::Unmanaged)
    }
}

impl Serialize for ManageStock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ManageStock::Unmanaged => serializer.serialize_bool(false),
            ManageStock::Managed => serializer.serialize_bool(true),
            ManageStock::Parent => serializer.serialize_str("parent"),
        }
    }
}

impl<'de> Deserialize<'de> for ManageStock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(true) => Ok(ManageStock::Managed),
            Raw::Flag(false) => Ok(ManageStock::Unmanaged),
            Raw::Text(text) if text == "parent" => Ok(ManageStock::Parent),
            Raw::Text(other) => Err(serde::de::Error::custom(format!(
                "invalid manage_stock value: {other}"
            ))),
        }
    }
}

// =============================================================================
// Attributes & Images
// =============================================================================

/// A `(name, option)` pair.
///
/// Used for a product's default selections, for the attributes a variation
/// is defined by, and for the selections recorded on a cart line. An empty
/// `option` on a variation is the wildcard: that attribute does not
/// constrain matching.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AttributeOption {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub option: String,
}

impl AttributeOption {
    pub fn new(name: impl Into<String>, option: impl Into<String>) -> Self {
        AttributeOption {
            id: 0,
            name: name.into(),
            option: option.into(),
        }
    }

    /// True when this pair accepts any selected value.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.option.is_empty()
    }
}

/// An attribute declared on a product, with every option it offers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductAttribute {
    pub id: u64,
    pub name: String,
    pub position: u32,
    pub visible: bool,
    /// Whether this attribute distinguishes variations.
    pub variation: bool,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductImage {
    pub id: u64,
    pub src: String,
    pub name: String,
    pub alt: String,
}

// =============================================================================
// Stock Rules
// =============================================================================

/// Stock rules shared by products and variations.
///
/// ## Stock Messages
/// ```text
/// ┌──────────────────────────────────────────────────────────────────┐
/// │  status        managed  quantity   message                       │
/// │  ────────────  ───────  ─────────  ───────────────────────────── │
/// │  instock       no       -          "In stock"                    │
/// │  instock       yes      10         "In stock"                    │
/// │  instock       yes      2 (≤ 3)    "Only 2 left in stock"        │
/// │  instock       yes      0          "Out of stock"                │
/// │  onbackorder   any      any        "Available on backorder"      │
/// │  outofstock    any      any        "Out of stock"                │
/// └──────────────────────────────────────────────────────────────────┘
/// ```
pub trait Stocked {
    fn manage_stock(&self) -> ManageStock;
    fn stock_quantity(&self) -> Option<i64>;
    fn stock_status(&self) -> StockStatus;

    /// Threshold under which stock counts as low. Defaults to 3.
    fn low_stock_amount(&self) -> Option<i64> {
        None
    }

    /// In stock right now (backorders do not count).
    fn is_in_stock(&self) -> bool {
        let in_stock = self.stock_status() == StockStatus::InStock;
        if !self.manage_stock().is_managed() {
            return in_stock;
        }
        in_stock && self.stock_quantity().map_or(true, |qty| qty > 0)
    }

    /// Can be added to the cart: in stock or accepting backorders.
    fn is_purchasable(&self) -> bool {
        matches!(
            self.stock_status(),
            StockStatus::InStock | StockStatus::OnBackorder
        )
    }

    fn is_low_stock(&self) -> bool {
        if !self.manage_stock().is_managed() {
            return false;
        }
        let threshold = self.low_stock_amount().unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
        matches!(self.stock_quantity(), Some(qty) if qty > 0 && qty <= threshold)
    }

    fn stock_message(&self) -> String {
        if !self.is_in_stock() {
            if self.stock_status() == StockStatus::OnBackorder {
                return "Available on backorder".to_string();
            }
            return "Out of stock".to_string();
        }

        if self.is_low_stock() {
            if let Some(qty) = self.stock_quantity() {
                return format!("Only {qty} left in stock");
            }
        }

        "In stock".to_string()
    }

    /// Upper bound for a quantity picker.
    ///
    /// The known positive stock quantity, else 99. Capping a cart line
    /// against this is the caller's job; the cart itself never caps.
    fn max_purchasable_quantity(&self) -> u32 {
        match self.stock_quantity() {
            Some(qty) if qty > 0 => u32::try_from(qty).unwrap_or(u32::MAX),
            _ => DEFAULT_MAX_PURCHASABLE_QUANTITY,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Current price (sale price when on sale). May be `""`.
    pub price: String,
    pub regular_price: String,
    pub sale_price: String,
    pub on_sale: bool,
    pub manage_stock: ManageStock,
    pub stock_quantity: Option<i64>,
    pub stock_status: StockStatus,
    pub low_stock_amount: Option<i64>,
    pub images: Vec<ProductImage>,
    pub attributes: Vec<ProductAttribute>,
    pub default_attributes: Vec<AttributeOption>,
}

impl Product {
    #[inline]
    pub fn is_variable(&self) -> bool {
        self.product_type == ProductType::Variable
    }

    /// Attributes that distinguish variations, in declaration order.
    pub fn variation_attributes(&self) -> impl Iterator<Item = &ProductAttribute> {
        self.attributes.iter().filter(|attr| attr.variation)
    }

    /// The price a simple product is sold at.
    ///
    /// Falls back to `regular_price` when `price` is empty, as the catalog
    /// sometimes only fills the latter.
    pub fn unit_price(&self) -> Result<Money, ValidationError> {
        parse_price(&self.price, &self.regular_price)
    }

    /// Percentage saved while on sale, 0 otherwise.
    pub fn discount_percentage(&self) -> u32 {
        if !self.on_sale {
            return 0;
        }
        Money::discount_percentage(&self.regular_price, &self.sale_price)
    }

    /// Source of the first image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(|image| image.src.as_str())
    }
}

impl Stocked for Product {
    fn manage_stock(&self) -> ManageStock {
        self.manage_stock
    }

    fn stock_quantity(&self) -> Option<i64> {
        self.stock_quantity
    }

    fn stock_status(&self) -> StockStatus {
        self.stock_status
    }

    fn low_stock_amount(&self) -> Option<i64> {
        self.low_stock_amount
    }
}

// =============================================================================
// Product Variation
// =============================================================================

/// One purchasable option combination of a variable product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductVariation {
    pub id: u64,
    pub price: String,
    pub regular_price: String,
    pub sale_price: String,
    pub on_sale: bool,
    pub manage_stock: ManageStock,
    pub stock_quantity: Option<i64>,
    pub stock_status: StockStatus,
    pub low_stock_amount: Option<i64>,
    pub image: Option<ProductImage>,
    pub attributes: Vec<AttributeOption>,
}

impl ProductVariation {
    pub fn unit_price(&self) -> Result<Money, ValidationError> {
        parse_price(&self.price, &self.regular_price)
    }

    /// Whether the variation carries a price of its own. Variations
    /// without one are sold at the parent product's price.
    pub fn has_own_price(&self) -> bool {
        !self.price.trim().is_empty() || !self.regular_price.trim().is_empty()
    }

    pub fn discount_percentage(&self) -> u32 {
        if !self.on_sale {
            return 0;
        }
        Money::discount_percentage(&self.regular_price, &self.sale_price)
    }

    /// The variation's own option for an attribute, compared
    /// case-insensitively on the attribute name.
    pub fn option_for(&self, attribute_name: &str) -> Option<&AttributeOption> {
        let wanted = AttributeName::new(attribute_name);
        self.attributes
            .iter()
            .find(|attr| AttributeName::new(&attr.name) == wanted)
    }

    /// Non-wildcard options joined for display, e.g. `"Red, M"`.
    pub fn describe_options(&self) -> String {
        self.attributes
            .iter()
            .filter(|attr| !attr.is_wildcard())
            .map(|attr| attr.option.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Stocked for ProductVariation {
    fn manage_stock(&self) -> ManageStock {
        self.manage_stock
    }

    fn stock_quantity(&self) -> Option<i64> {
        self.stock_quantity
    }

    fn stock_status(&self) -> StockStatus {
        self.stock_status
    }

    fn low_stock_amount(&self) -> Option<i64> {
        self.low_stock_amount
    }
}

fn parse_price(price: &str, regular_price: &str) -> Result<Money, ValidationError> {
    if price.trim().is_empty() {
        Money::parse(regular_price)
    } else {
        Money::parse(price)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
