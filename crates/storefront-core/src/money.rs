//! # Money Module
//!
//! Provides the `Money` type for catalog prices and cart totals.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  parseFloat("9.99") * 3 = 29.970000000000002  ❌ WRONG!                 │
//! │                                                                         │
//! │  Catalog prices arrive as decimal STRINGS ("9.99", "12.5", "0.333")     │
//! │  and may carry more than two fraction digits.                           │
//! │                                                                         │
//! │  OUR SOLUTION: exact decimals, rounded ONCE                             │
//! │    Σ price × qty is computed exactly                                    │
//! │    the sum is rounded half-away-from-zero to 2 places for display      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::parse("9.99").unwrap();
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.to_fixed_2(), "29.97");
//!
//! // Empty catalog prices ("price on request") are rejected
//! assert!(Money::parse("").is_err());
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A non-rounded monetary amount in the store currency.
///
/// ## Design Decisions
/// - **Decimal (exact)**: catalog prices are decimal strings, never floats
/// - **Serialized as a string**: the persisted cart and the frontend both
///   expect `"9.99"`, the same shape the Catalog Service sends
/// - **Rounding is explicit**: only [`Money::round_to_cents`] and
///   [`Money::to_fixed_2`] round
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ("9.99") ──► Money::parse ──► CartLine.price             │
/// │                                                  │                      │
/// │                                                  ▼                      │
/// │                              price × quantity (exact)                   │
/// │                                                  │                      │
/// │                                                  ▼                      │
/// │                              Σ lines ──► to_fixed_2 ──► "29.97"         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(
    #[serde(with = "rust_decimal::serde::str")]
    #[ts(as = "String")]
    Decimal,
);

impl Money {
    /// Parses a catalog price string such as `"9.99"` or `"12.5"`.
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - Empty strings are rejected (the catalog uses `""` for
    ///   "price on request")
    /// - Negative amounts are rejected
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::parse(" 20.00 ").unwrap().to_fixed_2(), "20.00");
    /// assert!(Money::parse("abc").is_err());
    /// assert!(Money::parse("-1.00").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();

        if raw.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }

        let value = Decimal::from_str(raw).map_err(|e| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: e.to_string(),
        })?;

        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::MustBePositive {
                field: "price".to_string(),
            });
        }

        Ok(Money(value))
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).to_fixed_2(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn from_decimal(value: Decimal) -> Self {
        Money(value)
    }

    /// Returns the exact underlying amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiplies the amount by a quantity without rounding.
    ///
    /// Saturates at `Decimal::MAX` instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::parse("2.99").unwrap();
    /// assert_eq!(unit_price.multiply_quantity(3).to_fixed_2(), "8.97");
    /// ```
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.checked_mul(Decimal::from(qty)).unwrap_or(Decimal::MAX))
    }

    /// Rounds to two decimal places, half away from zero.
    ///
    /// ```text
    ///   0.125 → 0.13      0.124 → 0.12      29.97 → 29.97
    /// ```
    pub fn round_to_cents(&self) -> Self {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        Money(rounded)
    }

    /// Renders the amount rounded to exactly two fraction digits.
    ///
    /// This is the string shape of every `CartTotals` field.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::zero().to_fixed_2(), "0.00");
    /// assert_eq!(Money::parse("12.5").unwrap().to_fixed_2(), "12.50");
    /// assert_eq!(Money::parse("0.125").unwrap().to_fixed_2(), "0.13");
    /// ```
    pub fn to_fixed_2(&self) -> String {
        self.round_to_cents().0.to_string()
    }

    /// Percentage saved when buying at `sale` instead of `regular`.
    ///
    /// Returns 0 when either price is missing, zero, unparseable, or when
    /// the sale price is not below the regular price.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::discount_percentage("40.00", "30.00"), 25);
    /// assert_eq!(Money::discount_percentage("30.00", ""), 0);
    /// assert_eq!(Money::discount_percentage("30.00", "35.00"), 0);
    /// ```
    pub fn discount_percentage(regular: &str, sale: &str) -> u32 {
        let (Ok(regular), Ok(sale)) = (Money::parse(regular), Money::parse(sale)) else {
            return 0;
        };

        if regular.is_zero() || sale.is_zero() || regular <= sale {
            return 0;
        }

        let saved = (regular.0 - sale.0) / regular.0 * Decimal::ONE_HUNDRED;
        saved
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the rounded amount with a dollar sign, e.g. `$10.99`.
///
/// For other currencies use the CLI's configured formatter.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.to_fixed_2())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.checked_add(other.0).unwrap_or(Decimal::MAX))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_prices() {
        assert_eq!(Money::parse("9.99").unwrap().amount(), Decimal::new(999, 2));
        assert_eq!(Money::parse("10").unwrap().to_fixed_2(), "10.00");
        assert_eq!(Money::parse("0").unwrap().to_fixed_2(), "0.00");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            Money::parse("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            Money::parse("nine"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Money::parse("-0.01"),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_multiply_is_exact_before_rounding() {
        // 0.333 × 3 = 0.999 → 1.00, whereas rounding first would give 0.99
        let price = Money::parse("0.333").unwrap();
        assert_eq!(price.multiply_quantity(3).to_fixed_2(), "1.00");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(Money::parse("1.005").unwrap().to_fixed_2(), "1.01");
        assert_eq!(Money::parse("1.004").unwrap().to_fixed_2(), "1.00");
    }

    #[test]
    fn test_sum() {
        let total: Money = ["9.99", "0.01", "5"]
            .iter()
            .map(|p| Money::parse(p).unwrap())
            .sum();
        assert_eq!(total.to_fixed_2(), "15.00");
    }

    #[test]
    fn test_discount_percentage() {
        assert_eq!(Money::discount_percentage("30", "20"), 33);
        assert_eq!(Money::discount_percentage("0", "0"), 0);
        assert_eq!(Money::discount_percentage("", "10"), 0);
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Money::parse("9.90").unwrap()).unwrap();
        assert_eq!(json, "\"9.90\"");

        let back: Money = serde_json::from_str("\"25.00\"").unwrap();
        assert_eq!(back, Money::from_cents(2500));
    }
}
