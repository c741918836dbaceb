//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Catalog/cart/order rule violations             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-store errors (separate crate)                              │
//! │  └── StorageError     - Local storage read/write failures (logged,     │
//! │                         never surfaced by cart mutations)              │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the caller sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error
//! Removing a line that is not in the cart, or setting a quantity of zero,
//! are ordinary control flow (no-op / remove). They never produce a
//! `CoreError`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Raised at the boundaries where catalog data turns into cart lines and
/// where cart lines turn into an order submission.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A variable product was added without choosing a variation.
    ///
    /// ## User Workflow
    /// ```text
    /// T-Shirt (variable: color × size)
    ///      │
    ///      ▼
    /// Add to Cart with only color=red picked
    ///      │
    ///      ▼
    /// VariationRequired { product_id: 42 }
    ///      │
    ///      ▼
    /// UI keeps showing "Select options"
    /// ```
    #[error("Product {product_id} is variable; choose a variation first")]
    VariationRequired { product_id: u64 },

    /// Product (or the chosen variation) is not purchasable.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// Requested quantity exceeds what the catalog says can be bought.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// Checkout was attempted with no lines in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed price or email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityTooLarge {
            requested: 12,
            max: 5,
        };
        assert_eq!(err.to_string(), "Quantity 12 exceeds maximum allowed (5)");

        let err = CoreError::VariationRequired { product_id: 42 };
        assert_eq!(
            err.to_string(),
            "Product 42 is variable; choose a variation first"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "billing.email".to_string(),
        };
        assert_eq!(err.to_string(), "billing.email is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
