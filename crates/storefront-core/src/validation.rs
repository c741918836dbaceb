//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (cart drawer, checkout form)                    │
//! │  ├── Required fields, quantity steppers                                │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Boundary into the cart / order (Rust)                        │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: price, quantity, name, email rules                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order Service                                                │
//! │  └── Authoritative pricing, stock, tax, shipping                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_email, validate_quantity};
//!
//! validate_quantity(3).unwrap();
//! validate_email("ada@example.com").unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest display name stored on a cart line.
pub const MAX_NAME_LENGTH: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name for a cart line.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a billing email address.
///
/// This is a shape check only (one `@`, non-empty local part, a dot in the
/// domain); the Order Service does the real verification.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_email;
///
/// assert!(validate_email("ada@example.com").is_ok());
/// assert!(validate_email("").is_err());
/// assert!(validate_email("ada.example.com").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "billing.email".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "billing.email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(|| invalid("missing '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("malformed local part"));
    }

    match domain.split_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid("malformed domain")),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity requested for a cart line.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must fit the cart's `u32` quantity
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_quantity;
///
/// assert_eq!(validate_quantity(2).unwrap(), 2);
/// assert!(validate_quantity(0).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<u32> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 1,
        max: i64::from(u32::MAX),
    })
}

/// Validates and parses a decimal price string.
///
/// Zero is allowed (free items); empty, negative and malformed strings are
/// not.
pub fn validate_price(raw: &str) -> ValidationResult<Money> {
    Money::parse(raw)
}

// =============================================================================
// Unit Tests
// =============================================================================
