//! # Commands Module
//!
//! Every operation the CLI exposes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports, JSON input files)
//! ├── cart.rs       ◄─── show, add, add-from-catalog, remove, set, clear, count
//! ├── variation.rs  ◄─── match
//! └── checkout.rs   ◄─── checkout, complete
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront set --product 10 --quantity 4                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  lib.rs::dispatch                                                       │
//! │         │  (&mut CartState, &StorefrontConfig, parsed args)             │
//! │         ▼                                                               │
//! │  commands::cart::update_cart_item(...) -> CartResponse                  │
//! │         │                                                               │
//! │         ▼ (JSON serialization)                                          │
//! │  stdout: {"items": [...], "totals": {...}, ...}                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands are generic over `CartStorage`, so tests run them against
//! `MemoryStorage`.

pub mod cart;
pub mod checkout;
pub mod variation;

use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Reads a JSON input file (catalog payload, billing form, confirmation).
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ApiError> {
    let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ApiError::not_found("File", &path.display().to_string()),
        _ => ApiError::internal(format!("Cannot read {}: {}", path.display(), e)),
    })?;

    serde_json::from_str(&raw)
        .map_err(|e| ApiError::validation(format!("Invalid JSON in {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::Product;

    #[test]
    fn test_read_json_product() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product.json");
        std::fs::write(&path, r#"{"id": 10, "name": "Mug", "type": "simple", "price": "9.99"}"#)
            .unwrap();

        let product: Product = read_json(&path).unwrap();
        assert_eq!(product.id, 10);
        assert!(!product.is_variable());
    }

    #[test]
    fn test_read_json_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = read_json::<Product>(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(missing.code, ErrorCode::NotFound);

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{").unwrap();
        let bad = read_json::<Product>(&path).unwrap_err();
        assert_eq!(bad.code, ErrorCode::ValidationError);
    }
}
