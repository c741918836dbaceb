//! # Storage Error Types
//!
//! Error types for reading and writing the persisted cart record.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds the record key                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore ← Logs with warn! and carries on in memory                  │
//! │                                                                         │
//! │  Only the CLI's explicit storage setup ever surfaces it (ApiError).    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Cart storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    ///
    /// ## When This Occurs
    /// - Data directory can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The line list could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// A stored record exists but is not a valid line list.
    ///
    /// ## When This Occurs
    /// - File truncated by a crash of an older writer
    /// - Record hand-edited into invalid JSON
    /// - Record written by an incompatible version
    #[error("Corrupt cart record '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

impl StorageError {
    /// Creates a Corrupt error for the given record key.
    pub fn corrupt(key: impl Into<String>, reason: impl ToString) -> Self {
        StorageError::Corrupt {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
