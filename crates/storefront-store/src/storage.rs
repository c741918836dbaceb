//! # Cart Storage
//!
//! Durable local storage for the cart's line list.
//!
//! ## Record Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  <data_dir>/woo-cart.json                                               │
//! │                                                                         │
//! │  [                                                                      │
//! │    {"productId":10,"quantity":3,"name":"Mug","price":"9.99"},           │
//! │    {"productId":5,"variationId":50,"quantity":1,"name":"Shirt - Red",   │
//! │     "price":"20.00","attributes":[{"id":0,"name":"Color",               │
//! │     "option":"Red"}]}                                                   │
//! │  ]                                                                      │
//! │                                                                         │
//! │  Only lines are stored. Totals are recomputed on load.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write Path
//! `FileStorage` writes the whole record to `<key>.json.tmp` next to the
//! target, syncs it, then renames it over `<key>.json`. A crash mid-write
//! leaves the previous record intact.
//! A failed write removes the temporary file. The data directory is
//! created on the first write.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use storefront_core::CartLine;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};

/// Default key of the persisted cart record.
pub const DEFAULT_CART_KEY: &str = "woo-cart";

// =============================================================================
// Storage Trait
// =============================================================================

/// A place the cart's line list survives between sessions.
///
/// Implementations store one record under [`CartStorage::key`]. A missing
/// record is `Ok(None)`; a record that exists but cannot be decoded is
/// [`StorageError::Corrupt`].
pub trait CartStorage {
    /// Key of the record this storage reads and writes.
    fn key(&self) -> &str;

    /// Loads the persisted line list.
    fn load(&self) -> StorageResult<Option<Vec<CartLine>>>;

    /// Replaces the persisted line list.
    fn save(&mut self, lines: &[CartLine]) -> StorageResult<()>;
}

fn decode(key: &str, raw: &str) -> StorageResult<Vec<CartLine>> {
    serde_json::from_str(raw).map_err(|e| StorageError::corrupt(key, e))
}

// =============================================================================
// Configuration
// =============================================================================

/// File storage configuration.
///
/// ## Example
/// ```rust,no_run
/// use storefront_store::StorageConfig;
///
/// let config = StorageConfig::new("/var/lib/storefront")
///     .key("woo-cart")
///     .create_dir(true);
/// ```
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the record file.
    pub data_dir: PathBuf,

    /// Record key; the file is `<key>.json`.
    /// Default: "woo-cart"
    pub key: String,

    /// Whether to create `data_dir` when it is missing.
    /// Default: true
    pub create_dir: bool,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StorageConfig {
            data_dir: data_dir.into(),
            key: DEFAULT_CART_KEY.to_string(),
            create_dir: true,
        }
    }

    /// Sets the record key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets whether the data directory is created on open.
    pub fn create_dir(mut self, create: bool) -> Self {
        self.create_dir = create;
        self
    }

    /// Full path of the record file.
    pub fn record_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.key))
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// JSON file storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    key: String,
    path: PathBuf,
    data_dir: PathBuf,
    create_dir: bool,
}

impl FileStorage {
    /// Opens file storage for the configured record.
    ///
    /// Nothing touches the disk here. The record is read by
    /// [`CartStorage::load`], and the data directory is created (if
    /// enabled) by the first [`CartStorage::save`], so an unusable
    /// directory surfaces as an ordinary write failure.
    pub fn open(config: StorageConfig) -> Self {
        let path = config.record_path();
        info!(path = %path.display(), "Cart storage opened");

        FileStorage {
            path,
            key: config.key,
            data_dir: config.data_dir,
            create_dir: config.create_dir,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn write_temp(&self, temp: &Path, payload: &[u8]) -> StorageResult<()> {
        let mut file = File::create(temp)?;
        file.write_all(payload)?;
        file.sync_all()?;
        Ok(())
    }
}

impl CartStorage for FileStorage {
    fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> StorageResult<Option<Vec<CartLine>>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No cart record on disk");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        decode(&self.key, &raw).map(Some)
    }

    fn save(&mut self, lines: &[CartLine]) -> StorageResult<()> {
        let payload = serde_json::to_vec(lines)?;
        if self.create_dir {
            fs::create_dir_all(&self.data_dir)?;
        }

        let temp = self.temp_path();
        let written = self
            .write_temp(&temp, &payload)
            .and_then(|()| fs::rename(&temp, &self.path).map_err(StorageError::from));
        if let Err(e) = written {
            // No partial record is left next to the real one.
            let _ = fs::remove_file(&temp);
            return Err(e);
        }

        debug!(
            path = %self.path.display(),
            lines = lines.len(),
            bytes = payload.len(),
            "Cart record written"
        );
        Ok(())
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-memory storage holding the encoded record.
///
/// The record goes through the same JSON encoding as [`FileStorage`], so a
/// seeded corrupt record behaves exactly like a corrupt file.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    key: String,
    record: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage {
            key: DEFAULT_CART_KEY.to_string(),
            record: None,
        }
    }

    /// Storage pre-seeded with a raw record.
    pub fn with_record(raw: impl Into<String>) -> Self {
        MemoryStorage {
            key: DEFAULT_CART_KEY.to_string(),
            record: Some(raw.into()),
        }
    }

    /// The raw record as last written.
    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStorage for MemoryStorage {
    fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> StorageResult<Option<Vec<CartLine>>> {
        self.record
            .as_deref()
            .map(|raw| decode(&self.key, raw))
            .transpose()
    }

    fn save(&mut self, lines: &[CartLine]) -> StorageResult<()> {
        self.record = Some(serde_json::to_string(lines)?);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::Money;

    fn lines() -> Vec<CartLine> {
        vec![
            CartLine::new(10, "Mug", Money::from_cents(999), 3),
            CartLine::new(5, "Shirt", Money::from_cents(2000), 1).with_variation(50),
        ]
    }

    #[test]
    fn test_record_path() {
        let config = StorageConfig::new("/tmp/store").key("guest-cart");
        assert_eq!(config.record_path(), PathBuf::from("/tmp/store/guest-cart.json"));
    }

    #[test]
    fn test_file_storage_missing_record() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(StorageConfig::new(dir.path()));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(StorageConfig::new(dir.path().join("nested")));

        storage.save(&lines()).unwrap();

        assert!(storage.path().exists());
        assert!(!storage.temp_path().exists());
        assert_eq!(storage.load().unwrap(), Some(lines()));
    }

    #[test]
    fn test_file_storage_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(StorageConfig::new(dir.path()));
        storage.save(&lines()[..1]).unwrap();

        let raw = fs::read_to_string(dir.path().join("woo-cart.json")).unwrap();
        assert_eq!(
            raw,
            r#"[{"productId":10,"quantity":3,"name":"Mug","price":"9.99"}]"#
        );
    }

    #[test]
    fn test_file_storage_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("woo-cart.json"), "{not json").unwrap();

        let storage = FileStorage::open(StorageConfig::new(dir.path()));
        let err = storage.load().unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { ref key, .. } if key == "woo-cart"));
    }

    #[test]
    fn test_open_without_create_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let mut storage = FileStorage::open(StorageConfig::new(&missing).create_dir(false));

        assert!(storage.load().unwrap().is_none());
        assert!(matches!(storage.save(&lines()), Err(StorageError::Io(_))));
        assert!(!missing.exists());
    }

    #[test]
    fn test_open_under_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut storage = FileStorage::open(StorageConfig::new(blocker.join("cart")));

        assert!(storage.load().is_err());
        assert!(matches!(storage.save(&lines()), Err(StorageError::Io(_))));
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(StorageConfig::new(dir.path()));
        // A directory on the record path makes the final rename fail.
        fs::create_dir(storage.path()).unwrap();

        assert!(matches!(storage.save(&lines()), Err(StorageError::Io(_))));
        assert!(!storage.temp_path().exists());
        assert!(storage.path().is_dir());
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_none());

        storage.save(&lines()).unwrap();
        assert_eq!(storage.load().unwrap(), Some(lines()));

        let corrupt = MemoryStorage::with_record("[{\"productId\":\"ten\"}]");
        assert!(matches!(corrupt.load(), Err(StorageError::Corrupt { .. })));
    }
}
