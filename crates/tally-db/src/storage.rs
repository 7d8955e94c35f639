//! # Storage Handle
//!
//! Where the store files live, and the handle that hands out stores.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storage Layout                                  │
//! │                                                                         │
//! │  CLI Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(data_dir) ← Configure file names                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Storage::open(config) ← Create data_dir if missing                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │  <data_dir>/                            │                           │
//! │  │    products.json      ◄── catalog()     │                           │
//! │  │    transactions.json  ◄── transactions()│                           │
//! │  └─────────────────────────────────────────┘                           │
//! │                                                                         │
//! │  No handle caches file contents: each call reads the file afresh.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::repository::product::CatalogStore;
use crate::repository::transaction::TransactionLog;

/// Default catalog file name.
pub const DEFAULT_CATALOG_FILE: &str = "products.json";

/// Default transaction log file name.
pub const DEFAULT_TRANSACTIONS_FILE: &str = "transactions.json";

// =============================================================================
// Configuration
// =============================================================================

/// Store file locations.
///
/// ## Example
/// ```rust
/// use tally_db::StoreConfig;
///
/// let config = StoreConfig::new("./database").catalog_file("catalog.json");
/// assert!(config.catalog_path().ends_with("catalog.json"));
/// assert!(config.transactions_path().ends_with("transactions.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding both files. Created on open.
    pub data_dir: PathBuf,

    /// Catalog file name inside `data_dir`.
    /// Default: `products.json`
    pub catalog_file: String,

    /// Transaction log file name inside `data_dir`.
    /// Default: `transactions.json`
    pub transactions_file: String,
}

impl StoreConfig {
    /// Creates a configuration with the default file names.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            catalog_file: DEFAULT_CATALOG_FILE.to_string(),
            transactions_file: DEFAULT_TRANSACTIONS_FILE.to_string(),
        }
    }

    /// Sets the catalog file name.
    pub fn catalog_file(mut self, name: impl Into<String>) -> Self {
        self.catalog_file = name.into();
        self
    }

    /// Sets the transaction log file name.
    pub fn transactions_file(mut self, name: impl Into<String>) -> Self {
        self.transactions_file = name.into();
        self
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.catalog_file)
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.data_dir.join(&self.transactions_file)
    }
}

// =============================================================================
// Storage
// =============================================================================

/// Handle giving access to both stores.
///
/// ## Usage
/// ```rust,no_run
/// use tally_db::{Storage, StoreConfig};
///
/// let storage = Storage::open(StoreConfig::new("./database"))?;
/// let low = storage.catalog().list().into_iter().filter(|p| p.quantity < 5).count();
/// let sales = storage.transactions().count();
/// # Ok::<(), tally_db::DbError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    config: StoreConfig,
    catalog: CatalogStore,
    transactions: TransactionLog,
}

impl Storage {
    /// Opens storage rooted at `config.data_dir`.
    ///
    /// ## What This Does
    /// 1. Creates the data directory if it doesn't exist
    /// 2. Points a [`CatalogStore`] and a [`TransactionLog`] at their files
    ///
    /// The files themselves are created by the first write.
    pub fn open(config: StoreConfig) -> DbResult<Self> {
        fs::create_dir_all(&config.data_dir).map_err(|e| DbError::io(&config.data_dir, e))?;

        info!(data_dir = %config.data_dir.display(), "Opening storage");

        Ok(Storage {
            catalog: CatalogStore::new(config.catalog_path()),
            transactions: TransactionLog::new(config.transactions_path()),
            config,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Returns the catalog store.
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Returns the transaction log.
    pub fn transactions(&self) -> &TransactionLog {
        &self.transactions
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_data_dir() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("database");

        let storage = Storage::open(StoreConfig::new(&data_dir)).unwrap();

        assert!(data_dir.is_dir());
        assert_eq!(storage.catalog().path(), data_dir.join("products.json"));
        assert_eq!(storage.transactions().path(), data_dir.join("transactions.json"));
        assert!(storage.catalog().load().is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("/srv/tally")
            .catalog_file("catalog.json")
            .transactions_file("sales.json");

        assert_eq!(config.catalog_path(), PathBuf::from("/srv/tally/catalog.json"));
        assert_eq!(config.transactions_path(), PathBuf::from("/srv/tally/sales.json"));
    }
}
