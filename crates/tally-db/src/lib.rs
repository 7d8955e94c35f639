//! # tally-db: Flat-File Storage for tally
//!
//! This crate provides persistence for tally: a product catalog file and a
//! transaction log file, both plain JSON objects keyed by id.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          tally Data Flow                                │
//! │                                                                         │
//! │  tally-service (SaleProcessor, StockMonitor, ...)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     tally-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Storage     │    │  Repositories │    │   Records    │  │   │
//! │  │   │ (storage.rs)  │    │ (product.rs)  │    │ (record.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ StoreConfig   │    │ CatalogStore  │◄───│ ProductRecord│  │   │
//! │  │   │ file paths    │───►│ TransactionLog│    │ Transaction- │  │   │
//! │  │   │               │    │               │    │ Record       │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   <data_dir>/products.json        <data_dir>/transactions.json  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - File locations and the [`Storage`] handle
//! - [`file`] - Lenient JSON reads, pretty JSON rewrites
//! - [`record`] - On-disk record shapes and their domain conversions
//! - [`error`] - Storage error types
//! - [`repository`] - [`CatalogStore`] and [`TransactionLog`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tally_db::{Storage, StoreConfig};
//!
//! let storage = Storage::open(StoreConfig::new("./database"))?;
//! let catalog = storage.catalog().load();
//! println!("{} products", catalog.len());
//! # Ok::<(), tally_db::DbError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;
pub mod record;
pub mod repository;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use storage::{Storage, StoreConfig};

// Repository re-exports for convenience
pub use repository::product::CatalogStore;
pub use repository::transaction::TransactionLog;
