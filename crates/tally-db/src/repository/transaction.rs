//! # Transaction Log
//!
//! Append-only record of completed sales.
//!
//! ## Append
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Append Lifecycle                                  │
//! │                                                                         │
//! │  1. READ the log file as raw JSON entries                              │
//! │  2. REFUSE if the id is already a key          → DbError::Duplicate    │
//! │  3. ADD the new entry at the end (items layout)                        │
//! │  4. REWRITE the whole file                                             │
//! │                                                                         │
//! │  Existing entries are carried over untouched, including legacy         │
//! │  parallel-array entries and entries that fail to parse.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use indexmap::IndexMap;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::file::{read_json, write_json};
use crate::record::{StoredTransaction, TransactionRecord};
use tally_core::{Transaction, TransactionMap};

const ENTITY: &str = "Transaction";

/// Store for the transaction log file.
#[derive(Debug, Clone)]
pub struct TransactionLog {
    path: PathBuf,
}

impl TransactionLog {
    /// Creates a log over the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TransactionLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_raw(&self) -> IndexMap<String, Value> {
        read_json(&self.path)
    }

    /// Loads every readable transaction in append order.
    ///
    /// Entries that cannot be read (misaligned legacy arrays, bad dates)
    /// are skipped with a warning and left in the file.
    pub fn load(&self) -> TransactionMap {
        let log: TransactionMap = self
            .load_raw()
            .into_iter()
            .filter_map(|(id, value)| {
                let txn = serde_json::from_value::<StoredTransaction>(value)
                    .map_err(|e| e.to_string())
                    .and_then(|stored| stored.into_transaction(&id).map_err(|e| e.to_string()));
                match txn {
                    Ok(txn) => Some((id, txn)),
                    Err(reason) => {
                        warn!(id = %id, reason = %reason, "Skipping unreadable transaction");
                        None
                    }
                }
            })
            .collect();

        debug!(path = %self.path.display(), count = log.len(), "Transaction log loaded");
        log
    }

    /// Appends a transaction under its own id.
    ///
    /// ## Returns
    /// * `Ok(())` - Written to the file
    /// * `Err(DbError::Duplicate)` - The id is already in the log
    /// * `Err(DbError::Io)` - The file could not be rewritten
    pub fn append(&self, txn: &Transaction) -> DbResult<()> {
        let mut raw = self.load_raw();

        if raw.contains_key(&txn.id) {
            return Err(DbError::duplicate(ENTITY, &txn.id));
        }

        let record = serde_json::to_value(TransactionRecord::from(txn))?;
        raw.insert(txn.id.clone(), record);
        write_json(&self.path, &raw)?;

        info!(
            id = %txn.id,
            lines = txn.items.len(),
            total = %txn.total(),
            "Transaction recorded"
        );
        Ok(())
    }

    /// Gets a transaction by id, if present and readable.
    pub fn get(&self, id: &str) -> Option<Transaction> {
        self.load().shift_remove(id)
    }

    /// Checks whether `id` is taken, counting unreadable entries too.
    pub fn contains(&self, id: &str) -> bool {
        self.load_raw().contains_key(id)
    }

    /// Number of readable transactions.
    pub fn count(&self) -> usize {
        self.load().len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
