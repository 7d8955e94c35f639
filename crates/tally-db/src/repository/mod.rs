//! # Repository Module
//!
//! File-backed stores for tally.
//!
//! ## Read-Modify-Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Every mutating call on a store                         │
//! │                                                                         │
//! │  storage.catalog().update("P101", &changes)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load()  ─── whole file → IndexMap (file order)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  check ids, merge, validate      ← any failure: file untouched         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write_json() ─── whole map → file                                     │
//! │                                                                         │
//! │  No deltas, no locking. One writer at a time is assumed.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CatalogStore`](product::CatalogStore) - Product CRUD and search
//! - [`TransactionLog`](transaction::TransactionLog) - Append-only sale records

pub mod product;
pub mod transaction;
