//! # tally-core: Pure Business Logic for tally
//!
//! This crate is the **heart** of tally. It contains the inventory and sales
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (`tally` binary)                    │   │
//! │  │      product ──► sell ──► report ──► stock                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        tally-service (SaleProcessor, ReportEngine, ...)         │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────────┐  ┌────────▼──────────────────┐    │
//! │  │   ★ tally-core (THIS CRATE) ★   │  │  tally-db (JSON files)    │    │
//! │  │                                 │  │  products.json            │    │
//! │  │  types · money · sale · report  │  │  transactions.json        │    │
//! │  │  validation · session · stock   │  └───────────────────────────┘    │
//! │  │                                 │                                    │
//! │  │  NO I/O • NO FILES • NO CLOCK   │                                    │
//! │  └─────────────────────────────────┘                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Transaction, LineItem, filters)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Product and sale field rules
//! - [`session`] - Explicit caller session and access checks
//! - [`sale`] - Validate-phase pricing and transaction id generation
//! - [`report`] - Best-sellers, revenue and history aggregation
//! - [`stock`] - Low-stock detection
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::from_cents(10000); // 100.00
//! let line_total = price.multiply_quantity(4);
//! assert_eq!(line_total.cents(), 40000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod report;
pub mod sale;
pub mod session;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use session::{Access, Role, Session};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Threshold used by low-stock checks when the caller does not supply one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Timestamp layout used by the transaction log (`date` field).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minute-resolution prefix of generated transaction ids (`YYMMDDHHmm`).
pub const TRANSACTION_ID_TIME_FORMAT: &str = "%y%m%d%H%M";
