//! # CLI Commands
//!
//! One module per command group. Every handler takes the shared
//! [`Context`], calls into `tally_service::Inventory` and returns a JSON
//! value for stdout, or an [`ApiError`] for stderr.
//!
//! ## Command Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tally product ...   → product.rs  → CatalogService                    │
//! │  tally sell ...      → sale.rs     → SaleProcessor                     │
//! │  tally report ...    → report.rs   → ReportEngine                      │
//! │  tally stock ...     → stock.rs    → StockMonitor                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod product;
pub mod report;
pub mod sale;
pub mod stock;

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use tally_core::report::ReportWindow;
use tally_core::{LineItem, Session, TIMESTAMP_FORMAT};
use tally_service::Inventory;

use crate::error::ApiError;
use crate::Command;

/// What every handler needs.
pub struct Context<'a> {
    pub inventory: &'a Inventory,
    pub session: &'a Session,
    /// Used by `stock low` when `--threshold` is not given.
    pub low_stock_threshold: i64,
}

pub type CommandResult = Result<Value, ApiError>;

pub fn dispatch(ctx: &Context<'_>, command: Command) -> CommandResult {
    match command {
        Command::Product(cmd) => product::run(ctx, cmd),
        Command::Sell(args) => sale::run(ctx, args),
        Command::Report(cmd) => report::run(ctx, cmd),
        Command::Stock(cmd) => stock::run(ctx, cmd),
    }
}

pub(crate) fn to_json<T: Serialize>(value: T) -> CommandResult {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

pub(crate) fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

// =============================================================================
// Shared DTOs
// =============================================================================

/// A sold line as printed in receipts and history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDto {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl From<&LineItem> for LineDto {
    fn from(item: &LineItem) -> Self {
        LineDto {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            unit_price_cents: item.unit_price.cents(),
            line_total_cents: item.line_total().cents(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowDto {
    pub start: String,
    pub end: String,
}

impl From<ReportWindow> for WindowDto {
    fn from(window: ReportWindow) -> Self {
        WindowDto {
            start: format_timestamp(window.start),
            end: format_timestamp(window.end),
        }
    }
}
