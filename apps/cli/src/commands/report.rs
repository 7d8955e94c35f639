//! # Report Commands
//!
//! `--days N` limits a report to the last N days; without it the whole log
//! is used.

use clap::{Args, Subcommand};
use serde::Serialize;
use tally_core::report::{BestSeller, BestSellersReport, RevenueReport, SalesHistory};
use tally_core::Transaction;

use super::{format_timestamp, to_json, CommandResult, Context, LineDto, WindowDto};

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Products ranked by units sold
    BestSellers(WindowArgs),

    /// Total revenue (admin)
    Revenue(WindowArgs),

    /// Transactions, newest first (admin)
    History(WindowArgs),
}

#[derive(Debug, Args)]
pub struct WindowArgs {
    /// Only the last N days
    #[arg(long)]
    pub days: Option<u32>,
}

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestSellerDto {
    pub product_id: String,
    /// `None` once the product has left the catalog.
    pub name: Option<String>,
    pub units_sold: i64,
}

impl From<BestSeller> for BestSellerDto {
    fn from(entry: BestSeller) -> Self {
        BestSellerDto {
            product_id: entry.product_id,
            name: entry.name,
            units_sold: entry.units_sold,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestSellersDto {
    pub window: Option<WindowDto>,
    pub ranking: Vec<BestSellerDto>,
}

impl From<BestSellersReport> for BestSellersDto {
    fn from(report: BestSellersReport) -> Self {
        BestSellersDto {
            window: report.window.map(WindowDto::from),
            ranking: report.ranking.into_iter().map(BestSellerDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueDto {
    pub window: Option<WindowDto>,
    pub total_cents: i64,
}

impl From<RevenueReport> for RevenueDto {
    fn from(report: RevenueReport) -> Self {
        RevenueDto {
            window: report.window.map(WindowDto::from),
            total_cents: report.total.cents(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub timestamp: String,
    pub total_cents: i64,
    pub items: Vec<LineDto>,
}

impl From<Transaction> for TransactionDto {
    fn from(txn: Transaction) -> Self {
        TransactionDto {
            total_cents: txn.total().cents(),
            items: txn.items.iter().map(LineDto::from).collect(),
            timestamp: format_timestamp(txn.timestamp),
            id: txn.id,
            customer_name: txn.customer_name,
            customer_phone: txn.customer_phone,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryDto {
    pub window: Option<WindowDto>,
    pub transactions: Vec<TransactionDto>,
}

impl From<SalesHistory> for HistoryDto {
    fn from(history: SalesHistory) -> Self {
        HistoryDto {
            window: history.window.map(WindowDto::from),
            transactions: history
                .transactions
                .into_iter()
                .map(TransactionDto::from)
                .collect(),
        }
    }
}

pub fn run(ctx: &Context<'_>, command: ReportCommand) -> CommandResult {
    let reports = ctx.inventory.reports();

    match command {
        ReportCommand::BestSellers(args) => {
            to_json(BestSellersDto::from(reports.best_sellers(ctx.session, args.days)?))
        }
        ReportCommand::Revenue(args) => {
            to_json(RevenueDto::from(reports.total_revenue(ctx.session, args.days)?))
        }
        ReportCommand::History(args) => {
            to_json(HistoryDto::from(reports.sales_history(ctx.session, args.days)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::inventory;
    use crate::error::ErrorCode;
    use tally_core::{SaleLine, Session};

    #[test]
    fn test_reports_after_a_sale() {
        let (_dir, inventory) = inventory();
        let ada = Session::admin("ada");
        inventory
            .sales()
            .sell(&ada, &[SaleLine::new("P101", 3)], "Jane Doe", "555")
            .unwrap();

        let ctx = Context {
            inventory: &inventory,
            session: &ada,
            low_stock_threshold: 5,
        };

        let best = run(&ctx, ReportCommand::BestSellers(WindowArgs { days: Some(7) })).unwrap();
        assert_eq!(best["ranking"][0]["productId"], "P101");
        assert_eq!(best["ranking"][0]["unitsSold"], 3);
        assert_eq!(best["window"]["end"], "2025-02-28 14:45:09");
        assert_eq!(best["window"]["start"], "2025-02-21 14:45:09");

        let revenue = run(&ctx, ReportCommand::Revenue(WindowArgs { days: None })).unwrap();
        assert_eq!(revenue["totalCents"], 3 * 2599);
        assert!(revenue["window"].is_null());

        let history = run(&ctx, ReportCommand::History(WindowArgs { days: None })).unwrap();
        assert_eq!(history["transactions"][0]["id"], "2502281445_JD");
        assert_eq!(history["transactions"][0]["customerPhone"], "555");
    }

    #[test]
    fn test_revenue_needs_admin() {
        let (_dir, inventory) = inventory();
        let sam = Session::employee("sam");
        let ctx = Context {
            inventory: &inventory,
            session: &sam,
            low_stock_threshold: 5,
        };

        let err = run(&ctx, ReportCommand::Revenue(WindowArgs { days: None })).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert!(run(&ctx, ReportCommand::BestSellers(WindowArgs { days: None })).is_ok());
    }
}
