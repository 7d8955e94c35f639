//! # Sale Command
//!
//! ```text
//! tally --role employee sell --item P101:2 --item P204:1 \
//!       --customer "Jane Doe" --phone 555-0100
//! ```
//!
//! The whole basket goes to `SaleProcessor::sell` in one call, so either
//! every line is sold or nothing is.

use clap::Args;
use serde::Serialize;
use tally_core::{SaleLine, SaleReceipt};

use super::{format_timestamp, to_json, CommandResult, Context, LineDto};

#[derive(Debug, Args)]
pub struct SellArgs {
    /// Line to sell; repeat for more lines
    #[arg(
        long = "item",
        value_name = "ID:QTY",
        required = true,
        value_parser = parse_sale_line
    )]
    pub items: Vec<SaleLine>,

    #[arg(long)]
    pub customer: String,

    #[arg(long)]
    pub phone: String,
}

/// Parses `P101:3`. The quantity may be zero or negative here; the sale
/// itself rejects it with a proper error code.
pub fn parse_sale_line(raw: &str) -> Result<SaleLine, String> {
    let (id, quantity) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected ID:QTY, got '{}'", raw))?;

    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing product id in '{}'", raw));
    }

    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("quantity in '{}' is not a whole number", raw))?;

    Ok(SaleLine::new(id, quantity))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDto {
    pub transaction_id: String,
    pub customer_name: String,
    pub timestamp: String,
    pub total_cents: i64,
    pub items: Vec<LineDto>,
}

impl From<SaleReceipt> for ReceiptDto {
    fn from(receipt: SaleReceipt) -> Self {
        ReceiptDto {
            transaction_id: receipt.transaction_id,
            customer_name: receipt.customer_name,
            timestamp: format_timestamp(receipt.timestamp),
            total_cents: receipt.total.cents(),
            items: receipt.items.iter().map(LineDto::from).collect(),
        }
    }
}

pub fn run(ctx: &Context<'_>, args: SellArgs) -> CommandResult {
    let receipt = ctx
        .inventory
        .sales()
        .sell(ctx.session, &args.items, &args.customer, &args.phone)?;
    to_json(ReceiptDto::from(receipt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::inventory;
    use crate::error::ErrorCode;
    use tally_core::Session;

    #[test]
    fn test_parse_sale_line() {
        assert_eq!(parse_sale_line("P101:3"), Ok(SaleLine::new("P101", 3)));
        assert_eq!(parse_sale_line(" P101 : 0 "), Ok(SaleLine::new("P101", 0)));
        assert_eq!(parse_sale_line("P101:-2"), Ok(SaleLine::new("P101", -2)));
        assert!(parse_sale_line("P101").is_err());
        assert!(parse_sale_line(":3").is_err());
        assert!(parse_sale_line("P101:two").is_err());
    }

    #[test]
    fn test_sell_prints_receipt() {
        let (_dir, inventory) = inventory();
        let sam = Session::employee("sam");
        let ctx = Context {
            inventory: &inventory,
            session: &sam,
            low_stock_threshold: 5,
        };

        let out = run(
            &ctx,
            SellArgs {
                items: vec![SaleLine::new("P101", 2)],
                customer: "Jane Doe".into(),
                phone: "555-0100".into(),
            },
        )
        .unwrap();

        assert_eq!(out["transactionId"], "2502281445_JD");
        assert_eq!(out["timestamp"], "2025-02-28 14:45:09");
        assert_eq!(out["totalCents"], 5198);
        assert_eq!(out["items"][0]["lineTotalCents"], 5198);
    }

    #[test]
    fn test_sell_errors_carry_codes() {
        let (_dir, inventory) = inventory();
        let sam = Session::employee("sam");
        let ctx = Context {
            inventory: &inventory,
            session: &sam,
            low_stock_threshold: 5,
        };

        let sell = |line: SaleLine| {
            run(
                &ctx,
                SellArgs {
                    items: vec![line],
                    customer: "A B".into(),
                    phone: "1".into(),
                },
            )
            .unwrap_err()
            .code
        };

        assert_eq!(sell(SaleLine::new("P101", 13)), ErrorCode::InsufficientStock);
        assert_eq!(sell(SaleLine::new("P101", 0)), ErrorCode::InvalidQuantity);
        assert_eq!(sell(SaleLine::new("P999", 1)), ErrorCode::NotFound);
    }
}
