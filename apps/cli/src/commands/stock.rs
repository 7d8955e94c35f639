//! # Stock Commands
//!
//! ```text
//! tally stock low                  # threshold from tally.toml (default 5)
//! tally stock low --threshold 10
//! tally stock refill P101 20
//! ```

use clap::Subcommand;
use serde::Serialize;
use tally_core::stock::LowStockItem;
use tally_service::Refill;

use super::{to_json, CommandResult, Context};

#[derive(Debug, Subcommand)]
pub enum StockCommand {
    /// Products with fewer units than the threshold
    Low {
        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<i64>,
    },

    /// Add units to a product
    Refill {
        id: String,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockDto {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
}

impl From<LowStockItem> for LowStockDto {
    fn from(item: LowStockItem) -> Self {
        LowStockDto {
            product_id: item.product_id,
            name: item.name,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefillDto {
    pub product_id: String,
    pub added: i64,
    pub new_quantity: i64,
}

impl From<Refill> for RefillDto {
    fn from(refill: Refill) -> Self {
        RefillDto {
            product_id: refill.product_id,
            added: refill.added,
            new_quantity: refill.new_quantity,
        }
    }
}

pub fn run(ctx: &Context<'_>, command: StockCommand) -> CommandResult {
    let stock = ctx.inventory.stock();

    match command {
        StockCommand::Low { threshold } => {
            let threshold = threshold.unwrap_or(ctx.low_stock_threshold);
            let items: Vec<LowStockDto> = stock
                .low_stock(ctx.session, threshold)?
                .into_iter()
                .map(LowStockDto::from)
                .collect();
            to_json(items)
        }
        StockCommand::Refill { id, amount } => {
            to_json(RefillDto::from(stock.refill(ctx.session, &id, amount)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::inventory;
    use crate::error::ErrorCode;
    use tally_core::Session;

    #[test]
    fn test_low_uses_configured_threshold() {
        let (_dir, inventory) = inventory();
        let sam = Session::employee("sam");
        let ctx = Context {
            inventory: &inventory,
            session: &sam,
            low_stock_threshold: 20,
        };

        let out = run(&ctx, StockCommand::Low { threshold: None }).unwrap();
        assert_eq!(out[0]["productId"], "P101");

        let out = run(&ctx, StockCommand::Low { threshold: Some(5) }).unwrap();
        assert_eq!(out.as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_refill() {
        let (_dir, inventory) = inventory();
        let sam = Session::employee("sam");
        let ctx = Context {
            inventory: &inventory,
            session: &sam,
            low_stock_threshold: 5,
        };

        let out = run(
            &ctx,
            StockCommand::Refill {
                id: "P101".into(),
                amount: 8,
            },
        )
        .unwrap();
        assert_eq!(out["newQuantity"], 20);

        let err = run(
            &ctx,
            StockCommand::Refill {
                id: "P101".into(),
                amount: -3,
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
    }
}
