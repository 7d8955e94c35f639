//! # Stock Monitor
//!
//! Low-stock detection and restocking. A restock is validated like any
//! other product change.

use serde::{Deserialize, Serialize};
use tally_core::stock::{low_stock, LowStockItem};
use tally_core::{Access, CoreError, Session, ValidationError};
use tally_db::{DbError, Storage};
use tracing::info;

use crate::error::{ServiceError, ServiceResult};

/// Outcome of a restock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refill {
    pub product_id: String,
    pub added: i64,
    pub new_quantity: i64,
}

pub struct StockMonitor<'a> {
    storage: &'a Storage,
}

impl<'a> StockMonitor<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        StockMonitor { storage }
    }

    /// Products with `quantity < threshold`, in catalog order.
    pub fn low_stock(&self, session: &Session, threshold: i64) -> ServiceResult<Vec<LowStockItem>> {
        session.authorize(Access::Authenticated)?;
        Ok(low_stock(&self.storage.catalog().load(), threshold))
    }

    /// Adds `amount` units to a product.
    ///
    /// ## Order of Checks
    /// 1. `amount <= 0` → `InvalidAmount`
    /// 2. Unknown id → `NotFound`
    /// 3. New quantity past `i64` → `InvalidAmount`
    pub fn refill(&self, session: &Session, product_id: &str, amount: i64) -> ServiceResult<Refill> {
        session.authorize(Access::Authenticated)?;

        if amount <= 0 {
            return Err(CoreError::InvalidAmount(amount).into());
        }

        let product = self
            .storage
            .catalog()
            .adjust_quantity(product_id, amount)
            .map_err(|e| match e {
                DbError::Validation(ValidationError::TooLarge { .. }) => {
                    ServiceError::from(CoreError::InvalidAmount(amount))
                }
                other => ServiceError::from(other),
            })?;

        info!(
            id = %product_id,
            added = amount,
            quantity = product.quantity,
            "Product restocked"
        );
        Ok(Refill {
            product_id: product.id,
            added: amount,
            new_quantity: product.quantity,
        })
    }
}
