//! # Sale Processor
//!
//! Runs a multi-line sale against the stores.
//!
//! ## Commit Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sell(session, lines, customer, phone)                                 │
//! │                                                                         │
//! │  0. session must be logged in                                          │
//! │  1. load catalog once → price_sale()        ← no writes yet            │
//! │  2. per line, in input order:                                          │
//! │        stored quantity - requested → adjust_quantity()                 │
//! │  3. id = YYMMDDHHmm_INITIALS (+ -N if taken)                           │
//! │  4. append Transaction (prices from step 1)                            │
//! │  5. SaleReceipt                                                        │
//! │                                                                         │
//! │  A failure in 0-1 changes nothing. A write failure in 2-4 can leave    │
//! │  earlier lines deducted; it is logged with how far the commit got.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_core::sale::{price_sale, unique_transaction_id};
use tally_core::{Access, LineItem, SaleLine, SaleReceipt, Session, Transaction};
use tally_db::Storage;
use tracing::{debug, error, info};

use crate::error::ServiceResult;
use crate::{truncate_to_second, Clock};

pub struct SaleProcessor<'a> {
    storage: &'a Storage,
    clock: Clock,
}

impl<'a> SaleProcessor<'a> {
    pub fn new(storage: &'a Storage, clock: Clock) -> Self {
        SaleProcessor { storage, clock }
    }

    /// Sells every line or nothing, records the transaction and returns a
    /// receipt.
    ///
    /// ## Errors
    /// * `AuthorizationDenied` - anonymous session
    /// * `EmptySale` - no lines
    /// * `ProductNotFound` / `InvalidQuantity` / `InsufficientStock` - first
    ///   offending line, in input order
    /// * `Validation(TooLarge)` - a line or sale total past `i64` cents
    /// * `DbError::Io` - a store write failed mid-commit
    pub fn sell(
        &self,
        session: &Session,
        lines: &[SaleLine],
        customer_name: &str,
        customer_phone: &str,
    ) -> ServiceResult<SaleReceipt> {
        session.authorize(Access::Authenticated)?;

        // Phase 1: validate and price against one snapshot
        let catalog = self.storage.catalog().load();
        let items = price_sale(&catalog, lines)?;
        debug!(lines = items.len(), "Sale validated");

        // Phase 2: commit
        self.deduct_stock(&items)?;

        let timestamp = truncate_to_second((self.clock)());
        let log = self.storage.transactions();
        let id = unique_transaction_id(customer_name, timestamp, |candidate| {
            log.contains(candidate)
        });

        let txn = Transaction {
            id,
            items,
            customer_name: customer_name.to_string(),
            customer_phone: customer_phone.to_string(),
            timestamp,
        };

        if let Err(e) = log.append(&txn) {
            error!(id = %txn.id, error = %e, "Stock deducted but transaction not recorded");
            return Err(e.into());
        }

        info!(
            id = %txn.id,
            operator = session.operator.as_deref().unwrap_or("-"),
            total = %txn.total(),
            units = txn.units(),
            "Sale completed"
        );
        Ok(SaleReceipt::from(&txn))
    }

    /// Deducts each line from the quantity currently stored for its product.
    fn deduct_stock(&self, items: &[LineItem]) -> ServiceResult<()> {
        let catalog = self.storage.catalog();

        for (applied, item) in items.iter().enumerate() {
            match catalog.adjust_quantity(&item.product_id, -item.quantity) {
                Ok(product) => {
                    debug!(id = %product.id, remaining = product.quantity, "Stock deducted");
                }
                Err(e) => {
                    error!(
                        product_id = %item.product_id,
                        applied,
                        of = items.len(),
                        error = %e,
                        "Sale aborted part-way through stock deduction"
                    );
                    return Err(e.into());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceError;
    use chrono::{NaiveDate, NaiveDateTime, Timelike};
    use tally_core::{CoreError, Money, Product, ValidationError};
    use tally_db::StoreConfig;
    use tempfile::TempDir;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 28)
            .unwrap()
            .and_hms_milli_opt(14, 45, 9, 750)
            .unwrap()
    }

    fn setup(stock: &[(&str, i64, i64)]) -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(StoreConfig::new(dir.path())).unwrap();
        for (id, quantity, cents) in stock {
            storage
                .catalog()
                .add(Product {
                    id: id.to_string(),
                    name: format!("Item {}", id),
                    price: Money::from_cents(*cents),
                    quantity: *quantity,
                    category: "General".to_string(),
                    image_path: String::new(),
                    description: "Test item".to_string(),
                })
                .unwrap();
        }
        (dir, storage)
    }

    #[test]
    fn test_sell_commits_stock_and_log() {
        let (_dir, storage) = setup(&[("P101", 10, 10000), ("P102", 5, 250)]);
        let processor = SaleProcessor::new(&storage, fixed_now);

        let receipt = processor
            .sell(
                &Session::employee("sam"),
                &[SaleLine::new("P101", 4), SaleLine::new("P102", 2)],
                "Jane Doe",
                "555",
            )
            .unwrap();

        assert_eq!(receipt.transaction_id, "2502281445_JD");
        assert_eq!(receipt.total.cents(), 40500);
        assert_eq!(receipt.timestamp, fixed_now().with_nanosecond(0).unwrap());
        assert_eq!(storage.catalog().get("P101").unwrap().quantity, 6);
        assert_eq!(storage.catalog().get("P102").unwrap().quantity, 3);

        let recorded = storage.transactions().get("2502281445_JD").unwrap();
        assert_eq!(recorded.items, receipt.items);
        assert_eq!(recorded.customer_phone, "555");
    }

    #[test]
    fn test_same_minute_sale_gets_suffixed_id() {
        let (_dir, storage) = setup(&[("P101", 10, 100)]);
        let processor = SaleProcessor::new(&storage, fixed_now);
        let session = Session::employee("sam");

        let first = processor
            .sell(&session, &[SaleLine::new("P101", 1)], "Jane Doe", "555")
            .unwrap();
        let second = processor
            .sell(&session, &[SaleLine::new("P101", 1)], "John Dunn", "556")
            .unwrap();

        assert_eq!(first.transaction_id, "2502281445_JD");
        assert_eq!(second.transaction_id, "2502281445_JD-2");
        assert_eq!(storage.transactions().count(), 2);
    }

    #[test]
    fn test_repeated_lines_deduct_cumulatively() {
        let (_dir, storage) = setup(&[("P101", 10, 100)]);
        let processor = SaleProcessor::new(&storage, fixed_now);

        processor
            .sell(
                &Session::employee("sam"),
                &[SaleLine::new("P101", 3), SaleLine::new("P101", 7)],
                "A B",
                "555",
            )
            .unwrap();

        assert_eq!(storage.catalog().get("P101").unwrap().quantity, 0);
    }

    #[test]
    fn test_failed_validation_changes_nothing() {
        let (_dir, storage) = setup(&[("P101", 10, 100), ("P102", 1, 100)]);
        let processor = SaleProcessor::new(&storage, fixed_now);

        let err = processor
            .sell(
                &Session::employee("sam"),
                &[SaleLine::new("P101", 4), SaleLine::new("P102", 2)],
                "A B",
                "555",
            )
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Core(CoreError::InsufficientStock { .. })
        ));
        assert_eq!(storage.catalog().get("P101").unwrap().quantity, 10);
        assert!(!storage.transactions().path().exists());
    }

    #[test]
    fn test_overflowing_total_changes_nothing() {
        let (_dir, storage) = setup(&[("P101", 1_000_000_000_000, 100_000_000)]);
        let processor = SaleProcessor::new(&storage, fixed_now);

        let err = processor
            .sell(
                &Session::employee("sam"),
                &[SaleLine::new("P101", 1_000_000_000_000)],
                "A B",
                "555",
            )
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Core(CoreError::Validation(ValidationError::TooLarge { .. }))
        ));
        assert_eq!(
            storage.catalog().get("P101").unwrap().quantity,
            1_000_000_000_000
        );
        assert!(!storage.transactions().path().exists());
    }

    #[test]
    fn test_anonymous_cannot_sell() {
        let (_dir, storage) = setup(&[("P101", 10, 100)]);
        let processor = SaleProcessor::new(&storage, fixed_now);

        let err = processor
            .sell(&Session::anonymous(), &[SaleLine::new("P101", 1)], "A B", "555")
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::AuthorizationDenied { .. })
        ));
    }

    #[test]
    fn test_empty_sale() {
        let (_dir, storage) = setup(&[]);
        let processor = SaleProcessor::new(&storage, fixed_now);

        let err = processor
            .sell(&Session::admin("ada"), &[], "A B", "555")
            .unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::EmptySale)));
    }
}
