//! # Sale Pricing
//!
//! The pure half of a sale: checking a request against a catalog snapshot
//! and pricing it, plus transaction id generation.
//!
//! ## Two-Phase Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Phase 1: VALIDATE (this module, no side effects)                      │
//! │    for each line, in input order:                                      │
//! │      product missing?          → ProductNotFound(id)                   │
//! │      quantity <= 0?            → InvalidQuantity                       │
//! │      running total > stock?    → InsufficientStock(id)                 │
//! │      qty × price overflows?    → Validation(TooLarge)                  │
//! │    price every line at the catalog price seen here                     │
//! │                                                                         │
//! │  Phase 2: COMMIT (tally-service)                                       │
//! │    deduct stock per line → append transaction → receipt               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDateTime;
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Catalog, LineItem, SaleLine};
use crate::TRANSACTION_ID_TIME_FORMAT;

/// Validates every line of a sale request and prices it.
///
/// Lines naming the same product are checked against stock by their
/// running total, so a request can never promise more units than exist.
/// Line totals and the sale total must fit in `i64` cents; the commit
/// phase never has to handle an amount this function let through.
///
/// ## Returns
/// One [`LineItem`] per input line, in input order, carrying the catalog
/// price read from `catalog`.
pub fn price_sale(catalog: &Catalog, lines: &[SaleLine]) -> CoreResult<Vec<LineItem>> {
    if lines.is_empty() {
        return Err(CoreError::EmptySale);
    }

    let mut requested: HashMap<&str, i64> = HashMap::new();
    let mut items = Vec::with_capacity(lines.len());
    let mut sale_total = Money::zero();

    for line in lines {
        let product = catalog
            .get(&line.product_id)
            .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;

        if line.quantity <= 0 {
            return Err(CoreError::InvalidQuantity {
                product_id: line.product_id.clone(),
                requested: line.quantity,
            });
        }

        let running = requested.entry(product.id.as_str()).or_insert(0);
        *running = running
            .checked_add(line.quantity)
            .ok_or_else(|| ValidationError::too_large("quantity"))?;
        if !product.can_sell(*running) {
            return Err(CoreError::InsufficientStock {
                product_id: product.id.clone(),
                available: product.quantity,
                requested: *running,
            });
        }

        sale_total = product
            .price
            .checked_mul(line.quantity)
            .and_then(|line_total| sale_total.checked_add(line_total))
            .ok_or_else(|| ValidationError::too_large("sale total"))?;

        items.push(LineItem {
            product_id: product.id.clone(),
            quantity: line.quantity,
            unit_price: product.price,
        });
    }

    Ok(items)
}

/// Uppercase first letter of each whitespace-separated word.
///
/// ```rust
/// use tally_core::sale::customer_initials;
///
/// assert_eq!(customer_initials("Jane Doe"), "JD");
/// assert_eq!(customer_initials("  ada   lovelace king "), "ALK");
/// ```
pub fn customer_initials(customer_name: &str) -> String {
    customer_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Base transaction id: `YYMMDDHHmm_INITIALS`.
///
/// ```rust
/// use chrono::NaiveDate;
/// use tally_core::sale::transaction_id;
///
/// let at = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap().and_hms_opt(14, 45, 9).unwrap();
/// assert_eq!(transaction_id("Jane Doe", at), "2502281445_JD");
/// ```
pub fn transaction_id(customer_name: &str, at: NaiveDateTime) -> String {
    format!(
        "{}_{}",
        at.format(TRANSACTION_ID_TIME_FORMAT),
        customer_initials(customer_name)
    )
}

/// Transaction id that does not collide with any id `taken` reports.
///
/// The base id is used as is when free; otherwise `-2`, `-3`, ... is
/// appended until a free id is found.
pub fn unique_transaction_id(
    customer_name: &str,
    at: NaiveDateTime,
    taken: impl Fn(&str) -> bool,
) -> String {
    let base = transaction_id(customer_name, at);
    if !taken(&base) {
        return base;
    }

    (2u32..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !taken(candidate))
        .unwrap_or(base)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Product;
    use chrono::NaiveDate;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        for (id, qty, cents) in [("P101", 10, 10000), ("P102", 2, 550)] {
            catalog.insert(
                id.to_string(),
                Product {
                    id: id.to_string(),
                    name: format!("Item {}", id),
                    price: Money::from_cents(cents),
                    quantity: qty,
                    category: "General".to_string(),
                    image_path: String::new(),
                    description: "Test item".to_string(),
                },
            );
        }
        catalog
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 28)
            .unwrap()
            .and_hms_opt(14, 45, 0)
            .unwrap()
    }

    #[test]
    fn test_price_sale_uses_catalog_prices() {
        let items = price_sale(
            &catalog(),
            &[SaleLine::new("P101", 4), SaleLine::new("P102", 2)],
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].unit_price.cents(), 10000);
        assert_eq!(items[0].line_total().cents(), 40000);
        assert_eq!(items[1].quantity, 2);
    }

    #[test]
    fn test_price_sale_rejects_empty_request() {
        assert_eq!(price_sale(&catalog(), &[]), Err(CoreError::EmptySale));
    }

    #[test]
    fn test_price_sale_fails_fast_in_input_order() {
        let err = price_sale(
            &catalog(),
            &[
                SaleLine::new("P102", 5),
                SaleLine::new("P999", 1),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { ref product_id, .. } if product_id == "P102"));

        let err = price_sale(
            &catalog(),
            &[SaleLine::new("P999", 1), SaleLine::new("P102", 5)],
        )
        .unwrap_err();
        assert_eq!(err, CoreError::ProductNotFound("P999".to_string()));
    }

    #[test]
    fn test_price_sale_rejects_non_positive_quantity() {
        let err = price_sale(&catalog(), &[SaleLine::new("P101", 0)]).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidQuantity {
                product_id: "P101".to_string(),
                requested: 0
            }
        );
    }

    #[test]
    fn test_price_sale_checks_running_total_of_repeated_lines() {
        let err = price_sale(
            &catalog(),
            &[SaleLine::new("P101", 6), SaleLine::new("P101", 6)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                product_id: "P101".to_string(),
                available: 10,
                requested: 12
            }
        );

        assert!(price_sale(
            &catalog(),
            &[SaleLine::new("P101", 6), SaleLine::new("P101", 4)]
        )
        .is_ok());
    }

    #[test]
    fn test_price_sale_rejects_line_total_overflow() {
        let mut catalog = catalog();
        if let Some(p) = catalog.get_mut("P101") {
            p.quantity = 1_000_000_000_000;
            p.price = Money::from_cents(100_000_000);
        }

        let err = price_sale(&catalog, &[SaleLine::new("P101", 1_000_000_000_000)]).unwrap_err();
        assert_eq!(
            err,
            CoreError::Validation(ValidationError::too_large("sale total"))
        );
        assert!(price_sale(&catalog, &[SaleLine::new("P101", 1_000)]).is_ok());
    }

    #[test]
    fn test_price_sale_rejects_sale_total_overflow() {
        let mut catalog = catalog();
        if let Some(p) = catalog.get_mut("P101") {
            p.quantity = i64::MAX;
            p.price = Money::from_cents(i64::MAX / 2 + 1);
        }

        // Each line fits on its own; the second pushes the total past i64.
        let err = price_sale(
            &catalog,
            &[SaleLine::new("P101", 1), SaleLine::new("P101", 1)],
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::TooLarge { .. })));
    }

    #[test]
    fn test_price_sale_rejects_running_quantity_overflow() {
        let mut catalog = catalog();
        if let Some(p) = catalog.get_mut("P101") {
            p.quantity = i64::MAX;
            p.price = Money::from_cents(0);
        }

        let err = price_sale(
            &catalog,
            &[SaleLine::new("P101", i64::MAX), SaleLine::new("P101", 1)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::Validation(ValidationError::too_large("quantity"))
        );
    }

    #[test]
    fn test_transaction_id_format() {
        assert_eq!(transaction_id("Jane Doe", at()), "2502281445_JD");
        assert_eq!(transaction_id("a b", at()), "2502281445_AB");
        assert_eq!(transaction_id("", at()), "2502281445_");
    }

    #[test]
    fn test_unique_transaction_id_appends_sequence() {
        let taken = ["2502281445_JD", "2502281445_JD-2"];
        let id = unique_transaction_id("Jane Doe", at(), |c| taken.contains(&c));
        assert_eq!(id, "2502281445_JD-3");

        let id = unique_transaction_id("John Dee", at(), |_| false);
        assert_eq!(id, "2502281445_JD");
    }
}
