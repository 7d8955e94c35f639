//! # Report Aggregation
//!
//! Pure aggregation over the transaction log. The service layer loads the
//! log and catalog, picks `now`, and hands both in here.
//!
//! ## Window Semantics
//! ```text
//!   days = None      → every transaction in the log
//!   days = Some(7)   → [now - 7 days, now], both ends inclusive
//!
//!   ──────┬───────────────────────────────┬──────► time
//!       start                            end (= now)
//!         └──── in window (inclusive) ────┘
//! ```
//!
//! Recorded unit prices are used as is; the catalog is consulted only for
//! display names.

use chrono::{Duration, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Catalog, Transaction};

// =============================================================================
// Window
// =============================================================================

/// Inclusive time range a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ReportWindow {
    /// The trailing `days` ending at `now`.
    ///
    /// A span reaching past the earliest representable time starts at
    /// [`NaiveDateTime::MIN`], so the window covers the whole log.
    pub fn trailing(days: u32, now: NaiveDateTime) -> Self {
        let start = now
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(NaiveDateTime::MIN);

        ReportWindow { start, end: now }
    }

    #[inline]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Checks `at` against an optional window. No window admits everything.
fn in_window(window: Option<&ReportWindow>, at: NaiveDateTime) -> bool {
    window.map_or(true, |w| w.contains(at))
}

// =============================================================================
// Report Types
// =============================================================================

/// One row of the best-seller ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestSeller {
    pub product_id: String,
    /// Current catalog name; `None` once the product has been deleted.
    pub name: Option<String>,
    pub units_sold: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestSellersReport {
    pub window: Option<ReportWindow>,
    pub ranking: Vec<BestSeller>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueReport {
    pub window: Option<ReportWindow>,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesHistory {
    pub window: Option<ReportWindow>,
    /// Newest first.
    pub transactions: Vec<Transaction>,
}

// =============================================================================
// Aggregations
// =============================================================================

/// Units sold per product, highest first.
///
/// ## Ordering
/// ```text
/// aggregate into an insertion-ordered map (first sale of each product wins
/// its slot) → stable sort by units_sold descending
///
/// ties keep the order in which the products were first seen in the log
/// ```
pub fn best_sellers<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    catalog: &Catalog,
    window: Option<ReportWindow>,
) -> BestSellersReport {
    let mut units: IndexMap<&str, i64> = IndexMap::new();

    for txn in transactions {
        if !in_window(window.as_ref(), txn.timestamp) {
            continue;
        }
        for item in &txn.items {
            let sold = units.entry(item.product_id.as_str()).or_insert(0);
            *sold = sold.saturating_add(item.quantity);
        }
    }

    let mut ranking: Vec<BestSeller> = units
        .into_iter()
        .map(|(product_id, units_sold)| BestSeller {
            product_id: product_id.to_string(),
            name: catalog.get(product_id).map(|p| p.name.clone()),
            units_sold,
        })
        .collect();
    ranking.sort_by(|a, b| b.units_sold.cmp(&a.units_sold));

    BestSellersReport { window, ranking }
}

/// Sum of `quantity × recorded unit price` over every in-window line.
///
/// Saturates at the `i64` cent bounds rather than wrapping.
pub fn total_revenue<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    window: Option<ReportWindow>,
) -> RevenueReport {
    let total = transactions
        .into_iter()
        .filter(|txn| in_window(window.as_ref(), txn.timestamp))
        .map(Transaction::total)
        .sum();

    RevenueReport { window, total }
}

/// In-window transactions, newest first.
pub fn sales_history<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    window: Option<ReportWindow>,
) -> SalesHistory {
    let mut transactions: Vec<Transaction> = transactions
        .into_iter()
        .filter(|txn| in_window(window.as_ref(), txn.timestamp))
        .cloned()
        .collect();
    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    SalesHistory {
        window,
        transactions,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
