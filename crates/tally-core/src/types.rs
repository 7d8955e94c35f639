//! # Domain Types
//!
//! Core domain types used throughout tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Transaction   │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (P + 3 dig) │   │  id (generated) │   │  product_id     │       │
//! │  │  name           │   │  items ─────────┼──►│  quantity       │       │
//! │  │  price (Money)  │   │  customer_name  │   │  unit_price     │       │
//! │  │  quantity       │   │  customer_phone │   │  (frozen)       │       │
//! │  └─────────────────┘   │  timestamp      │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │  ProductUpdate  │   │  ProductFilter  │                              │
//! │  │  (partial)      │   │  id · keyword   │                              │
//! │  │                 │   │  price · qty    │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Products are keyed by their business id (`P101`). Transactions are keyed
//! by a generated id and never change after they are recorded.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// The product catalog, in file order.
pub type Catalog = IndexMap<String, Product>;

/// The transaction log, in append order.
pub type TransactionMap = IndexMap<String, Transaction>;

// =============================================================================
// Product
// =============================================================================

/// A product tracked in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Business identifier, `P` followed by three digits.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Current selling price.
    pub price: Money,

    /// Units on the shelf. Never negative.
    pub quantity: i64,

    pub category: String,

    /// Path to a product image; may be empty.
    pub image_path: String,

    pub description: String,
}

impl Product {
    /// Checks if `quantity` units can be taken from the shelf.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity <= self.quantity
    }

    /// Returns a copy with every supplied field of `update` applied.
    ///
    /// Fields left as `None` keep their current value. The result is NOT
    /// validated here; callers validate the merged record before storing it.
    pub fn merged(&self, update: &ProductUpdate) -> Product {
        Product {
            id: self.id.clone(),
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            price: update.price.unwrap_or(self.price),
            quantity: update.quantity.unwrap_or(self.quantity),
            category: update
                .category
                .clone()
                .unwrap_or_else(|| self.category.clone()),
            image_path: update
                .image_path
                .clone()
                .unwrap_or_else(|| self.image_path.clone()),
            description: update
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
        }
    }

    /// Checks if the product satisfies every filter that is set.
    pub fn matches(&self, filter: &ProductFilter) -> bool {
        if let Some(id) = &filter.id {
            if &self.id != id {
                return false;
            }
        }

        if let Some(keyword) = &filter.keyword {
            let keyword = keyword.to_lowercase();
            let hit = [&self.name, &self.category, &self.description]
                .iter()
                .any(|field| field.to_lowercase().contains(&keyword));
            if !hit {
                return false;
            }
        }

        filter.price.contains(&self.price) && filter.quantity.contains(&self.quantity)
    }
}

// =============================================================================
// Partial Update
// =============================================================================

/// A partial product update. `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub quantity: Option<i64>,
    pub category: Option<String>,
    pub image_path: Option<String>,
    pub description: Option<String>,
}

impl ProductUpdate {
    /// A quantity-only update, used for stock deductions and refills.
    pub fn quantity(quantity: i64) -> Self {
        ProductUpdate {
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.category.is_none()
            && self.image_path.is_none()
            && self.description.is_none()
    }
}

// =============================================================================
// Search Filter
// =============================================================================

/// Inclusive bounds where either end may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Bounds {
            min: None,
            max: None,
        }
    }
}

impl<T: PartialOrd> Bounds<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Bounds { min, max }
    }

    /// Checks `min <= value <= max`, ignoring any end that is unset.
    pub fn contains(&self, value: &T) -> bool {
        self.min.as_ref().map_or(true, |min| value >= min)
            && self.max.as_ref().map_or(true, |max| value <= max)
    }
}

/// Product search criteria. All supplied criteria are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Exact id match.
    pub id: Option<String>,

    /// Case-insensitive substring of name, category or description.
    pub keyword: Option<String>,

    pub price: Bounds<Money>,

    pub quantity: Bounds<i64>,
}

// =============================================================================
// Transaction
// =============================================================================

/// One sold product within a transaction.
///
/// `unit_price` is the catalog price at the moment of sale (snapshot); later
/// price changes never touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl LineItem {
    /// `quantity × unit_price`, saturating at the `i64` cent bounds.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// A completed sale. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub items: Vec<LineItem>,
    pub customer_name: String,
    pub customer_phone: String,
    /// Local wall-clock time of the sale, second resolution.
    pub timestamp: NaiveDateTime,
}

impl Transaction {
    /// Sum of every line total.
    ///
    /// Sales are priced with checked arithmetic, so only a hand-edited log
    /// can reach the saturation point here.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Total units across all lines.
    pub fn units(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.quantity))
    }
}

// =============================================================================
// Sale Request / Receipt
// =============================================================================

/// One requested (product, quantity) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub product_id: String,
    pub quantity: i64,
}

impl SaleLine {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        SaleLine {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// What the operator gets back after a committed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleReceipt {
    pub transaction_id: String,
    pub total: Money,
    pub items: Vec<LineItem>,
    pub customer_name: String,
    pub timestamp: NaiveDateTime,
}

impl From<&Transaction> for SaleReceipt {
    fn from(txn: &Transaction) -> Self {
        SaleReceipt {
            transaction_id: txn.id.clone(),
            total: txn.total(),
            items: txn.items.clone(),
            customer_name: txn.customer_name.clone(),
            timestamp: txn.timestamp,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
