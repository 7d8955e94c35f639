//! # On-Disk Records
//!
//! The JSON shapes of the two store files and their conversions to and from
//! the tally-core domain types.
//!
//! ## products.json
//! ```text
//! {
//!     "P101": {                      ← the id lives only in the key
//!         "name": "Desk Lamp",
//!         "price": 25.99,            ← decimal units, Money inside
//!         "quantity": 12,
//!         "category": "Lighting",
//!         "img": "img/lamp.png",
//!         "description": "LED, warm white"
//!     }
//! }
//! ```
//!
//! ## transactions.json
//! ```text
//! {
//!     "2502281445_JD": {
//!         "transaction_id": "2502281445_JD",
//!         "customer_name": "Jane Doe",
//!         "customer_phone": "555",
//!         "items": [ { "product_id": "P101", "quantity": 4, "price": 100.0 } ],
//!         "date": "2025-02-28 14:45:09"
//!     }
//! }
//! ```
//! Older logs stored the lines as three parallel arrays (`product_ids`,
//! `quantities`, `prices`). Those records are still read and are left as
//! they are on disk; new records are always written in the `items` form.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tally_core::{LineItem, Money, Product, Transaction, TIMESTAMP_FORMAT};
use thiserror::Error;

/// Why a stored record could not become a domain value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("price {0} is not representable")]
    BadPrice(f64),

    #[error("date '{0}' does not match YYYY-MM-DD HH:MM:SS")]
    BadDate(String),

    #[error("no date recorded")]
    MissingDate,

    #[error("parallel arrays differ in length: {ids} ids, {quantities} quantities, {prices} prices")]
    MisalignedArrays {
        ids: usize,
        quantities: usize,
        prices: usize,
    },
}

fn money(value: f64) -> Result<Money, RecordError> {
    Money::from_decimal_units(value).ok_or(RecordError::BadPrice(value))
}

fn parse_date(date: &str) -> Result<NaiveDateTime, RecordError> {
    NaiveDateTime::parse_from_str(date, TIMESTAMP_FORMAT)
        .map_err(|_| RecordError::BadDate(date.to_string()))
}

// =============================================================================
// Product Record
// =============================================================================

/// One catalog entry as stored. The product id is the map key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub category: String,
    #[serde(default)]
    pub img: String,
    pub description: String,
}

impl ProductRecord {
    pub fn into_product(self, id: &str) -> Result<Product, RecordError> {
        Ok(Product {
            id: id.to_string(),
            name: self.name,
            price: money(self.price)?,
            quantity: self.quantity,
            category: self.category,
            image_path: self.img,
            description: self.description,
        })
    }
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        ProductRecord {
            name: product.name.clone(),
            price: product.price.to_decimal_units(),
            quantity: product.quantity,
            category: product.category.clone(),
            img: product.image_path.clone(),
            description: product.description.clone(),
        }
    }
}

// =============================================================================
// Transaction Record
// =============================================================================

/// One sold line as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub product_id: String,
    pub quantity: i64,
    /// Unit price at the moment of sale.
    pub price: f64,
}

/// A transaction in the current `items` layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<LineRecord>,
    pub date: String,
}

/// A transaction in the parallel-array layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyTransactionRecord {
    #[serde(default)]
    pub transaction_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub product_ids: Vec<String>,
    pub quantities: Vec<i64>,
    pub prices: Vec<f64>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Whatever a transaction entry in the log file turns out to be.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StoredTransaction {
    Current(TransactionRecord),
    Legacy(LegacyTransactionRecord),
}

impl StoredTransaction {
    /// Converts to a domain transaction keyed by `id` (the map key wins
    /// over any id repeated inside the record).
    pub fn into_transaction(self, id: &str) -> Result<Transaction, RecordError> {
        match self {
            StoredTransaction::Current(record) => record.into_transaction(id),
            StoredTransaction::Legacy(record) => record.into_transaction(id),
        }
    }
}

impl TransactionRecord {
    pub fn into_transaction(self, id: &str) -> Result<Transaction, RecordError> {
        let items = self
            .items
            .into_iter()
            .map(|line| {
                Ok(LineItem {
                    product_id: line.product_id,
                    quantity: line.quantity,
                    unit_price: money(line.price)?,
                })
            })
            .collect::<Result<Vec<_>, RecordError>>()?;

        Ok(Transaction {
            id: id.to_string(),
            items,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            timestamp: parse_date(&self.date)?,
        })
    }
}

impl LegacyTransactionRecord {
    pub fn into_transaction(self, id: &str) -> Result<Transaction, RecordError> {
        let (ids, quantities, prices) =
            (self.product_ids.len(), self.quantities.len(), self.prices.len());
        if ids != quantities || ids != prices {
            return Err(RecordError::MisalignedArrays {
                ids,
                quantities,
                prices,
            });
        }

        let timestamp = match self.date {
            Some(date) => parse_date(&date)?,
            None => return Err(RecordError::MissingDate),
        };

        let items = self
            .product_ids
            .into_iter()
            .zip(self.quantities)
            .zip(self.prices)
            .map(|((product_id, quantity), price)| {
                Ok(LineItem {
                    product_id,
                    quantity,
                    unit_price: money(price)?,
                })
            })
            .collect::<Result<Vec<_>, RecordError>>()?;

        Ok(Transaction {
            id: id.to_string(),
            items,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            timestamp,
        })
    }
}

impl From<&Transaction> for TransactionRecord {
    fn from(txn: &Transaction) -> Self {
        TransactionRecord {
            transaction_id: Some(txn.id.clone()),
            customer_name: txn.customer_name.clone(),
            customer_phone: txn.customer_phone.clone(),
            items: txn
                .items
                .iter()
                .map(|item| LineRecord {
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                    price: item.unit_price.to_decimal_units(),
                })
                .collect(),
            date: txn.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
