//! Low-stock detection.

use serde::{Deserialize, Serialize};

use crate::types::Catalog;

/// A product whose shelf quantity fell below the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockItem {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
}

/// Products with `quantity < threshold`, in catalog order.
pub fn low_stock(catalog: &Catalog, threshold: i64) -> Vec<LowStockItem> {
    catalog
        .values()
        .filter(|product| product.quantity < threshold)
        .map(|product| LowStockItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity: product.quantity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Product;
    use crate::DEFAULT_LOW_STOCK_THRESHOLD;

    fn catalog(rows: &[(&str, i64)]) -> Catalog {
        rows.iter()
            .map(|(id, quantity)| {
                (
                    id.to_string(),
                    Product {
                        id: id.to_string(),
                        name: format!("Item {}", id),
                        price: Money::from_cents(100),
                        quantity: *quantity,
                        category: "General".to_string(),
                        image_path: String::new(),
                        description: "x".to_string(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_strictly_below_threshold() {
        let items = low_stock(
            &catalog(&[("P101", 3), ("P102", 10)]),
            DEFAULT_LOW_STOCK_THRESHOLD,
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, "P101");
        assert_eq!(items[0].quantity, 3);

        let items = low_stock(&catalog(&[("P101", 5)]), 5);
        assert!(items.is_empty());
    }

    #[test]
    fn test_catalog_order_is_kept() {
        let items = low_stock(&catalog(&[("P109", 0), ("P101", 1), ("P105", 2)]), 5);
        let ids: Vec<&str> = items.iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["P109", "P101", "P105"]);
    }
}
