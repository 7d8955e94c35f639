//! # Catalog Store
//!
//! The product catalog file: load, save, CRUD and search.
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Search Filters Combine                           │
//! │                                                                         │
//! │  ProductFilter { keyword: "lamp", price: 10.00..=30.00 }               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ catalog (file order)                    │                           │
//! │  │                                         │                           │
//! │  │ P101 | Desk Lamp   | 25.99 | Lighting   │ ← keyword ✓ price ✓       │
//! │  │ P102 | Floor Lamp  | 89.00 | Lighting   │ ← keyword ✓ price ✗       │
//! │  │ P103 | Mug         |  6.50 | Kitchen    │ ← keyword ✗               │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results: [P101]        (every supplied criterion must hold)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use indexmap::IndexMap;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::file::{read_json, write_json};
use crate::record::ProductRecord;
use tally_core::validation::validate_product;
use tally_core::{Catalog, Product, ProductFilter, ProductUpdate, ValidationError};

const ENTITY: &str = "Product";

/// Store for the product catalog file.
///
/// ## Usage
/// ```rust,no_run
/// use tally_core::ProductFilter;
/// use tally_db::CatalogStore;
///
/// let store = CatalogStore::new("./database/products.json");
///
/// let lamps = store.search(&ProductFilter {
///     keyword: Some("lamp".to_string()),
///     ..Default::default()
/// });
///
/// let lamp = store.get("P101")?;
/// # Ok::<(), tally_db::DbError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Creates a store over the catalog file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CatalogStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole catalog in file order.
    ///
    /// A missing or corrupt file is an empty catalog. A single entry that
    /// cannot be read is skipped with a warning; it will not survive the
    /// next save.
    pub fn load(&self) -> Catalog {
        let raw: IndexMap<String, Value> = read_json(&self.path);

        let catalog: Catalog = raw
            .into_iter()
            .filter_map(|(id, value)| {
                let product = serde_json::from_value::<ProductRecord>(value)
                    .map_err(|e| e.to_string())
                    .and_then(|record| record.into_product(&id).map_err(|e| e.to_string()));
                match product {
                    Ok(product) => Some((id, product)),
                    Err(reason) => {
                        warn!(id = %id, reason = %reason, "Skipping unreadable catalog entry");
                        None
                    }
                }
            })
            .collect();

        debug!(path = %self.path.display(), count = catalog.len(), "Catalog loaded");
        catalog
    }

    /// Rewrites the whole catalog file.
    pub fn save(&self, catalog: &Catalog) -> DbResult<()> {
        let records: IndexMap<&str, ProductRecord> = catalog
            .iter()
            .map(|(id, product)| (id.as_str(), ProductRecord::from(product)))
            .collect();

        write_json(&self.path, &records)?;
        debug!(path = %self.path.display(), count = records.len(), "Catalog saved");
        Ok(())
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Product found
    /// * `Err(DbError::NotFound)` - No such id
    pub fn get(&self, id: &str) -> DbResult<Product> {
        self.load()
            .shift_remove(id)
            .ok_or_else(|| DbError::not_found(ENTITY, id))
    }

    /// Every product, in catalog order.
    pub fn list(&self) -> Vec<Product> {
        self.load().into_values().collect()
    }

    /// Number of products in the catalog.
    pub fn count(&self) -> usize {
        self.load().len()
    }

    /// Adds a new product at the end of the catalog.
    ///
    /// ## Order of Checks
    /// 1. Id already present → `Duplicate`
    /// 2. Any field rule broken → `Validation` (first rule wins)
    /// 3. Rewrite the file
    pub fn add(&self, product: Product) -> DbResult<()> {
        let mut catalog = self.load();

        if catalog.contains_key(&product.id) {
            return Err(DbError::duplicate(ENTITY, &product.id));
        }
        validate_product(&product)?;

        info!(id = %product.id, name = %product.name, "Adding product");
        catalog.insert(product.id.clone(), product);
        self.save(&catalog)
    }

    /// Applies a partial update and returns the stored result.
    ///
    /// The merged record is validated as a whole before anything is
    /// written; on failure the file is left as it was.
    pub fn update(&self, id: &str, update: &ProductUpdate) -> DbResult<Product> {
        let mut catalog = self.load();

        let current = catalog
            .get_mut(id)
            .ok_or_else(|| DbError::not_found(ENTITY, id))?;
        if update.is_empty() {
            return Err(ValidationError::NothingToUpdate.into());
        }

        let merged = current.merged(update);
        validate_product(&merged)?;

        debug!(id = %id, "Updating product");
        *current = merged.clone();
        self.save(&catalog)?;
        Ok(merged)
    }

    /// Sets a product's shelf quantity. Same checks as [`update`](Self::update).
    pub fn update_quantity(&self, id: &str, quantity: i64) -> DbResult<Product> {
        self.update(id, &ProductUpdate::quantity(quantity))
    }

    /// Adds `delta` (negative to deduct) to a product's stored quantity.
    ///
    /// One read and one write of the catalog file. The result must be a
    /// valid product; a sum past `i64` is `TooLarge`.
    pub fn adjust_quantity(&self, id: &str, delta: i64) -> DbResult<Product> {
        let mut catalog = self.load();

        let current = catalog
            .get_mut(id)
            .ok_or_else(|| DbError::not_found(ENTITY, id))?;
        let quantity = current
            .quantity
            .checked_add(delta)
            .ok_or_else(|| ValidationError::TooLarge {
                field: "quantity".to_string(),
            })?;

        let adjusted = current.merged(&ProductUpdate::quantity(quantity));
        validate_product(&adjusted)?;

        debug!(id = %id, delta, quantity, "Adjusting quantity");
        *current = adjusted.clone();
        self.save(&catalog)?;
        Ok(adjusted)
    }

    /// Removes a product, returning what was removed.
    ///
    /// The remaining products keep their order.
    pub fn delete(&self, id: &str) -> DbResult<Product> {
        let mut catalog = self.load();

        let removed = catalog
            .shift_remove(id)
            .ok_or_else(|| DbError::not_found(ENTITY, id))?;

        info!(id = %id, "Deleting product");
        self.save(&catalog)?;
        Ok(removed)
    }

    /// Products matching every supplied criterion, in catalog order.
    pub fn search(&self, filter: &ProductFilter) -> Vec<Product> {
        let results: Vec<Product> = self
            .load()
            .into_values()
            .filter(|product| product.matches(filter))
            .collect();

        debug!(count = results.len(), "Search returned products");
        results
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
