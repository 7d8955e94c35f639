//! # Catalog Service
//!
//! Session-checked access to the product catalog.
//!
//! ```text
//! list / get / search     → any logged-in role
//! add / update / delete   → admin only
//! ```

use tally_core::{Access, Product, ProductFilter, ProductUpdate, Session};
use tally_db::Storage;
use tracing::debug;

use crate::error::ServiceResult;

pub struct CatalogService<'a> {
    storage: &'a Storage,
}

impl<'a> CatalogService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        CatalogService { storage }
    }

    /// Every product, in catalog order.
    pub fn list(&self, session: &Session) -> ServiceResult<Vec<Product>> {
        session.authorize(Access::Authenticated)?;
        Ok(self.storage.catalog().list())
    }

    pub fn get(&self, session: &Session, id: &str) -> ServiceResult<Product> {
        session.authorize(Access::Authenticated)?;
        Ok(self.storage.catalog().get(id)?)
    }

    pub fn search(&self, session: &Session, filter: &ProductFilter) -> ServiceResult<Vec<Product>> {
        session.authorize(Access::Authenticated)?;
        debug!(?filter, "Searching catalog");
        Ok(self.storage.catalog().search(filter))
    }

    /// Adds a product and returns it as stored.
    pub fn add(&self, session: &Session, product: Product) -> ServiceResult<Product> {
        session.authorize(Access::Admin)?;
        let id = product.id.clone();
        self.storage.catalog().add(product)?;
        Ok(self.storage.catalog().get(&id)?)
    }

    pub fn update(
        &self,
        session: &Session,
        id: &str,
        update: &ProductUpdate,
    ) -> ServiceResult<Product> {
        session.authorize(Access::Admin)?;
        Ok(self.storage.catalog().update(id, update)?)
    }

    /// Removes a product and returns what was removed.
    pub fn delete(&self, session: &Session, id: &str) -> ServiceResult<Product> {
        session.authorize(Access::Admin)?;
        Ok(self.storage.catalog().delete(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceError;
    use tally_core::{CoreError, Money};
    use tally_db::{DbError, StoreConfig};
    use tempfile::TempDir;

    fn lamp() -> Product {
        Product {
            id: "P101".to_string(),
            name: "Desk Lamp".to_string(),
            price: Money::from_cents(2599),
            quantity: 12,
            category: "Lighting".to_string(),
            image_path: String::new(),
            description: "LED, warm white".to_string(),
        }
    }

    fn storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(StoreConfig::new(dir.path())).unwrap();
        (dir, storage)
    }

    #[test]
    fn test_admin_manages_catalog() {
        let (_dir, storage) = storage();
        let service = CatalogService::new(&storage);
        let admin = Session::admin("ada");

        assert_eq!(service.add(&admin, lamp()).unwrap(), lamp());

        let updated = service
            .update(&admin, "P101", &ProductUpdate::quantity(3))
            .unwrap();
        assert_eq!(updated.quantity, 3);

        assert_eq!(service.delete(&admin, "P101").unwrap().quantity, 3);
        assert!(service.list(&admin).unwrap().is_empty());
    }

    #[test]
    fn test_employee_reads_but_cannot_write() {
        let (_dir, storage) = storage();
        let service = CatalogService::new(&storage);
        service.add(&Session::admin("ada"), lamp()).unwrap();

        let sam = Session::employee("sam");
        assert_eq!(service.get(&sam, "P101").unwrap().name, "Desk Lamp");
        assert_eq!(service.search(&sam, &ProductFilter::default()).unwrap().len(), 1);

        let err = service.delete(&sam, "P101").unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::AuthorizationDenied {
                required: Access::Admin
            })
        ));
        assert_eq!(service.list(&sam).unwrap().len(), 1);
    }

    #[test]
    fn test_anonymous_is_refused_before_lookup() {
        let (_dir, storage) = storage();
        let service = CatalogService::new(&storage);

        let err = service.get(&Session::anonymous(), "P404").unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::AuthorizationDenied { .. })
        ));

        let err = service.get(&Session::employee("sam"), "P404").unwrap_err();
        assert!(matches!(err, ServiceError::Db(DbError::NotFound { .. })));
    }
}
