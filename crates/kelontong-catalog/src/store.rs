//! # Catalog Store
//!
//! The store's in-memory data: products, categories, customers and the
//! transaction log, behind one handle.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Store                                      │
//! │                                                                         │
//! │  kasir startup                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog::sample() ← seeded with the store's starter data              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  products()      categories()    customers()    transactions()  │   │
//! │  │  ProductRepo     CategoryRepo    CustomerRepo   TransactionLog  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       │ Owned by AppState, one session at a time                       │
//! │       ▼                                                                 │
//! │  Command ──► &Catalog (queries) / &mut Catalog (stock, sales)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};

use kelontong_core::{Customer, Product, ProductCategory};

use crate::error::{CatalogError, CatalogResult};
use crate::repository::category::CategoryRepository;
use crate::repository::customer::CustomerRepository;
use crate::repository::product::ProductRepository;
use crate::repository::transaction::TransactionLog;
use crate::seed;

/// Handle to every repository in the store.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: ProductRepository,
    categories: CategoryRepository,
    customers: CustomerRepository,
    transactions: TransactionLog,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Creates a catalog loaded with the starter data: 5 categories,
    /// 12 products and 3 customers.
    pub fn sample() -> Self {
        let mut catalog = Catalog::new();
        catalog.load(
            seed::sample_categories(),
            seed::sample_products(),
            seed::sample_customers(),
        );
        info!(
            products = catalog.products.count(),
            customers = catalog.customers.count(),
            "Sample catalog loaded"
        );
        catalog
    }

    /// Loads records, skipping any that fail validation or uniqueness.
    fn load(
        &mut self,
        categories: Vec<ProductCategory>,
        products: Vec<Product>,
        customers: Vec<Customer>,
    ) {
        for category in categories {
            if let Err(e) = self.categories.insert(category) {
                warn!(error = %e, "Skipping category");
            }
        }
        for product in products {
            if let Err(e) = self.add_product(product) {
                warn!(error = %e, "Skipping product");
            }
        }
        for customer in customers {
            if let Err(e) = self.customers.insert(customer) {
                warn!(error = %e, "Skipping customer");
            }
        }
    }

    /// Inserts a product whose category must already exist.
    pub fn add_product(&mut self, product: Product) -> CatalogResult<()> {
        if self.categories.get_by_id(&product.category.id).is_none() {
            return Err(CatalogError::not_found("Category", &product.category.id));
        }
        self.products.insert(product)
    }

    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    pub fn products_mut(&mut self) -> &mut ProductRepository {
        &mut self.products
    }

    pub fn categories(&self) -> &CategoryRepository {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut CategoryRepository {
        &mut self.categories
    }

    pub fn customers(&self) -> &CustomerRepository {
        &self.customers
    }

    pub fn customers_mut(&mut self) -> &mut CustomerRepository {
        &mut self.customers
    }

    pub fn transactions(&self) -> &TransactionLog {
        &self.transactions
    }

    pub fn transactions_mut(&mut self) -> &mut TransactionLog {
        &mut self.transactions
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.products().count(), 12);
        assert_eq!(catalog.categories().count(), 5);
        assert_eq!(catalog.customers().count(), 3);
        assert!(catalog.transactions().is_empty());
    }

    #[test]
    fn test_add_product_requires_category() {
        let mut catalog = Catalog::sample();
        let mut product = catalog.products().get_by_id("p001").unwrap().clone();
        product.id = "p100".into();
        product.barcode = None;
        product.category.id = "elektronik".into();

        assert!(matches!(
            catalog.add_product(product.clone()),
            Err(CatalogError::NotFound { entity, .. }) if entity == "Category"
        ));

        product.category.id = "makanan".into();
        catalog.add_product(product).unwrap();
        assert_eq!(catalog.products().count(), 13);
    }
}
