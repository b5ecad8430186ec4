//! # Product Repository
//!
//! Store operations for products.
//!
//! ## Key Operations
//! - Search with a barcode fast path
//! - Insert with id and barcode uniqueness
//! - Stock movements with an optimistic check
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Product Search Works                             │
//! │                                                                         │
//! │  Cashier types or scans: "8992388888881"                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  8 to 13 digits? ──yes──► exact barcode lookup ──hit──► [that product] │
//! │       │ no                                  │ miss                      │
//! │       ▼                                     ▼                           │
//! │  Substring match across: name, description, category name, barcode    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Category / stock filters, then stable sort                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use kelontong_core::catalog::{filter_products, is_barcode_query, ProductQuery};
use kelontong_core::inventory::plan_sale;
use kelontong_core::validation::{validate_price, validate_product_name};
use kelontong_core::{Product, StockMovement, Transaction};

use crate::error::{CatalogError, CatalogResult};

/// Repository for products and their stock history.
///
/// ## Usage
/// ```rust
/// use kelontong_catalog::Catalog;
/// use kelontong_core::catalog::ProductQuery;
///
/// let catalog = Catalog::sample();
/// let results = catalog.products().search(&ProductQuery::search("indomie"));
/// assert_eq!(results[0].id, "p001");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProductRepository {
    /// Catalog order is insertion order.
    products: Vec<Product>,
    movements: Vec<StockMovement>,
}

impl ProductRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        ProductRepository::default()
    }

    /// Searches products.
    ///
    /// A query of 8 to 13 digits is tried as an exact barcode first; if no
    /// product carries that barcode the regular substring search runs.
    pub fn search(&self, query: &ProductQuery) -> Vec<&Product> {
        let term = query.search.trim();
        debug!(query = %term, sort = ?query.sort, "Searching products");

        if is_barcode_query(term) {
            if let Some(product) = self.get_by_barcode(term) {
                if query.matches(product) {
                    debug!(id = %product.id, "Barcode hit");
                    return vec![product];
                }
            }
        }

        let products = filter_products(&self.products, query);
        debug!(count = products.len(), "Search returned products");
        products
    }

    /// Gets a product by ID.
    pub fn get_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Gets a product by exact barcode.
    pub fn get_by_barcode(&self, barcode: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.barcode.as_deref() == Some(barcode))
    }

    /// Like [`get_by_id`](Self::get_by_id) but a miss is an error.
    pub fn require(&self, id: &str) -> CatalogResult<&Product> {
        self.get_by_id(id)
            .ok_or_else(|| CatalogError::not_found("Product", id))
    }

    /// All products in catalog order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn count(&self) -> usize {
        self.products.len()
    }

    /// Inserts a new product at the end of the catalog.
    ///
    /// ## Errors
    /// - `Validation` for an empty name or negative price/cost
    /// - `Duplicate` when the id or barcode is already taken
    pub fn insert(&mut self, product: Product) -> CatalogResult<()> {
        validate_product_name(&product.name)?;
        validate_price(product.price)?;
        validate_price(product.cost)?;

        if self.get_by_id(&product.id).is_some() {
            return Err(CatalogError::duplicate("id", &product.id));
        }
        if let Some(barcode) = product.barcode.as_deref() {
            if self.get_by_barcode(barcode).is_some() {
                return Err(CatalogError::duplicate("barcode", barcode));
            }
        }

        debug!(id = %product.id, name = %product.name, "Inserting product");
        self.products.push(product);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Stock
    // -------------------------------------------------------------------------

    /// Applies a stock movement.
    ///
    /// ## Optimistic Check
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  movement.previous_stock == product.stock ?                         │
    /// │     yes → stock = new_stock, movement recorded                      │
    /// │     no  → StockConflict, nothing changes                            │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn apply_movement(&mut self, movement: StockMovement) -> CatalogResult<&Product> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == movement.product_id)
            .ok_or_else(|| CatalogError::not_found("Product", &movement.product_id))?;

        if product.stock != movement.previous_stock {
            return Err(CatalogError::StockConflict {
                product_id: movement.product_id.clone(),
                expected: movement.previous_stock,
                actual: product.stock,
            });
        }

        product.stock = movement.new_stock;
        product.updated_at = movement.created_at;
        info!(
            id = %product.id,
            kind = ?movement.kind,
            from = movement.previous_stock,
            to = movement.new_stock,
            "Stock updated"
        );

        self.movements.push(movement);
        Ok(&*product)
    }

    /// Fails if any `(product_id, quantity)` pair exceeds what is on the shelf.
    pub fn ensure_available<'a>(
        &self,
        lines: impl IntoIterator<Item = (&'a str, u32)>,
    ) -> CatalogResult<()> {
        for (id, quantity) in lines {
            let product = self.require(id)?;
            if !product.can_sell(quantity) {
                return Err(CatalogError::InsufficientStock {
                    product_id: id.to_string(),
                    requested: quantity,
                    available: product.stock,
                });
            }
        }
        Ok(())
    }

    /// Takes the units of a completed sale off the shelf, one `Out` movement
    /// per line.
    ///
    /// Every line is checked before any stock changes, so a failure leaves
    /// the catalog untouched.
    pub fn record_sale(&mut self, transaction: &Transaction) -> CatalogResult<Vec<StockMovement>> {
        self.ensure_available(
            transaction
                .items
                .iter()
                .map(|line| (line.product_id.as_str(), line.quantity)),
        )?;

        let mut movements = Vec::with_capacity(transaction.items.len());
        for line in &transaction.items {
            let movement = plan_sale(self.require(&line.product_id)?, line.quantity, transaction);
            self.apply_movement(movement.clone())?;
            movements.push(movement);
        }
        Ok(movements)
    }

    /// Stock history, oldest first.
    pub fn movements(&self) -> &[StockMovement] {
        &self.movements
    }

    /// Stock history for one product, oldest first.
    pub fn movements_for<'a>(&'a self, product_id: &'a str) -> impl Iterator<Item = &'a StockMovement> {
        self.movements
            .iter()
            .filter(move |m| m.product_id == product_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
