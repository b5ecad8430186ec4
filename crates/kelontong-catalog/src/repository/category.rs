//! # Category Repository
//!
//! Product categories in display order.

use tracing::debug;

use kelontong_core::ProductCategory;

use crate::error::{CatalogError, CatalogResult};

/// Repository for product categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryRepository {
    categories: Vec<ProductCategory>,
}

impl CategoryRepository {
    pub fn new() -> Self {
        CategoryRepository::default()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&ProductCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn list(&self) -> &[ProductCategory] {
        &self.categories
    }

    pub fn count(&self) -> usize {
        self.categories.len()
    }

    /// Inserts a category. Ids are unique.
    pub fn insert(&mut self, category: ProductCategory) -> CatalogResult<()> {
        if self.get_by_id(&category.id).is_some() {
            return Err(CatalogError::duplicate("category id", &category.id));
        }
        debug!(id = %category.id, "Inserting category");
        self.categories.push(category);
        Ok(())
    }
}
