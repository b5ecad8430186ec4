//! # Product Queries
//!
//! Filtering and sorting for the product grid, the POS picker and the
//! inventory table. Pure functions over a product slice; the catalog store
//! supplies the products.
//!
//! ```text
//!   products ──► search ──► category ──► stock filter ──► in-stock ──► sort
//!                (name, description, category name, barcode)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::stock::StockStatus;
use crate::types::Product;

/// Barcodes on the shelf are EAN-8 up to EAN-13.
const BARCODE_MIN_LEN: usize = 8;
const BARCODE_MAX_LEN: usize = 13;

// =============================================================================
// Query Types
// =============================================================================

/// Stock filter on the inventory page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StockFilter {
    #[default]
    All,
    Low,
    Out,
    Good,
}

impl StockFilter {
    pub fn matches(&self, status: StockStatus) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::Low => status == StockStatus::Low,
            StockFilter::Out => status == StockStatus::Out,
            StockFilter::Good => status == StockStatus::Ok,
        }
    }
}

/// Sort order for product lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ProductSort {
    /// Catalog order.
    #[default]
    None,
    Name,
    PriceLow,
    PriceHigh,
    StockHigh,
    StockLow,
    Category,
}

/// Product list query. The default matches every product in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ProductQuery {
    pub search: String,
    /// Category id; `None` means all categories.
    pub category: Option<String>,
    pub stock_filter: StockFilter,
    /// Only products with stock > 0 (the POS grid).
    pub in_stock_only: bool,
    pub sort: ProductSort,
}

impl ProductQuery {
    pub fn search(term: impl Into<String>) -> Self {
        ProductQuery {
            search: term.into(),
            ..Default::default()
        }
    }

    /// True if the product passes every filter in this query.
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();
        matches_search(product, &needle)
            && self
                .category
                .as_deref()
                .map_or(true, |id| product.category.id == id)
            && self.stock_filter.matches(product.stock_status())
            && (!self.in_stock_only || product.stock > 0)
    }
}

// =============================================================================
// Filtering and Sorting
// =============================================================================

/// Applies a query to a product list.
///
/// The sort is stable so catalog order breaks ties.
pub fn filter_products<'a>(products: &'a [Product], query: &ProductQuery) -> Vec<&'a Product> {
    let mut matched: Vec<&Product> = products.iter().filter(|p| query.matches(p)).collect();
    sort_products(&mut matched, query.sort);
    matched
}

/// Sorts in place with a stable sort.
pub fn sort_products(products: &mut [&Product], sort: ProductSort) {
    match sort {
        ProductSort::None => {}
        ProductSort::Name => products.sort_by_cached_key(|p| p.name.to_lowercase()),
        ProductSort::PriceLow => products.sort_by_key(|p| p.price),
        ProductSort::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
        ProductSort::StockHigh => products.sort_by(|a, b| b.stock.cmp(&a.stock)),
        ProductSort::StockLow => products.sort_by_key(|p| p.stock),
        ProductSort::Category => products.sort_by_cached_key(|p| p.category.name.to_lowercase()),
    }
}

/// True if the query looks like a scanned barcode (8 to 13 digits).
pub fn is_barcode_query(query: &str) -> bool {
    let query = query.trim();
    (BARCODE_MIN_LEN..=BARCODE_MAX_LEN).contains(&query.len())
        && query.chars().all(|c| c.is_ascii_digit())
}

/// `needle` must already be lowercased. An empty needle matches everything.
fn matches_search(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.category.name.to_lowercase().contains(needle)
        || product
            .barcode
            .as_deref()
            .is_some_and(|barcode| barcode.contains(needle))
}

// =============================================================================
// Unit Tests
// =============================================================================
