//! # Product Commands
//!
//! Product search and lookup for the POS grid, plus the category and
//! customer lists the cashier picks from.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Search Flow                                  │
//! │                                                                         │
//! │  Cashier types or scans "8992388888881"                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  {"command": "search_products", "query": {"search": "..."}}            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                         │
//! │  │  Is query a barcode? (8-13 digits)        │                         │
//! │  │  YES: Try exact barcode lookup first      │──► Found? Return [1]    │
//! │  │  NO:  Filter name/description/category    │                         │
//! │  └───────────────────────────────────────────┘                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Category / stock filter, then sort                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Return Vec<ProductDto> to front-end                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::time::Instant;
use tracing::debug;

use kelontong_core::catalog::ProductQuery;
use kelontong_core::stock::stock_level_percent;
use kelontong_core::validation::validate_search_query;
use kelontong_core::{Customer, Product, ProductCategory, StockStatus};

use crate::error::ApiError;
use crate::state::{AppState, ConfigState};

/// Product as the front-end shows it: the record plus its stock badge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(flatten)]
    pub product: Product,
    pub stock_status: StockStatus,
    /// Badge text (Habis / Rendah / Aman)
    pub status_label: &'static str,
    /// Badge color class (critical / warning / good)
    pub severity: &'static str,
    /// Stock bar fill, 0 to 100
    pub stock_level_percent: f64,
    pub price_display: String,
}

impl ProductDto {
    pub fn new(product: &Product, config: &ConfigState) -> Self {
        let status = product.stock_status();
        ProductDto {
            stock_status: status,
            status_label: status.label(),
            severity: status.severity(),
            stock_level_percent: stock_level_percent(product),
            price_display: config.format_currency(product.price),
            product: product.clone(),
        }
    }
}

/// Searches the catalog.
///
/// An empty query returns the whole catalog in catalog order.
pub fn search_products(state: &AppState, query: ProductQuery) -> Result<Vec<ProductDto>, ApiError> {
    let start = Instant::now();
    let query = ProductQuery {
        search: validate_search_query(&query.search)?,
        ..query
    };

    let products: Vec<ProductDto> = state
        .catalog
        .products()
        .search(&query)
        .into_iter()
        .map(|p| ProductDto::new(p, &state.config))
        .collect();

    debug!(
        search = %query.search,
        count = products.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "search_products complete"
    );
    Ok(products)
}

/// Gets a single product by id.
pub fn get_product(state: &AppState, product_id: &str) -> Result<ProductDto, ApiError> {
    let product = state.catalog.products().require(product_id)?;
    Ok(ProductDto::new(product, &state.config))
}

/// All categories, for the filter dropdown.
pub fn list_categories(state: &AppState) -> Vec<ProductCategory> {
    state.catalog.categories().list().to_vec()
}

/// Customers for the picker; filtered by name or phone when `search` is set.
pub fn list_customers(state: &AppState, search: Option<&str>) -> Result<Vec<Customer>, ApiError> {
    let customers = match search {
        Some(term) if !term.trim().is_empty() => state
            .catalog
            .customers()
            .search(term)?
            .into_iter()
            .cloned()
            .collect(),
        _ => state.catalog.customers().list().to_vec(),
    };
    Ok(customers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use kelontong_core::catalog::{ProductSort, StockFilter};

    fn state() -> AppState {
        AppState::new(ConfigState::default())
    }

    #[test]
    fn test_empty_search_returns_catalog() {
        let products = search_products(&state(), ProductQuery::default()).unwrap();
        assert_eq!(products.len(), 12);
        assert_eq!(products[0].product.id, "p001");
    }

    #[test]
    fn test_barcode_search() {
        let products = search_products(&state(), ProductQuery::search("8992761111111")).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product.name, "Aqua Botol 600ml");
    }

    #[test]
    fn test_category_filter_and_sort() {
        let query = ProductQuery {
            category: Some("minuman".into()),
            sort: ProductSort::PriceHigh,
            ..ProductQuery::default()
        };
        let ids: Vec<String> = search_products(&state(), query)
            .unwrap()
            .into_iter()
            .map(|p| p.product.id)
            .collect();
        assert_eq!(ids, vec!["p005", "p004", "p006"]);
    }

    #[test]
    fn test_stock_filter_on_sample_catalog() {
        let query = ProductQuery {
            stock_filter: StockFilter::Low,
            ..ProductQuery::default()
        };
        assert!(search_products(&state(), query).unwrap().is_empty());
    }

    #[test]
    fn test_overlong_search_rejected() {
        let err = search_products(&state(), ProductQuery::search("x".repeat(101))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_product_dto_fields() {
        let dto = get_product(&state(), "p001").unwrap();
        assert_eq!(dto.stock_status, StockStatus::Ok);
        assert_eq!(dto.status_label, "Aman");
        assert_eq!(dto.price_display, "Rp3.500");
        assert_eq!(dto.stock_level_percent, 100.0);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["id"], "p001");
        assert_eq!(json["stockStatus"], "ok");
        assert_eq!(json["minStock"], 20);
    }

    #[test]
    fn test_get_unknown_product() {
        let err = get_product(&state(), "p999").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_lists() {
        let state = state();
        assert_eq!(list_categories(&state).len(), 5);
        assert_eq!(list_customers(&state, None).unwrap().len(), 3);
        assert_eq!(list_customers(&state, Some("  ")).unwrap().len(), 3);

        let found = list_customers(&state, Some("budi")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "c002");
    }
}
