//! # Inventory Commands
//!
//! The inventory page: stock summary, filtered product list, and the
//! "new stock" / "add stock" prompts.
//!
//! ## Adjustment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Staff opens prompt on a product showing stock 40                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  {"command": "adjust_stock", "productId": "p004", "mode": "set",       │
//! │   "input": "25", "expectedStock": 40}                                  │
//! │       │                                                                 │
//! │       ├── input not a whole number ──► VALIDATION_ERROR, no change     │
//! │       │                                                                 │
//! │       ├── stock no longer 40 ────────► STOCK_CONFLICT, no change       │
//! │       │                                                                 │
//! │       └── Adjustment movement 40 → 25, product returned                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use kelontong_core::catalog::ProductQuery;
use kelontong_core::inventory::{plan_adjustment, StockAdjustment};
use kelontong_core::stock::{critical_products, InventoryStats};
use kelontong_catalog::CatalogError;
use kelontong_core::StockMovement;

use crate::commands::product::ProductDto;
use crate::error::ApiError;
use crate::state::AppState;

/// Which prompt the quantity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustMode {
    /// "Masukkan stok baru"
    Set,
    /// "Tambah stok"
    Add,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryOverview {
    pub stats: InventoryStats,
    pub total_value_display: String,
    pub products: Vec<ProductDto>,
    /// Products at or below their reorder threshold.
    pub critical: Vec<ProductDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockResponse {
    pub product: ProductDto,
    /// `None` when the adjustment changed nothing.
    pub movement: Option<StockMovement>,
}

/// Stock summary plus the product list for the given filters.
pub fn inventory_overview(
    state: &AppState,
    query: ProductQuery,
) -> Result<InventoryOverview, ApiError> {
    let all = state.catalog.products().list();
    let stats = InventoryStats::from_products(all);

    let critical = critical_products(all, state.config.low_stock_alert_limit)
        .into_iter()
        .map(|p| ProductDto::new(p, &state.config))
        .collect();

    Ok(InventoryOverview {
        total_value_display: state.config.format_currency(stats.total_value),
        stats,
        products: super::product::search_products(state, query)?,
        critical,
    })
}

/// Applies a manual stock change entered as free text.
///
/// `expected_stock` is the count the staff member was looking at when they
/// opened the prompt; if the shelf has changed since, the adjustment is
/// refused.
pub fn adjust_stock(
    state: &mut AppState,
    product_id: &str,
    mode: AdjustMode,
    input: &str,
    expected_stock: Option<u32>,
    reason: Option<&str>,
) -> Result<AdjustStockResponse, ApiError> {
    let parsed = match mode {
        AdjustMode::Set => StockAdjustment::parse_set(input),
        AdjustMode::Add => StockAdjustment::parse_add(input),
    };
    let adjustment = parsed.map_err(|e| {
        warn!(product_id = %product_id, input = %input, ?mode, "Rejected stock input");
        ApiError::from(e)
    })?;

    let current = state.catalog.products().require(product_id)?;
    if let Some(expected) = expected_stock.filter(|expected| *expected != current.stock) {
        warn!(product_id = %product_id, expected, actual = current.stock, "Stale stock prompt");
        return Err(CatalogError::StockConflict {
            product_id: product_id.to_string(),
            expected,
            actual: current.stock,
        }
        .into());
    }

    let Some(movement) = plan_adjustment(current, adjustment, &state.config.cashier_id, reason)
    else {
        return Ok(AdjustStockResponse {
            product: ProductDto::new(current, &state.config),
            movement: None,
        });
    };

    let product = state
        .catalog
        .products_mut()
        .apply_movement(movement.clone())?;
    info!(
        product_id = %product.id,
        delta = movement.delta(),
        reason = %movement.reason,
        "Stock adjusted"
    );

    Ok(AdjustStockResponse {
        product: ProductDto::new(product, &state.config),
        movement: Some(movement),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;
    use kelontong_core::catalog::StockFilter;
    use kelontong_core::{MovementKind, StockStatus};

    fn state() -> AppState {
        AppState::new(ConfigState::default())
    }

    #[test]
    fn test_overview_of_sample_catalog() {
        let overview = inventory_overview(&state(), ProductQuery::default()).unwrap();
        assert_eq!(overview.stats.total, 12);
        assert_eq!(overview.stats.good_stock, 12);
        assert!(overview.critical.is_empty());
        assert_eq!(overview.products.len(), 12);
    }

    #[test]
    fn test_set_stock_low_shows_in_critical() {
        let mut state = state();
        let response =
            adjust_stock(&mut state, "p009", AdjustMode::Set, "3", Some(25), None).unwrap();

        assert_eq!(response.product.product.stock, 3);
        assert_eq!(response.product.stock_status, StockStatus::Low);
        let movement = response.movement.unwrap();
        assert_eq!(movement.kind, MovementKind::Adjustment);
        assert_eq!(movement.user_id, "kasir-01");

        let query = ProductQuery {
            stock_filter: StockFilter::Low,
            ..ProductQuery::default()
        };
        let overview = inventory_overview(&state, query).unwrap();
        assert_eq!(overview.stats.low_stock, 1);
        assert_eq!(overview.critical.len(), 1);
        assert_eq!(overview.products[0].product.id, "p009");
    }

    #[test]
    fn test_add_stock() {
        let mut state = state();
        let response = adjust_stock(
            &mut state,
            "p004",
            AdjustMode::Add,
            "24",
            None,
            Some("Kiriman supplier"),
        )
        .unwrap();
        assert_eq!(response.product.product.stock, 224);
        assert_eq!(response.movement.unwrap().reason, "Kiriman supplier");
        assert_eq!(state.catalog.products().movements_for("p004").count(), 1);
    }

    #[test]
    fn test_bad_input_changes_nothing() {
        let mut state = state();
        for input in ["", "abc", "-5"] {
            let err =
                adjust_stock(&mut state, "p004", AdjustMode::Set, input, None, None).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
        }
        assert_eq!(state.catalog.products().get_by_id("p004").unwrap().stock, 200);
        assert!(state.catalog.products().movements().is_empty());
    }

    #[test]
    fn test_stale_prompt_conflicts() {
        let mut state = state();
        let err =
            adjust_stock(&mut state, "p004", AdjustMode::Set, "150", Some(190), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::StockConflict);
        assert_eq!(state.catalog.products().get_by_id("p004").unwrap().stock, 200);
    }

    #[test]
    fn test_stale_prompt_matching_new_value_conflicts() {
        let mut state = state();
        let err =
            adjust_stock(&mut state, "p004", AdjustMode::Set, "190", Some(190), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::StockConflict);
        assert_eq!(state.catalog.products().get_by_id("p004").unwrap().stock, 200);
        assert!(state.catalog.products().movements().is_empty());
    }

    #[test]
    fn test_unchanged_stock_is_noop() {
        let mut state = state();
        let response =
            adjust_stock(&mut state, "p004", AdjustMode::Set, "200", None, None).unwrap();
        assert!(response.movement.is_none());
        assert_eq!(response.product.product.stock, 200);
    }
}
