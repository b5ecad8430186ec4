//! # Stock Classifier
//!
//! Three-way stock classification plus the inventory summary numbers shown
//! on the dashboard and inventory pages.
//!
//! ```text
//!   stock == 0              → OUT  (Habis,  critical)
//!   0 < stock <= min_stock  → LOW  (Rendah, warning)
//!   stock > min_stock       → OK   (Aman,   good)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;
use crate::FULL_STOCK_MULTIPLIER;

/// Stock level classification. Exhaustive and mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StockStatus {
    Out,
    Low,
    Ok,
}

impl StockStatus {
    /// Classifies a stock count against its reorder threshold.
    pub fn classify(stock: u32, min_stock: u32) -> Self {
        if stock == 0 {
            StockStatus::Out
        } else if stock <= min_stock {
            StockStatus::Low
        } else {
            StockStatus::Ok
        }
    }

    /// Badge label.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Out => "Habis",
            StockStatus::Low => "Rendah",
            StockStatus::Ok => "Aman",
        }
    }

    /// Badge severity.
    pub fn severity(&self) -> &'static str {
        match self {
            StockStatus::Out => "critical",
            StockStatus::Low => "warning",
            StockStatus::Ok => "good",
        }
    }

    /// True for LOW and OUT, the products that need reordering.
    pub fn needs_restock(&self) -> bool {
        !matches!(self, StockStatus::Ok)
    }
}

/// Stock as a percentage of a full shelf (3 × min_stock), capped at 100.
///
/// A product with no reorder threshold is either full (100) or empty (0).
pub fn stock_level_percent(product: &Product) -> f64 {
    let full = product.min_stock as u64 * FULL_STOCK_MULTIPLIER as u64;
    if full == 0 {
        return if product.stock > 0 { 100.0 } else { 0.0 };
    }
    (product.stock as f64 / full as f64 * 100.0).min(100.0)
}

/// Summary counts for the inventory page header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InventoryStats {
    pub total: usize,
    pub out_of_stock: usize,
    pub low_stock: usize,
    pub good_stock: usize,
    /// Σ stock × cost.
    pub total_value: Money,
}

impl InventoryStats {
    pub fn from_products(products: &[Product]) -> Self {
        products.iter().fold(
            InventoryStats {
                total: products.len(),
                ..InventoryStats::default()
            },
            |mut stats, product| {
                match product.stock_status() {
                    StockStatus::Out => stats.out_of_stock += 1,
                    StockStatus::Low => stats.low_stock += 1,
                    StockStatus::Ok => stats.good_stock += 1,
                }
                stats.total_value += product.stock_value();
                stats
            },
        )
    }
}

/// Products at or below their reorder threshold, in catalog order.
pub fn critical_products(products: &[Product], limit: usize) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.stock_status().needs_restock())
        .take(limit)
        .collect()
}
