//! # Stock Adjustments
//!
//! Plans [`StockMovement`]s for manual adjustments on the inventory page and
//! for units leaving the shelf at checkout. Planning is pure; the catalog
//! store applies the movement.
//!
//! ```text
//!   "Masukkan stok baru"  ──► StockAdjustment::Set(n) ──► Adjustment movement
//!   "Tambah stok"         ──► StockAdjustment::Add(n) ──► In movement
//!   checkout line         ──────────────────────────────► Out movement
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::types::{MovementKind, Product, StockMovement, Transaction};
use crate::validation::{parse_quantity_input, ValidationResult};
use crate::MAX_STOCK;

/// A manual stock change entered by staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "mode", content = "quantity", rename_all = "snake_case")]
#[ts(export)]
pub enum StockAdjustment {
    /// Replace the on-hand count.
    Set(u32),
    /// Receive additional units.
    Add(u32),
}

impl StockAdjustment {
    /// Parses the "new stock" prompt.
    pub fn parse_set(input: &str) -> ValidationResult<Self> {
        parse_count(input).map(StockAdjustment::Set)
    }

    /// Parses the "add stock" prompt.
    pub fn parse_add(input: &str) -> ValidationResult<Self> {
        parse_count(input).map(StockAdjustment::Add)
    }

    /// The stock count after applying this adjustment to `current`, capped
    /// at [`MAX_STOCK`].
    pub fn target(&self, current: u32) -> u32 {
        let target = match self {
            StockAdjustment::Set(n) => *n,
            StockAdjustment::Add(n) => current.saturating_add(*n),
        };
        target.min(MAX_STOCK)
    }
}

/// Whole number in `0..=MAX_STOCK`.
fn parse_count(input: &str) -> ValidationResult<u32> {
    let value = parse_quantity_input(input)?;
    u32::try_from(value)
        .ok()
        .filter(|count| *count <= MAX_STOCK)
        .ok_or_else(|| ValidationError::InvalidQuantityInput {
            input: input.to_string(),
        })
}

/// Plans a manual adjustment against the product's current stock.
///
/// Returns `None` when the adjustment would not change anything.
pub fn plan_adjustment(
    product: &Product,
    adjustment: StockAdjustment,
    user_id: &str,
    reason: Option<&str>,
) -> Option<StockMovement> {
    let previous = product.stock;
    let new_stock = adjustment.target(previous);
    if new_stock == previous {
        return None;
    }

    let (kind, default_reason) = match adjustment {
        StockAdjustment::Set(_) => (MovementKind::Adjustment, "Penyesuaian stok"),
        StockAdjustment::Add(_) => (MovementKind::In, "Penerimaan barang"),
    };

    Some(StockMovement {
        id: Uuid::new_v4().to_string(),
        product_id: product.id.clone(),
        kind,
        quantity: previous.abs_diff(new_stock),
        previous_stock: previous,
        new_stock,
        reason: reason.unwrap_or(default_reason).to_string(),
        reference: None,
        user_id: user_id.to_string(),
        created_at: Utc::now(),
    })
}

/// Plans the `Out` movement for one product sold in a transaction.
///
/// `product` is the catalog's current record. Stock never goes below zero.
pub fn plan_sale(product: &Product, quantity: u32, transaction: &Transaction) -> StockMovement {
    StockMovement {
        id: Uuid::new_v4().to_string(),
        product_id: product.id.clone(),
        kind: MovementKind::Out,
        quantity,
        previous_stock: product.stock,
        new_stock: product.stock.saturating_sub(quantity),
        reason: format!("Penjualan {}", transaction.receipt_number),
        reference: Some(transaction.id.clone()),
        user_id: transaction.cashier_id.clone(),
        created_at: transaction.created_at,
    }
}

impl StockMovement {
    /// Signed change in on-hand units.
    pub fn delta(&self) -> i64 {
        self.new_stock as i64 - self.previous_stock as i64
    }
}
