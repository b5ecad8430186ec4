//! # Domain Types
//!
//! Core domain types used throughout Kelontong POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  Transaction    │   │ StockMovement   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  price / cost   │   │  receipt_number │   │  product_id     │       │
//! │  │  stock          │   │  items (frozen) │   │  kind           │       │
//! │  │  min_stock      │   │  totals         │   │  previous/new   │       │
//! │  │  category ──────┼─┐ │  payment        │   └─────────────────┘       │
//! │  └─────────────────┘ │ └─────────────────┘                             │
//! │                      ▼                                                  │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ProductCategory  │   │    Customer     │   │ PaymentMethod   │       │
//! │  │  id, name       │   │  loyalty_points │   │  Cash, Transfer │       │
//! │  │  color          │   │  total_spent    │   │  Qris, Debit,.. │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A [`Transaction`] freezes product name, category, price and cost at the
//! moment of sale, so reports stay correct even if the catalog changes later.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::cart::CartLineItem;
use crate::money::{Money, Percentage};
use crate::stock::StockStatus;

// =============================================================================
// Product Category
// =============================================================================

/// A product category (Makanan, Minuman, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductCategory {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Display color as a hex string, e.g. `#ef4444`.
    pub color: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog identifier (e.g. `p001`).
    pub id: String,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    pub description: String,

    /// Unit sale price.
    pub price: Money,

    /// Unit cost (for profit calculations).
    pub cost: Money,

    /// Units on hand. Unsigned: stock can never go below zero.
    pub stock: u32,

    /// Reorder threshold; at or below this the product is LOW.
    pub min_stock: u32,

    pub category: ProductCategory,

    /// Barcode (EAN-13).
    pub barcode: Option<String>,

    /// Image URL.
    pub image: String,

    pub supplier: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Classifies the product's stock level.
    #[inline]
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.stock, self.min_stock)
    }

    /// Gross margin per unit (price − cost).
    #[inline]
    pub fn unit_margin(&self) -> Money {
        self.price - self.cost
    }

    /// Value of the units on hand at cost.
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.cost.multiply_quantity(self.stock)
    }

    /// Checks whether `quantity` units can be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: u32) -> bool {
        quantity <= self.stock
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registered customer. Optional at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Loyalty balance. Checkout reads it but never changes it.
    pub loyalty_points: u32,
    pub total_spent: Money,
    #[ts(as = "String")]
    pub last_visit: DateTime<Utc>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentMethod {
    /// Cash; the only method that requires a tender amount.
    Cash,
    /// Bank transfer.
    Transfer,
    /// QRIS (Quick Response Code Indonesian Standard).
    Qris,
    /// Debit card on an external terminal.
    Debit,
    /// Credit card on an external terminal.
    Credit,
}

impl PaymentMethod {
    /// Returns true for cash payments.
    #[inline]
    pub fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }

    /// Label printed on receipts.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Tunai",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Qris => "QRIS",
            PaymentMethod::Debit => "Kartu Debit",
            PaymentMethod::Credit => "Kartu Kredit",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Payment Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// One line of a completed transaction.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TransactionLine {
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub name: String,
    pub category_id: String,
    pub category_name: String,
    pub category_color: String,
    /// Unit price at time of sale (frozen).
    pub unit_price: Money,
    /// Unit cost at time of sale (frozen).
    pub unit_cost: Money,
    pub quantity: u32,
    /// unit_price × quantity.
    pub line_total: Money,
}

impl TransactionLine {
    /// Gross profit of the line before any order-level discount.
    pub fn gross_profit(&self) -> Money {
        self.line_total - self.unit_cost.multiply_quantity(self.quantity)
    }
}

impl From<&CartLineItem> for TransactionLine {
    fn from(item: &CartLineItem) -> Self {
        TransactionLine {
            product_id: item.product.id.clone(),
            name: item.product.name.clone(),
            category_id: item.product.category.id.clone(),
            category_name: item.product.category.name.clone(),
            category_color: item.product.category.color.clone(),
            unit_price: item.product.price,
            unit_cost: item.product.cost,
            quantity: item.quantity,
            line_total: item.subtotal,
        }
    }
}

/// A completed sale; the receipt record emitted by checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Transaction {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Human-readable receipt number: `YYMMDD-HHMMSS-NNNN`.
    pub receipt_number: String,
    pub cashier_id: String,
    /// Customer snapshot, if one was selected.
    pub customer: Option<Customer>,
    pub items: Vec<TransactionLine>,
    pub subtotal: Money,
    pub discount_percent: Percentage,
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    /// Cash handed over; equals `total` for non-cash methods.
    pub tendered: Money,
    /// Change returned; zero for non-cash methods.
    pub change: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Profit of the sale: line margins minus the order discount.
    /// Tax is collected on behalf of the state and is not profit.
    pub fn profit(&self) -> Money {
        self.items.iter().map(TransactionLine::gross_profit).sum::<Money>() - self.discount
    }

    /// Revenue recognised by reports (post-discount, pre-tax).
    pub fn net_sales(&self) -> Money {
        self.subtotal - self.discount
    }

    /// Total units sold across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calendar date of the sale in the store's local time.
    pub fn local_date(&self, offset: &FixedOffset) -> NaiveDate {
        self.created_at.with_timezone(offset).date_naive()
    }
}

// =============================================================================
// Stock Movement
// =============================================================================

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MovementKind {
    /// Goods received.
    In,
    /// Goods sold.
    Out,
    /// Manual correction to an absolute count.
    Adjustment,
}

/// A change to a product's on-hand count.
///
/// Carries both the count it was planned against and the resulting count,
/// so the catalog can reject a movement whose base is stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockMovement {
    pub id: String,
    pub product_id: String,
    pub kind: MovementKind,
    /// Absolute number of units moved.
    pub quantity: u32,
    pub previous_stock: u32,
    pub new_stock: u32,
    pub reason: String,
    /// Transaction id or purchase order id.
    pub reference: Option<String>,
    pub user_id: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
