//! # kelontong-core: Pure Business Logic for Kelontong POS
//!
//! This crate is the **heart** of Kelontong POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Kelontong POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Dashboard Front-end                            │   │
//! │  │   Dashboard ─► Inventory ─► POS Cart ─► Products ─► Reports    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON commands                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasir (command layer)                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ kelontong-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌────────┐  │   │
//! │  │   │  money  │ │  cart   │ │ checkout │ │  stock  │ │ report │  │   │
//! │  │   │  Money  │ │  Cart   │ │ Session  │ │ Status  │ │ Daily  │  │   │
//! │  │   │ Percent │ │  Line   │ │ Receipt  │ │ Adjust  │ │ Stats  │  │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └─────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              kelontong-catalog (in-memory store)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Transaction, etc.)
//! - [`money`] - Money in sen with integer arithmetic, basis-point percentages
//! - [`cart`] - Cart line items and order totals
//! - [`checkout`] - Checkout session: customer, discount, payment, receipt
//! - [`stock`] - Stock classifier and inventory statistics
//! - [`inventory`] - Stock adjustments and movements
//! - [`catalog`] - Product list filtering and sorting
//! - [`report`] - Sales aggregation over the transaction log
//! - [`error`] - Domain error types
//! - [`validation`] - Input parsing and business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use kelontong_core::money::{Money, Percentage};
//!
//! // Catalog prices are whole rupiah, stored internally as sen
//! let price = Money::from_rupiah(3500);
//! let subtotal = price * 3;
//!
//! let discount = subtotal.percent_of(Percentage::from_percent(10.0));
//! assert_eq!(discount, Money::from_rupiah(1050));
//!
//! let tax = (subtotal - discount).percent_of(kelontong_core::SALES_TAX_RATE);
//! assert_eq!(tax, Money::from_rupiah(945));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod inventory;
pub mod money;
pub mod report;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLineItem, CartTotals, LineChange};
pub use checkout::{CheckoutPhase, CheckoutSession, PaymentRequest, ReceiptSink};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Percentage};
pub use stock::StockStatus;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sales tax applied to the post-discount subtotal (10%).
///
/// Fixed for every sale; stores cannot configure it.
pub const SALES_TAX_RATE: Percentage = Percentage::from_bps(1000);

/// Multiplier that defines a "full" shelf relative to the reorder threshold.
pub const FULL_STOCK_MULTIPLIER: u32 = 3;

/// Largest on-hand count a product can hold.
pub const MAX_STOCK: u32 = 1_000_000;

/// Maximum lookback window accepted by the report aggregator, in days.
pub const MAX_LOOKBACK_DAYS: u32 = 366;
