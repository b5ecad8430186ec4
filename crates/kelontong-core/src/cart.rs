//! # Cart Engine
//!
//! Line items, stock-bounded quantity updates and order totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Cashier Action         Operation               Effect                  │
//! │  ──────────────         ─────────               ──────                  │
//! │                                                                         │
//! │  Click product ───────► add_product() ────────► new line (qty 1)       │
//! │                                           or ──► qty + 1 if <= stock    │
//! │                                           or ──► no-op at stock limit   │
//! │                                                                         │
//! │  Edit quantity ───────► set_quantity() ───────► min(qty, stock)        │
//! │                                           or ──► remove if qty <= 0     │
//! │                                                                         │
//! │  Click remove ────────► remove_product() ─────► line deleted           │
//! │                                                                         │
//! │  View totals ─────────► totals(discount) ─────► subtotal/discount/     │
//! │                                                  tax/total              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id; lines keep insertion order
//! - Every line has `0 < quantity <= product.stock`
//! - `subtotal == product.price × quantity` on every line

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::{Money, Percentage};
use crate::types::Product;
use crate::SALES_TAX_RATE;

// =============================================================================
// Cart Line Item
// =============================================================================

/// One product's quantity and subtotal within a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    /// The product as it was last seen by the cart.
    pub product: Product,
    pub quantity: u32,
    /// product.price × quantity.
    pub subtotal: Money,
}

impl CartLineItem {
    fn new(product: &Product) -> Self {
        CartLineItem {
            product: product.clone(),
            quantity: 1,
            subtotal: product.price,
        }
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.subtotal = self.product.price.multiply_quantity(quantity);
    }
}

// =============================================================================
// Line Change
// =============================================================================

/// What a cart mutation actually did.
///
/// Stock limits are not errors: the cart caps silently and says so here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum LineChange {
    /// A new line was created with quantity 1.
    Added,
    /// An existing line grew by one.
    Incremented { quantity: u32 },
    /// The increment would exceed stock; nothing changed.
    StockLimitReached { stock: u32 },
    /// The quantity was set as requested.
    Updated { quantity: u32 },
    /// The requested quantity exceeded stock and was clamped.
    Capped { requested: i64, quantity: u32 },
    /// The line was removed.
    Removed,
    /// No line exists for the product; nothing changed.
    NotInCart,
}

impl LineChange {
    /// Returns true if the cart contents changed.
    pub fn is_change(&self) -> bool {
        !matches!(self, LineChange::StockLimitReached { .. } | LineChange::NotInCart)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Order totals for a given discount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Σ line subtotals.
    pub subtotal: Money,
    pub discount_percent: Percentage,
    /// subtotal × discount.
    pub discount: Money,
    /// (subtotal − discount) × 10%.
    pub tax: Money,
    /// subtotal − discount + tax.
    pub total: Money,
}

impl CartTotals {
    /// Computes totals for a subtotal. Discounts above 100% are treated as 100%.
    ///
    /// ## Example
    /// ```rust
    /// use kelontong_core::cart::CartTotals;
    /// use kelontong_core::money::{Money, Percentage};
    ///
    /// let totals = CartTotals::compute(Money::from_rupiah(10_500), Percentage::from_percent(10.0));
    /// assert_eq!(totals.discount, Money::from_rupiah(1050));
    /// assert_eq!(totals.tax, Money::from_rupiah(945));
    /// assert_eq!(totals.total, Money::from_rupiah(10_395));
    /// ```
    pub fn compute(subtotal: Money, discount_percent: Percentage) -> Self {
        let discount_percent = discount_percent.min(Percentage::FULL);
        let discount = subtotal.percent_of(discount_percent);
        let taxable = subtotal - discount;
        let tax = taxable.percent_of(SALES_TAX_RATE);
        CartTotals {
            subtotal,
            discount_percent,
            discount,
            tax,
            total: taxable + tax,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered collection of line items keyed by product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Not in cart: new line with quantity 1 (if the product has stock)
    /// - In cart: quantity + 1, unless that would exceed `product.stock`
    /// - At the stock limit: silently ignored
    ///
    /// The line's product snapshot is refreshed from `product`, so the
    /// latest stock figure bounds the increment.
    pub fn add_product(&mut self, product: &Product) -> LineChange {
        let Some(index) = self.position(&product.id) else {
            if product.stock == 0 {
                debug!(product_id = %product.id, "Product out of stock, add ignored");
                return LineChange::StockLimitReached { stock: 0 };
            }
            self.items.push(CartLineItem::new(product));
            return LineChange::Added;
        };

        let item = &mut self.items[index];
        item.product = product.clone();
        if let Some(new_qty) = item.quantity.checked_add(1).filter(|q| *q <= product.stock) {
            item.set_quantity(new_qty);
            return LineChange::Incremented { quantity: new_qty };
        }

        debug!(product_id = %product.id, stock = product.stock, "Stock limit reached, add ignored");
        // Stock may have dropped since the line was created.
        if product.stock == 0 {
            self.items.remove(index);
        } else {
            item.set_quantity(product.stock);
        }
        LineChange::StockLimitReached { stock: product.stock }
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`Cart::remove_product`]
    /// - Otherwise: final quantity = min(requested, stock); a stock of 0 removes the line
    /// - Product not in cart: no-op
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> LineChange {
        let Some(index) = self.position(product_id) else {
            return LineChange::NotInCart;
        };

        let stock = self.items[index].product.stock;
        if quantity <= 0 || stock == 0 {
            self.items.remove(index);
            return LineChange::Removed;
        }

        let item = &mut self.items[index];
        if quantity > stock as i64 {
            debug!(product_id = %product_id, requested = quantity, stock, "Quantity capped at stock");
            item.set_quantity(stock);
            return LineChange::Capped {
                requested: quantity,
                quantity: stock,
            };
        }

        let quantity = quantity as u32;
        item.set_quantity(quantity);
        LineChange::Updated { quantity }
    }

    /// Sets the quantity of a line, clamping against `product`'s current stock.
    ///
    /// The line's snapshot is replaced with `product` first, so a shelf count
    /// lowered since the line was created bounds the new quantity.
    pub fn set_product_quantity(&mut self, product: &Product, quantity: i64) -> LineChange {
        let Some(index) = self.position(&product.id) else {
            return LineChange::NotInCart;
        };
        self.items[index].product = product.clone();
        self.set_quantity(&product.id, quantity)
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.product.id == product_id)
    }

    /// Removes the line for a product. Returns false if there was none.
    pub fn remove_product(&mut self, product_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        self.items.len() != initial_len
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the line for a product, if present.
    pub fn line(&self, product_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Returns the number of distinct products in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Σ line subtotals.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|i| i.subtotal).sum()
    }

    /// Computes subtotal, discount, tax and total.
    pub fn totals(&self, discount_percent: Percentage) -> CartTotals {
        CartTotals::compute(self.subtotal(), discount_percent)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::product;

    #[test]
    fn test_add_creates_line_with_quantity_one() {
        let mut cart = Cart::new();
        let p = product("p001", 3500, 2800, 150, 20);

        assert_eq!(cart.add_product(&p), LineChange::Added);

        let line = cart.line("p001").unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.subtotal, Money::from_rupiah(3500));
    }

    #[test]
    fn test_add_three_times_then_discount() {
        let mut cart = Cart::new();
        let p = product("p001", 3500, 2800, 150, 20);

        cart.add_product(&p);
        cart.add_product(&p);
        assert_eq!(cart.add_product(&p), LineChange::Incremented { quantity: 3 });

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.line("p001").unwrap().quantity, 3);
        assert_eq!(cart.subtotal(), Money::from_rupiah(10_500));

        let totals = cart.totals(Percentage::from_percent(10.0));
        assert_eq!(totals.discount, Money::from_rupiah(1050));
        assert_eq!(totals.subtotal - totals.discount, Money::from_rupiah(9450));
        assert_eq!(totals.tax, Money::from_rupiah(945));
        assert_eq!(totals.total, Money::from_rupiah(10_395));
    }

    #[test]
    fn test_add_never_exceeds_stock() {
        for stock in 1..8u32 {
            let mut cart = Cart::new();
            let p = product("p", 1000, 800, stock, 1);
            for _ in 0..(stock + 5) {
                cart.add_product(&p);
            }
            assert_eq!(cart.line("p").unwrap().quantity, stock);
            assert_eq!(
                cart.add_product(&p),
                LineChange::StockLimitReached { stock }
            );
        }
    }

    #[test]
    fn test_add_out_of_stock_product_is_ignored() {
        let mut cart = Cart::new();
        let p = product("p", 1000, 800, 0, 1);
        assert_eq!(cart.add_product(&p), LineChange::StockLimitReached { stock: 0 });
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_uses_fresh_stock() {
        let mut cart = Cart::new();
        let mut p = product("p", 1000, 800, 5, 1);
        cart.add_product(&p);
        cart.set_quantity("p", 5);

        p.stock = 3;
        assert_eq!(cart.add_product(&p), LineChange::StockLimitReached { stock: 3 });
        assert_eq!(cart.line("p").unwrap().quantity, 3);
        assert_eq!(cart.line("p").unwrap().subtotal, Money::from_rupiah(3000));
    }

    #[test]
    fn test_set_quantity_clamps_to_stock() {
        let mut cart = Cart::new();
        let p = product("p", 1000, 800, 10, 2);
        cart.add_product(&p);

        assert_eq!(
            cart.set_quantity("p", 25),
            LineChange::Capped {
                requested: 25,
                quantity: 10
            }
        );
        let line = cart.line("p").unwrap();
        assert_eq!(line.quantity, 10);
        assert_eq!(line.subtotal, Money::from_rupiah(10_000));

        assert_eq!(cart.set_quantity("p", 4), LineChange::Updated { quantity: 4 });
        assert_eq!(cart.subtotal(), Money::from_rupiah(4000));
    }

    #[test]
    fn test_set_product_quantity_uses_fresh_stock() {
        let mut cart = Cart::new();
        let mut p = product("p", 1000, 800, 25, 5);
        cart.add_product(&p);

        p.stock = 3;
        assert_eq!(
            cart.set_product_quantity(&p, 10),
            LineChange::Capped {
                requested: 10,
                quantity: 3
            }
        );
        assert_eq!(cart.line("p").unwrap().quantity, 3);
        assert_eq!(cart.line("p").unwrap().product.stock, 3);

        p.stock = 0;
        assert_eq!(cart.set_product_quantity(&p, 1), LineChange::Removed);
        assert!(cart.is_empty());

        assert_eq!(cart.set_product_quantity(&p, 1), LineChange::NotInCart);
    }

    #[test]
    fn test_add_at_largest_quantity_does_not_overflow() {
        let mut cart = Cart::new();
        let p = product("p", 1, 1, u32::MAX, 1);
        cart.add_product(&p);
        cart.set_quantity("p", u32::MAX as i64);

        assert_eq!(
            cart.add_product(&p),
            LineChange::StockLimitReached { stock: u32::MAX }
        );
        assert_eq!(cart.line("p").unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes() {
        for requested in [0, -1, -100] {
            let mut cart = Cart::new();
            let a = product("a", 1000, 800, 10, 2);
            let b = product("b", 2000, 1500, 10, 2);
            cart.add_product(&a);
            cart.add_product(&b);

            assert_eq!(cart.set_quantity("a", requested), LineChange::Removed);
            assert!(cart.line("a").is_none());
            assert_eq!(cart.totals(Percentage::zero()).subtotal, Money::from_rupiah(2000));
        }
    }

    #[test]
    fn test_set_quantity_unknown_product_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(cart.set_quantity("nope", 3), LineChange::NotInCart);
        assert_eq!(cart.set_quantity("nope", 0), LineChange::NotInCart);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_product() {
        let mut cart = Cart::new();
        let p = product("p", 1000, 800, 10, 2);
        cart.add_product(&p);

        assert!(cart.remove_product("p"));
        assert!(!cart.remove_product("p"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        for id in ["c", "a", "b"] {
            cart.add_product(&product(id, 1000, 800, 10, 2));
        }
        cart.add_product(&product("a", 1000, 800, 10, 2));

        let ids: Vec<_> = cart.items().iter().map(|i| i.product.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(cart.total_quantity(), 4);
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let cart = Cart::new();
        let totals = cart.totals(Percentage::zero());
        assert_eq!(totals, CartTotals::default());
    }

    #[test]
    fn test_total_matches_closed_form_within_two_sen() {
        let prices = [1500, 3000, 3500, 4500, 8500, 12_000, 18_500, 22_000];
        for (i, price) in prices.iter().enumerate() {
            for discount in [0.0, 5.0, 10.0, 12.5, 33.0, 50.0, 99.0, 100.0] {
                let mut cart = Cart::new();
                let p = product("p", *price, 1, 50, 1);
                for _ in 0..=i {
                    cart.add_product(&p);
                }
                let totals = cart.totals(Percentage::from_percent(discount));
                let expected =
                    cart.subtotal().sen() as f64 * (1.0 - discount / 100.0) * 1.10;
                let diff = (totals.total.sen() as f64 - expected).abs();
                assert!(diff <= 2.0, "price {price} discount {discount}: diff {diff}");
                assert!(!totals.total.is_negative());
            }
        }
    }

    #[test]
    fn test_discount_above_hundred_is_capped() {
        let totals = CartTotals::compute(Money::from_rupiah(1000), Percentage::from_bps(15_000));
        assert_eq!(totals.discount_percent, Percentage::FULL);
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_product(&product("p", 1000, 800, 10, 2));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.totals(Percentage::from_percent(10.0)), CartTotals {
            discount_percent: Percentage::from_percent(10.0),
            ..CartTotals::default()
        });
    }
}
