//! # Cart Commands
//!
//! Cart manipulation and the checkout details around it (customer,
//! discount, staged payment).
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ Building │────►│  Ready   │────►│ Receipt  │       │
//! │  │          │     │          │     │   For    │     │ (sale.rs)│       │
//! │  │          │     │          │     │ Payment  │     │          │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                │             │
//! │                   add_to_cart      stage_payment          │             │
//! │                   update_item                             │             │
//! │                   remove_item                             │             │
//! │                   set_discount                            │             │
//! │                   select_customer                         │             │
//! │                        │                                  │             │
//! │                        ▼                                  ▼             │
//! │                   clear_cart ───────────────────► (back to Empty)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Hitting a stock limit is not an error: the response carries a
//! [`LineChange`] saying the quantity was capped or left alone.

use serde::Serialize;
use tracing::{debug, warn};

use kelontong_core::validation::{clamp_discount_percent, parse_quantity_input, parse_tender_input};
use kelontong_core::{
    CartLineItem, CartTotals, CheckoutPhase, Customer, LineChange, Money, PaymentMethod,
    PaymentRequest,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Totals pre-formatted for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsDisplay {
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub total: String,
}

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub item_count: usize,
    pub total_quantity: u32,
    pub totals: CartTotals,
    pub display: TotalsDisplay,
    pub phase: CheckoutPhase,
    pub customer: Option<Customer>,
    pub staged_payment: Option<PaymentRequest>,
    /// Change owed for the staged cash tender; `None` when short or not cash.
    pub change_due: Option<Money>,
    /// Change handed back on the previous sale.
    pub last_change: Option<Money>,
}

impl CartResponse {
    pub fn from_state(state: &AppState) -> Self {
        let session = &state.session;
        let cart = session.cart();
        let totals = session.totals();
        let fmt = |m: Money| state.config.format_currency(m);

        let change_due = session
            .staged_payment()
            .filter(|p| p.method.is_cash())
            .and_then(|p| session.change_for(p.tendered));

        CartResponse {
            items: cart.items().to_vec(),
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            display: TotalsDisplay {
                subtotal: fmt(totals.subtotal),
                discount: fmt(totals.discount),
                tax: fmt(totals.tax),
                total: fmt(totals.total),
            },
            totals,
            phase: session.phase(),
            customer: session.customer().cloned(),
            staged_payment: session.staged_payment().copied(),
            change_due,
            last_change: state.last_change,
        }
    }
}

/// Result of a line mutation: what happened, and the cart afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartUpdate {
    pub line_change: LineChange,
    pub cart: CartResponse,
}

impl CartUpdate {
    fn new(state: &AppState, line_change: LineChange) -> Self {
        CartUpdate {
            line_change,
            cart: CartResponse::from_state(state),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(state: &AppState) -> CartResponse {
    CartResponse::from_state(state)
}

/// Adds one unit of a product.
///
/// ## Behavior
/// - Not in cart: new line with quantity 1
/// - In cart: quantity + 1, unless that would exceed stock
/// - Out of stock: nothing changes (`stock_limit_reached`)
pub fn add_to_cart(state: &mut AppState, product_id: &str) -> Result<CartUpdate, ApiError> {
    let product = state.catalog.products().require(product_id)?;
    let change = state.session.add_product(product);
    if !change.is_change() {
        debug!(product_id = %product_id, ?change, "Add ignored at stock limit");
    }
    Ok(CartUpdate::new(state, change))
}

/// Sets a line's quantity. Zero or less removes the line; above stock is
/// capped to the catalog's current stock.
pub fn update_cart_item(
    state: &mut AppState,
    product_id: &str,
    quantity: i64,
) -> Result<CartUpdate, ApiError> {
    let change = match state.catalog.products().get_by_id(product_id) {
        Some(product) => state.session.set_product_quantity(product, quantity),
        None => state.session.set_quantity(product_id, quantity),
    };
    debug!(product_id = %product_id, quantity, ?change, "update_cart_item");
    Ok(CartUpdate::new(state, change))
}

/// Sets a line's quantity from the raw text of the quantity field.
///
/// Text that is not a whole number is rejected and the line keeps its
/// previous quantity.
pub fn update_cart_item_input(
    state: &mut AppState,
    product_id: &str,
    input: &str,
) -> Result<CartUpdate, ApiError> {
    let quantity = parse_quantity_input(input).map_err(|e| {
        warn!(product_id = %product_id, input = %input, "Rejected quantity input");
        ApiError::from(e)
    })?;
    update_cart_item(state, product_id, quantity)
}

/// Removes a line. Unknown ids are a no-op.
pub fn remove_from_cart(state: &mut AppState, product_id: &str) -> CartUpdate {
    let change = if state.session.remove_product(product_id) {
        LineChange::Removed
    } else {
        LineChange::NotInCart
    };
    CartUpdate::new(state, change)
}

/// Empties the cart and resets customer, discount and staged payment.
pub fn clear_cart(state: &mut AppState) -> CartResponse {
    state.session.clear();
    CartResponse::from_state(state)
}

/// Attaches a customer to the sale, or detaches with `None`.
pub fn select_customer(
    state: &mut AppState,
    customer_id: Option<&str>,
) -> Result<CartResponse, ApiError> {
    let customer = match customer_id {
        Some(id) => Some(state.catalog.customers().require(id)?.clone()),
        None => None,
    };
    state.session.select_customer(customer);
    Ok(CartResponse::from_state(state))
}

/// Sets the order discount. Out-of-range input is clamped to 0..=100.
pub fn set_discount(state: &mut AppState, percent: f64) -> CartResponse {
    let discount = clamp_discount_percent(percent);
    if discount.percent() != percent {
        debug!(requested = percent, applied = %discount, "Discount clamped");
    }
    state.session.set_discount(discount);
    CartResponse::from_state(state)
}

/// Records the payment method and cash tendered the cashier has entered.
pub fn stage_payment(
    state: &mut AppState,
    method: PaymentMethod,
    tendered: &str,
) -> Result<CartResponse, ApiError> {
    state.session.stage_payment(payment_request(method, tendered)?);
    Ok(CartResponse::from_state(state))
}

/// Builds a payment request from the payment modal's fields.
///
/// The tender text is only read for cash.
pub(crate) fn payment_request(
    method: PaymentMethod,
    tendered: &str,
) -> Result<PaymentRequest, ApiError> {
    if !method.is_cash() {
        return Ok(PaymentRequest::non_cash(method));
    }
    let amount = parse_tender_input(tendered).map_err(|e| {
        warn!(input = %tendered, "Rejected tender input");
        ApiError::from(e)
    })?;
    Ok(PaymentRequest::cash(amount))
}
