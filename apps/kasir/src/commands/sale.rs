//! # Sale Commands
//!
//! Turns the cart into a completed transaction.
//!
//! ## Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    process_payment                                      │
//! │                                                                         │
//! │  1. Resolve payment ── explicit method/tender, else the staged one     │
//! │  2. Stock pre-check ── every line against the catalog's current count  │
//! │  3. Checkout ───────── EmptyCart / InsufficientPayment leave the cart  │
//! │                        as it was                                       │
//! │  4. Receipt fan-out ── TransactionLog + ReceiptPrinter                 │
//! │  5. Stock out ──────── one Out movement per line                       │
//! │  6. Response ───────── transaction, receipt text, movements            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use kelontong_core::{PaymentMethod, PaymentRequest, StockMovement, Transaction};

use crate::commands::cart::payment_request;
use crate::error::ApiError;
use crate::receipt::ReceiptFanOut;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub transaction: Transaction,
    /// Printed receipt text.
    pub receipt: String,
    pub movements: Vec<StockMovement>,
    pub total_display: String,
    pub change_display: String,
}

/// Takes payment for the current cart.
///
/// `method` and `tendered` override the staged payment; with neither the
/// staged payment is used.
pub fn process_payment(
    state: &mut AppState,
    method: Option<PaymentMethod>,
    tendered: Option<&str>,
) -> Result<SaleResponse, ApiError> {
    let payment = resolve_payment(state, method, tendered)?;
    debug!(method = ?payment.method, tendered = %payment.tendered, "process_payment command");

    let cart = state.session.cart();
    state.catalog.products().ensure_available(
        cart.items()
            .iter()
            .map(|line| (line.product.id.as_str(), line.quantity)),
    )?;

    let transaction = {
        let mut sink = ReceiptFanOut::new()
            .with(state.catalog.transactions_mut())
            .with(&mut state.printer);
        state.session.process_payment(payment, &mut sink)?
    };

    let movements = state.catalog.products_mut().record_sale(&transaction)?;

    state.last_change = transaction
        .payment_method
        .is_cash()
        .then_some(transaction.change);

    info!(
        receipt = %transaction.receipt_number,
        total = %transaction.total,
        movements = movements.len(),
        "Sale completed"
    );

    Ok(SaleResponse {
        receipt: state
            .printer
            .last_receipt()
            .map(str::to_string)
            .unwrap_or_default(),
        total_display: state.config.format_currency(transaction.total),
        change_display: state.config.format_currency(transaction.change),
        movements,
        transaction,
    })
}

fn resolve_payment(
    state: &AppState,
    method: Option<PaymentMethod>,
    tendered: Option<&str>,
) -> Result<PaymentRequest, ApiError> {
    match (method, state.session.staged_payment()) {
        (Some(method), _) => payment_request(method, tendered.unwrap_or_default()),
        (None, Some(staged)) => match tendered {
            Some(text) => payment_request(staged.method, text),
            None => Ok(*staged),
        },
        (None, None) => Err(ApiError::validation("No payment method selected")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, set_discount, stage_payment};
    use crate::error::ErrorCode;
    use crate::state::ConfigState;
    use kelontong_core::{CheckoutPhase, Money, MovementKind};

    fn state_with_indomie() -> AppState {
        let mut state = AppState::new(ConfigState::default());
        for _ in 0..3 {
            add_to_cart(&mut state, "p001").unwrap();
        }
        set_discount(&mut state, 10.0);
        state
    }

    #[test]
    fn test_cash_sale_end_to_end() {
        let mut state = state_with_indomie();
        stage_payment(&mut state, PaymentMethod::Cash, "11000").unwrap();

        let sale = process_payment(&mut state, None, None).unwrap();
        assert_eq!(sale.transaction.total, Money::from_rupiah(10_395));
        assert_eq!(sale.transaction.change, Money::from_rupiah(605));
        assert_eq!(sale.change_display, "Rp605");
        assert!(sale.receipt.contains("Indomie Goreng"));

        assert_eq!(sale.movements.len(), 1);
        assert_eq!(sale.movements[0].kind, MovementKind::Out);
        assert_eq!(state.catalog.products().get_by_id("p001").unwrap().stock, 147);

        assert_eq!(state.catalog.transactions().count(), 1);
        assert_eq!(state.printer.printed(), 1);
        assert_eq!(state.session.phase(), CheckoutPhase::Empty);
        assert_eq!(state.last_change, Some(Money::from_rupiah(605)));
    }

    #[test]
    fn test_short_cash_leaves_everything() {
        let mut state = state_with_indomie();
        let before = state.session.clone();

        let err = process_payment(&mut state, Some(PaymentMethod::Cash), Some("10000")).unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentError);

        assert_eq!(state.session, before);
        assert!(state.catalog.transactions().is_empty());
        assert_eq!(state.catalog.products().get_by_id("p001").unwrap().stock, 150);
    }

    #[test]
    fn test_non_cash_sale() {
        let mut state = state_with_indomie();
        let sale = process_payment(&mut state, Some(PaymentMethod::Qris), None).unwrap();
        assert_eq!(sale.transaction.tendered, sale.transaction.total);
        assert!(sale.transaction.change.is_zero());
        assert!(state.last_change.is_none());
    }

    #[test]
    fn test_empty_cart_rejected() {
        let mut state = AppState::new(ConfigState::default());
        let err = process_payment(&mut state, Some(PaymentMethod::Cash), Some("5000")).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_no_payment_selected() {
        let mut state = state_with_indomie();
        let err = process_payment(&mut state, None, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_stock_pre_check() {
        let mut state = state_with_indomie();
        // Shelf drops to 2 after the cart was built
        let product = state.catalog.products().get_by_id("p001").unwrap().clone();
        let movement = kelontong_core::inventory::plan_adjustment(
            &product,
            kelontong_core::inventory::StockAdjustment::Set(2),
            "admin",
            None,
        )
        .unwrap();
        state.catalog.products_mut().apply_movement(movement).unwrap();

        let err = process_payment(&mut state, Some(PaymentMethod::Cash), Some("20000")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(state.catalog.transactions().is_empty());
        assert_eq!(state.session.cart().total_quantity(), 3);
    }
}
