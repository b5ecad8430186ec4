//! # Checkout Session
//!
//! Everything one cashier session needs to ring up a sale: the cart, an
//! optional customer, the discount, and the staged payment.
//!
//! ## Checkout Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Lifecycle                                   │
//! │                                                                         │
//! │  ┌──────────┐  add_product  ┌──────────┐ stage_payment ┌─────────────┐ │
//! │  │  Empty   │──────────────►│ Building │──────────────►│ ReadyFor-   │ │
//! │  │          │◄──────────────│          │               │ Payment     │ │
//! │  └──────────┘ last line     └──────────┘               └──────┬──────┘ │
//! │       ▲       removed / clear                                 │        │
//! │       │                                        process_payment│        │
//! │       │                                                       │        │
//! │       │   success: receipt emitted, clear()                   │        │
//! │       └───────────────────────────────────────────────────────┤        │
//! │                                                               │        │
//! │           cash < total: InsufficientPayment, nothing changes ◄┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session is owned by exactly one caller and passed explicitly; it is
//! never shared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartTotals, LineChange};
use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Percentage};
use crate::types::{Customer, PaymentMethod, PaymentStatus, Product, Transaction, TransactionLine};

// =============================================================================
// Receipt Sink
// =============================================================================

/// Receives completed transactions for printing, export or logging.
///
/// Fire-and-forget: the checkout does not wait for or inspect any result.
pub trait ReceiptSink {
    fn emit(&mut self, transaction: &Transaction);
}

/// Collects receipts in memory.
impl ReceiptSink for Vec<Transaction> {
    fn emit(&mut self, transaction: &Transaction) {
        self.push(transaction.clone());
    }
}

// =============================================================================
// Payment
// =============================================================================

/// Payment inputs for a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentRequest {
    pub method: PaymentMethod,
    /// Cash received. Ignored for non-cash methods.
    #[serde(default)]
    pub tendered: Money,
}

impl PaymentRequest {
    pub fn cash(tendered: Money) -> Self {
        PaymentRequest {
            method: PaymentMethod::Cash,
            tendered,
        }
    }

    pub fn non_cash(method: PaymentMethod) -> Self {
        PaymentRequest {
            method,
            tendered: Money::zero(),
        }
    }
}

/// Where the session is in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CheckoutPhase {
    /// No line items.
    Empty,
    /// Line items present, no payment staged yet.
    Building,
    /// Line items present and payment details entered.
    ReadyForPayment,
}

// =============================================================================
// Checkout Session
// =============================================================================

/// The cart engine plus the checkout-in-progress state around it.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    cashier_id: String,
    cart: Cart,
    customer: Option<Customer>,
    discount: Percentage,
    staged_payment: Option<PaymentRequest>,
}

impl CheckoutSession {
    /// Creates an empty session for a cashier.
    pub fn new(cashier_id: impl Into<String>) -> Self {
        CheckoutSession {
            cashier_id: cashier_id.into(),
            cart: Cart::new(),
            customer: None,
            discount: Percentage::zero(),
            staged_payment: None,
        }
    }

    pub fn cashier_id(&self) -> &str {
        &self.cashier_id
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn discount(&self) -> Percentage {
        self.discount
    }

    pub fn staged_payment(&self) -> Option<&PaymentRequest> {
        self.staged_payment.as_ref()
    }

    /// Current checkout phase.
    pub fn phase(&self) -> CheckoutPhase {
        match (self.cart.is_empty(), self.staged_payment.is_some()) {
            (true, _) => CheckoutPhase::Empty,
            (false, false) => CheckoutPhase::Building,
            (false, true) => CheckoutPhase::ReadyForPayment,
        }
    }

    // -------------------------------------------------------------------------
    // Cart operations
    // -------------------------------------------------------------------------

    /// See [`Cart::add_product`].
    pub fn add_product(&mut self, product: &Product) -> LineChange {
        self.cart.add_product(product)
    }

    /// See [`Cart::set_quantity`].
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> LineChange {
        self.cart.set_quantity(product_id, quantity)
    }

    /// See [`Cart::set_product_quantity`].
    pub fn set_product_quantity(&mut self, product: &Product, quantity: i64) -> LineChange {
        self.cart.set_product_quantity(product, quantity)
    }

    /// See [`Cart::remove_product`].
    pub fn remove_product(&mut self, product_id: &str) -> bool {
        self.cart.remove_product(product_id)
    }

    // -------------------------------------------------------------------------
    // Checkout details
    // -------------------------------------------------------------------------

    /// Associates (or with `None`, detaches) a customer.
    pub fn select_customer(&mut self, customer: Option<Customer>) {
        self.customer = customer;
    }

    /// Sets the order discount, clamped to 100%.
    pub fn set_discount(&mut self, discount: Percentage) {
        self.discount = discount.min(Percentage::FULL);
    }

    /// Records the payment details the cashier has entered.
    pub fn stage_payment(&mut self, payment: PaymentRequest) {
        self.staged_payment = Some(payment);
    }

    /// Totals at the current discount.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals(self.discount)
    }

    /// Change owed for a cash tender, or `None` if the tender is short.
    pub fn change_for(&self, tendered: Money) -> Option<Money> {
        let change = tendered - self.totals().total;
        (!change.is_negative()).then_some(change)
    }

    /// Takes payment, emits the receipt and resets the session.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] when there is nothing to sell
    /// - [`CoreError::InsufficientPayment`] when cash tendered < total
    ///
    /// On error the session is left exactly as it was.
    pub fn process_payment(
        &mut self,
        payment: PaymentRequest,
        sink: &mut dyn ReceiptSink,
    ) -> CoreResult<Transaction> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let totals = self.totals();
        let (tendered, change) = if payment.method.is_cash() {
            if payment.tendered < totals.total {
                debug!(total = %totals.total, tendered = %payment.tendered, "Cash tender short");
                return Err(CoreError::InsufficientPayment {
                    total: totals.total,
                    tendered: payment.tendered,
                });
            }
            (payment.tendered, payment.tendered - totals.total)
        } else {
            (totals.total, Money::zero())
        };

        let now = Utc::now();
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            receipt_number: receipt_number(now),
            cashier_id: self.cashier_id.clone(),
            customer: self.customer.clone(),
            items: self.cart.items().iter().map(TransactionLine::from).collect(),
            subtotal: totals.subtotal,
            discount_percent: totals.discount_percent,
            discount: totals.discount,
            tax: totals.tax,
            total: totals.total,
            payment_method: payment.method,
            payment_status: PaymentStatus::Completed,
            tendered,
            change,
            created_at: now,
        };

        sink.emit(&transaction);
        info!(
            receipt = %transaction.receipt_number,
            total = %transaction.total,
            method = ?transaction.payment_method,
            items = transaction.items.len(),
            "Payment processed"
        );

        self.clear();
        Ok(transaction)
    }

    /// Empties the cart and resets customer, discount and staged payment.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.customer = None;
        self.discount = Percentage::zero();
        self.staged_payment = None;
    }
}

/// `YYMMDD-HHMMSS-NNNN`, the last group taken from sub-second time.
fn receipt_number(now: DateTime<Utc>) -> String {
    format!(
        "{}-{:04}",
        now.format("%y%m%d-%H%M%S"),
        now.timestamp_subsec_nanos() % 10_000
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::product;
    use chrono::TimeZone;

    fn customer() -> Customer {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Customer {
            id: "c001".into(),
            name: "Bu Sari".into(),
            phone: "08123456789".into(),
            email: None,
            address: None,
            loyalty_points: 150,
            total_spent: Money::from_rupiah(1_500_000),
            last_visit: ts,
            created_at: ts,
        }
    }

    fn session_with_three_indomie() -> CheckoutSession {
        let mut session = CheckoutSession::new("kasir-01");
        let p = product("p001", 3500, 2800, 150, 20);
        for _ in 0..3 {
            session.add_product(&p);
        }
        session
    }

    #[test]
    fn test_phases() {
        let mut session = CheckoutSession::new("kasir-01");
        assert_eq!(session.phase(), CheckoutPhase::Empty);

        session.add_product(&product("p", 1000, 800, 5, 1));
        assert_eq!(session.phase(), CheckoutPhase::Building);

        session.stage_payment(PaymentRequest::cash(Money::from_rupiah(5000)));
        assert_eq!(session.phase(), CheckoutPhase::ReadyForPayment);

        session.remove_product("p");
        assert_eq!(session.phase(), CheckoutPhase::Empty);
    }

    #[test]
    fn test_cash_payment_emits_receipt_and_clears() {
        let mut session = session_with_three_indomie();
        session.set_discount(Percentage::from_percent(10.0));
        session.select_customer(Some(customer()));
        let mut sink: Vec<Transaction> = Vec::new();

        let tx = session
            .process_payment(PaymentRequest::cash(Money::from_rupiah(20_000)), &mut sink)
            .unwrap();

        assert_eq!(tx.total, Money::from_rupiah(10_395));
        assert_eq!(tx.change, Money::from_rupiah(9605));
        assert_eq!(tx.tendered, Money::from_rupiah(20_000));
        assert_eq!(tx.payment_status, PaymentStatus::Completed);
        assert_eq!(tx.customer.as_ref().map(|c| c.loyalty_points), Some(150));
        assert_eq!(tx.items.len(), 1);
        assert_eq!(tx.items[0].quantity, 3);

        assert_eq!(sink, vec![tx]);
        assert_eq!(session.phase(), CheckoutPhase::Empty);
        assert!(session.customer().is_none());
        assert!(session.discount().is_zero());
        assert_eq!(session.totals(), CartTotals::default());
    }

    #[test]
    fn test_exact_cash_is_enough() {
        let mut session = session_with_three_indomie();
        let mut sink: Vec<Transaction> = Vec::new();
        let total = session.totals().total;

        let tx = session
            .process_payment(PaymentRequest::cash(total), &mut sink)
            .unwrap();
        assert!(tx.change.is_zero());
    }

    #[test]
    fn test_insufficient_cash_leaves_session_unchanged() {
        let mut session = session_with_three_indomie();
        session.set_discount(Percentage::from_percent(10.0));
        session.stage_payment(PaymentRequest::cash(Money::from_rupiah(10_000)));
        let before = session.clone();
        let mut sink: Vec<Transaction> = Vec::new();

        let err = session
            .process_payment(PaymentRequest::cash(Money::from_rupiah(10_000)), &mut sink)
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientPayment { total, tendered }
                if total == Money::from_rupiah(10_395) && tendered == Money::from_rupiah(10_000)
        ));
        assert_eq!(session, before);
        assert_eq!(session.phase(), CheckoutPhase::ReadyForPayment);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_non_cash_ignores_tender() {
        let mut session = session_with_three_indomie();
        let mut sink: Vec<Transaction> = Vec::new();

        let tx = session
            .process_payment(PaymentRequest::non_cash(PaymentMethod::Qris), &mut sink)
            .unwrap();

        assert_eq!(tx.payment_method, PaymentMethod::Qris);
        assert_eq!(tx.tendered, tx.total);
        assert!(tx.change.is_zero());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_empty_cart_cannot_be_paid() {
        let mut session = CheckoutSession::new("kasir-01");
        let mut sink: Vec<Transaction> = Vec::new();
        let err = session
            .process_payment(PaymentRequest::non_cash(PaymentMethod::Debit), &mut sink)
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = session_with_three_indomie();
        session.select_customer(Some(customer()));
        session.set_discount(Percentage::from_percent(25.0));
        session.stage_payment(PaymentRequest::cash(Money::from_rupiah(50_000)));

        session.clear();

        assert_eq!(session, CheckoutSession::new("kasir-01"));
        assert_eq!(session.totals(), CartTotals::default());
    }

    #[test]
    fn test_discount_is_clamped() {
        let mut session = CheckoutSession::new("kasir-01");
        session.set_discount(Percentage::from_bps(20_000));
        assert_eq!(session.discount(), Percentage::FULL);
    }

    #[test]
    fn test_change_for() {
        let session = session_with_three_indomie();
        assert_eq!(session.change_for(Money::from_rupiah(11_000)), Some(Money::from_rupiah(605)));
        assert_eq!(session.change_for(Money::from_rupiah(10_000)), None);
    }

    #[test]
    fn test_receipt_number_format() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 21, 14, 5, 9).unwrap();
        assert_eq!(receipt_number(ts), "240121-140509-0000");
    }
}
