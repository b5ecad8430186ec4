//! # Transaction Log
//!
//! Completed sales in the order they were rung up. The report aggregator
//! reads from here.
//!
//! ```text
//! CheckoutSession::process_payment ──emit──► TransactionLog (ReceiptSink)
//!                                                 │
//!                                                 ▼
//!                                   daily_sales / top_products / dashboard
//! ```

use tracing::debug;

use kelontong_core::{ReceiptSink, Transaction};

/// Append-only log of completed transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    transactions: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        TransactionLog::default()
    }

    /// All transactions, oldest first.
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    pub fn get_by_receipt_number(&self, receipt_number: &str) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|tx| tx.receipt_number == receipt_number)
    }

    /// The most recent `limit` transactions, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&Transaction> {
        self.transactions.iter().rev().take(limit).collect()
    }

    pub fn count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Appends a transaction.
    pub fn record(&mut self, transaction: Transaction) {
        debug!(receipt = %transaction.receipt_number, "Recording transaction");
        self.transactions.push(transaction);
    }
}

impl ReceiptSink for TransactionLog {
    fn emit(&mut self, transaction: &Transaction) {
        self.record(transaction.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;
    use kelontong_core::{CheckoutSession, Money, PaymentMethod, PaymentRequest};

    #[test]
    fn test_checkout_emits_into_log() {
        let catalog = Catalog::sample();
        let mut log = TransactionLog::new();
        let mut session = CheckoutSession::new("kasir-01");

        for id in ["p001", "p004", "p006"] {
            session.add_product(catalog.products().get_by_id(id).unwrap());
            let tx = session
                .process_payment(PaymentRequest::non_cash(PaymentMethod::Qris), &mut log)
                .unwrap();
            assert_eq!(log.get_by_id(&tx.id), Some(&tx));
            assert_eq!(log.get_by_receipt_number(&tx.receipt_number).map(|t| &t.id), Some(&tx.id));
        }

        assert_eq!(log.count(), 3);
        let recent: Vec<_> = log
            .recent(2)
            .iter()
            .map(|tx| tx.items[0].product_id.as_str())
            .collect();
        assert_eq!(recent, vec!["p006", "p004"]);
        assert_eq!(log.list()[0].total, Money::from_rupiah(3850));
    }
}
