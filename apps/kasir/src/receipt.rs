//! # Receipt Printer
//!
//! Renders completed transactions as plain-text receipts for a 58mm
//! thermal roll (32 columns).
//!
//! ## Receipt Layout
//! ```text
//! ┌────────────────────────────────┐
//! │         Toko Kelontong         │
//! │         Jl. Raya No. 1         │
//! │    No   : 240121-140509-0001   │
//! │--------------------------------│
//! │Indomie Goreng                  │
//! │  3 x Rp3.500           Rp10.500│
//! │--------------------------------│
//! │Subtotal                Rp10.500│
//! │Diskon (10%)            -Rp1.050│
//! │PPN (10%)                  Rp945│
//! │TOTAL                   Rp10.395│
//! │Tunai                   Rp11.000│
//! │Kembali                    Rp605│
//! │--------------------------------│
//! │Terima kasih atas kunjungan Anda│
//! └────────────────────────────────┘
//! ```
//!
//! The checkout emits each transaction to several sinks at once (the
//! transaction log and this printer) through [`ReceiptFanOut`].

use tracing::info;

use kelontong_core::{Money, ReceiptSink, Transaction, SALES_TAX_RATE};

use crate::state::ConfigState;

/// Characters per line on a 58mm roll.
pub const PAPER_WIDTH: usize = 32;

/// Text receipt renderer. Keeps the most recent receipt for reprinting.
#[derive(Debug, Clone)]
pub struct ReceiptPrinter {
    config: ConfigState,
    width: usize,
    last_receipt: Option<String>,
    printed: usize,
}

impl ReceiptPrinter {
    pub fn from_config(config: &ConfigState) -> Self {
        ReceiptPrinter {
            config: config.clone(),
            width: PAPER_WIDTH,
            last_receipt: None,
            printed: 0,
        }
    }

    /// The most recently printed receipt.
    pub fn last_receipt(&self) -> Option<&str> {
        self.last_receipt.as_deref()
    }

    /// Number of receipts printed this session.
    pub fn printed(&self) -> usize {
        self.printed
    }

    /// Renders a transaction without recording it.
    pub fn render(&self, tx: &Transaction) -> String {
        let mut out = Vec::new();

        out.push(self.center(&self.config.store_name));
        for line in &self.config.store_address {
            out.push(self.center(line));
        }
        if !self.config.store_phone.is_empty() {
            out.push(self.center(&format!("Telp {}", self.config.store_phone)));
        }
        out.push(self.rule());

        let local_time = tx.created_at.with_timezone(&self.config.offset());
        out.push(format!("No   : {}", tx.receipt_number));
        out.push(format!("Kasir: {}", tx.cashier_id));
        out.push(format!("Tgl  : {}", local_time.format("%d/%m/%Y %H:%M")));
        if let Some(customer) = &tx.customer {
            out.push(self.truncate(&format!("Plgn : {}", customer.name)));
        }
        out.push(self.rule());

        for item in &tx.items {
            out.push(self.truncate(&item.name));
            out.push(self.row(
                &format!(
                    "  {} x {}",
                    item.quantity,
                    self.config.format_currency(item.unit_price)
                ),
                item.line_total,
            ));
        }
        out.push(self.rule());

        out.push(self.row("Subtotal", tx.subtotal));
        if !tx.discount.is_zero() {
            out.push(self.row(
                &format!("Diskon ({})", tx.discount_percent),
                Money::zero() - tx.discount,
            ));
        }
        out.push(self.row(&format!("PPN ({})", SALES_TAX_RATE), tx.tax));
        out.push(self.row("TOTAL", tx.total));
        out.push(self.row(tx.payment_method.label(), tx.tendered));
        if tx.payment_method.is_cash() {
            out.push(self.row("Kembali", tx.change));
        }
        out.push(self.rule());

        if !self.config.receipt_footer.is_empty() {
            out.push(self.center(&self.config.receipt_footer));
        }

        out.join("\n")
    }

    // -------------------------------------------------------------------------
    // Layout helpers
    // -------------------------------------------------------------------------

    fn rule(&self) -> String {
        "-".repeat(self.width)
    }

    fn center(&self, text: &str) -> String {
        let text = self.truncate(text);
        let pad = (self.width - text.chars().count()) / 2;
        format!("{}{}", " ".repeat(pad), text)
    }

    fn truncate(&self, text: &str) -> String {
        text.chars().take(self.width).collect()
    }

    /// Label on the left, amount flush right.
    fn row(&self, label: &str, amount: Money) -> String {
        let amount = self.config.format_currency(amount);
        let room = self.width.saturating_sub(amount.chars().count() + 1);
        let label: String = label.chars().take(room).collect();
        let gap = self
            .width
            .saturating_sub(label.chars().count() + amount.chars().count())
            .max(1);
        format!("{}{}{}", label, " ".repeat(gap), amount)
    }
}

impl ReceiptSink for ReceiptPrinter {
    fn emit(&mut self, transaction: &Transaction) {
        let text = self.render(transaction);
        info!(
            receipt = %transaction.receipt_number,
            lines = text.lines().count(),
            "Receipt printed"
        );
        self.last_receipt = Some(text);
        self.printed += 1;
    }
}

// =============================================================================
// Fan-out
// =============================================================================

/// Forwards each receipt to every wrapped sink, in order.
pub struct ReceiptFanOut<'a> {
    sinks: Vec<&'a mut dyn ReceiptSink>,
}

impl<'a> ReceiptFanOut<'a> {
    pub fn new() -> Self {
        ReceiptFanOut { sinks: Vec::new() }
    }

    pub fn with(mut self, sink: &'a mut dyn ReceiptSink) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl Default for ReceiptFanOut<'_> {
    fn default() -> Self {
        ReceiptFanOut::new()
    }
}

impl ReceiptSink for ReceiptFanOut<'_> {
    fn emit(&mut self, transaction: &Transaction) {
        for sink in self.sinks.iter_mut() {
            sink.emit(transaction);
        }
    }
}
