//! # Kasir Library
//!
//! Command layer of Kelontong POS. Wires configuration, logging and the
//! session state together and serves JSON commands over stdin/stdout.
//!
//! ## Module Organization
//! ```text
//! kasir_lib/
//! ├── lib.rs          ◄─── You are here (startup & command loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState (catalog, config, session, printer)
//! │   └── config.rs   ◄─── Configuration loading
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command enum and dispatch
//! │   ├── product.rs  ◄─── Product search, categories, customers
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── sale.rs     ◄─── Payment processing
//! │   ├── inventory.rs◄─── Stock overview and adjustments
//! │   ├── report.rs   ◄─── Dashboard and sales report
//! │   └── config.rs   ◄─── Configuration retrieval
//! ├── receipt.rs      ◄─── Text receipt printer, receipt fan-out
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Wire Protocol
//! ```text
//! stdin  ─► {"command": "add_to_cart", "productId": "p001"}
//! stdout ◄─ {"ok": {"lineChange": {"change": "added"}, "cart": {...}}}
//!
//! stdin  ─► {"command": "process_payment", "method": "cash", "tendered": "5000"}
//! stdout ◄─ {"error": {"code": "PAYMENT_ERROR", "message": "..."}}
//! ```
//!
//! Logs go to stderr so they never mix with responses.

pub mod commands;
pub mod error;
pub mod receipt;
pub mod state;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{AppState, ConfigState};

/// Runs the command loop until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: info, debug for kelontong/kasir; RUST_LOG overrides      │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → kasir.toml → KELONTONG_* env                           │
/// │     • Falls back to defaults on error                                   │
/// │                                                                         │
/// │  3. Initialize State ─────────────────────────────────────────────────► │
/// │     • Starter catalog, empty checkout session, receipt printer          │
/// │                                                                         │
/// │  4. Serve Commands ───────────────────────────────────────────────────► │
/// │     • One JSON command per stdin line, one response per stdout line     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Kelontong POS kasir");

    let config = ConfigState::load_or_default(config_path);
    info!(
        store = %config.store_name,
        cashier = %config.cashier_id,
        "Configuration loaded"
    );

    let mut state = AppState::new(config);
    serve(&mut state, io::stdin().lock(), io::stdout().lock())?;

    info!(
        transactions = state.catalog.transactions().count(),
        receipts = state.printer.printed(),
        "Session closed"
    );
    Ok(())
}

/// Reads commands from `input` and writes one response line each to `output`.
pub fn serve(state: &mut AppState, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = commands::handle_line(state, &line);
        writeln!(output, "{}", response)?;
        output.flush()?;
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kelontong_catalog=trace` - Trace for the store only
/// - Default: INFO, DEBUG for kelontong crates and kasir
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kelontong=debug,kasir=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_answers_each_line() {
        let mut state = AppState::new(ConfigState::default());
        let input = b"{\"command\":\"get_cart\"}\n\n{\"command\":\"add_to_cart\",\"productId\":\"p001\"}\n";
        let mut output = Vec::new();

        serve(&mut state, &input[..], &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("{\"ok\":"));
        assert_eq!(state.session.cart().item_count(), 1);
    }
}
