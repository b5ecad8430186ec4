//! # State Module
//!
//! Everything one cashier session works on, held in a single [`AppState`]
//! that is passed explicitly into every command.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        AppState                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │          │                  │                  │              │         │
//! │          ▼                  ▼                  ▼              ▼         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐ ┌────────────┐  │
//! │  │   Catalog    │  │ ConfigState  │  │  Checkout    │ │  Receipt   │  │
//! │  │              │  │              │  │  Session     │ │  Printer   │  │
//! │  │  products    │  │  store_name  │  │              │ │            │  │
//! │  │  customers   │  │  cashier_id  │  │  cart        │ │  last      │  │
//! │  │  tx log      │  │  target      │  │  discount    │ │  receipt   │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘ └────────────┘  │
//! │                                                                         │
//! │  OWNERSHIP:                                                            │
//! │  • One AppState per session, owned by the command loop                 │
//! │  • Commands borrow it mutably; no locks, no global singleton           │
//! │  • ConfigState is read-only after startup                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

pub use config::{ConfigError, ConfigState};

use kelontong_catalog::Catalog;
use kelontong_core::{CheckoutSession, Money};

use crate::receipt::ReceiptPrinter;

/// Session-scoped application context.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub config: ConfigState,
    pub session: CheckoutSession,
    pub printer: ReceiptPrinter,
    /// Change handed back on the previous sale, shown until the next one.
    pub last_change: Option<Money>,
}

impl AppState {
    /// Creates a session over the starter catalog.
    pub fn new(config: ConfigState) -> Self {
        Self::with_catalog(config, Catalog::sample())
    }

    pub fn with_catalog(config: ConfigState, catalog: Catalog) -> Self {
        AppState {
            session: CheckoutSession::new(config.cashier_id.clone()),
            printer: ReceiptPrinter::from_config(&config),
            last_change: None,
            catalog,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kelontong_core::CheckoutPhase;

    #[test]
    fn test_new_state_uses_configured_cashier() {
        let config = ConfigState {
            cashier_id: "kasir-07".into(),
            ..ConfigState::default()
        };
        let state = AppState::new(config);

        assert_eq!(state.session.cashier_id(), "kasir-07");
        assert_eq!(state.session.phase(), CheckoutPhase::Empty);
        assert_eq!(state.catalog.products().count(), 12);
        assert!(state.last_change.is_none());
    }
}
