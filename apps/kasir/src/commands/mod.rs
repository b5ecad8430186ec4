//! # Commands Module
//!
//! All commands exposed to the dashboard front-end.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (Command enum, dispatch)
//! ├── product.rs    ◄─── Product search, categories, customers
//! ├── cart.rs       ◄─── Cart manipulation, discount, staged payment
//! ├── sale.rs       ◄─── Payment processing
//! ├── inventory.rs  ◄─── Stock overview and adjustments
//! ├── report.rs     ◄─── Dashboard and sales report
//! └── config.rs     ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Front-end writes one JSON object per line:                            │
//! │  {"command": "add_to_cart", "productId": "p001"}                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  handle_line ──► serde ──► Command::AddToCart { product_id }           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  dispatch(&mut AppState, Command)                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  cart::add_to_cart(state, "p001") -> Result<CartUpdate, ApiError>      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  One JSON line back:                                                   │
//! │  {"ok": {...}}   or   {"error": {"code": "NOT_FOUND", ...}}            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod config;
pub mod inventory;
pub mod product;
pub mod report;
pub mod sale;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use kelontong_core::catalog::ProductQuery;
use kelontong_core::PaymentMethod;

use crate::error::ApiError;
use crate::state::AppState;
use inventory::AdjustMode;

/// A request from the front-end.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Command {
    // Products
    SearchProducts {
        #[serde(default)]
        query: ProductQuery,
    },
    GetProduct {
        product_id: String,
    },
    ListCategories,
    ListCustomers {
        #[serde(default)]
        search: Option<String>,
    },

    // Cart
    GetCart,
    AddToCart {
        product_id: String,
    },
    UpdateCartItem {
        product_id: String,
        quantity: i64,
    },
    UpdateCartItemInput {
        product_id: String,
        input: String,
    },
    RemoveFromCart {
        product_id: String,
    },
    ClearCart,
    SelectCustomer {
        #[serde(default)]
        customer_id: Option<String>,
    },
    SetDiscount {
        percent: f64,
    },
    StagePayment {
        method: PaymentMethod,
        #[serde(default)]
        tendered: String,
    },

    // Sale
    ProcessPayment {
        #[serde(default)]
        method: Option<PaymentMethod>,
        #[serde(default)]
        tendered: Option<String>,
    },

    // Inventory
    InventoryOverview {
        #[serde(default)]
        query: ProductQuery,
    },
    AdjustStock {
        product_id: String,
        mode: AdjustMode,
        input: String,
        #[serde(default)]
        expected_stock: Option<u32>,
        #[serde(default)]
        reason: Option<String>,
    },

    // Reports
    Dashboard,
    SalesReport {
        #[serde(default)]
        lookback_days: Option<u32>,
    },

    // Config
    GetConfig,
}

impl Command {
    /// Wire name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::SearchProducts { .. } => "search_products",
            Command::GetProduct { .. } => "get_product",
            Command::ListCategories => "list_categories",
            Command::ListCustomers { .. } => "list_customers",
            Command::GetCart => "get_cart",
            Command::AddToCart { .. } => "add_to_cart",
            Command::UpdateCartItem { .. } => "update_cart_item",
            Command::UpdateCartItemInput { .. } => "update_cart_item_input",
            Command::RemoveFromCart { .. } => "remove_from_cart",
            Command::ClearCart => "clear_cart",
            Command::SelectCustomer { .. } => "select_customer",
            Command::SetDiscount { .. } => "set_discount",
            Command::StagePayment { .. } => "stage_payment",
            Command::ProcessPayment { .. } => "process_payment",
            Command::InventoryOverview { .. } => "inventory_overview",
            Command::AdjustStock { .. } => "adjust_stock",
            Command::Dashboard => "dashboard",
            Command::SalesReport { .. } => "sales_report",
            Command::GetConfig => "get_config",
        }
    }
}

/// Runs a command against the session state.
pub fn dispatch(state: &mut AppState, command: Command) -> Result<Value, ApiError> {
    debug!(command = command.name(), "Dispatching command");

    match command {
        Command::SearchProducts { query } => to_json(product::search_products(state, query)?),
        Command::GetProduct { product_id } => to_json(product::get_product(state, &product_id)?),
        Command::ListCategories => to_json(product::list_categories(state)),
        Command::ListCustomers { search } => {
            to_json(product::list_customers(state, search.as_deref())?)
        }

        Command::GetCart => to_json(cart::get_cart(state)),
        Command::AddToCart { product_id } => to_json(cart::add_to_cart(state, &product_id)?),
        Command::UpdateCartItem {
            product_id,
            quantity,
        } => to_json(cart::update_cart_item(state, &product_id, quantity)?),
        Command::UpdateCartItemInput { product_id, input } => {
            to_json(cart::update_cart_item_input(state, &product_id, &input)?)
        }
        Command::RemoveFromCart { product_id } => {
            to_json(cart::remove_from_cart(state, &product_id))
        }
        Command::ClearCart => to_json(cart::clear_cart(state)),
        Command::SelectCustomer { customer_id } => {
            to_json(cart::select_customer(state, customer_id.as_deref())?)
        }
        Command::SetDiscount { percent } => to_json(cart::set_discount(state, percent)),
        Command::StagePayment { method, tendered } => {
            to_json(cart::stage_payment(state, method, &tendered)?)
        }

        Command::ProcessPayment { method, tendered } => {
            to_json(sale::process_payment(state, method, tendered.as_deref())?)
        }

        Command::InventoryOverview { query } => {
            to_json(inventory::inventory_overview(state, query)?)
        }
        Command::AdjustStock {
            product_id,
            mode,
            input,
            expected_stock,
            reason,
        } => to_json(inventory::adjust_stock(
            state,
            &product_id,
            mode,
            &input,
            expected_stock,
            reason.as_deref(),
        )?),

        Command::Dashboard => to_json(report::dashboard(state)),
        Command::SalesReport { lookback_days } => {
            to_json(report::sales_report(state, lookback_days)?)
        }

        Command::GetConfig => to_json(config::get_config(state)),
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

/// Response line written back to the front-end.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Envelope {
    Ok(Value),
    Error(ApiError),
}

/// Parses one JSON command line, runs it, and renders the response line.
pub fn handle_line(state: &mut AppState, line: &str) -> String {
    let result = match serde_json::from_str::<Command>(line) {
        Ok(command) => dispatch(state, command),
        Err(e) => {
            warn!(error = %e, "Rejected malformed command");
            Err(ApiError::invalid_command(e.to_string()))
        }
    };

    if let Err(e) = &result {
        debug!(code = ?e.code, message = %e.message, "Command failed");
    }

    let envelope = match result {
        Ok(value) => Envelope::Ok(value),
        Err(e) => Envelope::Error(e),
    };
    serde_json::to_string(&envelope).unwrap_or_else(|e| {
        format!(
            r#"{{"error":{{"code":"INTERNAL","message":"{}"}}}}"#,
            e.to_string().replace('"', "'")
        )
    })
}
