//! # Report Commands
//!
//! Dashboard headline numbers and the sales report, both computed from the
//! session's transaction log.

use serde::Serialize;
use tracing::debug;

use kelontong_core::report::{DashboardStats, ReportSnapshot};
use kelontong_core::stock::critical_products;
use kelontong_core::validation::validate_lookback_days;
use kelontong_core::Transaction;

use crate::commands::product::ProductDto;
use crate::error::ApiError;
use crate::state::AppState;

/// Recent sales listed under the dashboard cards.
const RECENT_TRANSACTIONS: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub today_sales_display: String,
    pub monthly_revenue_display: String,
    pub sales_target_display: String,
    pub critical_products: Vec<ProductDto>,
    /// Newest first.
    pub recent_transactions: Vec<Transaction>,
}

/// Dashboard figures for today in the store's timezone.
pub fn dashboard(state: &AppState) -> DashboardResponse {
    let config = &state.config;
    let stats = DashboardStats::compute(
        state.catalog.transactions().list(),
        state.catalog.products().list(),
        state.catalog.customers().list(),
        config.today(),
        &config.offset(),
        config.sales_target(),
    );
    debug!(
        today_sales = %stats.today_sales,
        transactions = stats.today_transactions,
        "dashboard computed"
    );

    DashboardResponse {
        today_sales_display: config.format_currency(stats.today_sales),
        monthly_revenue_display: config.format_currency(stats.monthly_revenue),
        sales_target_display: config.format_currency(stats.sales_target),
        critical_products: critical_products(
            state.catalog.products().list(),
            config.low_stock_alert_limit,
        )
        .into_iter()
        .map(|p| ProductDto::new(p, config))
        .collect(),
        recent_transactions: state
            .catalog
            .transactions()
            .recent(RECENT_TRANSACTIONS)
            .into_iter()
            .cloned()
            .collect(),
        stats,
    }
}

/// Sales report ending today. Defaults to the configured lookback window.
pub fn sales_report(state: &AppState, lookback_days: Option<u32>) -> Result<ReportSnapshot, ApiError> {
    let days = lookback_days.unwrap_or(state.config.report_lookback_days);
    validate_lookback_days(days)?;

    let snapshot = ReportSnapshot::build(
        state.catalog.transactions().list(),
        state.config.today(),
        days,
        &state.config.offset(),
    );
    debug!(
        period = %snapshot.period,
        revenue = %snapshot.summary.total_revenue,
        "sales_report computed"
    );
    Ok(snapshot)
}
