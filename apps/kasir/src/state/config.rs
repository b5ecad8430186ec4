//! # Configuration State
//!
//! Store settings loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KELONTONG_STORE_NAME="Toko Makmur"                                 │
//! │     KELONTONG_SALES_TARGET=5000000                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $KELONTONG_CONFIG, or                                              │
//! │     ~/.config/kasir/kasir.toml (Linux)                                 │
//! │     ~/Library/Application Support/id.kelontong.kasir/kasir.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Toko Kelontong Berkah"
//! store_address = ["Jl. Merdeka No. 17", "Bandung"]
//! cashier_id = "kasir-02"
//! daily_sales_target_rupiah = 3000000
//! report_lookback_days = 7
//! ```
//!
//! Read-only after startup, so commands borrow it without locking.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use kelontong_core::validation::validate_lookback_days;
use kelontong_core::Money;

/// Environment variable naming an explicit config file.
const CONFIG_PATH_ENV: &str = "KELONTONG_CONFIG";

/// Largest daily sales target accepted, in rupiah.
const MAX_SALES_TARGET_RUPIAH: i64 = 1_000_000_000_000;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Store name (printed on receipts)
    pub store_name: String,

    /// Store address lines (for receipts)
    pub store_address: Vec<String>,

    pub store_phone: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Recorded as the cashier on every transaction and stock movement
    pub cashier_id: String,

    /// Dashboard daily sales target, in whole rupiah
    pub daily_sales_target_rupiah: i64,

    /// Default window for the sales report
    pub report_lookback_days: u32,

    /// How many critical products the inventory overview lists
    pub low_stock_alert_limit: usize,

    pub receipt_footer: String,

    /// Store timezone as minutes east of UTC. 420 = WIB.
    pub utc_offset_minutes: i32,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Toko Kelontong".to_string(),
            store_address: vec!["Jl. Raya No. 1".to_string(), "Jakarta".to_string()],
            store_phone: "021-000000".to_string(),
            currency_code: "IDR".to_string(),
            currency_symbol: "Rp".to_string(),
            cashier_id: "kasir-01".to_string(),
            daily_sales_target_rupiah: 3_000_000,
            report_lookback_days: 7,
            low_stock_alert_limit: 5,
            receipt_footer: "Terima kasih atas kunjungan Anda".to_string(),
            utc_offset_minutes: 7 * 60,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (kasir.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cashier_id.trim().is_empty() {
            return Err(ConfigError::Invalid("cashier_id must not be empty".into()));
        }

        if !(0..=MAX_SALES_TARGET_RUPIAH).contains(&self.daily_sales_target_rupiah) {
            return Err(ConfigError::Invalid(format!(
                "daily_sales_target_rupiah out of range (0 to {}): {}",
                MAX_SALES_TARGET_RUPIAH, self.daily_sales_target_rupiah
            )));
        }

        validate_lookback_days(self.report_lookback_days)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        // FixedOffset accepts strictly less than a day either way
        if self.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(ConfigError::Invalid(format!(
                "utc_offset_minutes out of range: {}",
                self.utc_offset_minutes
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("KELONTONG_STORE_NAME") {
            self.store_name = name;
        }

        if let Ok(id) = std::env::var("KELONTONG_CASHIER_ID") {
            debug!(cashier_id = %id, "Overriding cashier ID from environment");
            self.cashier_id = id;
        }

        if let Ok(target) = std::env::var("KELONTONG_SALES_TARGET") {
            match target.parse::<i64>() {
                Ok(t) => self.daily_sales_target_rupiah = t,
                Err(_) => warn!(value = %target, "Ignoring invalid KELONTONG_SALES_TARGET"),
            }
        }

        if let Ok(days) = std::env::var("KELONTONG_LOOKBACK_DAYS") {
            match days.parse::<u32>() {
                Ok(d) => self.report_lookback_days = d,
                Err(_) => warn!(value = %days, "Ignoring invalid KELONTONG_LOOKBACK_DAYS"),
            }
        }

        if let Ok(offset) = std::env::var("KELONTONG_UTC_OFFSET_MINUTES") {
            match offset.parse::<i32>() {
                Ok(m) => self.utc_offset_minutes = m,
                Err(_) => warn!(value = %offset, "Ignoring invalid KELONTONG_UTC_OFFSET_MINUTES"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("id", "kelontong", "kasir")
            .map(|dirs| dirs.config_dir().join("kasir.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Daily sales target as money.
    pub fn sales_target(&self) -> Money {
        Money::from_rupiah(self.daily_sales_target_rupiah.clamp(0, MAX_SALES_TARGET_RUPIAH))
    }

    /// The store's timezone. Falls back to UTC for an out-of-range offset.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    /// Today's date in the store's timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset()).date_naive()
    }

    /// Formats money with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_rupiah(3500)), "Rp3.500");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let formatted = amount.to_string();
        if self.currency_symbol == "Rp" {
            formatted
        } else {
            formatted.replacen("Rp", &self.currency_symbol, 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ConfigState::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sales_target(), Money::from_rupiah(3_000_000));
        assert_eq!(config.offset().local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: ConfigState = toml::from_str(
            r#"
            store_name = "Toko Berkah"
            store_address = ["Jl. Merdeka No. 17", "Bandung"]
            report_lookback_days = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.store_name, "Toko Berkah");
        assert_eq!(config.store_address.len(), 2);
        assert_eq!(config.report_lookback_days, 30);
        // untouched fields keep their defaults
        assert_eq!(config.cashier_id, "kasir-01");
        assert_eq!(config.currency_code, "IDR");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ConfigState::default();
        config.report_lookback_days = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ConfigState::default();
        config.cashier_id = "  ".into();
        assert!(config.validate().is_err());

        let mut config = ConfigState::default();
        config.utc_offset_minutes = 24 * 60;
        assert!(config.validate().is_err());

        let mut config = ConfigState::default();
        config.daily_sales_target_rupiah = -1;
        assert!(config.validate().is_err());

        let mut config = ConfigState::default();
        config.daily_sales_target_rupiah = i64::MAX;
        assert!(config.validate().is_err());
        assert_eq!(
            config.sales_target(),
            Money::from_rupiah(MAX_SALES_TARGET_RUPIAH)
        );

        let mut config = ConfigState::default();
        config.daily_sales_target_rupiah = MAX_SALES_TARGET_RUPIAH;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("kasir-test-{}.toml", std::process::id()));
        std::fs::write(&path, "store_name = \"Warung Bu Tini\"\nutc_offset_minutes = 480\n").unwrap();

        let config = ConfigState::load(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.store_name, "Warung Bu Tini");
        assert_eq!(config.offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn test_load_or_default_on_parse_error() {
        let path = std::env::temp_dir().join(format!("kasir-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "report_lookback_days = \"seven\"").unwrap();

        let config = ConfigState::load_or_default(Some(path.clone()));
        std::fs::remove_file(&path).ok();

        assert_eq!(config.report_lookback_days, 7);
    }

    #[test]
    fn test_format_currency() {
        let mut config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_rupiah(3500)), "Rp3.500");

        config.currency_symbol = "IDR ".into();
        assert_eq!(config.format_currency(Money::from_rupiah(3500)), "IDR 3.500");
    }
}
