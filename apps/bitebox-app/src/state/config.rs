//! # Configuration State
//!
//! Session configuration loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     BITEBOX_DELIVERY_FEE_CENTS=199                                      │
//! │     BITEBOX_TAX_RATE=8.25                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     $BITEBOX_CONFIG, or                                                 │
//! │     ~/.config/bitebox/config.toml (Linux)                               │
//! │     ~/Library/Application Support/com.bitebox.app/config.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     $2.99 delivery, 10% tax, 45 minute ETA                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "BiteBox"
//! currency_code = "USD"
//! currency_symbol = "$"
//! delivery_fee_cents = 299
//! tax_rate_bps = 1000        # 10%
//! delivery_minutes = 45
//! ```
//!
//! Read-only after startup, so no mutex.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use bitebox_core::validation::{validate_price_cents, validate_required, validate_tax_rate_bps};
use bitebox_core::{
    Charges, Money, TaxRate, ValidationError, DEFAULT_DELIVERY_FEE_CENTS,
    DEFAULT_DELIVERY_MINUTES, DEFAULT_TAX_RATE_BPS,
};

use crate::error::ConfigResult;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "BITEBOX_CONFIG";

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Shown in the console banner.
    pub store_name: String,

    /// ISO 4217 code.
    pub currency_code: String,

    pub currency_symbol: String,

    /// Flat delivery fee in cents.
    pub delivery_fee_cents: i64,

    /// Sales tax in basis points (1000 = 10%).
    pub tax_rate_bps: u32,

    /// Promised minutes from order to door.
    pub delivery_minutes: u32,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "BiteBox".to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            delivery_fee_cents: DEFAULT_DELIVERY_FEE_CENTS,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            delivery_minutes: DEFAULT_DELIVERY_MINUTES,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `config_path`, else `$BITEBOX_CONFIG`, else the
    ///    platform config directory. A missing file is not an error.
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let path = config_path
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

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

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses TOML. Keys left out keep their defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required("currency_symbol", &self.currency_symbol)?;
        validate_price_cents("delivery_fee_cents", self.delivery_fee_cents)?;
        validate_tax_rate_bps(self.tax_rate_bps)?;
        Ok(())
    }

    /// Applies `BITEBOX_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are logged
    /// and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("BITEBOX_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(fee) = lookup("BITEBOX_DELIVERY_FEE_CENTS") {
            match fee.trim().parse::<i64>() {
                Ok(cents) => {
                    debug!(cents, "Overriding delivery fee from environment");
                    self.delivery_fee_cents = cents;
                }
                Err(_) => warn!(value = %fee, "Ignoring invalid BITEBOX_DELIVERY_FEE_CENTS"),
            }
        }

        if let Some(rate) = lookup("BITEBOX_TAX_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(pct) => {
                    self.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                    debug!(bps = self.tax_rate_bps, "Overriding tax rate from environment");
                }
                Err(_) => warn!(value = %rate, "Ignoring invalid BITEBOX_TAX_RATE"),
            }
        }

        if let Some(minutes) = lookup("BITEBOX_DELIVERY_MINUTES") {
            match minutes.trim().parse::<u32>() {
                Ok(m) => self.delivery_minutes = m,
                Err(_) => warn!(value = %minutes, "Ignoring invalid BITEBOX_DELIVERY_MINUTES"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bitebox", "app")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Delivery fee and tax rate for checkout.
    pub fn charges(&self) -> Charges {
        Charges {
            delivery_fee: Money::from_cents(self.delivery_fee_cents),
            tax_rate: TaxRate::from_bps(self.tax_rate_bps),
        }
    }

    /// Formats a cent amount as a currency string.
    ///
    /// Amounts are always cents, so there are always two decimal places.
    ///
    /// ```rust
    /// use bitebox_app::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(2276), "$22.76");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let money = Money::from_cents(cents);

        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            money.dollars().unsigned_abs(),
            money.cents_part()
        )
    }
}
