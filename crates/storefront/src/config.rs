//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `PREMIUM_DATA_DIR` - Durable storage directory (default: `.premium`)
//! - `PREMIUM_CATALOG_PATH` - JSON product list replacing the demo catalog
//! - `PREMIUM_FREE_SHIPPING_THRESHOLD` - Subtotal that ships free (default: 100)
//! - `PREMIUM_FLAT_SHIPPING_FEE` - Fee below the threshold (default: 10)
//! - `PREMIUM_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use premium_core::Price;

use crate::services::cart::ShippingPolicy;

const DEFAULT_DATA_DIR: &str = ".premium";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding durable records
    pub data_dir: PathBuf,
    /// Product list to load instead of the demo catalog
    pub catalog_path: Option<PathBuf>,
    /// Shipping fee rules applied at checkout
    pub shipping: ShippingPolicy,
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
            shipping: ShippingPolicy::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set to a value
    /// that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ShippingPolicy::default();
        let free_threshold = get_price_or_default(
            &lookup,
            "PREMIUM_FREE_SHIPPING_THRESHOLD",
            defaults.free_threshold,
        )?;
        let flat_fee =
            get_price_or_default(&lookup, "PREMIUM_FLAT_SHIPPING_FEE", defaults.flat_fee)?;

        let log_format = get_env_or_default(&lookup, "PREMIUM_LOG_FORMAT", "pretty")
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("PREMIUM_LOG_FORMAT".to_string(), e))?;

        Ok(Self {
            data_dir: PathBuf::from(get_env_or_default(
                &lookup,
                "PREMIUM_DATA_DIR",
                DEFAULT_DATA_DIR,
            )),
            catalog_path: get_optional_env(&lookup, "PREMIUM_CATALOG_PATH").map(PathBuf::from),
            shipping: ShippingPolicy {
                free_threshold,
                flat_fee,
            },
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating blank values as unset.
fn get_optional_env<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Get a variable with a default value.
fn get_env_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

/// Get a non-negative decimal amount with a default value.
fn get_price_or_default<F>(lookup: &F, key: &str, default: Price) -> Result<Price, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = get_optional_env(lookup, key) else {
        return Ok(default);
    };
    let amount = raw
        .trim()
        .parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if amount.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(Price::new(amount))
}
