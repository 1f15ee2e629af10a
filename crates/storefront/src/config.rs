//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BISTRO_DATA_DIR` - Directory holding persisted cart slots (default: .bistro)
//! - `BISTRO_CART_KEY` - Slot key the cart is stored under (default: cartItems)
//! - `BISTRO_TAX_RATE` - Sales tax as a decimal fraction (default: 0.10)
//! - `BISTRO_MENU_PATH` - YAML menu file replacing the built-in menu

use std::path::PathBuf;

use bistro_core::TaxRate;
use thiserror::Error;

use crate::cart::DEFAULT_CART_KEY;
use crate::storage::validate_key;

const DEFAULT_DATA_DIR: &str = ".bistro";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for file-backed cart storage
    pub data_dir: PathBuf,
    /// Slot key for the cart
    pub cart_key: String,
    /// Tax applied to cart subtotals
    pub tax_rate: TaxRate,
    /// Menu file to use instead of the built-in menu
    pub menu_path: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            tax_rate: TaxRate::default(),
            menu_path: None,
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
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = PathBuf::from(get_env_or_default(
            &lookup,
            "BISTRO_DATA_DIR",
            DEFAULT_DATA_DIR,
        ));

        let cart_key = get_env_or_default(&lookup, "BISTRO_CART_KEY", DEFAULT_CART_KEY);
        validate_key(&cart_key).map_err(|e| {
            ConfigError::InvalidEnvVar("BISTRO_CART_KEY".to_string(), e.to_string())
        })?;

        let tax_rate = match get_optional_env(&lookup, "BISTRO_TAX_RATE") {
            Some(raw) => raw.parse::<TaxRate>().map_err(|e| {
                ConfigError::InvalidEnvVar("BISTRO_TAX_RATE".to_string(), e.to_string())
            })?,
            None => TaxRate::default(),
        };

        let menu_path = get_optional_env(&lookup, "BISTRO_MENU_PATH").map(PathBuf::from);

        Ok(Self {
            data_dir,
            cart_key,
            tax_rate,
            menu_path,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}
