//! # Configuration State
//!
//! Storefront configuration loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     KASHIFY_STORE_NAME="Green Acres Supply"                             │
//! │     KASHIFY_DEFAULT_SORT=price-low                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     --config <path>, else $KASHIFY_CONFIG, else                         │
//! │     ~/.config/kashify/storefront.toml (Linux)                           │
//! │     ~/Library/Application Support/com.kashify.storefront/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     "Kashify", INR (₹), all categories, sorted by name                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! storeName = "Kashify"
//! tagline = "Premium Farmer Tools & Equipment"
//! currencyCode = "INR"
//! currencySymbol = "₹"
//! currencyDecimals = 0
//! defaultCategory = "all"
//! defaultSort = "name"
//! catalogPath = "/srv/kashify/catalog.json"
//! ```
//!
//! Configuration is read-only after startup.

use kashify_core::money::group_thousands;
use kashify_core::{Catalog, CategoryFilter, CoreError, Money, SortKey};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "KASHIFY_CONFIG";

const MAX_CURRENCY_DECIMALS: u8 = 2;

// =============================================================================
// Errors
// =============================================================================

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to load catalog from {}: {}", path.display(), source)]
    Catalog {
        path: PathBuf,
        #[source]
        source: CoreError,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Config State
// =============================================================================

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigState {
    /// Shown in the header
    pub store_name: String,

    pub tagline: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Decimal places shown by `format_currency` (0-2)
    pub currency_decimals: u8,

    /// Category selected when a session starts
    pub default_category: CategoryFilter,

    /// Sort key selected when a session starts
    pub default_sort: SortKey,

    /// JSON catalog file; the builtin catalog is used when unset
    pub catalog_path: Option<PathBuf>,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Kashify".to_string(),
            tagline: "Premium Farmer Tools & Equipment".to_string(),
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 0,
            default_category: CategoryFilter::All,
            default_sort: SortKey::Name,
            catalog_path: None,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (an explicit path must exist; the default one may not)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the default if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading storefront config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `KASHIFY_*` overrides from a variable lookup.
    ///
    /// ## Variables
    /// - `KASHIFY_STORE_NAME`
    /// - `KASHIFY_CURRENCY_SYMBOL`
    /// - `KASHIFY_DEFAULT_SORT` (`name`, `price-low`, `price-high`, `popularity`)
    /// - `KASHIFY_DEFAULT_CATEGORY` (`all` or a category value)
    /// - `KASHIFY_CATALOG_PATH`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("KASHIFY_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(symbol) = lookup("KASHIFY_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(sort) = lookup("KASHIFY_DEFAULT_SORT") {
            self.default_sort = sort.parse().map_err(|e: CoreError| ConfigError::InvalidValue {
                key: "KASHIFY_DEFAULT_SORT".to_string(),
                reason: e.to_string(),
            })?;
        }

        if let Some(category) = lookup("KASHIFY_DEFAULT_CATEGORY") {
            self.default_category =
                category.parse().map_err(|e: CoreError| ConfigError::InvalidValue {
                    key: "KASHIFY_DEFAULT_CATEGORY".to_string(),
                    reason: e.to_string(),
                })?;
        }

        if let Some(path) = lookup("KASHIFY_CATALOG_PATH") {
            debug!(catalog_path = %path, "Overriding catalog path from environment");
            self.catalog_path = Some(PathBuf::from(path));
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "storeName".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::InvalidValue {
                key: "currencyDecimals".to_string(),
                reason: format!("must be at most {}", MAX_CURRENCY_DECIMALS),
            });
        }

        Ok(())
    }

    /// Loads the catalog this configuration points at.
    pub fn load_catalog(&self) -> ConfigResult<Catalog> {
        let Some(path) = &self.catalog_path else {
            return Ok(Catalog::builtin());
        };

        info!(?path, "Loading catalog from file");
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Catalog::from_json(&json).map_err(|source| ConfigError::Catalog {
            path: path.clone(),
            source,
        })
    }

    /// Formats an amount with the configured symbol and thousands grouping.
    ///
    /// ## Example
    /// ```rust
    /// use kashify_core::Money;
    /// use kashify_storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_rupees(850_000)), "₹850,000");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let whole = group_thousands(amount.rupees().unsigned_abs());
        let sign = if amount.is_negative() { "-" } else { "" };

        let frac = match self.currency_decimals {
            0 => String::new(),
            1 => format!(".{}", amount.paise_part() / 10),
            _ => format!(".{:02}", amount.paise_part()),
        };

        format!("{}{}{}{}", sign, self.currency_symbol, whole, frac)
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "kashify", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}
