//! # Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (later wins)
//! 1. Defaults (this file)
//! 2. Config file (`till.toml`)
//! 3. Environment variables (`TILL_*`)
//!
//! ## Environment Variables
//! - `TILL_DB_PATH`: database file (`:memory:` for a throwaway database)
//! - `TILL_STORE_NAME`: store name
//! - `TILL_CURRENCY_SYMBOL`: symbol used when rendering amounts
//! - `TILL_LOG`: tracing filter directives
//!
//! Configuration is read-only after startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use till_core::Money;
use till_db::pool::IN_MEMORY_PATH;
use till_db::DbConfig;

use crate::error::{PosError, PosResult};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosConfig {
    /// SQLite database file.
    pub database_path: PathBuf,

    /// Store name (shown on sale summaries)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency.
    /// Amounts are whole cents, so only 2 is accepted.
    pub currency_decimals: u8,

    /// Tracing filter directives; `RUST_LOG` still takes precedence.
    pub log_filter: Option<String>,
}

impl Default for PosConfig {
    /// ## Default Values
    /// - Database: `till.db` in the platform data directory
    /// - Store: "Till"
    /// - Currency: `$` with 2 decimals
    fn default() -> Self {
        PosConfig {
            database_path: default_database_path(),
            store_name: "Till".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: CURRENCY_DECIMALS,
            log_filter: None,
        }
    }
}

/// The only decimal count cent amounts can be shown with.
pub const CURRENCY_DECIMALS: u8 = 2;

/// Platform data directory for the database.
///
/// - **macOS**: `~/Library/Application Support/com.till.pos/till.db`
/// - **Windows**: `%APPDATA%\till\pos\data\till.db`
/// - **Linux**: `~/.local/share/pos/till.db`
///
/// Falls back to `./till.db` when no home directory is known.
fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "till", "pos")
        .map(|dirs| dirs.data_dir().join("till.db"))
        .unwrap_or_else(|| PathBuf::from("till.db"))
}

impl PosConfig {
    /// Configuration backed by a private in-memory database.
    pub fn in_memory() -> Self {
        PosConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            ..PosConfig::default()
        }
    }

    /// Loads defaults, then the TOML file if given, then the environment.
    ///
    /// ## Errors
    /// `PosError::Config` if the file is unreadable, malformed, or asks
    /// for a currency precision other than cents.
    pub fn load(path: Option<&Path>) -> PosResult<Self> {
        let config_error = |message: String| PosError::Config {
            path: path.map(Path::to_path_buf).unwrap_or_default(),
            message,
        };

        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
                PosConfig::from_toml_str(&text).map_err(|e| config_error(e.to_string()))?
            }
            None => PosConfig::default(),
        };

        config.apply_env();
        config.validate().map_err(config_error)?;
        Ok(config)
    }

    /// Checks settings that parse but cannot be honored.
    pub fn validate(&self) -> Result<(), String> {
        if self.currency_decimals != CURRENCY_DECIMALS {
            return Err(format!(
                "currency_decimals must be {}, got {}",
                CURRENCY_DECIMALS, self.currency_decimals
            ));
        }

        Ok(())
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Defaults overridden by the environment.
    pub fn from_env() -> Self {
        let mut config = PosConfig::default();
        config.apply_env();
        config
    }

    /// Applies `TILL_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("TILL_DB_PATH") {
            self.database_path = PathBuf::from(path);
        }

        if let Some(store_name) = lookup("TILL_STORE_NAME") {
            self.store_name = store_name;
        }

        if let Some(symbol) = lookup("TILL_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(filter) = lookup("TILL_LOG") {
            self.log_filter = Some(filter);
        }
    }

    /// Database settings for this configuration.
    pub fn db_config(&self) -> DbConfig {
        if self.database_path == Path::new(IN_MEMORY_PATH) {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.database_path)
        }
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use till_pos::PosConfig;
    ///
    /// let config = PosConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let amount = Money::from_cents(cents);
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_currency() {
        let config = PosConfig::default();
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(150), "$1.50");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(0), "$0.00");
        assert_eq!(config.format_currency(-1234), "-$12.34");
    }

    #[test]
    fn test_format_currency_custom_symbol() {
        let config = PosConfig {
            currency_symbol: "€".to_string(),
            ..PosConfig::default()
        };
        assert_eq!(config.format_currency(250), "€2.50");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PosConfig::from_toml_str(
            r#"
            store_name = "Corner Shop"
            database_path = "/var/lib/till/shop.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.store_name, "Corner Shop");
        assert_eq!(config.database_path, PathBuf::from("/var/lib/till/shop.db"));
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.currency_decimals, 2);
    }

    #[test]
    fn test_malformed_toml() {
        assert!(PosConfig::from_toml_str("currency_decimals = \"two\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("TILL_DB_PATH", ":memory:"),
            ("TILL_STORE_NAME", "Night Market"),
            ("TILL_LOG", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = PosConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store_name, "Night Market");
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert_eq!(config.currency_symbol, "$");
        assert!(config.db_config().is_in_memory());
    }

    #[test]
    fn test_currency_decimals_other_than_cents_rejected() {
        for decimals in [0, 3, 30] {
            let config = PosConfig::from_toml_str(&format!("currency_decimals = {decimals}")).unwrap();
            assert!(config.validate().is_err(), "{decimals} decimals accepted");
        }
        assert!(PosConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_rejects_bad_currency_decimals() {
        let path = std::env::temp_dir().join(format!("till-config-{}.toml", std::process::id()));
        std::fs::write(&path, "store_name = \"Kiosk\"\ncurrency_decimals = 3\n").unwrap();

        let err = PosConfig::load(Some(&path)).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        match err {
            PosError::Config { path: reported, message } => {
                assert_eq!(reported, path);
                assert!(message.contains("currency_decimals"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = PosConfig::load(Some(Path::new("/nonexistent/till.toml"))).unwrap_err();
        assert!(matches!(err, PosError::Config { .. }));
    }
}
