#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{Result, VaultError};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Currency the collection is priced in. Mirrors the two price feeds
/// Scryfall publishes per printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }

    /// Formats a monetary amount the way the matching locale displays it.
    pub fn format_amount(&self, amount: f64) -> String {
        match self {
            Currency::Usd => format!("${:.2}", amount),
            Currency::Eur => format!("{:.2} €", amount),
        }
    }
}

impl FromStr for Currency {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(VaultError::InvalidConfigValueError {
                field: "currency".to_string(),
                value: other.to_string(),
                reason: "Supported currencies are USD and EUR".to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional `cardvault.toml` next to the database. Every field falls back to
/// a default, so the file is never required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub db_path: Option<String>,
    pub scryfall_base_url: Option<String>,
    pub currency: Option<String>,
}

impl FileConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<FileConfig>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path)?;
        let parsed = toml::from_str(&raw).map_err(|e| VaultError::ConfigError {
            message: format!("Failed to parse {}: {}", path.display(), e),
        })?;
        Ok(Some(parsed))
    }
}

/// Resolved application configuration: file values overridden by CLI flags.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub scryfall_base_url: Option<String>,
    pub currency: Currency,
}

impl AppConfig {
    pub fn resolve(
        file: Option<FileConfig>,
        db_path_override: Option<String>,
        currency_override: Option<String>,
    ) -> Result<AppConfig> {
        let file = file.unwrap_or_default();

        let db_path = db_path_override
            .or(file.db_path)
            .unwrap_or_else(|| "cardvault.db".to_string());

        let currency = match currency_override.or(file.currency) {
            Some(raw) => raw.parse()?,
            None => Currency::default(),
        };

        let config = AppConfig {
            db_path,
            scryfall_base_url: file.scryfall_base_url,
            currency,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("db_path", &self.db_path)?;
        if let Some(url) = &self.scryfall_base_url {
            validate_url("scryfall_base_url", url)?;
        }
        Ok(())
    }
}
