//! User settings for billtrack
//!
//! Display preferences plus the defaults applied when creating invoices.

use std::fmt::Write;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::paths::BilltrackPaths;
use crate::error::{BillingError, BillingResult};
use crate::models::TaxRate;

/// User settings for billtrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Tax rate applied to new invoices
    #[serde(default)]
    pub default_tax_rate: TaxRate,

    /// Days between issue date and due date when no due date is given
    #[serde(default = "default_payment_terms_days")]
    pub payment_terms_days: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_payment_terms_days() -> u32 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_tax_rate: TaxRate::zero(),
            payment_terms_days: default_payment_terms_days(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &BilltrackPaths) -> BillingResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller decides to save
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BillingError::Io(format!("Failed to read settings file: {}", e)))?;

        let mut settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BillingError::Config(format!("Failed to parse settings file: {}", e)))?;

        if let Err(e) = validate_date_format(&settings.date_format) {
            warn!(error = %e, "ignoring stored date format");
            settings.date_format = default_date_format();
        }
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BilltrackPaths) -> BillingResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BillingError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BillingError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Set the date format, refusing strftime strings a calendar date cannot render
    pub fn set_date_format(&mut self, format: &str) -> BillingResult<()> {
        validate_date_format(format)?;
        self.date_format = format.to_string();
        Ok(())
    }

    /// Set the default tax rate from a percentage
    pub fn set_default_tax_rate(&mut self, percent: Decimal) -> BillingResult<()> {
        self.default_tax_rate = TaxRate::new(percent)?;
        Ok(())
    }
}

/// Check that `format` renders a plain date
///
/// Unknown specifiers and time fields (`%H`, `%S`) both fail to format a
/// `NaiveDate`, so a sample date is rendered rather than parsing the items.
pub fn validate_date_format(format: &str) -> BillingResult<()> {
    let mut rendered = String::new();
    let ok = !format.trim().is_empty()
        && write!(rendered, "{}", NaiveDate::default().format(format)).is_ok();
    if !ok {
        return Err(BillingError::Validation(format!(
            "Invalid date format '{}'. Use strftime date fields, e.g. %Y-%m-%d",
            format
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_tax_rate, TaxRate::zero());
        assert_eq!(settings.payment_terms_days, 30);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilltrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".into();
        settings.set_default_tax_rate(dec!(19)).unwrap();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.default_tax_rate.percent(), dec!(19));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol":"£"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "£");
        assert_eq!(settings.payment_terms_days, 30);
    }

    #[test]
    fn test_date_format_validation() {
        let mut settings = Settings::default();
        settings.set_date_format("%d/%m/%Y").unwrap();
        assert_eq!(settings.date_format, "%d/%m/%Y");

        for bad in ["%Q", "%Y-%m-%d %H:%M", "", "  "] {
            assert!(
                settings.set_date_format(bad).unwrap_err().is_validation(),
                "expected '{}' to be rejected",
                bad
            );
        }
        assert_eq!(settings.date_format, "%d/%m/%Y");
    }

    #[test]
    fn test_bad_stored_date_format_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilltrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format":"%Q"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_invalid_tax_rate_rejected() {
        let mut settings = Settings::default();
        assert!(settings.set_default_tax_rate(dec!(120)).is_err());
        assert!(serde_json::from_str::<Settings>(r#"{"default_tax_rate":"120"}"#).is_err());
    }
}
