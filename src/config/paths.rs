//! Path management for billtrack
//!
//! ## Path Resolution Order
//!
//! 1. `BILLTRACK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/billtrack` or `~/.config/billtrack`
//! 3. Windows: `%APPDATA%\billtrack`
//!
//! One base directory holds exactly one account's records.

use std::path::PathBuf;

use crate::error::BillingError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BILLTRACK_DATA_DIR";

/// Manages all paths used by billtrack
#[derive(Debug, Clone)]
pub struct BilltrackPaths {
    base_dir: PathBuf,
}

impl BilltrackPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, BillingError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the record files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn clients_file(&self) -> PathBuf {
        self.data_dir().join("clients.json")
    }

    pub fn payments_file(&self) -> PathBuf {
        self.data_dir().join("payments.json")
    }

    pub fn invoices_file(&self) -> PathBuf {
        self.data_dir().join("invoices.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    pub fn documents_file(&self) -> PathBuf {
        self.data_dir().join("documents.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BillingError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BillingError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BillingError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if billtrack has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, BillingError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("billtrack"));
    }
    let home = std::env::var("HOME").map_err(|_| {
        BillingError::Config(format!(
            "Could not determine home directory; set {}",
            DATA_DIR_ENV
        ))
    })?;
    Ok(PathBuf::from(home).join(".config").join("billtrack"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, BillingError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BillingError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("billtrack"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilltrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(
            paths.invoices_file(),
            temp_dir.path().join("data").join("invoices.json")
        );
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilltrackPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }
}
