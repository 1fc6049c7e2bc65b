//! Storage initialization
//!
//! First-run setup: directories, default settings and empty record files.

use tracing::info;

use crate::config::paths::BilltrackPaths;
use crate::config::settings::Settings;
use crate::error::BillingError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh account
///
/// Existing files are left untouched, so running this twice is harmless.
pub fn initialize_storage(paths: &BilltrackPaths) -> Result<(), BillingError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    for file in [
        paths.clients_file(),
        paths.payments_file(),
        paths.invoices_file(),
        paths.expenses_file(),
        paths.documents_file(),
    ] {
        if !file.exists() {
            write_json_atomic(&file, &serde_json::json!({ "records": [] }))?;
        }
    }

    info!(base = %paths.base_dir().display(), "initialized storage");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilltrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();

        assert!(paths.is_initialized());
        assert!(paths.clients_file().exists());
        assert!(paths.documents_file().exists());
    }

    #[test]
    fn test_initialize_keeps_existing_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilltrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".into();
        settings.save(&paths).unwrap();

        initialize_storage(&paths).unwrap();
        assert_eq!(Settings::load_or_create(&paths).unwrap().currency_symbol, "€");
    }
}
