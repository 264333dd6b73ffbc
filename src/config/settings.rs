//! User settings for budgetbook
//!
//! Stored as `config.json` in the base directory. Missing fields take their
//! defaults so older files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::BudgetbookPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// strftime format used when printing dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// `tracing` filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Write create/update/delete records to `audit.log`
    #[serde(default = "default_true")]
    pub audit_enabled: bool,
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

fn default_log_filter() -> String {
    "budgetbook=info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            log_filter: default_log_filter(),
            audit_enabled: default_true(),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file does not exist
    ///
    /// Defaults are not written back; call `save` to persist them.
    pub fn load_or_create(paths: &BudgetbookPaths) -> LedgerResult<Self> {
        read_json(paths.settings_file()).map_err(|e| match e {
            LedgerError::Storage(msg) => LedgerError::Config(msg),
            other => other,
        })
    }

    pub fn save(&self, paths: &BudgetbookPaths) -> LedgerResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.log_filter, "budgetbook=info");
        assert!(settings.audit_enabled);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetbookPaths::with_base_dir(temp_dir.path());
        assert_eq!(Settings::load_or_create(&paths).unwrap(), Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetbookPaths::with_base_dir(temp_dir.path());

        let settings = Settings {
            currency_symbol: "€".into(),
            audit_enabled: false,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        assert_eq!(Settings::load_or_create(&paths).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetbookPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "£"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "£");
        assert_eq!(loaded.date_format, "%Y-%m-%d");
        assert!(loaded.audit_enabled);
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetbookPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), "{ nope").unwrap();
        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(LedgerError::Config(_))
        ));
    }
}
