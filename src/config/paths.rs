//! Path management for budgetbook
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGETBOOK_DATA_DIR` environment variable (if set and non-empty)
//! 2. The platform configuration directory from `directories`
//!    (`~/.config/budgetbook` on Linux)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{LedgerError, LedgerResult};

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BUDGETBOOK_DATA_DIR";

/// Every path budgetbook reads or writes
#[derive(Debug, Clone)]
pub struct BudgetbookPaths {
    base_dir: PathBuf,
}

impl BudgetbookPaths {
    /// Resolve the base directory from the environment or the platform
    pub fn new() -> LedgerResult<Self> {
        match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => Ok(Self::with_base_dir(custom)),
            _ => {
                let dirs = ProjectDirs::from("", "", "budgetbook").ok_or_else(|| {
                    LedgerError::Config("Could not determine a home directory".into())
                })?;
                Ok(Self::with_base_dir(dirs.config_dir()))
            }
        }
    }

    /// Use an explicit base directory (tests, scripted use)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn rules_file(&self) -> PathBuf {
        self.data_dir().join("rules.json")
    }

    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    /// Create the base and data directories
    pub fn ensure_directories(&self) -> LedgerResult<()> {
        for dir in [self.base_dir.clone(), self.data_dir()] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                LedgerError::Io(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }
        Ok(())
    }
}
