//! Custom error types for budgetbook
//!
//! This module defines the error hierarchy for the ledger engine and its
//! surrounding storage, export and configuration layers using thiserror.

use thiserror::Error;

/// The main error type for budgetbook operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// An entity with the same id is already recorded
    #[error("{entity_type} already exists: {identifier}")]
    DuplicateId {
        entity_type: &'static str,
        identifier: String,
    },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Non-positive limit or a second budget for the same category and period
    #[error("Invalid budget: {0}")]
    InvalidBudget(String),

    /// Empty pattern, bad regex or missing category on a rule
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a "duplicate" error for transactions
    pub fn duplicate_transaction(identifier: impl Into<String>) -> Self {
        Self::DuplicateId {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for rules
    pub fn rule_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Rule",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a duplicate id error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateId { .. })
    }

    /// Check if this is an invalid budget error
    pub fn is_invalid_budget(&self) -> bool {
        matches!(self, Self::InvalidBudget(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for budgetbook operations
pub type LedgerResult<T> = Result<T, LedgerError>;
