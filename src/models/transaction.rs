//! Transaction model
//!
//! A transaction is immutable once recorded, apart from its category.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::TransactionId;
use super::money::Money;
use super::period::Period;

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Transaction date
    pub date: NaiveDate,

    /// Amount (positive for inflow, negative for expense)
    pub amount: Money,

    /// Raw description as imported (matched against category rules)
    pub description: String,

    /// Assigned category; `None` until the ledger matches it
    #[serde(default)]
    pub category: Option<Category>,

    /// Memo/notes
    #[serde(default)]
    pub memo: String,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new, not yet categorized transaction
    pub fn new(date: NaiveDate, amount: Money, description: impl Into<String>) -> Self {
        Self::with_id(TransactionId::new(), date, amount, description)
    }

    /// Create a transaction with a caller-supplied id (e.g. from an importer)
    pub fn with_id(
        id: TransactionId,
        date: NaiveDate,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            date,
            amount,
            description: description.into(),
            category: None,
            memo: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder: pre-assign a category, bypassing the rule matcher
    pub fn categorized(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Builder: attach a memo
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// The calendar month this transaction is aggregated under
    pub fn period(&self) -> Period {
        Period::of(self.date)
    }

    /// The category used for aggregation (`Uncategorized` when unset)
    pub fn effective_category(&self) -> Category {
        self.category.clone().unwrap_or(Category::Uncategorized)
    }

    pub fn is_inflow(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    /// Reassign the category
    pub fn set_category(&mut self, category: Category) {
        self.category = Some(category);
        self.updated_at = Utc::now();
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        if self.description.len() > 500 {
            return Err(TransactionValidationError::DescriptionTooLong(
                self.description.len(),
            ));
        }

        if let Some(Category::Named(name)) = &self.category {
            if name.trim().is_empty() {
                return Err(TransactionValidationError::EmptyCategory);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}]",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount,
            self.effective_category()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
    DescriptionTooLong(usize),
    EmptyCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Transaction description cannot be empty"),
            Self::DescriptionTooLong(len) => {
                write!(f, "Transaction description too long ({} chars, max 500)", len)
            }
            Self::EmptyCategory => write!(f, "Category name cannot be empty"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
