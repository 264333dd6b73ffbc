//! Budget model
//!
//! A budget caps expenses for one category in one calendar month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{validate_category_name, Category};
use super::money::Money;
use super::period::Period;

/// A monthly spending limit for a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Category name the limit applies to
    pub category: String,

    /// The budget period
    pub period: Period,

    /// Maximum expenses for the period (always positive)
    pub limit: Money,

    #[serde(default)]
    pub notes: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(category: impl Into<String>, period: Period, limit: Money) -> Self {
        let now = Utc::now();
        Self {
            category: category.into().trim().to_string(),
            period,
            limit,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The (category, period) key this budget occupies
    pub fn key(&self) -> BudgetKey {
        BudgetKey::new(self.category.clone(), self.period)
    }

    /// The category whose aggregate this budget is compared against
    pub fn target(&self) -> Category {
        Category::named(self.category.clone())
    }

    pub fn set_limit(&mut self, limit: Money) {
        self.limit = limit;
        self.updated_at = Utc::now();
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit(self.limit));
        }
        validate_category_name(&self.category)
            .map_err(|e| BudgetValidationError::BadCategory(e.to_string()))?;
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} limit: {}", self.period, self.category, self.limit)
    }
}

/// Composite key for budgets
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BudgetKey {
    pub category: String,
    pub period: Period,
}

impl BudgetKey {
    pub fn new(category: impl Into<String>, period: Period) -> Self {
        Self {
            category: category.into().trim().to_string(),
            period,
        }
    }
}

impl fmt::Display for BudgetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.period)
    }
}

/// Where spending stands against a limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    UnderBudget,
    AtBudget,
    OverBudget,
}

impl BudgetStatus {
    /// Classify `spent` against `limit`; exactly equal is `AtBudget`
    pub fn classify(spent: Money, limit: Money) -> Self {
        match spent.cmp(&limit) {
            std::cmp::Ordering::Less => Self::UnderBudget,
            std::cmp::Ordering::Equal => Self::AtBudget,
            std::cmp::Ordering::Greater => Self::OverBudget,
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UnderBudget => "Under budget",
            Self::AtBudget => "At budget",
            Self::OverBudget => "Over budget",
        };
        f.pad(label)
    }
}

/// The evaluated state of one budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetEvaluation {
    pub category: String,
    pub period: Period,
    pub limit: Money,
    /// Expenses only: `abs(min(0, aggregate))`
    pub spent: Money,
    /// `limit - spent`; negative when overspent
    pub remaining: Money,
    pub status: BudgetStatus,
}

impl BudgetEvaluation {
    /// Evaluate a budget against its category's aggregate for the period
    pub fn from_aggregate(budget: &Budget, aggregate: Money) -> Self {
        let spent = aggregate.outflow();
        Self {
            category: budget.category.clone(),
            period: budget.period,
            limit: budget.limit,
            spent,
            remaining: budget.limit - spent,
            status: BudgetStatus::classify(spent, budget.limit),
        }
    }

    pub fn is_overspent(&self) -> bool {
        self.status == BudgetStatus::OverBudget
    }
}

impl fmt::Display for BudgetEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Limit: {} | Spent: {} | Remaining: {} | {}",
            self.limit, self.spent, self.remaining, self.status
        )
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveLimit(Money),
    BadCategory(String),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLimit(limit) => {
                write!(f, "Budget limit must be positive (got {})", limit)
            }
            Self::BadCategory(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
