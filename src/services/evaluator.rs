//! Budget evaluator
//!
//! Compares each configured budget for a period against its category's
//! aggregate. Read-only over the ledger.

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetEvaluation, BudgetKey, Money, Period};
use crate::services::Ledger;

/// Evaluates budgets against ledger aggregates
pub struct BudgetEvaluator<'a> {
    ledger: &'a Ledger,
}

/// Budget status for a whole period
#[derive(Debug, Clone, Serialize)]
pub struct BudgetReport {
    pub period: Period,
    pub total_limit: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
    pub over_budget_count: usize,
    pub evaluations: Vec<BudgetEvaluation>,
}

impl BudgetReport {
    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }
}

impl<'a> BudgetEvaluator<'a> {
    /// Create a new evaluator over a ledger
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Evaluate every budget configured for `period`, sorted by category
    ///
    /// A period with no budgets yields an empty list.
    pub fn evaluate(&self, period: Period) -> Vec<BudgetEvaluation> {
        self.ledger
            .budgets_for_period(period)
            .into_iter()
            .map(|budget| {
                let aggregate = self.ledger.get_aggregate(&budget.target(), period);
                BudgetEvaluation::from_aggregate(budget, aggregate)
            })
            .collect()
    }

    /// Evaluate a single budget
    pub fn evaluate_category(&self, category: &str, period: Period) -> LedgerResult<BudgetEvaluation> {
        let budget = self
            .ledger
            .budget(category, period)
            .ok_or_else(|| LedgerError::budget_not_found(BudgetKey::new(category, period).to_string()))?;
        let aggregate = self.ledger.get_aggregate(&budget.target(), period);
        Ok(BudgetEvaluation::from_aggregate(budget, aggregate))
    }

    /// Budgets whose spending exceeds the limit
    pub fn overspent(&self, period: Period) -> Vec<BudgetEvaluation> {
        self.evaluate(period)
            .into_iter()
            .filter(BudgetEvaluation::is_overspent)
            .collect()
    }

    /// Evaluate a period and total it up
    pub fn summarize(&self, period: Period) -> BudgetReport {
        let evaluations = self.evaluate(period);

        let total_limit: Money = evaluations.iter().map(|e| e.limit).sum();
        let total_spent: Money = evaluations.iter().map(|e| e.spent).sum();
        let over_budget_count = evaluations.iter().filter(|e| e.is_overspent()).count();

        BudgetReport {
            period,
            total_limit,
            total_spent,
            total_remaining: total_limit - total_spent,
            over_budget_count,
            evaluations,
        }
    }
}
