//! Service layer for budgetbook
//!
//! The rule matcher, the ledger that keeps aggregates in sync with recorded
//! transactions, and the budget evaluator that reads them.

pub mod evaluator;
pub mod ledger;
pub mod matcher;
pub mod shared;

pub use evaluator::{BudgetEvaluator, BudgetReport};
pub use ledger::Ledger;
pub use matcher::RuleMatcher;
pub use shared::SharedLedger;
