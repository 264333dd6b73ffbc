//! Core data models for budgetbook
//!
//! Transactions, categorization rules, budgets and the value types they are
//! built from (money, periods, categories, ids).

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod rule;
pub mod transaction;

pub use budget::{Budget, BudgetEvaluation, BudgetKey, BudgetStatus};
pub use category::Category;
pub use ids::{RuleId, TransactionId};
pub use money::Money;
pub use period::Period;
pub use rule::{CategoryRule, RulePattern};
pub use transaction::Transaction;
