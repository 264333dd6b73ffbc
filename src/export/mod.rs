//! Export module for budgetbook
//!
//! Hands a month's aggregates, budget evaluations and transactions to
//! outside tools:
//! - JSON and YAML: the whole period report as one document
//! - CSV: one table at a time (budgets, aggregates or transactions)

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_aggregates_csv, export_budgets_csv, export_transactions_csv};
pub use json::{export_period_json, AggregateRow, PeriodExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_period_yaml;
