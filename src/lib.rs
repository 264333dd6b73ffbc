//! budgetbook - rule-based transaction categorization and budget tracking
//!
//! Transactions are categorized by ordered, prioritized description rules,
//! recorded in a ledger that keeps one running total per (category, month),
//! and compared against monthly per-category budgets.
//!
//! # Architecture
//!
//! - `models`: value types and records (money, periods, transactions, rules, budgets)
//! - `services`: the rule matcher, the ledger and the budget evaluator
//! - `storage`: JSON snapshot persistence with atomic writes
//! - `audit`: append-only log of every change
//! - `export`: JSON, YAML and CSV period exports
//! - `display`: terminal formatting
//! - `cli`: command handlers used by the `budgetbook` binary
//! - `config`, `logging`: paths, settings and diagnostics
//!
//! # Example
//!
//! ```rust
//! use budgetbook::models::{Budget, Category, CategoryRule, Money, Period, Transaction};
//! use budgetbook::services::{BudgetEvaluator, Ledger};
//! use chrono::NaiveDate;
//!
//! let mut ledger = Ledger::with_rules(&[CategoryRule::contains("uber", "Transport", 1)])?;
//! let may = Period::new(2024, 5)?;
//! ledger.set_budget(Budget::new("Transport", may, Money::from_units(100)))?;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
//! ledger.add_transaction(Transaction::new(date, Money::from_cents(-2500), "UBER TRIP"))?;
//!
//! assert_eq!(ledger.get_aggregate(&Category::named("Transport"), may).cents(), -2500);
//! let status = BudgetEvaluator::new(&ledger).evaluate(may);
//! assert_eq!(status[0].remaining, Money::from_units(75));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
