//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger. Handlers that change the
//! ledger save it through `Storage` and then record an audit entry.

pub mod audit;
pub mod budget;
pub mod export;
pub mod report;
pub mod rule;
pub mod transaction;

pub use audit::handle_audit_command;
pub use budget::{handle_budget_command, BudgetCommands};
pub use export::{handle_export_command, ExportArgs};
pub use report::{handle_report_command, ReportCommands};
pub use rule::{handle_rule_command, RuleCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Local, NaiveDate};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Period};

/// Parse a period argument, defaulting to the current month
pub fn parse_period(arg: Option<&str>) -> LedgerResult<Period> {
    match arg {
        Some(text) => Period::parse(text).map_err(|e| LedgerError::Validation(e.to_string())),
        None => Ok(Period::current()),
    }
}

pub fn parse_amount(arg: &str) -> LedgerResult<Money> {
    Money::parse(arg).map_err(|e| LedgerError::Validation(e.to_string()))
}

/// Parse a `YYYY-MM-DD` date argument, defaulting to today
pub fn parse_date(arg: Option<&str>) -> LedgerResult<NaiveDate> {
    match arg {
        Some(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
            LedgerError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", text))
        }),
        None => Ok(Local::now().date_naive()),
    }
}
