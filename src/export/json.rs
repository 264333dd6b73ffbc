//! JSON export of a period report

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Money, Period, Transaction};
use crate::services::{BudgetEvaluator, BudgetReport, Ledger};

/// Bumped whenever the document layout changes
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One aggregate bucket in an export
#[derive(Debug, Clone, Serialize)]
pub struct AggregateRow {
    /// Category name; `None` for uncategorized spending
    pub category: Option<String>,
    pub uncategorized: bool,
    /// Signed sum in cents
    pub total: Money,
}

impl AggregateRow {
    fn new(category: &Category, total: Money) -> Self {
        Self {
            category: category.name().map(str::to_string),
            uncategorized: category.is_uncategorized(),
            total,
        }
    }
}

/// Everything known about one month
#[derive(Debug, Clone, Serialize)]
pub struct PeriodExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub period: Period,
    pub aggregates: Vec<AggregateRow>,
    pub budget: BudgetReport,
    pub transactions: Vec<Transaction>,
}

impl PeriodExport {
    pub fn build(ledger: &Ledger, period: Period) -> Self {
        let aggregates = ledger
            .aggregates_for_period(period)
            .iter()
            .map(|(category, total)| AggregateRow::new(category, *total))
            .collect();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            period,
            aggregates,
            budget: BudgetEvaluator::new(ledger).summarize(period),
            transactions: ledger.transactions_in(period).into_iter().cloned().collect(),
        }
    }
}

pub fn export_period_json<W: Write>(ledger: &Ledger, period: Period, writer: &mut W) -> LedgerResult<()> {
    let export = PeriodExport::build(ledger, period);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))
}
