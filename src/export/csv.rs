//! CSV export of period tables
//!
//! Amounts are written as signed decimal strings (`-25.00`) so spreadsheets
//! read them without knowing about cents.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Period;
use crate::services::{BudgetEvaluator, Ledger};

fn csv_error(e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Export(e.to_string())
}

/// One row per budget: limit, spent, remaining, status
pub fn export_budgets_csv<W: Write>(ledger: &Ledger, period: Period, writer: W) -> LedgerResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["Period", "Category", "Limit", "Spent", "Remaining", "Status"])
        .map_err(csv_error)?;

    for eval in BudgetEvaluator::new(ledger).evaluate(period) {
        out.write_record([
            eval.period.to_string(),
            eval.category,
            eval.limit.to_decimal_string(),
            eval.spent.to_decimal_string(),
            eval.remaining.to_decimal_string(),
            eval.status.to_string(),
        ])
        .map_err(csv_error)?;
    }
    out.flush().map_err(csv_error)
}

/// One row per non-empty (category, period) bucket
pub fn export_aggregates_csv<W: Write>(ledger: &Ledger, period: Period, writer: W) -> LedgerResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["Period", "Category", "Uncategorized", "Total"])
        .map_err(csv_error)?;

    for (category, total) in ledger.aggregates_for_period(period) {
        out.write_record([
            period.to_string(),
            category.name().unwrap_or_default().to_string(),
            category.is_uncategorized().to_string(),
            total.to_decimal_string(),
        ])
        .map_err(csv_error)?;
    }
    out.flush().map_err(csv_error)
}

/// One row per transaction dated in `period`
pub fn export_transactions_csv<W: Write>(
    ledger: &Ledger,
    period: Period,
    writer: W,
) -> LedgerResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["ID", "Date", "Description", "Category", "Amount", "Memo"])
        .map_err(csv_error)?;

    for txn in ledger.transactions_in(period) {
        let category = txn.effective_category();
        out.write_record([
            txn.id.as_uuid().to_string(),
            txn.date.to_string(),
            txn.description.clone(),
            category.name().unwrap_or_default().to_string(),
            txn.amount.to_decimal_string(),
            txn.memo.clone(),
        ])
        .map_err(csv_error)?;
    }
    out.flush().map_err(csv_error)
}
