//! Export CLI command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{LedgerError, LedgerResult};
use crate::export::{
    export_aggregates_csv, export_budgets_csv, export_period_json, export_period_yaml,
    export_transactions_csv,
};
use crate::services::Ledger;

use super::parse_period;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Full period report
    Json,
    /// Full period report, human-readable
    Yaml,
    /// One table, see --table
    Csv,
}

/// Table written by CSV exports
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum CsvTable {
    #[default]
    Budgets,
    Aggregates,
    Transactions,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Month to export (defaults to the current month)
    #[arg(short, long)]
    pub period: Option<String>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "budgets")]
    pub table: CsvTable,
}

pub fn handle_export_command(ledger: &Ledger, args: ExportArgs) -> LedgerResult<()> {
    let period = parse_period(args.period.as_deref())?;

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LedgerError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match (args.format, args.table) {
        (ExportFormat::Json, _) => export_period_json(ledger, period, &mut writer)?,
        (ExportFormat::Yaml, _) => export_period_yaml(ledger, period, &mut writer)?,
        (ExportFormat::Csv, CsvTable::Budgets) => export_budgets_csv(ledger, period, &mut writer)?,
        (ExportFormat::Csv, CsvTable::Aggregates) => {
            export_aggregates_csv(ledger, period, &mut writer)?
        }
        (ExportFormat::Csv, CsvTable::Transactions) => {
            export_transactions_csv(ledger, period, &mut writer)?
        }
    }
    writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    if let Some(path) = &args.output {
        eprintln!("Exported {} to {}", period, path.display());
    }
    Ok(())
}
