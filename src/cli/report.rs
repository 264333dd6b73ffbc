//! Aggregate report CLI commands

use clap::Subcommand;

use crate::display::{format_aggregates, DisplayStyle};
use crate::error::LedgerResult;
use crate::models::{Category, Money};
use crate::services::Ledger;

use super::parse_period;

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Total for one category in one month
    Aggregate {
        #[arg(required_unless_present = "uncategorized", conflicts_with = "uncategorized")]
        category: Option<String>,
        /// Report the uncategorized bucket instead
        #[arg(short, long)]
        uncategorized: bool,
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Totals for every category in a month
    Period {
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Months that have transactions
    Periods,
}

pub fn handle_report_command(ledger: &Ledger, style: &DisplayStyle, cmd: ReportCommands) -> LedgerResult<()> {
    match cmd {
        ReportCommands::Aggregate {
            category,
            uncategorized,
            period,
        } => {
            let period = parse_period(period.as_deref())?;
            let category = match category {
                Some(name) if !uncategorized => Category::named(name),
                _ => Category::Uncategorized,
            };
            let total = ledger.get_aggregate(&category, period);
            let count = ledger
                .transactions_for(&category)
                .iter()
                .filter(|t| period.contains(t.date))
                .count();
            println!(
                "{} in {}: {} ({} transaction(s))",
                category,
                period.label(),
                style.money(total),
                count
            );
        }

        ReportCommands::Period { period } => {
            let period = parse_period(period.as_deref())?;
            let rows = ledger.aggregates_for_period(period);
            print!("{}", format_aggregates(period, &rows, style));
        }

        ReportCommands::Periods => {
            let periods = ledger.periods();
            if periods.is_empty() {
                println!("No transactions recorded.");
            }
            for period in periods {
                let net: Money = ledger
                    .aggregates_for_period(period)
                    .iter()
                    .map(|(_, total)| *total)
                    .sum();
                println!("{}  {:<15} {:>12}", period, period.label(), style.money(net));
            }
        }
    }

    Ok(())
}
