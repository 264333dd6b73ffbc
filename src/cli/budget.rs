//! Budget CLI commands

use clap::Subcommand;

use crate::audit::EntityType;
use crate::display::{format_budget_list, format_budget_report, DisplayStyle};
use crate::error::{LedgerError, LedgerResult};
use crate::models::Budget;
use crate::services::{BudgetEvaluator, Ledger};
use crate::storage::Storage;

use super::{parse_amount, parse_period};

#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set a monthly limit for a category
    Set {
        category: String,
        /// Limit, e.g. "100" or "250.50"
        limit: String,
        /// Budget period (e.g. "2024-05", "current", "next")
        #[arg(short, long)]
        period: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Change the limit of an existing budget
    Update {
        category: String,
        limit: String,
        #[arg(short, long)]
        period: Option<String>,
    },

    /// List budgets
    List {
        /// Only this period; all periods when omitted
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Remove a budget
    Remove {
        category: String,
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Compare spending against limits
    Status {
        #[arg(short, long)]
        period: Option<String>,
    },
}

pub fn handle_budget_command(
    storage: &Storage,
    ledger: &mut Ledger,
    style: &DisplayStyle,
    cmd: BudgetCommands,
) -> LedgerResult<()> {
    match cmd {
        BudgetCommands::Set {
            category,
            limit,
            period,
            notes,
        } => {
            let period = parse_period(period.as_deref())?;
            let mut budget = Budget::new(category, period, parse_amount(&limit)?);
            if let Some(notes) = notes {
                budget.notes = notes;
            }

            if ledger.budget(&budget.category, period).is_some() {
                return Err(LedgerError::InvalidBudget(format!(
                    "'{}' already has a budget for {}; use 'budget update' to change it",
                    budget.category, period
                )));
            }

            let budget = ledger.set_budget(budget)?;
            storage.save_ledger(ledger)?;
            storage.log_create(
                EntityType::Budget,
                budget.key().to_string(),
                Some(budget.category.clone()),
                &budget,
            )?;
            println!(
                "Budget for {} in {}: {}",
                budget.category,
                period.label(),
                style.money(budget.limit)
            );
        }

        BudgetCommands::Update {
            category,
            limit,
            period,
        } => {
            let period = parse_period(period.as_deref())?;
            let (before, after) =
                ledger.update_budget_limit(&category, period, parse_amount(&limit)?)?;
            storage.save_ledger(ledger)?;
            storage.log_update(
                EntityType::Budget,
                after.key().to_string(),
                Some(after.category.clone()),
                &before,
                &after,
                None,
            )?;
            println!(
                "Budget for {} in {}: {} -> {}",
                after.category,
                period.label(),
                style.money(before.limit),
                style.money(after.limit)
            );
        }

        BudgetCommands::List { period } => {
            let budgets = match period {
                Some(p) => ledger.budgets_for_period(parse_period(Some(&p))?),
                None => ledger.budgets(),
            };
            print!("{}", format_budget_list(&budgets, style));
        }

        BudgetCommands::Remove { category, period } => {
            let period = parse_period(period.as_deref())?;
            let removed = ledger.remove_budget(&category, period)?;
            storage.save_ledger(ledger)?;
            storage.log_delete(
                EntityType::Budget,
                removed.key().to_string(),
                Some(removed.category.clone()),
                &removed,
            )?;
            println!("Removed budget for {} in {}", removed.category, period.label());
        }

        BudgetCommands::Status { period } => {
            let period = parse_period(period.as_deref())?;
            let report = BudgetEvaluator::new(ledger).summarize(period);
            print!("{}", format_budget_report(&report, style));
        }
    }

    Ok(())
}
