//! Transaction CLI commands

use clap::Subcommand;

use crate::audit::EntityType;
use crate::display::{format_transaction_details, format_transaction_register, DisplayStyle};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Transaction};
use crate::services::Ledger;
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_period};

#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a transaction (negative amounts are expenses)
    Add {
        /// Amount, e.g. "-25.00" or "1200"
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Description as it appears on the statement
        description: String,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Category; skips the rules when given
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        memo: Option<String>,
    },

    /// List transactions
    List {
        /// Month to show (e.g. "2024-05", "current", "last"); all when omitted
        #[arg(short, long)]
        period: Option<String>,
        /// Only transactions in this category
        #[arg(short, long, conflicts_with = "uncategorized")]
        category: Option<String>,
        /// Only transactions no rule matched
        #[arg(short, long)]
        uncategorized: bool,
    },

    /// Show one transaction
    Show {
        /// Transaction ID or unique prefix
        id: String,
    },

    /// Assign a different category
    Recategorize {
        /// Transaction ID or unique prefix
        id: String,
        #[arg(
            short,
            long,
            conflicts_with = "uncategorized",
            required_unless_present = "uncategorized"
        )]
        category: Option<String>,
        /// Move the transaction back to uncategorized
        #[arg(short, long)]
        uncategorized: bool,
    },

    /// Delete a transaction
    Remove {
        /// Transaction ID or unique prefix
        id: String,
    },

    /// Run the current rules over uncategorized transactions
    RecategorizeUncategorized,
}

pub fn handle_transaction_command(
    storage: &Storage,
    ledger: &mut Ledger,
    style: &DisplayStyle,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    match cmd {
        TransactionCommands::Add {
            amount,
            description,
            date,
            category,
            memo,
        } => {
            let mut txn = Transaction::new(
                parse_date(date.as_deref())?,
                parse_amount(&amount)?,
                description,
            );
            if let Some(name) = category {
                txn = txn.categorized(Category::named(name));
            }
            if let Some(memo) = memo {
                txn = txn.with_memo(memo);
            }

            let txn = ledger.add_transaction(txn)?;
            storage.save_ledger(ledger)?;
            storage.log_create(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.description.clone()),
                &txn,
            )?;

            println!(
                "Recorded {} {} {} -> {}",
                txn.id,
                style.date(txn.date),
                style.money(txn.amount),
                txn.effective_category()
            );
        }

        TransactionCommands::List {
            period,
            category,
            uncategorized,
        } => {
            let mut transactions = match period {
                Some(p) => ledger.transactions_in(parse_period(Some(&p))?),
                None => ledger.transactions(),
            };
            let filter = if uncategorized {
                Some(Category::Uncategorized)
            } else {
                category.map(Category::named)
            };
            if let Some(filter) = filter {
                transactions.retain(|t| t.effective_category() == filter);
            }
            print!("{}", format_transaction_register(&transactions, style));
        }

        TransactionCommands::Show { id } => {
            let id = ledger.resolve_transaction_id(&id)?;
            if let Some(txn) = ledger.transaction(id) {
                print!("{}", format_transaction_details(txn, style));
            }
        }

        TransactionCommands::Recategorize {
            id,
            category,
            uncategorized,
        } => {
            let id = ledger.resolve_transaction_id(&id)?;
            let target = match category {
                Some(name) if !uncategorized => Category::named(name),
                _ => Category::Uncategorized,
            };

            let before = ledger
                .transaction(id)
                .cloned()
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
            let after = ledger.recategorize(id, target)?;

            if before.effective_category() == after.effective_category() {
                println!("{} is already in {}", id, after.effective_category());
                return Ok(());
            }

            storage.save_ledger(ledger)?;
            storage.log_update(
                EntityType::Transaction,
                id.to_string(),
                Some(after.description.clone()),
                &before,
                &after,
                Some(format!(
                    "category: {} -> {}",
                    before.effective_category(),
                    after.effective_category()
                )),
            )?;
            println!(
                "Moved {} from {} to {}",
                id,
                before.effective_category(),
                after.effective_category()
            );
        }

        TransactionCommands::Remove { id } => {
            let id = ledger.resolve_transaction_id(&id)?;
            let removed = ledger.remove_transaction(id)?;
            storage.save_ledger(ledger)?;
            storage.log_delete(
                EntityType::Transaction,
                id.to_string(),
                Some(removed.description.clone()),
                &removed,
            )?;
            println!("Removed {} ({})", id, removed.description);
        }

        TransactionCommands::RecategorizeUncategorized => {
            recategorize_uncategorized(storage, ledger)?;
        }
    }

    Ok(())
}

/// Apply the rules to uncategorized transactions, saving and auditing changes
pub(crate) fn recategorize_uncategorized(storage: &Storage, ledger: &mut Ledger) -> LedgerResult<()> {
    let changed = ledger.recategorize_uncategorized();
    if changed.is_empty() {
        println!("No uncategorized transactions matched a rule.");
        return Ok(());
    }

    storage.save_ledger(ledger)?;
    for id in &changed {
        if let Some(txn) = ledger.transaction(*id) {
            storage.log_update(
                EntityType::Transaction,
                id.to_string(),
                Some(txn.description.clone()),
                &serde_json::json!({ "category": Category::Uncategorized }),
                &serde_json::json!({ "category": txn.effective_category() }),
                Some(format!(
                    "category: {} -> {}",
                    Category::Uncategorized,
                    txn.effective_category()
                )),
            )?;
            println!("{} {} -> {}", id, txn.description, txn.effective_category());
        }
    }
    println!("Categorized {} transaction(s).", changed.len());
    Ok(())
}
