//! Transaction display formatting

use crate::models::Transaction;

use super::{truncate, DisplayStyle};

fn format_transaction_row(txn: &Transaction, style: &DisplayStyle) -> String {
    format!(
        "{:<13} {:<10} {:<28} {:<20} {:>12}",
        txn.id.to_string(),
        style.date(txn.date),
        truncate(&txn.description, 28),
        truncate(&txn.effective_category().to_string(), 20),
        style.money(txn.amount)
    )
}

/// Transactions as a register with a total line
pub fn format_transaction_register(transactions: &[&Transaction], style: &DisplayStyle) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = format!(
        "{:<13} {:<10} {:<28} {:<20} {:>12}\n",
        "ID", "Date", "Description", "Category", "Amount"
    );
    output.push_str(&"-".repeat(87));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, style));
        output.push('\n');
    }

    let total = transactions.iter().map(|t| t.amount).sum();
    output.push_str(&"-".repeat(87));
    output.push('\n');
    output.push_str(&format!(
        "{:<74}{:>13}\n",
        format!("{} transaction(s)", transactions.len()),
        style.money(total)
    ));
    output
}

pub fn format_transaction_details(txn: &Transaction, style: &DisplayStyle) -> String {
    let mut output = String::new();
    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Full ID:     {}\n", txn.id.as_uuid()));
    output.push_str(&format!("Date:        {}\n", style.date(txn.date)));
    output.push_str(&format!("Period:      {}\n", txn.period()));
    output.push_str(&format!("Amount:      {}\n", style.money(txn.amount)));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Category:    {}\n", txn.effective_category()));
    if !txn.memo.is_empty() {
        output.push_str(&format!("Memo:        {}\n", txn.memo));
    }
    output.push_str(&format!(
        "Recorded:    {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M")
    ));
    output
}
