//! Budget and aggregate display formatting

use crate::models::{Budget, BudgetStatus, Category, Money, Period};
use crate::services::BudgetReport;

use super::{truncate, DisplayStyle};

fn status_marker(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::UnderBudget => " ",
        BudgetStatus::AtBudget => "=",
        BudgetStatus::OverBudget => "!",
    }
}

/// Budget status table with totals
pub fn format_budget_report(report: &BudgetReport, style: &DisplayStyle) -> String {
    let mut output = format!("Budget status for {}\n\n", report.period.label());

    if report.is_empty() {
        output.push_str("No budgets set for this period.\n");
        return output;
    }

    output.push_str(&format!(
        "  {:<22} {:>12} {:>12} {:>12}  {}\n",
        "Category", "Limit", "Spent", "Remaining", "Status"
    ));
    output.push_str(&format!("  {}\n", "-".repeat(76)));

    for eval in &report.evaluations {
        output.push_str(&format!(
            "{} {:<22} {:>12} {:>12} {:>12}  {}\n",
            status_marker(eval.status),
            truncate(&eval.category, 22),
            style.money(eval.limit),
            style.money(eval.spent),
            style.money(eval.remaining),
            eval.status
        ));
    }

    output.push_str(&format!("  {}\n", "-".repeat(76)));
    output.push_str(&format!(
        "  {:<22} {:>12} {:>12} {:>12}\n",
        "Total",
        style.money(report.total_limit),
        style.money(report.total_spent),
        style.money(report.total_remaining)
    ));

    if report.over_budget_count > 0 {
        output.push_str(&format!(
            "\n{} categor{} over budget\n",
            report.over_budget_count,
            if report.over_budget_count == 1 { "y" } else { "ies" }
        ));
    }
    output
}

pub fn format_budget_list(budgets: &[&Budget], style: &DisplayStyle) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let mut output = format!("{:<8} {:<22} {:>12}  {}\n", "Period", "Category", "Limit", "Notes");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    for budget in budgets {
        output.push_str(&format!(
            "{:<8} {:<22} {:>12}  {}\n",
            budget.period.to_string(),
            truncate(&budget.category, 22),
            style.money(budget.limit),
            budget.notes
        ));
    }
    output
}

/// Every bucket for a period, with the net total
pub fn format_aggregates(period: Period, rows: &[(Category, Money)], style: &DisplayStyle) -> String {
    let mut output = format!("Category totals for {}\n\n", period.label());
    if rows.is_empty() {
        output.push_str("No transactions in this period.\n");
        return output;
    }

    for (category, total) in rows {
        output.push_str(&format!(
            "  {:<28} {:>12}\n",
            truncate(&category.to_string(), 28),
            style.money(*total)
        ));
    }
    let net: Money = rows.iter().map(|(_, total)| *total).sum();
    output.push_str(&format!("  {}\n", "-".repeat(41)));
    output.push_str(&format!("  {:<28} {:>12}\n", "Net", style.money(net)));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetEvaluation;

    fn may() -> Period {
        Period::new(2024, 5).unwrap()
    }

    #[test]
    fn test_report_with_overspend() {
        let budget = Budget::new("Dining", may(), Money::from_cents(5000));
        let eval = BudgetEvaluation::from_aggregate(&budget, Money::from_cents(-6000));
        let report = BudgetReport {
            period: may(),
            total_limit: eval.limit,
            total_spent: eval.spent,
            total_remaining: eval.remaining,
            over_budget_count: 1,
            evaluations: vec![eval],
        };
        let text = format_budget_report(&report, &DisplayStyle::default());
        assert!(text.contains("May 2024"));
        assert!(text.contains("-$10.00"));
        assert!(text.contains("Over budget"));
        assert!(text.contains("1 category over budget"));
    }

    #[test]
    fn test_empty_report() {
        let report = BudgetReport {
            period: may(),
            total_limit: Money::zero(),
            total_spent: Money::zero(),
            total_remaining: Money::zero(),
            over_budget_count: 0,
            evaluations: Vec::new(),
        };
        assert!(format_budget_report(&report, &DisplayStyle::default())
            .contains("No budgets set for this period."));
    }

    #[test]
    fn test_aggregates_net() {
        let rows = vec![
            (Category::named("Transport"), Money::from_cents(-2500)),
            (Category::Uncategorized, Money::from_cents(-800)),
        ];
        let text = format_aggregates(may(), &rows, &DisplayStyle::default());
        assert!(text.contains("(uncategorized)"));
        assert!(text.contains("-$33.00"));
    }
}
