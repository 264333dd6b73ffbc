//! Rule display formatting

use crate::models::{Category, CategoryRule};

use super::truncate;

/// Rules in evaluation order
pub fn format_rule_list(rules: &[&CategoryRule]) -> String {
    if rules.is_empty() {
        return "No rules defined. Everything will be uncategorized.\n".to_string();
    }

    let mut output = format!(
        "{:<4} {:<14} {:>8}  {:<9} {:<30} {}\n",
        "#", "ID", "Priority", "Kind", "Pattern", "Category"
    );
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for (position, rule) in rules.iter().enumerate() {
        output.push_str(&format!(
            "{:<4} {:<14} {:>8}  {:<9} {:<30} {}\n",
            position + 1,
            rule.id.to_string(),
            rule.priority,
            rule.pattern.kind(),
            truncate(rule.pattern.text(), 30),
            rule.category
        ));
    }
    output
}

/// Explain how a description would be categorized
pub fn format_rule_test(description: &str, matched: Option<&CategoryRule>) -> String {
    match matched {
        Some(rule) => format!(
            "\"{}\" -> {}\n  matched by {} {}\n",
            description,
            rule.target(),
            rule.id,
            rule
        ),
        None => format!(
            "\"{}\" -> {}\n  no rule matched\n",
            description,
            Category::Uncategorized
        ),
    }
}
