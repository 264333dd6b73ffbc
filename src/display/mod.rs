//! Display formatting for terminal output
//!
//! Plain fixed-width text; amounts and dates follow the user's settings.

pub mod budget;
pub mod rule;
pub mod transaction;

pub use budget::{format_aggregates, format_budget_list, format_budget_report};
pub use rule::{format_rule_list, format_rule_test};
pub use transaction::{format_transaction_details, format_transaction_register};

use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::Money;

/// Currency and date conventions for printed output
#[derive(Debug, Clone)]
pub struct DisplayStyle {
    pub currency_symbol: String,
    pub date_format: String,
}

impl Default for DisplayStyle {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl DisplayStyle {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        }
    }

    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    pub fn date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}

/// Cut `text` to `width` characters, marking the cut with "..."
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let head: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("UBER", 10), "UBER");
        assert_eq!(truncate("AMAZON MARKETPLACE", 10), "AMAZON ...");
        assert_eq!(truncate("CAFÉ CRÈME ÉTÉ", 8), "CAFÉ ...");
    }

    #[test]
    fn test_style_uses_settings() {
        let settings = Settings {
            currency_symbol: "€".into(),
            date_format: "%d/%m/%Y".into(),
            ..Settings::default()
        };
        let style = DisplayStyle::from_settings(&settings);
        assert_eq!(style.money(Money::from_cents(-2500)), "-€25.00");
        assert_eq!(
            style.date(NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()),
            "03/05/2024"
        );
    }
}
