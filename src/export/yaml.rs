//! YAML export of a period report

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::PeriodExport;
use crate::models::Period;
use crate::services::Ledger;

pub fn export_period_yaml<W: Write>(ledger: &Ledger, period: Period, writer: &mut W) -> LedgerResult<()> {
    let export = PeriodExport::build(ledger, period);

    writeln!(
        writer,
        "# budgetbook report for {}\n# Generated: {}\n",
        export.period.label(),
        export.exported_at
    )
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::tests::sample_ledger;

    #[test]
    fn test_yaml_export() {
        let ledger = sample_ledger();
        let mut out = Vec::new();
        export_period_yaml(&ledger, Period::new(2024, 5).unwrap(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("# budgetbook report for May 2024"));

        let doc: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(doc["period"].as_str(), Some("2024-05"));
        assert_eq!(doc["budget"]["over_budget_count"].as_u64(), Some(0));
    }
}
