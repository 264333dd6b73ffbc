//! JSON file snapshot store
//!
//! Splits a snapshot across `transactions.json`, `rules.json` and
//! `budgets.json` in the data directory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::paths::BudgetbookPaths;
use crate::error::LedgerResult;
use crate::models::{Budget, CategoryRule, Transaction};

use super::file_io::{commit_staged, discard_staged, json_file_valid, read_json, stage_json};
use super::snapshot::{LedgerSnapshot, SnapshotStore};

#[derive(Debug, Default, Serialize, Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RuleData {
    rules: Vec<CategoryRule>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BudgetData {
    budgets: Vec<Budget>,
}

/// Snapshot store backed by three JSON files
#[derive(Debug, Clone)]
pub struct JsonStore {
    transactions_path: PathBuf,
    rules_path: PathBuf,
    budgets_path: PathBuf,
}

impl JsonStore {
    pub fn new(paths: &BudgetbookPaths) -> Self {
        Self {
            transactions_path: paths.transactions_file(),
            rules_path: paths.rules_file(),
            budgets_path: paths.budgets_file(),
        }
    }

    fn files(&self) -> [&PathBuf; 3] {
        [&self.transactions_path, &self.rules_path, &self.budgets_path]
    }

    /// Files that exist but do not parse as JSON
    pub fn corrupt_files(&self) -> Vec<PathBuf> {
        self.files()
            .into_iter()
            .filter(|path| path.exists() && !json_file_valid(path))
            .cloned()
            .collect()
    }
}

impl SnapshotStore for JsonStore {
    fn load(&self) -> LedgerResult<LedgerSnapshot> {
        let TransactionData { transactions } = read_json(&self.transactions_path)?;
        let RuleData { rules } = read_json(&self.rules_path)?;
        let BudgetData { budgets } = read_json(&self.budgets_path)?;

        tracing::debug!(
            transactions = transactions.len(),
            rules = rules.len(),
            budgets = budgets.len(),
            "snapshot loaded"
        );
        Ok(LedgerSnapshot {
            transactions,
            rules,
            budgets,
        })
    }

    /// Stage all three files before renaming any of them
    ///
    /// A serialization or write failure leaves every file as it was. The
    /// renames themselves are not atomic as a group: a failure partway
    /// through them can leave files from two different saves.
    fn save(&self, snapshot: &LedgerSnapshot) -> LedgerResult<()> {
        let mut staged: Vec<(PathBuf, &PathBuf)> = Vec::with_capacity(3);
        let result = (|| -> LedgerResult<()> {
            staged.push((
                stage_json(
                    &self.rules_path,
                    &RuleData {
                        rules: snapshot.rules.clone(),
                    },
                )?,
                &self.rules_path,
            ));
            staged.push((
                stage_json(
                    &self.budgets_path,
                    &BudgetData {
                        budgets: snapshot.budgets.clone(),
                    },
                )?,
                &self.budgets_path,
            ));
            staged.push((
                stage_json(
                    &self.transactions_path,
                    &TransactionData {
                        transactions: snapshot.transactions.clone(),
                    },
                )?,
                &self.transactions_path,
            ));
            Ok(())
        })();

        if let Err(e) = result {
            for (temp_path, _) in &staged {
                discard_staged(temp_path);
            }
            return Err(e);
        }

        let mut pending = staged.into_iter();
        while let Some((temp_path, path)) = pending.next() {
            if let Err(e) = commit_staged(&temp_path, path) {
                for (rest, _) in pending {
                    discard_staged(&rest);
                }
                return Err(e);
            }
        }
        tracing::debug!(transactions = snapshot.transactions.len(), "snapshot saved");
        Ok(())
    }
}
