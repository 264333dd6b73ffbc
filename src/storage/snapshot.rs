//! Ledger snapshots and the store trait that persists them

use serde::{Deserialize, Serialize};

use crate::error::LedgerResult;
use crate::models::{Budget, CategoryRule, Transaction};

/// The complete persisted state of a ledger
///
/// Aggregates are not stored; they are recomputed on load. Rules are kept in
/// evaluation order, which preserves insertion order among equal priorities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub rules: Vec<CategoryRule>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl LedgerSnapshot {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.rules.is_empty() && self.budgets.is_empty()
    }
}

/// Somewhere a snapshot can be loaded from and saved to
pub trait SnapshotStore {
    /// Load the stored snapshot; an empty store yields an empty snapshot
    fn load(&self) -> LedgerResult<LedgerSnapshot>;

    fn save(&self, snapshot: &LedgerSnapshot) -> LedgerResult<()>;
}
