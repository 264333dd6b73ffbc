//! Lock-guarded ledger for use as a shared service
//!
//! Every mutation runs under one write lock, so no reader ever sees a
//! transaction counted in two buckets or in none.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Money, Period, Transaction, TransactionId};
use crate::storage::LedgerSnapshot;

use super::evaluator::{BudgetEvaluator, BudgetReport};
use super::ledger::Ledger;

/// A cloneable handle to a ledger behind an `RwLock`
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, Ledger>> {
        self.inner
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, Ledger>> {
        self.inner
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    pub fn add_transaction(&self, txn: Transaction) -> LedgerResult<Transaction> {
        self.write()?.add_transaction(txn)
    }

    pub fn recategorize(&self, id: TransactionId, category: Category) -> LedgerResult<Transaction> {
        self.write()?.recategorize(id, category)
    }

    pub fn remove_transaction(&self, id: TransactionId) -> LedgerResult<Transaction> {
        self.write()?.remove_transaction(id)
    }

    pub fn get_aggregate(&self, category: &Category, period: Period) -> LedgerResult<Money> {
        Ok(self.read()?.get_aggregate(category, period))
    }

    pub fn summarize(&self, period: Period) -> LedgerResult<BudgetReport> {
        let ledger = self.read()?;
        Ok(BudgetEvaluator::new(&ledger).summarize(period))
    }

    pub fn snapshot(&self) -> LedgerResult<LedgerSnapshot> {
        Ok(self.read()?.snapshot())
    }

    /// Run a read-only closure against a consistent view of the ledger
    pub fn with_ledger<R>(&self, f: impl FnOnce(&Ledger) -> R) -> LedgerResult<R> {
        Ok(f(&*self.read()?))
    }

    /// Run a closure with exclusive access; used for multi-step changes
    pub fn with_ledger_mut<R>(
        &self,
        f: impl FnOnce(&mut Ledger) -> LedgerResult<R>,
    ) -> LedgerResult<R> {
        f(&mut *self.write()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryRule;
    use chrono::NaiveDate;
    use std::thread;

    #[test]
    fn test_concurrent_adds_and_recategorize_keep_totals() {
        let ledger = Ledger::with_rules(&[CategoryRule::contains("uber", "Transport", 1)]).unwrap();
        let shared = SharedLedger::new(ledger);
        let may = Period::new(2024, 5).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        let txn = shared
                            .add_transaction(Transaction::new(date, Money::from_cents(-100), "UBER"))
                            .unwrap();
                        shared
                            .recategorize(txn.id, Category::named("Travel"))
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let transport = shared
            .get_aggregate(&Category::named("Transport"), may)
            .unwrap();
        let travel = shared.get_aggregate(&Category::named("Travel"), may).unwrap();
        assert_eq!(transport, Money::zero());
        assert_eq!(travel.cents(), -20000);
        assert_eq!(shared.with_ledger(|l| l.transaction_count()).unwrap(), 200);
    }

    #[test]
    fn test_failed_mutation_through_handle_leaves_state() {
        let shared = SharedLedger::default();
        let err = shared
            .remove_transaction(TransactionId::new())
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(shared.snapshot().unwrap().transactions.len(), 0);
    }

    #[test]
    fn test_multi_step_change_under_one_lock() {
        let shared = SharedLedger::default();
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let may = Period::new(2024, 5).unwrap();

        let id = shared
            .with_ledger_mut(|ledger| {
                let txn = ledger.add_transaction(Transaction::new(
                    date,
                    Money::from_cents(-2500),
                    "UBER TRIP",
                ))?;
                ledger.recategorize(txn.id, Category::named("Transport"))?;
                Ok(txn.id)
            })
            .unwrap();

        let category = shared
            .with_ledger(|ledger| ledger.transaction(id).map(|t| t.effective_category()))
            .unwrap();
        assert_eq!(category, Some(Category::named("Transport")));
        assert_eq!(
            shared
                .get_aggregate(&Category::named("Transport"), may)
                .unwrap()
                .cents(),
            -2500
        );
    }
}
