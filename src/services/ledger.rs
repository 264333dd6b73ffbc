//! Ledger
//!
//! Holds transactions, categorization rules and budgets, and keeps one
//! aggregate bucket per (category, month) equal to the sum of the amounts of
//! the transactions currently assigned to it. Every mutating operation either
//! applies completely or returns an error with the ledger untouched.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Budget, BudgetKey, Category, CategoryRule, Money, Period, RuleId, Transaction, TransactionId,
};
use crate::storage::LedgerSnapshot;

use super::matcher::RuleMatcher;

/// Key of an aggregate bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BucketKey {
    category: Category,
    period: Period,
}

impl BucketKey {
    fn of(txn: &Transaction) -> Self {
        Self {
            category: txn.effective_category(),
            period: txn.period(),
        }
    }
}

/// Running sum plus the number of contributing transactions
#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    total: Money,
    count: usize,
}

/// Direction of a staged bucket change
#[derive(Debug, Clone, Copy)]
enum Entry {
    Credit,
    Debit,
}

fn out_of_range(key: &BucketKey, amount: Money) -> LedgerError {
    tracing::warn!(
        category = %key.category,
        period = %key.period,
        %amount,
        "bucket overflow rejected"
    );
    LedgerError::Validation(format!(
        "amount out of range: {} does not fit the {} total for {}",
        amount, key.category, key.period
    ))
}

/// The transaction ledger
#[derive(Debug, Default)]
pub struct Ledger {
    transactions: HashMap<TransactionId, Transaction>,
    buckets: HashMap<BucketKey, Bucket>,
    matcher: RuleMatcher,
    budgets: BTreeMap<BudgetKey, Budget>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty ledger with a compiled rule set
    pub fn with_rules(rules: &[CategoryRule]) -> LedgerResult<Self> {
        Ok(Self {
            matcher: RuleMatcher::compile(rules)?,
            ..Self::default()
        })
    }

    // ---------------------------------------------------------------------
    // Transactions
    // ---------------------------------------------------------------------

    /// Record a transaction
    ///
    /// A transaction without a category is categorized by the rule matcher.
    /// Fails with `DuplicateId` if the id is already recorded, and with
    /// `Validation` if the amount would push its bucket out of range.
    pub fn add_transaction(&mut self, txn: Transaction) -> LedgerResult<Transaction> {
        self.check_insertable(&txn)?;
        let txn = self.resolve_category(txn);

        let staged = self.stage([(BucketKey::of(&txn), txn.amount, Entry::Credit)])?;
        self.commit(staged);
        Ok(self.record(txn))
    }

    /// Record a batch of transactions, all or nothing
    ///
    /// The batch is rejected before anything is recorded if any transaction
    /// is invalid, its id collides with the ledger or another batch entry,
    /// or the batch would overflow a bucket.
    pub fn add_transactions(
        &mut self,
        batch: impl IntoIterator<Item = Transaction>,
    ) -> LedgerResult<Vec<Transaction>> {
        let batch: Vec<Transaction> = batch.into_iter().collect();

        let mut seen = HashSet::with_capacity(batch.len());
        for txn in &batch {
            self.check_insertable(txn)?;
            if !seen.insert(txn.id) {
                return Err(LedgerError::duplicate_transaction(txn.id.to_string()));
            }
        }

        let batch: Vec<Transaction> = batch
            .into_iter()
            .map(|txn| self.resolve_category(txn))
            .collect();
        let staged = self.stage(
            batch
                .iter()
                .map(|txn| (BucketKey::of(txn), txn.amount, Entry::Credit)),
        )?;
        self.commit(staged);

        Ok(batch.into_iter().map(|txn| self.record(txn)).collect())
    }

    /// Move a transaction to another category
    ///
    /// The amount leaves the old bucket and enters the new one in a single
    /// step. Re-assigning the current category is a successful no-op.
    pub fn recategorize(
        &mut self,
        id: TransactionId,
        new_category: Category,
    ) -> LedgerResult<Transaction> {
        if let Category::Named(name) = &new_category {
            crate::models::category::validate_category_name(name)
                .map_err(|e| LedgerError::Validation(e.to_string()))?;
        }

        let txn = self
            .transactions
            .get(&id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        let old_key = BucketKey::of(txn);
        if old_key.category == new_category {
            return Ok(txn.clone());
        }
        let new_key = BucketKey {
            category: new_category.clone(),
            period: old_key.period,
        };
        let amount = txn.amount;

        let staged = self.stage([
            (old_key.clone(), amount, Entry::Debit),
            (new_key.clone(), amount, Entry::Credit),
        ])?;

        let txn = self
            .transactions
            .get_mut(&id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
        txn.set_category(new_category);
        let updated = txn.clone();
        self.commit(staged);

        tracing::info!(
            id = %id,
            from = %old_key.category,
            to = %new_key.category,
            "transaction recategorized"
        );
        Ok(updated)
    }

    /// Remove a transaction, reversing its contribution to its bucket
    pub fn remove_transaction(&mut self, id: TransactionId) -> LedgerResult<Transaction> {
        let txn = self
            .transactions
            .get(&id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
        let staged = self.stage([(BucketKey::of(txn), txn.amount, Entry::Debit)])?;

        let txn = self
            .transactions
            .remove(&id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
        self.commit(staged);
        tracing::info!(id = %id, "transaction removed");
        Ok(txn)
    }

    /// Re-run the rules over every uncategorized transaction
    ///
    /// Returns the ids of the transactions that received a category.
    pub fn recategorize_uncategorized(&mut self) -> Vec<TransactionId> {
        let pending: Vec<(TransactionId, Category)> = self
            .transactions
            .values()
            .filter(|t| t.effective_category().is_uncategorized())
            .filter_map(|t| {
                let category = self.matcher.categorize(&t.description);
                (!category.is_uncategorized()).then_some((t.id, category))
            })
            .collect();

        let mut changed = Vec::with_capacity(pending.len());
        for (id, category) in pending {
            if self.recategorize(id, category).is_ok() {
                changed.push(id);
            }
        }
        changed.sort();
        changed
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.get(&id)
    }

    /// All transactions, oldest first
    pub fn transactions(&self) -> Vec<&Transaction> {
        let mut list: Vec<_> = self.transactions.values().collect();
        list.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        list
    }

    /// Transactions dated within `period`, oldest first
    pub fn transactions_in(&self, period: Period) -> Vec<&Transaction> {
        self.transactions()
            .into_iter()
            .filter(|t| period.contains(t.date))
            .collect()
    }

    /// Transactions currently assigned to `category`, oldest first
    pub fn transactions_for(&self, category: &Category) -> Vec<&Transaction> {
        self.transactions()
            .into_iter()
            .filter(|t| &t.effective_category() == category)
            .collect()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Resolve a full id or a unique short prefix (`txn-1a2b3c4d`)
    pub fn resolve_transaction_id(&self, identifier: &str) -> LedgerResult<TransactionId> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            if self.transactions.contains_key(&id) {
                return Ok(id);
            }
            return Err(LedgerError::transaction_not_found(identifier));
        }

        let candidates: Vec<TransactionId> = self
            .transactions
            .keys()
            .filter(|id| id.matches_prefix(identifier))
            .copied()
            .collect();

        match candidates.as_slice() {
            [id] => Ok(*id),
            [] => Err(LedgerError::transaction_not_found(identifier)),
            _ => Err(LedgerError::Validation(format!(
                "'{}' matches {} transactions; use a longer id",
                identifier,
                candidates.len()
            ))),
        }
    }

    // ---------------------------------------------------------------------
    // Aggregates
    // ---------------------------------------------------------------------

    /// Sum of amounts assigned to `category` in `period` (zero if none)
    pub fn get_aggregate(&self, category: &Category, period: Period) -> Money {
        let key = BucketKey {
            category: category.clone(),
            period,
        };
        self.buckets.get(&key).map(|b| b.total).unwrap_or_default()
    }

    /// Every non-empty bucket in `period`, sorted by category
    pub fn aggregates_for_period(&self, period: Period) -> Vec<(Category, Money)> {
        let mut list: Vec<_> = self
            .buckets
            .iter()
            .filter(|(key, _)| key.period == period)
            .map(|(key, bucket)| (key.category.clone(), bucket.total))
            .collect();
        list.sort_by(|a, b| a.0.cmp(&b.0));
        list
    }

    /// Periods that have at least one transaction, ascending
    pub fn periods(&self) -> Vec<Period> {
        let mut periods: Vec<Period> = self.buckets.keys().map(|k| k.period).collect();
        periods.sort();
        periods.dedup();
        periods
    }

    /// Bucket states after applying `changes`, computed without touching
    /// the ledger
    fn stage(
        &self,
        changes: impl IntoIterator<Item = (BucketKey, Money, Entry)>,
    ) -> LedgerResult<HashMap<BucketKey, Bucket>> {
        let mut staged: HashMap<BucketKey, Bucket> = HashMap::new();
        for (key, amount, entry) in changes {
            let current = staged
                .get(&key)
                .or_else(|| self.buckets.get(&key))
                .copied()
                .unwrap_or_default();
            let next = match entry {
                Entry::Credit => Bucket {
                    total: current
                        .total
                        .checked_add(amount)
                        .ok_or_else(|| out_of_range(&key, amount))?,
                    count: current.count + 1,
                },
                Entry::Debit => Bucket {
                    total: current
                        .total
                        .checked_sub(amount)
                        .ok_or_else(|| out_of_range(&key, amount))?,
                    count: current.count.saturating_sub(1),
                },
            };
            staged.insert(key, next);
        }
        Ok(staged)
    }

    fn commit(&mut self, staged: HashMap<BucketKey, Bucket>) {
        for (key, bucket) in staged {
            if bucket.count == 0 {
                self.buckets.remove(&key);
            } else {
                self.buckets.insert(key, bucket);
            }
        }
    }

    fn resolve_category(&self, mut txn: Transaction) -> Transaction {
        if txn.category.is_none() {
            txn.category = Some(self.matcher.categorize(&txn.description));
        }
        txn
    }

    fn record(&mut self, txn: Transaction) -> Transaction {
        tracing::info!(
            id = %txn.id,
            amount = %txn.amount,
            category = %txn.effective_category(),
            "transaction recorded"
        );
        self.transactions.insert(txn.id, txn.clone());
        txn
    }

    fn check_insertable(&self, txn: &Transaction) -> LedgerResult<()> {
        txn.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        if self.transactions.contains_key(&txn.id) {
            tracing::warn!(id = %txn.id, "duplicate transaction id rejected");
            return Err(LedgerError::duplicate_transaction(txn.id.to_string()));
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Rules
    // ---------------------------------------------------------------------

    /// Add a categorization rule; existing transactions are not touched
    pub fn add_rule(&mut self, rule: CategoryRule) -> LedgerResult<CategoryRule> {
        self.matcher.push(rule.clone())?;
        tracing::info!(id = %rule.id, priority = rule.priority, category = %rule.category, "rule added");
        Ok(rule)
    }

    pub fn remove_rule(&mut self, id: RuleId) -> LedgerResult<CategoryRule> {
        let rule = self
            .matcher
            .remove(id)
            .ok_or_else(|| LedgerError::rule_not_found(id.to_string()))?;
        tracing::info!(id = %id, "rule removed");
        Ok(rule)
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> Vec<&CategoryRule> {
        self.matcher.rules().collect()
    }

    pub fn matcher(&self) -> &RuleMatcher {
        &self.matcher
    }

    /// Resolve a full rule id or a unique short prefix
    pub fn resolve_rule_id(&self, identifier: &str) -> LedgerResult<RuleId> {
        if let Ok(id) = identifier.parse::<RuleId>() {
            return match self.matcher.get(id) {
                Some(_) => Ok(id),
                None => Err(LedgerError::rule_not_found(identifier)),
            };
        }

        let candidates: Vec<RuleId> = self
            .matcher
            .rules()
            .filter(|r| r.id.matches_prefix(identifier))
            .map(|r| r.id)
            .collect();

        match candidates.as_slice() {
            [id] => Ok(*id),
            [] => Err(LedgerError::rule_not_found(identifier)),
            _ => Err(LedgerError::Validation(format!(
                "'{}' matches {} rules; use a longer id",
                identifier,
                candidates.len()
            ))),
        }
    }

    // ---------------------------------------------------------------------
    // Budgets
    // ---------------------------------------------------------------------

    /// Configure a budget
    ///
    /// Fails with `InvalidBudget` for a non-positive limit or when the
    /// (category, period) already has a budget.
    pub fn set_budget(&mut self, budget: Budget) -> LedgerResult<Budget> {
        budget
            .validate()
            .map_err(|e| LedgerError::InvalidBudget(e.to_string()))?;

        let key = budget.key();
        if self.budgets.contains_key(&key) {
            return Err(LedgerError::InvalidBudget(format!(
                "a budget for '{}' in {} already exists",
                key.category, key.period
            )));
        }

        tracing::info!(category = %key.category, period = %key.period, limit = %budget.limit, "budget set");
        self.budgets.insert(key, budget.clone());
        Ok(budget)
    }

    /// Change the limit of an existing budget, returning (before, after)
    pub fn update_budget_limit(
        &mut self,
        category: &str,
        period: Period,
        limit: Money,
    ) -> LedgerResult<(Budget, Budget)> {
        let key = BudgetKey::new(category, period);
        let budget = self
            .budgets
            .get_mut(&key)
            .ok_or_else(|| LedgerError::budget_not_found(key.to_string()))?;

        let before = budget.clone();
        let mut candidate = budget.clone();
        candidate.set_limit(limit);
        candidate
            .validate()
            .map_err(|e| LedgerError::InvalidBudget(e.to_string()))?;

        *budget = candidate.clone();
        tracing::info!(budget = %key, from = %before.limit, to = %limit, "budget limit updated");
        Ok((before, candidate))
    }

    pub fn remove_budget(&mut self, category: &str, period: Period) -> LedgerResult<Budget> {
        let key = BudgetKey::new(category, period);
        let budget = self
            .budgets
            .remove(&key)
            .ok_or_else(|| LedgerError::budget_not_found(key.to_string()))?;
        tracing::info!(budget = %key, "budget removed");
        Ok(budget)
    }

    pub fn budget(&self, category: &str, period: Period) -> Option<&Budget> {
        self.budgets.get(&BudgetKey::new(category, period))
    }

    /// Budgets configured for `period`, sorted by category
    pub fn budgets_for_period(&self, period: Period) -> Vec<&Budget> {
        self.budgets.values().filter(|b| b.period == period).collect()
    }

    /// All budgets, sorted by category then period
    pub fn budgets(&self) -> Vec<&Budget> {
        self.budgets.values().collect()
    }

    // ---------------------------------------------------------------------
    // Persistence hooks
    // ---------------------------------------------------------------------

    /// Capture the full ledger state for a persistence collaborator
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            transactions: self.transactions().into_iter().cloned().collect(),
            rules: self.matcher.rules().cloned().collect(),
            budgets: self.budgets.values().cloned().collect(),
        }
    }

    /// Rebuild a ledger from a snapshot, recomputing every aggregate
    ///
    /// Stored categories are kept; transactions stored without one are
    /// matched against the snapshot's rules.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> LedgerResult<Self> {
        let mut ledger = Self::with_rules(&snapshot.rules)?;
        for budget in snapshot.budgets {
            ledger.set_budget(budget)?;
        }
        ledger.add_transactions(snapshot.transactions)?;
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn may() -> Period {
        Period::new(2024, 5).unwrap()
    }

    fn transport() -> Category {
        Category::named("Transport")
    }

    fn ledger_with_uber_rule() -> Ledger {
        Ledger::with_rules(&[CategoryRule::contains("uber", "Transport", 1)]).unwrap()
    }

    #[test]
    fn test_add_assigns_category_and_aggregates() {
        let mut ledger = ledger_with_uber_rule();
        let txn = ledger
            .add_transaction(Transaction::new(
                date(2024, 5, 3),
                Money::from_cents(-2500),
                "UBER TRIP",
            ))
            .unwrap();

        assert_eq!(txn.category, Some(transport()));
        assert_eq!(ledger.get_aggregate(&transport(), may()).cents(), -2500);
        assert_eq!(ledger.transaction_count(), 1);
    }

    #[test]
    fn test_explicit_category_bypasses_rules() {
        let mut ledger = ledger_with_uber_rule();
        ledger
            .add_transaction(
                Transaction::new(date(2024, 5, 3), Money::from_cents(-1800), "UBER EATS")
                    .categorized(Category::named("Dining")),
            )
            .unwrap();

        assert_eq!(ledger.get_aggregate(&transport(), may()), Money::zero());
        assert_eq!(
            ledger.get_aggregate(&Category::named("Dining"), may()).cents(),
            -1800
        );
    }

    #[test]
    fn test_unmatched_goes_to_sentinel() {
        let mut ledger = ledger_with_uber_rule();
        ledger
            .add_transaction(Transaction::new(
                date(2024, 5, 3),
                Money::from_cents(-500),
                "CORNER STORE",
            ))
            .unwrap();
        assert_eq!(
            ledger.get_aggregate(&Category::Uncategorized, may()).cents(),
            -500
        );
        assert_eq!(
            ledger.get_aggregate(&Category::named("Uncategorized"), may()),
            Money::zero()
        );
    }

    #[test]
    fn test_duplicate_id_rejected_without_change() {
        let mut ledger = ledger_with_uber_rule();
        let txn = Transaction::new(date(2024, 5, 3), Money::from_cents(-2500), "UBER TRIP");
        let copy = txn.clone();
        ledger.add_transaction(txn).unwrap();

        let err = ledger.add_transaction(copy).unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(ledger.transaction_count(), 1);
        assert_eq!(ledger.get_aggregate(&transport(), may()).cents(), -2500);
    }

    #[test]
    fn test_invalid_transaction_rejected() {
        let mut ledger = Ledger::new();
        let err = ledger
            .add_transaction(Transaction::new(date(2024, 5, 3), Money::from_cents(-1), " "))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ledger.transaction_count(), 0);
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let mut ledger = ledger_with_uber_rule();
        let existing = Transaction::new(date(2024, 5, 1), Money::from_cents(-100), "UBER");
        ledger.add_transaction(existing.clone()).unwrap();

        let batch = vec![
            Transaction::new(date(2024, 5, 2), Money::from_cents(-200), "UBER"),
            existing,
        ];
        assert!(ledger.add_transactions(batch).unwrap_err().is_duplicate());
        assert_eq!(ledger.transaction_count(), 1);
        assert_eq!(ledger.get_aggregate(&transport(), may()).cents(), -100);

        let twin = Transaction::new(date(2024, 5, 2), Money::from_cents(-200), "UBER");
        let batch = vec![twin.clone(), twin];
        assert!(ledger.add_transactions(batch).unwrap_err().is_duplicate());
        assert_eq!(ledger.transaction_count(), 1);
    }

    #[test]
    fn test_bucket_overflow_rejected_without_change() {
        let mut ledger = ledger_with_uber_rule();
        let huge = Money::parse("92233720368547758.00").unwrap();
        ledger
            .add_transaction(Transaction::new(date(2024, 5, 1), huge, "UBER"))
            .unwrap();

        let err = ledger
            .add_transaction(Transaction::new(date(2024, 5, 2), huge, "UBER"))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("out of range"));
        assert_eq!(ledger.transaction_count(), 1);
        assert_eq!(ledger.get_aggregate(&transport(), may()), huge);

        // Same overflow hidden in the middle of a batch
        let batch = vec![
            Transaction::new(date(2024, 5, 3), Money::from_cents(-100), "UBER"),
            Transaction::new(date(2024, 5, 4), huge, "UBER"),
        ];
        assert!(ledger.add_transactions(batch).unwrap_err().is_validation());
        assert_eq!(ledger.transaction_count(), 1);
        assert_eq!(ledger.get_aggregate(&transport(), may()), huge);
    }

    #[test]
    fn test_recategorize_into_full_bucket_rejected() {
        let mut ledger = ledger_with_uber_rule();
        let huge = Money::from_cents(i64::MAX - 10);
        ledger
            .add_transaction(Transaction::new(date(2024, 5, 1), huge, "UBER"))
            .unwrap();
        let other = ledger
            .add_transaction(
                Transaction::new(date(2024, 5, 2), Money::from_cents(500), "REFUND")
                    .categorized(Category::named("Dining")),
            )
            .unwrap();

        let err = ledger.recategorize(other.id, transport()).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            ledger.transaction(other.id).unwrap().effective_category(),
            Category::named("Dining")
        );
        assert_eq!(ledger.get_aggregate(&transport(), may()), huge);
        assert_eq!(
            ledger.get_aggregate(&Category::named("Dining"), may()).cents(),
            500
        );
    }

    #[test]
    fn test_recategorize_moves_amount() {
        let mut ledger = ledger_with_uber_rule();
        let txn = ledger
            .add_transaction(Transaction::new(
                date(2024, 5, 3),
                Money::from_cents(-2500),
                "UBER TRIP",
            ))
            .unwrap();

        let dining = Category::named("Dining");
        let updated = ledger.recategorize(txn.id, dining.clone()).unwrap();
        assert_eq!(updated.category, Some(dining.clone()));
        assert_eq!(ledger.get_aggregate(&transport(), may()), Money::zero());
        assert_eq!(ledger.get_aggregate(&dining, may()).cents(), -2500);
        assert!(ledger.aggregates_for_period(may()).iter().all(|(c, _)| c != &transport()));
    }

    #[test]
    fn test_recategorize_same_category_is_noop() {
        let mut ledger = ledger_with_uber_rule();
        let txn = ledger
            .add_transaction(Transaction::new(
                date(2024, 5, 3),
                Money::from_cents(-2500),
                "UBER TRIP",
            ))
            .unwrap();
        ledger.recategorize(txn.id, transport()).unwrap();
        assert_eq!(ledger.get_aggregate(&transport(), may()).cents(), -2500);
    }

    #[test]
    fn test_recategorize_unknown_fails() {
        let mut ledger = Ledger::new();
        let err = ledger
            .recategorize(TransactionId::new(), transport())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_recategorize_rejects_blank_name() {
        let mut ledger = ledger_with_uber_rule();
        let txn = ledger
            .add_transaction(Transaction::new(date(2024, 5, 3), Money::from_cents(-1), "UBER"))
            .unwrap();
        assert!(ledger
            .recategorize(txn.id, Category::Named("  ".into()))
            .unwrap_err()
            .is_validation());
        assert_eq!(ledger.transaction(txn.id).unwrap().category, Some(transport()));
    }

    #[test]
    fn test_remove_reverses_contribution() {
        let mut ledger = ledger_with_uber_rule();
        let a = ledger
            .add_transaction(Transaction::new(date(2024, 5, 3), Money::from_cents(-2500), "UBER"))
            .unwrap();
        ledger
            .add_transaction(Transaction::new(date(2024, 5, 9), Money::from_cents(-1000), "UBER"))
            .unwrap();

        let removed = ledger.remove_transaction(a.id).unwrap();
        assert_eq!(removed.id, a.id);
        assert_eq!(ledger.get_aggregate(&transport(), may()).cents(), -1000);
        assert!(ledger.remove_transaction(a.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_empty_buckets_are_dropped() {
        let mut ledger = ledger_with_uber_rule();
        let a = ledger
            .add_transaction(Transaction::new(date(2024, 5, 3), Money::from_cents(-2500), "UBER"))
            .unwrap();
        ledger.remove_transaction(a.id).unwrap();
        assert!(ledger.aggregates_for_period(may()).is_empty());
        assert!(ledger.periods().is_empty());
    }

    #[test]
    fn test_zero_sum_bucket_is_kept_while_populated() {
        let mut ledger = ledger_with_uber_rule();
        ledger
            .add_transaction(Transaction::new(date(2024, 5, 3), Money::from_cents(-2500), "UBER"))
            .unwrap();
        ledger
            .add_transaction(Transaction::new(date(2024, 5, 4), Money::from_cents(2500), "UBER REFUND"))
            .unwrap();
        assert_eq!(
            ledger.aggregates_for_period(may()),
            vec![(transport(), Money::zero())]
        );
    }

    #[test]
    fn test_recategorize_uncategorized_after_new_rule() {
        let mut ledger = Ledger::new();
        let txn = ledger
            .add_transaction(Transaction::new(date(2024, 5, 3), Money::from_cents(-900), "NETFLIX.COM"))
            .unwrap();
        ledger
            .add_transaction(Transaction::new(date(2024, 5, 4), Money::from_cents(-300), "KIOSK"))
            .unwrap();

        ledger
            .add_rule(CategoryRule::contains("netflix", "Subscriptions", 1))
            .unwrap();
        let changed = ledger.recategorize_uncategorized();

        assert_eq!(changed, vec![txn.id]);
        assert_eq!(
            ledger.get_aggregate(&Category::named("Subscriptions"), may()).cents(),
            -900
        );
        assert_eq!(
            ledger.get_aggregate(&Category::Uncategorized, may()).cents(),
            -300
        );
    }

    #[test]
    fn test_resolve_transaction_id() {
        let mut ledger = Ledger::new();
        let txn = ledger
            .add_transaction(Transaction::new(date(2024, 5, 3), Money::from_cents(-1), "X"))
            .unwrap();

        assert_eq!(ledger.resolve_transaction_id(&txn.id.to_string()).unwrap(), txn.id);
        assert_eq!(
            ledger
                .resolve_transaction_id(&txn.id.as_uuid().to_string())
                .unwrap(),
            txn.id
        );
        assert!(ledger
            .resolve_transaction_id("txn-zzzzzzzz")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_remove_rule() {
        let mut ledger = ledger_with_uber_rule();
        let id = ledger.rules()[0].id;
        ledger.remove_rule(id).unwrap();
        assert!(ledger.rules().is_empty());
        assert!(ledger.remove_rule(id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_budget_configuration() {
        let mut ledger = Ledger::new();
        ledger
            .set_budget(Budget::new("Transport", may(), Money::from_cents(10000)))
            .unwrap();

        let dup = ledger
            .set_budget(Budget::new("Transport", may(), Money::from_cents(5000)))
            .unwrap_err();
        assert!(dup.is_invalid_budget());

        let bad = ledger
            .set_budget(Budget::new("Dining", may(), Money::zero()))
            .unwrap_err();
        assert!(bad.is_invalid_budget());
        assert_eq!(ledger.budgets().len(), 1);

        let (before, after) = ledger
            .update_budget_limit("Transport", may(), Money::from_cents(12000))
            .unwrap();
        assert_eq!(before.limit.cents(), 10000);
        assert_eq!(after.limit.cents(), 12000);

        assert!(ledger
            .update_budget_limit("Transport", may(), Money::from_cents(-5))
            .unwrap_err()
            .is_invalid_budget());
        assert_eq!(ledger.budget("Transport", may()).unwrap().limit.cents(), 12000);

        ledger.remove_budget("Transport", may()).unwrap();
        assert!(ledger.remove_budget("Transport", may()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_snapshot_with_duplicate_rule_ids_rejected() {
        let rule = CategoryRule::contains("uber", "Transport", 1);
        let snapshot = LedgerSnapshot {
            transactions: Vec::new(),
            rules: vec![rule.clone(), rule],
            budgets: Vec::new(),
        };
        assert!(matches!(
            Ledger::from_snapshot(snapshot),
            Err(LedgerError::InvalidRule(_))
        ));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut ledger = ledger_with_uber_rule();
        ledger
            .add_transaction(Transaction::new(date(2024, 5, 3), Money::from_cents(-2500), "UBER"))
            .unwrap();
        ledger
            .add_transaction(
                Transaction::new(date(2024, 6, 1), Money::from_cents(-700), "UBER")
                    .categorized(Category::named("Work")),
            )
            .unwrap();
        ledger
            .set_budget(Budget::new("Transport", may(), Money::from_cents(10000)))
            .unwrap();

        let restored = Ledger::from_snapshot(ledger.snapshot()).unwrap();
        assert_eq!(restored.transaction_count(), 2);
        assert_eq!(restored.rules().len(), 1);
        assert_eq!(restored.budgets().len(), 1);
        assert_eq!(restored.get_aggregate(&transport(), may()).cents(), -2500);
        assert_eq!(
            restored
                .get_aggregate(&Category::named("Work"), Period::new(2024, 6).unwrap())
                .cents(),
            -700
        );
    }
}
