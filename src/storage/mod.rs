//! Storage layer for budgetbook
//!
//! `Storage` ties the JSON snapshot store to the audit log: the CLI loads a
//! ledger from it, mutates the ledger, records what changed, and saves.

pub mod file_io;
pub mod json_store;
pub mod snapshot;

pub use file_io::{read_json, write_json_atomic};
pub use json_store::JsonStore;
pub use snapshot::{LedgerSnapshot, SnapshotStore};

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::{BudgetbookPaths, Settings};
use crate::error::LedgerResult;
use crate::services::Ledger;

/// Storage coordinator: snapshot persistence plus the audit trail
pub struct Storage {
    paths: BudgetbookPaths,
    store: JsonStore,
    audit: AuditLogger,
    audit_enabled: bool,
}

impl Storage {
    /// Open storage under `paths`, creating the directories if needed
    pub fn new(paths: BudgetbookPaths, settings: &Settings) -> LedgerResult<Self> {
        paths.ensure_directories()?;
        Ok(Self {
            store: JsonStore::new(&paths),
            audit: AuditLogger::new(paths.audit_log()),
            audit_enabled: settings.audit_enabled,
            paths,
        })
    }

    pub fn paths(&self) -> &BudgetbookPaths {
        &self.paths
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Rebuild the ledger from disk
    pub fn load_ledger(&self) -> LedgerResult<Ledger> {
        Ledger::from_snapshot(self.store.load()?)
    }

    /// Persist the whole ledger
    pub fn save_ledger(&self, ledger: &Ledger) -> LedgerResult<()> {
        self.store.save(&ledger.snapshot())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> LedgerResult<()> {
        self.write_audit(AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update; the summary is derived from the two states when
    /// none is given
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> LedgerResult<()> {
        let diff_summary = diff_summary.or_else(|| {
            let before = serde_json::to_value(before).ok()?;
            let after = serde_json::to_value(after).ok()?;
            generate_diff(&before, &after)
        });
        self.write_audit(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> LedgerResult<()> {
        self.write_audit(AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    fn write_audit(&self, entry: AuditEntry) -> LedgerResult<()> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit.log(&entry)
    }
}
