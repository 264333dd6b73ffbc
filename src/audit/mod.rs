//! Audit trail for budgetbook
//!
//! Every change to a transaction, rule or budget is appended to `audit.log`
//! as one JSON object per line, carrying the before/after state and a short
//! summary of what changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
