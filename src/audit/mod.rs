//! Audit logging for bankbook
//!
//! Records structural actions (create, edit, remove, cut, paste, reconcile,
//! save, reload) in an append-only JSONL log next to the wallet data.
//!
//! Logging is best-effort: callers drop the result, because a broken audit
//! log must never block a ledger action.

mod entry;
mod logger;

pub use entry::{AuditAction, AuditEntry};
pub use logger::AuditLogger;
