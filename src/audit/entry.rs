//! Audit entry data structures
//!
//! One entry per structural action on the ledger: what happened, to which
//! record kind, how many records, and where in the hierarchy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Actions recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// Record created through the creation flow
    Create,
    /// Record fields edited
    Edit,
    /// Records removed
    Remove,
    /// Records cut to the clipboard
    Cut,
    /// Clipboard contents pasted
    Paste,
    /// Records moved into a sibling for reconciliation
    Reconcile,
    /// Container persisted to disk
    Save,
    /// In-memory state discarded and reloaded from disk
    Reload,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditAction::Create => write!(f, "CREATE"),
            AuditAction::Edit => write!(f, "EDIT"),
            AuditAction::Remove => write!(f, "REMOVE"),
            AuditAction::Cut => write!(f, "CUT"),
            AuditAction::Paste => write!(f, "PASTE"),
            AuditAction::Reconcile => write!(f, "RECONCILE"),
            AuditAction::Save => write!(f, "SAVE"),
            AuditAction::Reload => write!(f, "RELOAD"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the action occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// What was done
    pub action: AuditAction,

    /// Record kind affected ("account", "statement", "operation")
    pub entity: String,

    /// Number of records affected
    pub count: usize,

    /// Where it happened, e.g. "courant/2024-01-31"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

impl AuditEntry {
    pub fn new(
        action: AuditAction,
        entity: impl Into<String>,
        count: usize,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            entity: entity.into(),
            count,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_display() {
        assert_eq!(AuditAction::Create.to_string(), "CREATE");
        assert_eq!(AuditAction::Reconcile.to_string(), "RECONCILE");
        assert_eq!(AuditAction::Reload.to_string(), "RELOAD");
    }

    #[test]
    fn test_serialization_round_trip() {
        let entry = AuditEntry::new(AuditAction::Paste, "operation", 3, "courant/2024-01-31");

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.action, AuditAction::Paste);
        assert_eq!(deserialized.entity, "operation");
        assert_eq!(deserialized.count, 3);
        assert_eq!(deserialized.detail, "courant/2024-01-31");
    }

    #[test]
    fn test_empty_detail_is_omitted() {
        let entry = AuditEntry::new(AuditAction::Save, "account", 2, "");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("detail"));
    }
}
