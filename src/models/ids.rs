//! Strongly-typed record identifiers
//!
//! Every browsable item (account, statement, operation) carries a `RecordId`.
//! Ids exist only in memory: they identify the highlighted row and the
//! selection across re-sorts, and are regenerated on load and on paste so a
//! pasted copy is never confused with its source.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// In-memory identity of a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Create a new random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an id from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rec-{}", &self.0.to_string()[..8])
    }
}

impl From<Uuid> for RecordId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("rec-").unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = RecordId::new();
        assert!(!id.as_uuid().is_nil());
    }

    #[test]
    fn test_id_display() {
        let id = RecordId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("rec-"));
        assert_eq!(display.len(), 12); // "rec-" + 8 chars
    }

    #[test]
    fn test_id_equality() {
        let id1 = RecordId::new();
        let id2 = id1;
        assert_eq!(id1, id2);

        let id3 = RecordId::new();
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_id_roundtrip_via_str() {
        let id = RecordId::new();
        let full = id.as_uuid().to_string();
        let parsed: RecordId = full.parse().unwrap();
        assert_eq!(id, parsed);
    }
}
