//! The editable-record contract
//!
//! Every row the browser can highlight, select, edit or carry through the
//! clipboard implements [`Record`]. The contract is compile-time checked:
//! there are no default bodies, so a type that forgets an operation fails to
//! build instead of failing at runtime.

use crate::error::BankbookResult;
use crate::models::{FieldDef, RecordId};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Sort position of a record within its container
///
/// Containers are homogeneous, so the two variants never meet in one list.
/// Equal keys keep insertion order (the container inserts after existing
/// equals).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Date(NaiveDate),
    Name(String),
}

/// An editable record with a fixed ordered field schema
pub trait Record: Clone {
    /// Singular noun for prompts and error messages ("Operation", ...)
    fn kind_name() -> &'static str;

    /// The fixed field schema, in display and CSV column order
    fn field_defs() -> &'static [FieldDef];

    /// In-memory identity, regenerated on load and on paste
    fn id(&self) -> RecordId;

    /// Field name and current value as a string, `None` past the schema
    fn field(&self, index: usize) -> Option<(&'static str, String)>;

    /// Parse `raw` into field `index`; on success store it and return true,
    /// on parse failure (or index out of range) leave the field unchanged
    /// and return false
    fn set_field(&mut self, index: usize, raw: &str) -> bool;

    /// Build a record from a header-to-value row mapping
    ///
    /// Fails if a column named in the schema is absent or a typed value does
    /// not parse; no partially-filled record escapes.
    fn from_row(row: &HashMap<String, String>) -> BankbookResult<Self>;

    /// The value ordering this record within its container
    fn sort_key(&self) -> SortKey;

    /// Deep copy under a fresh identity (recursively, for records that own
    /// sub-collections)
    fn with_new_id(&self) -> Self;
}

/// Fetch a required column from a row mapping
pub(crate) fn row_value<'a>(
    row: &'a HashMap<String, String>,
    column: &str,
) -> BankbookResult<&'a str> {
    row.get(column)
        .map(|s| s.as_str())
        .ok_or_else(|| crate::error::BankbookError::Parse(format!("missing column '{}'", column)))
}
