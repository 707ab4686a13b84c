//! Field schema shared by all editable records
//!
//! A record exposes a fixed ordered list of named fields. Each field is one
//! of three kinds: free text, a `YYYY-MM-DD` date, or a money amount. Values
//! are edited as strings and parsed into the native type; a value that fails
//! to parse is rejected and the prior value stays in place.

use crate::error::{BankbookError, BankbookResult};
use crate::models::Money;
use chrono::NaiveDate;
use std::fmt;

/// The one date format accepted everywhere (files, forms, display)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The native type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Amount,
}

/// Name and kind of one field in a record schema
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A parsed field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Amount(Money),
}

impl FieldValue {
    /// Parse a raw string against a field definition
    ///
    /// Text always succeeds. Dates must match `YYYY-MM-DD` exactly
    /// (calendar-checked, so `2024-13-40` is rejected). Amounts go through
    /// [`Money::parse`].
    pub fn parse(def: &FieldDef, raw: &str) -> BankbookResult<Self> {
        match def.kind {
            FieldKind::Text => Ok(Self::Text(raw.to_string())),
            FieldKind::Date => match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
                Ok(date) => Ok(Self::Date(date)),
                Err(_) => Err(BankbookError::bad_field(def.name, raw)),
            },
            FieldKind::Amount => match Money::parse(raw) {
                Ok(amount) => Ok(Self::Amount(amount)),
                Err(_) => Err(BankbookError::bad_field(def.name, raw)),
            },
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            FieldValue::Amount(m) => write!(f, "{}", m.to_decimal_string()),
        }
    }
}

/// Parse a date string in the fixed format
pub fn parse_date(raw: &str) -> BankbookResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| BankbookError::bad_field("date", raw))
}

/// Format a date in the fixed format
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATE_DEF: FieldDef = FieldDef::new("date", FieldKind::Date);
    const AMOUNT_DEF: FieldDef = FieldDef::new("amount", FieldKind::Amount);
    const TEXT_DEF: FieldDef = FieldDef::new("description", FieldKind::Text);

    #[test]
    fn test_parse_date() {
        let v = FieldValue::parse(&DATE_DEF, "2024-03-15").unwrap();
        assert_eq!(v.to_string(), "2024-03-15");
    }

    #[test]
    fn test_reject_malformed_date() {
        assert!(FieldValue::parse(&DATE_DEF, "2024-13-40").is_err());
        assert!(FieldValue::parse(&DATE_DEF, "15/03/2024").is_err());
        assert!(FieldValue::parse(&DATE_DEF, "").is_err());
    }

    #[test]
    fn test_parse_amount() {
        let v = FieldValue::parse(&AMOUNT_DEF, "-12.34").unwrap();
        assert_eq!(v, FieldValue::Amount(Money::from_cents(-1234)));
        assert!(FieldValue::parse(&AMOUNT_DEF, "12,34").is_err());
    }

    #[test]
    fn test_text_always_parses() {
        let v = FieldValue::parse(&TEXT_DEF, "  anything at all  ").unwrap();
        assert_eq!(v.to_string(), "  anything at all  ");
    }

    #[test]
    fn test_parse_date_helper() {
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("2023-02-29").is_err());
        assert_eq!(
            format_date(parse_date("2024-01-02").unwrap()),
            "2024-01-02"
        );
    }
}
