//! A single ledger operation (one bank transaction)

use crate::error::{BankbookError, BankbookResult};
use crate::models::field::{format_date, parse_date};
use crate::models::record::row_value;
use crate::models::{FieldDef, FieldKind, Money, Record, RecordId, SortKey};
use chrono::NaiveDate;
use std::collections::HashMap;

/// One row of a statement: a dated, categorized amount
///
/// `amount` is signed: deposits positive, withdrawals negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    id: RecordId,
    pub date: NaiveDate,
    pub mode: String,
    pub tier: String,
    pub category: String,
    pub description: String,
    pub amount: Money,
}

const FIELDS: &[FieldDef] = &[
    FieldDef::new("date", FieldKind::Date),
    FieldDef::new("mode", FieldKind::Text),
    FieldDef::new("tier", FieldKind::Text),
    FieldDef::new("category", FieldKind::Text),
    FieldDef::new("description", FieldKind::Text),
    FieldDef::new("amount", FieldKind::Amount),
];

impl Operation {
    pub fn new(
        date: NaiveDate,
        mode: String,
        tier: String,
        category: String,
        description: String,
        amount: Money,
    ) -> Self {
        Self {
            id: RecordId::new(),
            date,
            mode,
            tier,
            category,
            description,
            amount,
        }
    }
}

impl Record for Operation {
    fn kind_name() -> &'static str {
        "Operation"
    }

    fn field_defs() -> &'static [FieldDef] {
        FIELDS
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, index: usize) -> Option<(&'static str, String)> {
        let def = FIELDS.get(index)?;
        let value = match index {
            0 => format_date(self.date),
            1 => self.mode.clone(),
            2 => self.tier.clone(),
            3 => self.category.clone(),
            4 => self.description.clone(),
            5 => self.amount.to_decimal_string(),
            _ => return None,
        };
        Some((def.name, value))
    }

    fn set_field(&mut self, index: usize, raw: &str) -> bool {
        match index {
            0 => match parse_date(raw) {
                Ok(date) if date != self.date => {
                    self.date = date;
                    true
                }
                _ => false,
            },
            1 => set_text(&mut self.mode, raw),
            2 => set_text(&mut self.tier, raw),
            3 => set_text(&mut self.category, raw),
            4 => set_text(&mut self.description, raw),
            5 => match Money::parse(raw) {
                Ok(amount) if amount != self.amount => {
                    self.amount = amount;
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    fn from_row(row: &HashMap<String, String>) -> BankbookResult<Self> {
        let date = parse_date(row_value(row, "date")?)?;
        let amount_raw = row_value(row, "amount")?;
        let amount = Money::parse(amount_raw)
            .map_err(|_| BankbookError::bad_field("amount", amount_raw))?;
        Ok(Self {
            id: RecordId::new(),
            date,
            mode: row_value(row, "mode")?.to_string(),
            tier: row_value(row, "tier")?.to_string(),
            category: row_value(row, "category")?.to_string(),
            description: row_value(row, "description")?.to_string(),
            amount,
        })
    }

    fn sort_key(&self) -> SortKey {
        SortKey::Date(self.date)
    }

    fn with_new_id(&self) -> Self {
        let mut copy = self.clone();
        copy.id = RecordId::new();
        copy
    }
}

fn set_text(target: &mut String, raw: &str) -> bool {
    if target == raw {
        false
    } else {
        *target = raw.to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Operation {
        Operation::new(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            "card".into(),
            "grocer".into(),
            "food".into(),
            "weekly shop".into(),
            Money::from_cents(-4250),
        )
    }

    #[test]
    fn test_field_access() {
        let op = sample();
        assert_eq!(op.field(0), Some(("date", "2024-03-15".to_string())));
        assert_eq!(op.field(5), Some(("amount", "-42.50".to_string())));
        assert_eq!(op.field(6), None);
    }

    #[test]
    fn test_set_field_rejects_malformed_date() {
        let mut op = sample();
        assert!(!op.set_field(0, "2024-13-40"));
        assert_eq!(op.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_set_field_updates_amount() {
        let mut op = sample();
        assert!(op.set_field(5, "10.00"));
        assert_eq!(op.amount, Money::from_cents(1000));
        // same value again is not an edit
        assert!(!op.set_field(5, "10.00"));
    }

    #[test]
    fn test_set_field_out_of_range() {
        let mut op = sample();
        assert!(!op.set_field(6, "whatever"));
    }

    #[test]
    fn test_from_row() {
        let mut row = HashMap::new();
        row.insert("date".to_string(), "2024-01-02".to_string());
        row.insert("mode".to_string(), "transfer".to_string());
        row.insert("tier".to_string(), "landlord".to_string());
        row.insert("category".to_string(), "rent".to_string());
        row.insert("description".to_string(), "january".to_string());
        row.insert("amount".to_string(), "-800.00".to_string());

        let op = Operation::from_row(&row).unwrap();
        assert_eq!(op.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(op.amount, Money::from_cents(-80000));
        assert_eq!(op.tier, "landlord");
    }

    #[test]
    fn test_from_row_missing_column() {
        let mut row = HashMap::new();
        row.insert("date".to_string(), "2024-01-02".to_string());
        let err = Operation::from_row(&row).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_from_row_bad_amount() {
        let mut row = HashMap::new();
        row.insert("date".to_string(), "2024-01-02".to_string());
        row.insert("mode".to_string(), String::new());
        row.insert("tier".to_string(), String::new());
        row.insert("category".to_string(), String::new());
        row.insert("description".to_string(), String::new());
        row.insert("amount".to_string(), "not-a-number".to_string());
        assert!(Operation::from_row(&row).is_err());
    }

    #[test]
    fn test_with_new_id_is_deep_and_fresh() {
        let op = sample();
        let copy = op.with_new_id();
        assert_ne!(copy.id(), op.id());
        assert_eq!(copy.date, op.date);
        assert_eq!(copy.amount, op.amount);
        assert_eq!(copy.description, op.description);
    }
}
