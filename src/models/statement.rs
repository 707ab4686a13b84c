//! A bank statement: a dated balance bracket holding operations
//!
//! A statement plays two roles at once. Toward its account it is an editable
//! record (date, opening balance, closing balance). Toward its operations it
//! is the owning collection, and it maintains `running_sum` incrementally so
//! the reconciliation figures never require a full rescan.

use crate::error::{BankbookError, BankbookResult};
use crate::models::field::{format_date, parse_date};
use crate::models::record::row_value;
use crate::models::{
    Container, FieldDef, FieldKind, Money, Operation, Record, RecordId, SortKey,
};
use chrono::NaiveDate;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Statement {
    id: RecordId,
    pub date: NaiveDate,
    pub bal_start: Money,
    pub bal_end: Money,
    operations: Container<Operation>,
    running_sum: Money,
}

const FIELDS: &[FieldDef] = &[
    FieldDef::new("date", FieldKind::Date),
    FieldDef::new("bal_start", FieldKind::Amount),
    FieldDef::new("bal_end", FieldKind::Amount),
];

impl Statement {
    pub fn new(date: NaiveDate, bal_start: Money, bal_end: Money) -> Self {
        Self {
            id: RecordId::new(),
            date,
            bal_start,
            bal_end,
            operations: Container::new(),
            running_sum: Money::zero(),
        }
    }

    pub fn operations(&self) -> &Container<Operation> {
        &self.operations
    }

    /// Sum of all contained operation amounts, maintained on every mutation
    pub fn running_sum(&self) -> Money {
        self.running_sum
    }

    /// Insert an operation at its sorted position and fold its amount into
    /// the running sum; returns the insert index
    pub fn add_operation(&mut self, operation: Operation) -> usize {
        self.running_sum += operation.amount;
        self.operations.insert(operation)
    }

    /// Remove operations by id, subtracting their amounts from the running
    /// sum in the same step
    pub fn remove_operations(&mut self, ids: &[RecordId]) -> Vec<Operation> {
        let removed = self.operations.remove_ids(ids);
        for operation in &removed {
            self.running_sum -= operation.amount;
        }
        removed
    }

    /// Apply edited field values to one operation, keeping the running sum
    /// in step when the amount changed
    pub fn edit_operation(&mut self, id: RecordId, values: &[String]) -> bool {
        let Some(before) = self.operations.find(id).map(|op| op.amount) else {
            return false;
        };
        let edited = self.operations.update(id, values);
        if edited {
            if let Some(after) = self.operations.find(id).map(|op| op.amount) {
                self.running_sum += after - before;
            }
        }
        edited
    }

    /// True iff the operation list matches its persisted file
    pub fn is_synced(&self) -> bool {
        self.operations.is_synced()
    }

    pub(crate) fn mark_operations_synced(&mut self) {
        self.operations.mark_synced();
    }

    pub(crate) fn reset_operations(&mut self) {
        self.operations.reset();
        self.running_sum = Money::zero();
    }

    /// `bal_end - bal_start`: what the bank says happened over the period
    pub fn balance_diff(&self) -> Money {
        self.bal_end - self.bal_start
    }

    /// `bal_start + running_sum`: where the recorded operations land
    pub fn actual_end(&self) -> Money {
        self.bal_start + self.running_sum
    }

    /// `bal_start + running_sum - bal_end`: zero when fully reconciled
    pub fn balance_error(&self) -> Money {
        self.bal_start + self.running_sum - self.bal_end
    }
}

impl Record for Statement {
    fn kind_name() -> &'static str {
        "Statement"
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
            1 => self.bal_start.to_decimal_string(),
            2 => self.bal_end.to_decimal_string(),
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
            1 => match Money::parse(raw) {
                Ok(amount) if amount != self.bal_start => {
                    self.bal_start = amount;
                    true
                }
                _ => false,
            },
            2 => match Money::parse(raw) {
                Ok(amount) if amount != self.bal_end => {
                    self.bal_end = amount;
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    fn from_row(row: &HashMap<String, String>) -> BankbookResult<Self> {
        let date = parse_date(row_value(row, "date")?)?;
        let bal_start = parse_amount(row, "bal_start")?;
        let bal_end = parse_amount(row, "bal_end")?;
        Ok(Self::new(date, bal_start, bal_end))
    }

    fn sort_key(&self) -> SortKey {
        SortKey::Date(self.date)
    }

    fn with_new_id(&self) -> Self {
        let mut copy = self.clone();
        copy.id = RecordId::new();
        copy.operations.refresh_ids();
        // a fresh copy exists nowhere on disk yet
        copy.operations.mark_unsynced();
        copy
    }
}

fn parse_amount(row: &HashMap<String, String>, column: &str) -> BankbookResult<Money> {
    let raw = row_value(row, column)?;
    Money::parse(raw).map_err(|_| BankbookError::bad_field(column, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn op(d: &str, cents: i64) -> Operation {
        Operation::new(
            date(d),
            "card".into(),
            String::new(),
            String::new(),
            String::new(),
            Money::from_cents(cents),
        )
    }

    fn recomputed_sum(statement: &Statement) -> Money {
        statement.operations().iter().map(|o| o.amount).sum()
    }

    #[test]
    fn test_running_sum_tracks_adds_and_removes() {
        let mut s = Statement::new(date("2024-01-31"), Money::zero(), Money::zero());
        for (i, cents) in [1500, -700, 42, -4200, 9999, -1].iter().enumerate() {
            s.add_operation(op(&format!("2024-01-{:02}", i + 1), *cents));
            assert_eq!(s.running_sum(), recomputed_sum(&s));
        }
        // remove a couple in the middle and re-check after each
        let victims: Vec<RecordId> = s
            .operations()
            .iter()
            .skip(1)
            .step_by(2)
            .map(|o| o.id())
            .collect();
        for id in victims {
            s.remove_operations(&[id]);
            assert_eq!(s.running_sum(), recomputed_sum(&s));
        }
    }

    #[test]
    fn test_balance_error_zero_on_exact_reconciliation() {
        let mut s = Statement::new(
            date("2024-01-31"),
            Money::parse("100.00").unwrap(),
            Money::parse("150.00").unwrap(),
        );
        s.add_operation(op("2024-01-10", 2000));
        s.add_operation(op("2024-01-15", 3000));
        assert_eq!(s.balance_error(), Money::zero());
        assert_eq!(s.balance_diff(), Money::parse("50.00").unwrap());
        assert_eq!(s.actual_end(), Money::parse("150.00").unwrap());
    }

    #[test]
    fn test_balance_error_nonzero_when_short() {
        let mut s = Statement::new(
            date("2024-01-31"),
            Money::from_cents(10000),
            Money::from_cents(15000),
        );
        s.add_operation(op("2024-01-10", 2000));
        assert_eq!(s.balance_error(), Money::from_cents(-3000));
    }

    #[test]
    fn test_edit_operation_amount_updates_sum() {
        let mut s = Statement::new(date("2024-01-31"), Money::zero(), Money::zero());
        s.add_operation(op("2024-01-10", 2000));
        let id = s.operations().items()[0].id();
        let mut values: Vec<String> = (0..6)
            .map(|i| s.operations().items()[0].field(i).unwrap().1)
            .collect();
        values[5] = "35.00".into();
        assert!(s.edit_operation(id, &values));
        assert_eq!(s.running_sum(), Money::from_cents(3500));
    }

    #[test]
    fn test_edit_operation_date_keeps_sum() {
        let mut s = Statement::new(date("2024-01-31"), Money::zero(), Money::zero());
        s.add_operation(op("2024-01-10", 2000));
        s.add_operation(op("2024-01-20", 500));
        let id = s.operations().items()[0].id();
        let mut values: Vec<String> = (0..6)
            .map(|i| s.operations().items()[0].field(i).unwrap().1)
            .collect();
        values[0] = "2024-01-25".into();
        assert!(s.edit_operation(id, &values));
        assert_eq!(s.running_sum(), Money::from_cents(2500));
        // the edited operation moved behind the other one
        assert_eq!(s.operations().items()[1].date, date("2024-01-25"));
    }

    #[test]
    fn test_statement_fields() {
        let s = Statement::new(
            date("2024-02-29"),
            Money::from_cents(1000),
            Money::from_cents(2000),
        );
        assert_eq!(s.field(0), Some(("date", "2024-02-29".to_string())));
        assert_eq!(s.field(1), Some(("bal_start", "10.00".to_string())));
        assert_eq!(s.field(2), Some(("bal_end", "20.00".to_string())));
        assert_eq!(s.field(3), None);
    }

    #[test]
    fn test_from_row() {
        let mut row = HashMap::new();
        row.insert("date".to_string(), "2024-06-30".to_string());
        row.insert("bal_start".to_string(), "100.00".to_string());
        row.insert("bal_end".to_string(), "80.50".to_string());
        let s = Statement::from_row(&row).unwrap();
        assert_eq!(s.date, date("2024-06-30"));
        assert_eq!(s.balance_diff(), Money::from_cents(-1950));
        assert!(s.operations().is_empty());
    }

    #[test]
    fn test_with_new_id_refreshes_operations() {
        let mut s = Statement::new(date("2024-01-31"), Money::zero(), Money::zero());
        s.add_operation(op("2024-01-10", 2000));
        let copy = s.with_new_id();
        assert_ne!(copy.id(), s.id());
        assert_ne!(
            copy.operations().items()[0].id(),
            s.operations().items()[0].id()
        );
        assert_eq!(copy.running_sum(), s.running_sum());
        assert!(!copy.is_synced());
    }
}
