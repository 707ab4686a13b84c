//! A bank account: a named, sorted collection of statements
//!
//! Unlike [`Statement`], an account derives nothing from its children that
//! needs incremental upkeep, so the statement container is exposed mutably
//! and callers work with it directly.

use crate::error::BankbookResult;
use crate::models::record::row_value;
use crate::models::{Container, FieldDef, FieldKind, Money, Record, RecordId, SortKey, Statement};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Account {
    id: RecordId,
    pub name: String,
    statements: Container<Statement>,
}

const FIELDS: &[FieldDef] = &[FieldDef::new("name", FieldKind::Text)];

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            name: name.into(),
            statements: Container::new(),
        }
    }

    pub fn statements(&self) -> &Container<Statement> {
        &self.statements
    }

    pub fn statements_mut(&mut self) -> &mut Container<Statement> {
        &mut self.statements
    }

    /// Closing balance of the most recent statement, zero with no statements
    pub fn balance(&self) -> Money {
        self.statements
            .items()
            .last()
            .map(|s| s.bal_end)
            .unwrap_or(Money::zero())
    }

    /// True iff the statement list matches its persisted file
    pub fn is_synced(&self) -> bool {
        self.statements.is_synced()
    }
}

/// Account names double as directory names, so they must be non-empty and
/// free of path separators
pub fn valid_account_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && !trimmed.contains(['/', '\\'])
}

impl Record for Account {
    fn kind_name() -> &'static str {
        "Account"
    }

    fn field_defs() -> &'static [FieldDef] {
        FIELDS
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, index: usize) -> Option<(&'static str, String)> {
        match index {
            0 => Some(("name", self.name.clone())),
            _ => None,
        }
    }

    fn set_field(&mut self, index: usize, raw: &str) -> bool {
        match index {
            0 => {
                let trimmed = raw.trim();
                if !valid_account_name(trimmed) || trimmed == self.name {
                    false
                } else {
                    self.name = trimmed.to_string();
                    true
                }
            }
            _ => false,
        }
    }

    fn from_row(row: &HashMap<String, String>) -> BankbookResult<Self> {
        let name = row_value(row, "name")?.trim();
        if !valid_account_name(name) {
            return Err(crate::error::BankbookError::bad_field("name", name));
        }
        Ok(Self::new(name))
    }

    fn sort_key(&self) -> SortKey {
        SortKey::Name(self.name.clone())
    }

    fn with_new_id(&self) -> Self {
        let mut copy = self.clone();
        copy.id = RecordId::new();
        copy.statements.refresh_ids();
        copy.statements.mark_unsynced();
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn statement(d: &str, bal_end_cents: i64) -> Statement {
        Statement::new(
            NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
            Money::zero(),
            Money::from_cents(bal_end_cents),
        )
    }

    #[test]
    fn test_balance_is_latest_statement_close() {
        let mut account = Account::new("courant");
        assert_eq!(account.balance(), Money::zero());

        // inserted out of order; the container sorts by date
        account.statements_mut().insert(statement("2024-03-31", 3000));
        account.statements_mut().insert(statement("2024-01-31", 1000));
        account.statements_mut().insert(statement("2024-02-29", 2000));
        assert_eq!(account.balance(), Money::from_cents(3000));
    }

    #[test]
    fn test_rename_rejects_bad_names() {
        let mut account = Account::new("savings");
        assert!(!account.set_field(0, ""));
        assert!(!account.set_field(0, "   "));
        assert!(!account.set_field(0, "a/b"));
        assert_eq!(account.name, "savings");

        assert!(account.set_field(0, "  joint  "));
        assert_eq!(account.name, "joint");
    }

    #[test]
    fn test_accounts_sort_by_name() {
        let mut c: Container<Account> = Container::new();
        c.insert(Account::new("savings"));
        c.insert(Account::new("courant"));
        c.insert(Account::new("joint"));
        let names: Vec<_> = c.iter().map(|a| a.name.clone()).collect();
        assert_eq!(names, vec!["courant", "joint", "savings"]);
    }

    #[test]
    fn test_from_row() {
        let mut row = HashMap::new();
        row.insert("name".to_string(), "courant".to_string());
        let account = Account::from_row(&row).unwrap();
        assert_eq!(account.name, "courant");
        assert!(account.statements().is_empty());
    }
}
