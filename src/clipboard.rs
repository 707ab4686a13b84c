//! Cut/copy/paste buffer shared by every browser level
//!
//! The clipboard holds deep copies: `set` clones the items in, `get` clones
//! them back out under fresh ids. Pasted items therefore never alias the
//! clipboard, the clipboard survives deletion of the source, and repeated
//! pastes produce independent records.
//!
//! Contents are one of a closed set of record kinds. Asking for a different
//! kind than what is stored yields nothing, so operations cut from a
//! statement cannot end up inside an account list.

use crate::models::{Account, Operation, Record, Statement};

/// What the clipboard currently holds
#[derive(Debug, Clone, Default)]
pub enum ClipboardContents {
    #[default]
    Empty,
    Operations(Vec<Operation>),
    Statements(Vec<Statement>),
    Accounts(Vec<Account>),
}

/// A record kind the clipboard can carry
pub trait ClipboardItem: Record {
    fn into_contents(items: Vec<Self>) -> ClipboardContents;
    fn from_contents(contents: &ClipboardContents) -> Option<&[Self]>;
}

impl ClipboardItem for Operation {
    fn into_contents(items: Vec<Self>) -> ClipboardContents {
        ClipboardContents::Operations(items)
    }

    fn from_contents(contents: &ClipboardContents) -> Option<&[Self]> {
        match contents {
            ClipboardContents::Operations(items) => Some(items),
            _ => None,
        }
    }
}

impl ClipboardItem for Statement {
    fn into_contents(items: Vec<Self>) -> ClipboardContents {
        ClipboardContents::Statements(items)
    }

    fn from_contents(contents: &ClipboardContents) -> Option<&[Self]> {
        match contents {
            ClipboardContents::Statements(items) => Some(items),
            _ => None,
        }
    }
}

impl ClipboardItem for Account {
    fn into_contents(items: Vec<Self>) -> ClipboardContents {
        ClipboardContents::Accounts(items)
    }

    fn from_contents(contents: &ClipboardContents) -> Option<&[Self]> {
        match contents {
            ClipboardContents::Accounts(items) => Some(items),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    contents: ClipboardContents,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with deep copies of `items`
    pub fn set<T: ClipboardItem>(&mut self, items: &[T]) {
        self.contents = T::into_contents(items.to_vec());
    }

    /// Deep copies of the contents under fresh ids; empty if the clipboard
    /// holds nothing or a different record kind
    pub fn get<T: ClipboardItem>(&self) -> Vec<T> {
        T::from_contents(&self.contents)
            .map(|items| items.iter().map(|item| item.with_new_id()).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        match &self.contents {
            ClipboardContents::Empty => 0,
            ClipboardContents::Operations(items) => items.len(),
            ClipboardContents::Statements(items) => items.len(),
            ClipboardContents::Accounts(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Noun for the status line ("operation", "statement", "account")
    pub fn kind_name(&self) -> Option<&'static str> {
        match &self.contents {
            ClipboardContents::Empty => None,
            ClipboardContents::Operations(_) => Some("operation"),
            ClipboardContents::Statements(_) => Some("statement"),
            ClipboardContents::Accounts(_) => Some("account"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn op(description: &str, cents: i64) -> Operation {
        Operation::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "card".into(),
            String::new(),
            String::new(),
            description.into(),
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_set_stores_deep_copies() {
        let mut clipboard = Clipboard::new();
        let mut source = vec![op("original", 100)];
        clipboard.set(&source);

        source[0].description = "mutated".into();
        let out: Vec<Operation> = clipboard.get();
        assert_eq!(out[0].description, "original");
    }

    #[test]
    fn test_gets_are_independent() {
        let mut clipboard = Clipboard::new();
        clipboard.set(&[op("a", 1), op("b", 2)]);

        let mut first: Vec<Operation> = clipboard.get();
        first[0].description = "changed".into();
        let second: Vec<Operation> = clipboard.get();
        assert_eq!(second[0].description, "a");
        assert_ne!(first[0].id(), second[0].id());
    }

    #[test]
    fn test_get_assigns_fresh_ids() {
        let source = op("x", 5);
        let mut clipboard = Clipboard::new();
        clipboard.set(std::slice::from_ref(&source));
        let out: Vec<Operation> = clipboard.get();
        assert_ne!(out[0].id(), source.id());
    }

    #[test]
    fn test_wrong_kind_yields_nothing() {
        let mut clipboard = Clipboard::new();
        clipboard.set(&[op("a", 1)]);
        let accounts: Vec<Account> = clipboard.get();
        assert!(accounts.is_empty());
        // the operations are still there
        assert_eq!(clipboard.len(), 1);
        assert_eq!(clipboard.kind_name(), Some("operation"));
    }

    #[test]
    fn test_set_replaces_previous_contents() {
        let mut clipboard = Clipboard::new();
        clipboard.set(&[op("a", 1), op("b", 2)]);
        clipboard.set(&[Account::new("courant")]);
        assert_eq!(clipboard.len(), 1);
        let ops: Vec<Operation> = clipboard.get();
        assert!(ops.is_empty());
    }

    #[test]
    fn test_empty_clipboard() {
        let clipboard = Clipboard::new();
        assert!(clipboard.is_empty());
        assert_eq!(clipboard.len(), 0);
        let ops: Vec<Operation> = clipboard.get();
        assert!(ops.is_empty());
    }
}
