//! Generic browsing over one level of the ledger hierarchy
//!
//! Every level (accounts in the wallet, statements in an account, operations
//! in a statement) is driven by the same machinery: a [`BrowserState`]
//! tracking highlight, viewport and selection, plus structural operations
//! (cut, copy, paste, remove, move-to-sibling) that work against any
//! [`Browsable`] pane. The TUI layer maps keys to [`BrowseCommand`]s and
//! renders; everything in this module runs without a terminal.

pub mod ops;
pub mod state;

pub use state::{BrowserState, PAGE_STEP};

use crate::clipboard::ClipboardItem;
use crate::models::{Account, RecordId, Statement, Wallet};

/// One level of the hierarchy seen as a browsable, editable list
pub trait Browsable {
    type Entry: ClipboardItem;

    fn entries(&self) -> &[Self::Entry];

    /// Ordered insert; returns the index the entry landed at
    fn insert_entry(&mut self, entry: Self::Entry) -> usize;

    /// Remove entries by id, returning them in list order
    fn take_entries(&mut self, ids: &[RecordId]) -> Vec<Self::Entry>;

    /// Apply raw field values to one entry; true if anything changed
    fn apply_edit(&mut self, id: RecordId, values: &[String]) -> bool;

    /// True iff this level's list matches its persisted form
    fn is_synced(&self) -> bool;
}

impl Browsable for Wallet {
    type Entry = Account;

    fn entries(&self) -> &[Account] {
        self.accounts().items()
    }

    fn insert_entry(&mut self, entry: Account) -> usize {
        self.accounts_mut().insert(entry)
    }

    fn take_entries(&mut self, ids: &[RecordId]) -> Vec<Account> {
        self.accounts_mut().remove_ids(ids)
    }

    fn apply_edit(&mut self, id: RecordId, values: &[String]) -> bool {
        self.accounts_mut().update(id, values)
    }

    fn is_synced(&self) -> bool {
        Wallet::is_synced(self)
    }
}

impl Browsable for Account {
    type Entry = Statement;

    fn entries(&self) -> &[Statement] {
        self.statements().items()
    }

    fn insert_entry(&mut self, entry: Statement) -> usize {
        self.statements_mut().insert(entry)
    }

    fn take_entries(&mut self, ids: &[RecordId]) -> Vec<Statement> {
        self.statements_mut().remove_ids(ids)
    }

    fn apply_edit(&mut self, id: RecordId, values: &[String]) -> bool {
        self.statements_mut().update(id, values)
    }

    fn is_synced(&self) -> bool {
        Account::is_synced(self)
    }
}

impl Browsable for Statement {
    type Entry = crate::models::Operation;

    fn entries(&self) -> &[crate::models::Operation] {
        self.operations().items()
    }

    // routed through the statement so the running sum stays in step

    fn insert_entry(&mut self, entry: crate::models::Operation) -> usize {
        self.add_operation(entry)
    }

    fn take_entries(&mut self, ids: &[RecordId]) -> Vec<crate::models::Operation> {
        self.remove_operations(ids)
    }

    fn apply_edit(&mut self, id: RecordId, values: &[String]) -> bool {
        self.edit_operation(id, values)
    }

    fn is_synced(&self) -> bool {
        Statement::is_synced(self)
    }
}

/// Everything a key press can mean inside a browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    ToggleSelect,
    SelectAll,
    ClearSelection,
    Copy,
    Cut,
    Paste,
    Reconcile,
    Edit,
    Open,
    Create,
    Remove,
    Save,
    Help,
    Exit,
}

/// How a nested browser came to return to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Nothing was pending, left silently
    Clean,
    /// Pending changes were saved on the way out
    Saved,
    /// Pending changes were discarded and the level reloaded
    Discarded,
}
