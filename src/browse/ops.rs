//! Structural edits shared by every browser level
//!
//! Each function pairs a [`Browsable`] pane with its [`BrowserState`] and
//! performs one clipboard or removal operation, keeping highlight, selection
//! and viewport consistent with the mutated list. Confirmation prompts stay
//! with the caller; by the time one of these runs the decision is made.

use crate::browse::{Browsable, BrowserState};
use crate::clipboard::Clipboard;
use crate::models::Record;

/// Copy the selection (or the highlighted entry) into the clipboard.
/// Returns how many entries were copied; the pane is untouched.
pub fn copy_to_clipboard<B: Browsable>(
    pane: &B,
    state: &BrowserState,
    clipboard: &mut Clipboard,
) -> usize {
    let ids = state.source_ids(pane.entries());
    if ids.is_empty() {
        return 0;
    }
    let items: Vec<B::Entry> = pane
        .entries()
        .iter()
        .filter(|e| ids.contains(&e.id()))
        .cloned()
        .collect();
    let count = items.len();
    clipboard.set(&items);
    count
}

/// Copy the source set into the clipboard, then remove it from the pane.
/// The highlight moves to the closest surviving neighbor first.
pub fn cut_to_clipboard<B: Browsable>(
    pane: &mut B,
    state: &mut BrowserState,
    clipboard: &mut Clipboard,
) -> usize {
    let ids = state.source_ids(pane.entries());
    if ids.is_empty() {
        return 0;
    }
    let items: Vec<B::Entry> = pane
        .entries()
        .iter()
        .filter(|e| ids.contains(&e.id()))
        .cloned()
        .collect();
    let count = items.len();
    clipboard.set(&items);
    state.highlight_closest_neighbor(pane.entries(), &ids);
    pane.take_entries(&ids);
    state.clear_selection();
    state.sync(pane.entries());
    count
}

/// Insert fresh copies of the clipboard contents and highlight the first
/// pasted entry. A clipboard holding nothing (or another record kind) is a
/// no-op returning 0.
pub fn paste_from_clipboard<B: Browsable>(
    pane: &mut B,
    state: &mut BrowserState,
    clipboard: &Clipboard,
) -> usize {
    let items: Vec<B::Entry> = clipboard.get();
    if items.is_empty() {
        return 0;
    }
    let count = items.len();
    let first = items.first().map(|i| i.id());
    for item in items {
        pane.insert_entry(item);
    }
    state.set_highlight(first);
    state.sync(pane.entries());
    count
}

/// Remove the source set from the pane and hand it to the caller (the
/// reconcile flow inserts it into a sibling). Highlight and selection are
/// fixed up exactly as for a plain removal.
pub fn take_source_set<B: Browsable>(pane: &mut B, state: &mut BrowserState) -> Vec<B::Entry> {
    let ids = state.source_ids(pane.entries());
    if ids.is_empty() {
        return Vec::new();
    }
    state.highlight_closest_neighbor(pane.entries(), &ids);
    let taken = pane.take_entries(&ids);
    state.clear_selection();
    state.sync(pane.entries());
    taken
}

/// Remove the source set outright. Returns how many entries went away.
pub fn remove_source_set<B: Browsable>(pane: &mut B, state: &mut BrowserState) -> usize {
    take_source_set(pane, state).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Container, Money, Operation, Record, Statement};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn op(d: &str, description: &str, cents: i64) -> Operation {
        Operation::new(
            date(d),
            "card".into(),
            "shop".into(),
            "misc".into(),
            description.into(),
            Money::from_cents(cents),
        )
    }

    fn statement_with_ops() -> Statement {
        let mut s = Statement::new(date("2024-01-31"), Money::zero(), Money::zero());
        s.add_operation(op("2024-01-05", "rent", -80000));
        s.add_operation(op("2024-01-10", "salary", 250000));
        s.add_operation(op("2024-01-20", "groceries", -4300));
        s
    }

    fn field_rows(statement: &Statement) -> Vec<Vec<String>> {
        statement
            .entries()
            .iter()
            .map(|o| {
                (0..Operation::field_defs().len())
                    .map(|i| o.field(i).unwrap().1)
                    .collect()
            })
            .collect()
    }

    fn ready_state(statement: &Statement) -> BrowserState {
        let mut state = BrowserState::new();
        state.set_viewport_rows(10);
        state.sync(statement.entries());
        state
    }

    #[test]
    fn test_copy_highlighted_when_nothing_selected() {
        let statement = statement_with_ops();
        let state = ready_state(&statement);
        let mut clipboard = Clipboard::new();

        assert_eq!(copy_to_clipboard(&statement, &state, &mut clipboard), 1);
        assert_eq!(clipboard.len(), 1);
        let copied: Vec<Operation> = clipboard.get();
        assert_eq!(copied[0].description, "rent");
    }

    #[test]
    fn test_copy_leaves_selection_and_pane_alone() {
        let statement = statement_with_ops();
        let mut state = ready_state(&statement);
        state.select_all(statement.entries());
        let mut clipboard = Clipboard::new();

        assert_eq!(copy_to_clipboard(&statement, &state, &mut clipboard), 3);
        assert_eq!(state.selection_count(), 3);
        assert_eq!(statement.entries().len(), 3);
    }

    #[test]
    fn test_cut_rehighlights_neighbor_and_clears_selection() {
        let mut statement = statement_with_ops();
        let mut state = ready_state(&statement);
        // highlight the middle entry and cut it
        state.move_down(statement.entries());
        let mut clipboard = Clipboard::new();

        assert_eq!(cut_to_clipboard(&mut statement, &mut state, &mut clipboard), 1);
        assert_eq!(statement.entries().len(), 2);
        assert_eq!(state.selection_count(), 0);
        // neighbor below the cut entry takes the highlight
        let idx = state.highlight_index(statement.entries()).unwrap();
        assert_eq!(statement.entries()[idx].description, "groceries");
        // running sum followed the removal
        assert_eq!(statement.running_sum(), Money::from_cents(-84300));
    }

    #[test]
    fn test_cut_then_paste_round_trip() {
        let mut statement = statement_with_ops();
        let before = field_rows(&statement);
        let sum_before = statement.running_sum();

        let mut state = ready_state(&statement);
        state.select_all(statement.entries());
        let mut clipboard = Clipboard::new();

        assert_eq!(cut_to_clipboard(&mut statement, &mut state, &mut clipboard), 3);
        assert!(statement.entries().is_empty());
        assert_eq!(state.highlight_id(), None);
        assert_eq!(statement.running_sum(), Money::zero());

        assert_eq!(paste_from_clipboard(&mut statement, &mut state, &clipboard), 3);
        assert_eq!(field_rows(&statement), before);
        assert_eq!(statement.running_sum(), sum_before);
    }

    #[test]
    fn test_paste_highlights_first_pasted() {
        let mut statement = statement_with_ops();
        let state_src = ready_state(&statement);
        let mut clipboard = Clipboard::new();
        copy_to_clipboard(&statement, &state_src, &mut clipboard);

        let mut other = Statement::new(date("2024-02-29"), Money::zero(), Money::zero());
        other.add_operation(op("2024-02-10", "existing", 1000));
        let mut state = ready_state(&other);

        assert_eq!(paste_from_clipboard(&mut other, &mut state, &clipboard), 1);
        let idx = state.highlight_index(other.entries()).unwrap();
        assert_eq!(other.entries()[idx].description, "rent");
    }

    #[test]
    fn test_paste_empty_clipboard_is_noop() {
        let mut statement = statement_with_ops();
        let mut state = ready_state(&statement);
        let clipboard = Clipboard::new();
        assert_eq!(paste_from_clipboard(&mut statement, &mut state, &clipboard), 0);
        assert_eq!(statement.entries().len(), 3);
    }

    #[test]
    fn test_paste_other_kind_is_noop() {
        let mut statement = statement_with_ops();
        let mut state = ready_state(&statement);
        let mut clipboard = Clipboard::new();
        clipboard.set(&[crate::models::Account::new("courant")]);
        assert_eq!(paste_from_clipboard(&mut statement, &mut state, &clipboard), 0);
    }

    #[test]
    fn test_remove_source_set() {
        let mut statement = statement_with_ops();
        let mut state = ready_state(&statement);
        state.toggle_selected(statement.entries());
        state.move_down(statement.entries());
        state.toggle_selected(statement.entries());

        assert_eq!(remove_source_set(&mut statement, &mut state), 2);
        assert_eq!(statement.entries().len(), 1);
        assert_eq!(state.selection_count(), 0);
        let idx = state.highlight_index(statement.entries()).unwrap();
        assert_eq!(statement.entries()[idx].description, "groceries");
    }

    #[test]
    fn test_take_source_set_feeds_a_sibling() {
        // the reconcile flow: move operations between two statements held by
        // the same account container
        let mut statements: Container<Statement> = Container::new();
        statements.insert(statement_with_ops());
        statements.insert(Statement::new(
            date("2024-02-29"),
            Money::zero(),
            Money::zero(),
        ));

        let mut state = BrowserState::new();
        state.set_viewport_rows(10);
        state.sync(statements.get(0).unwrap().entries());

        let (current, target) = statements.pair_mut(0, 1).unwrap();
        let moved = take_source_set(current, &mut state);
        assert_eq!(moved.len(), 1);
        for entry in moved {
            target.insert_entry(entry);
        }

        let (current, target) = (statements.get(0).unwrap(), statements.get(1).unwrap());
        assert_eq!(current.entries().len(), 2);
        assert_eq!(target.entries().len(), 1);
        assert_eq!(target.running_sum(), Money::from_cents(-80000));
        assert_eq!(current.running_sum(), Money::from_cents(245700));
    }
}
