//! The innermost browser: operations in one statement
//!
//! Operations are leaves, so Enter edits the highlighted row instead of
//! descending. Everything else mirrors the levels above, with moves landing
//! in the sibling statement the user last visited.

use anyhow::Result;
use ratatui::layout::Constraint;
use ratatui::widgets::Cell;
use ratatui::Frame;

use crate::audit::{AuditAction, AuditEntry};
use crate::browse::{ops, Browsable, BrowseCommand, BrowserState, ExitOutcome};
use crate::clipboard::Clipboard;
use crate::models::{format_date, Account, Operation, Record, RecordId, Statement};
use crate::storage;
use crate::tui::dialogs::{run_choice, run_form, run_help};
use crate::tui::layout::BrowseLayout;
use crate::tui::terminal::Tui;
use crate::tui::views::{self, StatusLine};

use super::{
    clipboard_status, handle_common, next_command, noun, record_values, row_map, sync_viewport,
    BrowseSession, Flash, EXIT_DISCARD, EXIT_OPTIONS, EXIT_SAVE,
};

pub fn browse_statement(
    session: &mut BrowseSession,
    terminal: &mut Tui,
    account: &mut Account,
    statement_id: RecordId,
    sibling: Option<RecordId>,
) -> Result<ExitOutcome> {
    let mut state = BrowserState::new();
    let mut flash = Flash::new();
    if let Some(found) = account.statements().find(statement_id) {
        state.sync(found.entries());
    }

    loop {
        // an edited date re-sorts the statement under us
        let Some(index) = account.statements().position_of(statement_id) else {
            return Ok(ExitOutcome::Clean);
        };

        sync_viewport(terminal, &mut state)?;
        let account_name = account.name.clone();
        terminal.draw(|frame| {
            if let Some(current) = account.statements().get(index) {
                draw(
                    frame,
                    &account_name,
                    current,
                    &state,
                    &session.clipboard,
                    &session.settings.currency_symbol,
                    flash.text(),
                );
            }
        })?;

        let Some(command) = next_command(&session.events, &mut flash)? else {
            continue;
        };

        let place = format!(
            "{} {}",
            account_name,
            account
                .statements()
                .get(index)
                .map(|s| format_date(s.date))
                .unwrap_or_default()
        );
        {
            let Some(current) = account.statements_mut().get_mut(index) else {
                continue;
            };
            if handle_common(current, &mut state, session, &mut flash, command, &place) {
                continue;
            }
        }

        match command {
            // leaf level: opening a row means editing it
            BrowseCommand::Open | BrowseCommand::Edit => {
                edit_operation(session, terminal, account, index, &mut state, &mut flash)?;
            }
            BrowseCommand::Create => {
                create_operation(session, terminal, account, index, &mut state, &mut flash)?;
            }
            BrowseCommand::Paste => {
                paste_operations(session, account, index, &place, &mut state, &mut flash);
            }
            BrowseCommand::Remove => {
                remove_operations(session, terminal, account, index, &mut state, &mut flash)?;
            }
            BrowseCommand::Reconcile => {
                reconcile_operations(
                    session,
                    account,
                    statement_id,
                    sibling,
                    &mut state,
                    &mut flash,
                );
            }
            BrowseCommand::Save => {
                if let Some(current) = account.statements_mut().get_mut(index) {
                    match storage::save_statement(session.paths, &account_name, current) {
                        Ok(()) => {
                            let _ = session.audit.log(&AuditEntry::new(
                                AuditAction::Save,
                                "statement",
                                1,
                                &place,
                            ));
                            flash.set("Statement saved");
                        }
                        Err(e) => flash.set(format!("Save failed: {}", e)),
                    }
                }
            }
            BrowseCommand::Help => {
                run_help(terminal, &session.events, &mut |frame| {
                    if let Some(current) = account.statements().get(index) {
                        draw(
                            frame,
                            &account_name,
                            current,
                            &state,
                            &session.clipboard,
                            &session.settings.currency_symbol,
                            None,
                        );
                    }
                })?;
            }
            BrowseCommand::ClearSelection if state.selection_count() > 0 => {
                state.clear_selection();
            }
            BrowseCommand::ClearSelection | BrowseCommand::Exit => {
                if let Some(outcome) =
                    try_exit(session, terminal, account, index, &state, &mut flash)?
                {
                    return Ok(outcome);
                }
            }
            _ => {}
        }
    }
}

fn draw(
    frame: &mut Frame,
    account_name: &str,
    statement: &Statement,
    state: &BrowserState,
    clipboard: &Clipboard,
    symbol: &str,
    message: Option<&str>,
) {
    let layout = BrowseLayout::new(frame.area());
    views::render_info(
        frame,
        layout.info,
        &format!("{} / {}", account_name, format_date(statement.date)),
        views::statement_info_lines(statement, symbol),
    );
    views::render_entry_table(
        frame,
        layout.table,
        "Operations",
        &["Date", "Mode", "Tier", "Category", "Description", "Amount"],
        &[
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Min(18),
            Constraint::Length(13),
        ],
        statement.entries(),
        state,
        |operation| {
            vec![
                Cell::from(format_date(operation.date)),
                Cell::from(views::truncate_text(&operation.mode, 10)),
                Cell::from(views::truncate_text(&operation.tier, 14)),
                Cell::from(views::truncate_text(&operation.category, 14)),
                Cell::from(views::truncate_text(&operation.description, 40)),
                views::amount_cell(
                    operation.amount.format_with_symbol(symbol),
                    operation.amount.is_negative(),
                ),
            ]
        },
    );
    views::status_bar::render(
        frame,
        layout.status,
        &StatusLine {
            synced: statement.is_synced(),
            entry_count: statement.entries().len(),
            selected: state.selection_count(),
            clipboard: clipboard_status(clipboard),
            message,
        },
    );
}

fn create_operation(
    session: &mut BrowseSession,
    terminal: &mut Tui,
    account: &mut Account,
    index: usize,
    state: &mut BrowserState,
    flash: &mut Flash,
) -> Result<()> {
    let initial = {
        let Some(current) = account.statements().get(index) else {
            return Ok(());
        };
        let mut values = vec![String::new(); Operation::field_defs().len()];
        values[0] = format_date(current.date);
        values
    };
    let account_name = account.name.clone();
    let mut check = |_: &[String]| Ok(());
    let submitted = run_form(
        terminal,
        &session.events,
        &mut |frame| {
            if let Some(current) = account.statements().get(index) {
                draw(
                    frame,
                    &account_name,
                    current,
                    state,
                    &session.clipboard,
                    &session.settings.currency_symbol,
                    None,
                );
            }
        },
        "New Operation",
        Operation::field_defs(),
        initial,
        &mut check,
    )?;

    if let Some(values) = submitted {
        match Operation::from_row(&row_map::<Operation>(&values)) {
            Ok(new_operation) => {
                let id = new_operation.id();
                if let Some(current) = account.statements_mut().get_mut(index) {
                    current.insert_entry(new_operation);
                    state.set_highlight(Some(id));
                    state.sync(current.entries());
                }
                let _ = session.audit.log(&AuditEntry::new(
                    AuditAction::Create,
                    "operation",
                    1,
                    account_name,
                ));
                flash.set("Operation created");
            }
            Err(e) => flash.set(format!("Could not create operation: {}", e)),
        }
    }
    Ok(())
}

fn edit_operation(
    session: &mut BrowseSession,
    terminal: &mut Tui,
    account: &mut Account,
    index: usize,
    state: &mut BrowserState,
    flash: &mut Flash,
) -> Result<()> {
    let Some(id) = state.highlight_id() else {
        return Ok(());
    };
    let initial = {
        let Some(current) = account.statements().get(index) else {
            return Ok(());
        };
        let Some(operation) = current.operations().find(id) else {
            return Ok(());
        };
        record_values(operation)
    };
    let account_name = account.name.clone();
    let mut check = |_: &[String]| Ok(());
    let submitted = run_form(
        terminal,
        &session.events,
        &mut |frame| {
            if let Some(current) = account.statements().get(index) {
                draw(
                    frame,
                    &account_name,
                    current,
                    state,
                    &session.clipboard,
                    &session.settings.currency_symbol,
                    None,
                );
            }
        },
        "Edit Operation",
        Operation::field_defs(),
        initial,
        &mut check,
    )?;

    if let Some(values) = submitted {
        let changed = account
            .statements_mut()
            .get_mut(index)
            .map(|current| current.apply_edit(id, &values))
            .unwrap_or(false);
        if changed {
            if let Some(current) = account.statements().get(index) {
                state.sync(current.entries());
            }
            let _ = session.audit.log(&AuditEntry::new(
                AuditAction::Edit,
                "operation",
                1,
                account_name,
            ));
            flash.set("Operation updated");
        } else {
            flash.set("Nothing changed");
        }
    }
    Ok(())
}

fn paste_operations(
    session: &mut BrowseSession,
    account: &mut Account,
    index: usize,
    place: &str,
    state: &mut BrowserState,
    flash: &mut Flash,
) {
    let Some(current) = account.statements_mut().get_mut(index) else {
        return;
    };
    let n = ops::paste_from_clipboard(current, state, &session.clipboard);
    if n > 0 {
        let _ = session.audit.log(&AuditEntry::new(
            AuditAction::Paste,
            "operation",
            n,
            place,
        ));
        flash.set(format!("Pasted {}", noun::<Operation>(n)));
    } else {
        flash.set("Nothing to paste here");
    }
}

fn remove_operations(
    session: &mut BrowseSession,
    terminal: &mut Tui,
    account: &mut Account,
    index: usize,
    state: &mut BrowserState,
    flash: &mut Flash,
) -> Result<()> {
    let n = account
        .statements()
        .get(index)
        .map(|current| state.source_ids(current.entries()).len())
        .unwrap_or(0);
    if n == 0 {
        return Ok(());
    }
    let account_name = account.name.clone();
    if session.settings.confirm_remove {
        let message = format!("Remove {}?", noun::<Operation>(n));
        let choice = run_choice(
            terminal,
            &session.events,
            &mut |frame| {
                if let Some(current) = account.statements().get(index) {
                    draw(
                        frame,
                        &account_name,
                        current,
                        state,
                        &session.clipboard,
                        &session.settings.currency_symbol,
                        None,
                    );
                }
            },
            "Remove",
            &message,
            &["Remove", "Cancel"],
        )?;
        if choice != Some(0) {
            flash.set("Removal cancelled");
            return Ok(());
        }
    }
    if let Some(current) = account.statements_mut().get_mut(index) {
        let removed = ops::remove_source_set(current, state);
        if removed > 0 {
            let _ = session.audit.log(&AuditEntry::new(
                AuditAction::Remove,
                "operation",
                removed,
                account_name,
            ));
            flash.set(format!("Removed {}", noun::<Operation>(removed)));
        }
    }
    Ok(())
}

/// Move the source set into the statement the user last visited and persist
/// that statement; the source stays unsaved until the user saves or exits
fn reconcile_operations(
    session: &mut BrowseSession,
    account: &mut Account,
    statement_id: RecordId,
    sibling: Option<RecordId>,
    state: &mut BrowserState,
    flash: &mut Flash,
) {
    let Some(sibling_id) = sibling else {
        flash.set("Open and leave a sibling statement first");
        return;
    };
    if sibling_id == statement_id {
        flash.set("The last visited statement is this one");
        return;
    }
    let (Some(i), Some(j)) = (
        account.statements().position_of(statement_id),
        account.statements().position_of(sibling_id),
    ) else {
        flash.set("The last visited statement is gone");
        return;
    };
    let account_name = account.name.clone();
    let Some((source, target)) = account.statements_mut().pair_mut(i, j) else {
        return;
    };
    let moved = ops::take_source_set(source, state);
    let n = moved.len();
    if n == 0 {
        return;
    }
    for entry in moved {
        target.insert_entry(entry);
    }
    let target_date = format_date(target.date);
    match storage::save_statement(session.paths, &account_name, target) {
        Ok(()) => {
            let _ = session.audit.log(&AuditEntry::new(
                AuditAction::Reconcile,
                "operation",
                n,
                format!("{} to {}", account_name, target_date),
            ));
            flash.set(format!("Moved {} to {}", noun::<Operation>(n), target_date));
        }
        Err(e) => flash.set(format!(
            "Moved {} to {} but saving it failed: {}",
            noun::<Operation>(n),
            target_date,
            e
        )),
    }
}

fn try_exit(
    session: &mut BrowseSession,
    terminal: &mut Tui,
    account: &mut Account,
    index: usize,
    state: &BrowserState,
    flash: &mut Flash,
) -> Result<Option<ExitOutcome>> {
    let account_name = account.name.clone();
    let message = {
        let Some(current) = account.statements().get(index) else {
            return Ok(Some(ExitOutcome::Clean));
        };
        if current.is_synced() {
            return Ok(Some(ExitOutcome::Clean));
        }
        format!(
            "Statement {} has unsaved changes",
            format_date(current.date)
        )
    };
    let choice = run_choice(
        terminal,
        &session.events,
        &mut |frame| {
            if let Some(current) = account.statements().get(index) {
                draw(
                    frame,
                    &account_name,
                    current,
                    state,
                    &session.clipboard,
                    &session.settings.currency_symbol,
                    None,
                );
            }
        },
        "Unsaved changes",
        &message,
        &EXIT_OPTIONS,
    )?;

    let Some(current) = account.statements_mut().get_mut(index) else {
        return Ok(Some(ExitOutcome::Clean));
    };
    match choice {
        Some(EXIT_SAVE) => match storage::save_statement(session.paths, &account_name, current) {
            Ok(()) => {
                let _ = session.audit.log(&AuditEntry::new(
                    AuditAction::Save,
                    "statement",
                    1,
                    format!("{} {}", account_name, format_date(current.date)),
                ));
                Ok(Some(ExitOutcome::Saved))
            }
            Err(e) => {
                flash.set(format!("Save failed: {}", e));
                Ok(None)
            }
        },
        Some(EXIT_DISCARD) => {
            match storage::reload_statement(session.paths, &account_name, current) {
                Ok(()) => {
                    let _ = session.audit.log(&AuditEntry::new(
                        AuditAction::Reload,
                        "statement",
                        1,
                        format!("{} {}", account_name, format_date(current.date)),
                    ));
                    Ok(Some(ExitOutcome::Discarded))
                }
                Err(e) => {
                    flash.set(format!("Reload failed: {}", e));
                    Ok(None)
                }
            }
        }
        _ => Ok(None),
    }
}
