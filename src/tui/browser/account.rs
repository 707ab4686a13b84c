//! The middle browser: statements in one account
//!
//! A statement's date names its operations file, so dates must stay unique
//! within the account. Creates, edits, pastes and sibling moves all enforce
//! that before touching the container.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use ratatui::layout::Constraint;
use ratatui::widgets::Cell;
use ratatui::Frame;

use crate::audit::{AuditAction, AuditEntry};
use crate::browse::{ops, Browsable, BrowseCommand, BrowserState, ExitOutcome};
use crate::clipboard::Clipboard;
use crate::models::{format_date, parse_date, Account, Money, Record, RecordId, Statement, Wallet};
use crate::storage;
use crate::tui::dialogs::{run_choice, run_form, run_help};
use crate::tui::layout::BrowseLayout;
use crate::tui::terminal::Tui;
use crate::tui::views::{self, StatusLine};

use super::{
    account_synced_deep, clipboard_status, handle_common, next_command, noun, record_values,
    report_outcome, row_map, statement, sync_viewport, BrowseSession, Flash, EXIT_DISCARD,
    EXIT_OPTIONS, EXIT_SAVE,
};

pub fn browse_account(
    session: &mut BrowseSession,
    terminal: &mut Tui,
    wallet: &mut Wallet,
    account_id: RecordId,
    sibling: Option<RecordId>,
) -> Result<ExitOutcome> {
    let mut state = BrowserState::new();
    let mut flash = Flash::new();
    let mut child_last_exited = None;
    if let Some(account) = wallet.accounts().find(account_id) {
        state.sync(account.entries());
    }

    loop {
        // the account can move while we are inside it (a rename re-sorts),
        // so its position is resolved from the id every pass
        let Some(index) = wallet.accounts().position_of(account_id) else {
            return Ok(ExitOutcome::Clean);
        };

        sync_viewport(terminal, &mut state)?;
        terminal.draw(|frame| {
            if let Some(account) = wallet.accounts().get(index) {
                draw(
                    frame,
                    account,
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

        let place = wallet
            .accounts()
            .get(index)
            .map(|a| a.name.clone())
            .unwrap_or_default();
        {
            let Some(account) = wallet.accounts_mut().get_mut(index) else {
                continue;
            };
            if handle_common(account, &mut state, session, &mut flash, command, &place) {
                continue;
            }
        }

        match command {
            BrowseCommand::Open => {
                if let Some(id) = state.highlight_id() {
                    if let Some(account) = wallet.accounts_mut().get_mut(index) {
                        let outcome = statement::browse_statement(
                            session,
                            terminal,
                            account,
                            id,
                            child_last_exited,
                        )?;
                        child_last_exited = Some(id);
                        report_outcome(outcome, &mut flash);
                    }
                    if let Some(account) = wallet.accounts().get(index) {
                        state.sync(account.entries());
                    }
                }
            }
            BrowseCommand::Create => {
                create_statement(session, terminal, wallet, index, &mut state, &mut flash)?;
            }
            BrowseCommand::Edit => {
                edit_statement(session, terminal, wallet, index, &mut state, &mut flash)?;
            }
            BrowseCommand::Paste => {
                paste_statements(session, wallet, index, &mut state, &mut flash);
            }
            BrowseCommand::Remove => {
                remove_statements(session, terminal, wallet, index, &mut state, &mut flash)?;
            }
            BrowseCommand::Reconcile => {
                reconcile_statements(
                    session,
                    wallet,
                    index,
                    account_id,
                    sibling,
                    &mut state,
                    &mut flash,
                );
            }
            BrowseCommand::Save => {
                if let Some(account) = wallet.accounts_mut().get_mut(index) {
                    let name = account.name.clone();
                    match storage::save_account(session.paths, account) {
                        Ok(()) => {
                            let _ = session.audit.log(&AuditEntry::new(
                                AuditAction::Save,
                                "account",
                                1,
                                name,
                            ));
                            flash.set("Account saved");
                        }
                        Err(e) => flash.set(format!("Save failed: {}", e)),
                    }
                }
            }
            BrowseCommand::Help => {
                run_help(terminal, &session.events, &mut |frame| {
                    if let Some(account) = wallet.accounts().get(index) {
                        draw(
                            frame,
                            account,
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
                    try_exit(session, terminal, wallet, index, &state, &mut flash)?
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
    account: &Account,
    state: &BrowserState,
    clipboard: &Clipboard,
    symbol: &str,
    message: Option<&str>,
) {
    let layout = BrowseLayout::new(frame.area());
    views::render_info(
        frame,
        layout.info,
        &format!("Account {}", account.name),
        views::account_info_lines(account, symbol),
    );
    views::render_entry_table(
        frame,
        layout.table,
        "Statements",
        &["Date", "Start", "End", "Diff", "Error"],
        &[
            Constraint::Length(12),
            Constraint::Length(13),
            Constraint::Length(13),
            Constraint::Length(13),
            Constraint::Length(13),
        ],
        account.entries(),
        state,
        |statement| {
            let diff = statement.balance_diff();
            let error = statement.balance_error();
            vec![
                Cell::from(format_date(statement.date)),
                Cell::from(statement.bal_start.format_with_symbol(symbol)),
                Cell::from(statement.bal_end.format_with_symbol(symbol)),
                views::amount_cell(diff.format_with_symbol(symbol), diff.is_negative()),
                views::amount_cell(error.format_with_symbol(symbol), !error.is_zero()),
            ]
        },
    );
    views::status_bar::render(
        frame,
        layout.status,
        &StatusLine {
            synced: account_synced_deep(account),
            entry_count: account.entries().len(),
            selected: state.selection_count(),
            clipboard: clipboard_status(clipboard),
            message,
        },
    );
}

/// Statement dates key the operations files; a duplicate would make two
/// statements share one file
fn date_check(taken: &[NaiveDate], raw: &str) -> std::result::Result<(), String> {
    match parse_date(raw.trim()) {
        Ok(date) if taken.contains(&date) => Err(format!(
            "A statement for {} already exists",
            format_date(date)
        )),
        _ => Ok(()),
    }
}

fn create_statement(
    session: &mut BrowseSession,
    terminal: &mut Tui,
    wallet: &mut Wallet,
    index: usize,
    state: &mut BrowserState,
    flash: &mut Flash,
) -> Result<()> {
    let (initial, taken, account_name) = {
        let Some(account) = wallet.accounts().get(index) else {
            return Ok(());
        };
        // a new month starts where the last one closed
        let last_end = account
            .statements()
            .items()
            .last()
            .map(|s| s.bal_end)
            .unwrap_or(Money::zero());
        let initial = vec![
            format_date(Local::now().date_naive()),
            last_end.to_decimal_string(),
            last_end.to_decimal_string(),
        ];
        let taken: Vec<NaiveDate> = account.statements().iter().map(|s| s.date).collect();
        (initial, taken, account.name.clone())
    };
    let mut check = |values: &[String]| date_check(&taken, &values[0]);
    let submitted = run_form(
        terminal,
        &session.events,
        &mut |frame| {
            if let Some(account) = wallet.accounts().get(index) {
                draw(
                    frame,
                    account,
                    state,
                    &session.clipboard,
                    &session.settings.currency_symbol,
                    None,
                );
            }
        },
        "New Statement",
        Statement::field_defs(),
        initial,
        &mut check,
    )?;

    if let Some(values) = submitted {
        match Statement::from_row(&row_map::<Statement>(&values)) {
            Ok(new_statement) => {
                let id = new_statement.id();
                if let Some(account) = wallet.accounts_mut().get_mut(index) {
                    account.insert_entry(new_statement);
                    state.set_highlight(Some(id));
                    state.sync(account.entries());
                }
                let _ = session.audit.log(&AuditEntry::new(
                    AuditAction::Create,
                    "statement",
                    1,
                    format!("{} {}", account_name, values[0].trim()),
                ));
                flash.set("Statement created");
            }
            Err(e) => flash.set(format!("Could not create statement: {}", e)),
        }
    }
    Ok(())
}

fn edit_statement(
    session: &mut BrowseSession,
    terminal: &mut Tui,
    wallet: &mut Wallet,
    index: usize,
    state: &mut BrowserState,
    flash: &mut Flash,
) -> Result<()> {
    let Some(id) = state.highlight_id() else {
        return Ok(());
    };
    let (initial, taken, account_name) = {
        let Some(account) = wallet.accounts().get(index) else {
            return Ok(());
        };
        let Some(current) = account.statements().find(id) else {
            return Ok(());
        };
        let taken: Vec<NaiveDate> = account
            .statements()
            .iter()
            .filter(|s| s.id() != id)
            .map(|s| s.date)
            .collect();
        (record_values(current), taken, account.name.clone())
    };
    let mut check = |values: &[String]| date_check(&taken, &values[0]);
    let submitted = run_form(
        terminal,
        &session.events,
        &mut |frame| {
            if let Some(account) = wallet.accounts().get(index) {
                draw(
                    frame,
                    account,
                    state,
                    &session.clipboard,
                    &session.settings.currency_symbol,
                    None,
                );
            }
        },
        "Edit Statement",
        Statement::field_defs(),
        initial,
        &mut check,
    )?;

    if let Some(values) = submitted {
        let changed = wallet
            .accounts_mut()
            .get_mut(index)
            .map(|account| account.apply_edit(id, &values))
            .unwrap_or(false);
        if changed {
            if let Some(account) = wallet.accounts().get(index) {
                state.sync(account.entries());
            }
            let _ = session.audit.log(&AuditEntry::new(
                AuditAction::Edit,
                "statement",
                1,
                format!("{} {}", account_name, values[0].trim()),
            ));
            flash.set("Statement updated");
        } else {
            flash.set("Nothing changed");
        }
    }
    Ok(())
}

fn paste_statements(
    session: &mut BrowseSession,
    wallet: &mut Wallet,
    index: usize,
    state: &mut BrowserState,
    flash: &mut Flash,
) {
    let items: Vec<Statement> = session.clipboard.get();
    if items.is_empty() {
        flash.set("Nothing to paste here");
        return;
    }
    let account_name = {
        let Some(account) = wallet.accounts().get(index) else {
            return;
        };
        let mut seen: Vec<NaiveDate> = account.statements().iter().map(|s| s.date).collect();
        for pasted in &items {
            if seen.contains(&pasted.date) {
                flash.set(format!(
                    "A statement for {} already exists",
                    format_date(pasted.date)
                ));
                return;
            }
            seen.push(pasted.date);
        }
        account.name.clone()
    };
    let n = items.len();
    let first = items.first().map(|s| s.id());
    if let Some(account) = wallet.accounts_mut().get_mut(index) {
        for pasted in items {
            account.insert_entry(pasted);
        }
        state.set_highlight(first);
        state.sync(account.entries());
    }
    let _ = session.audit.log(&AuditEntry::new(
        AuditAction::Paste,
        "statement",
        n,
        account_name,
    ));
    flash.set(format!("Pasted {}", noun::<Statement>(n)));
}

fn remove_statements(
    session: &mut BrowseSession,
    terminal: &mut Tui,
    wallet: &mut Wallet,
    index: usize,
    state: &mut BrowserState,
    flash: &mut Flash,
) -> Result<()> {
    let n = wallet
        .accounts()
        .get(index)
        .map(|account| state.source_ids(account.entries()).len())
        .unwrap_or(0);
    if n == 0 {
        return Ok(());
    }
    if session.settings.confirm_remove {
        let message = format!("Remove {}?", noun::<Statement>(n));
        let choice = run_choice(
            terminal,
            &session.events,
            &mut |frame| {
                if let Some(account) = wallet.accounts().get(index) {
                    draw(
                        frame,
                        account,
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
    if let Some(account) = wallet.accounts_mut().get_mut(index) {
        let name = account.name.clone();
        let removed = ops::remove_source_set(account, state);
        if removed > 0 {
            let _ = session.audit.log(&AuditEntry::new(
                AuditAction::Remove,
                "statement",
                removed,
                name,
            ));
            flash.set(format!("Removed {}", noun::<Statement>(removed)));
        }
    }
    Ok(())
}

/// Move the source set into the account the user last visited, then persist
/// that account so the move cannot be half-lost
fn reconcile_statements(
    session: &mut BrowseSession,
    wallet: &mut Wallet,
    index: usize,
    account_id: RecordId,
    sibling: Option<RecordId>,
    state: &mut BrowserState,
    flash: &mut Flash,
) {
    let Some(sibling_id) = sibling else {
        flash.set("Open and leave a sibling account first");
        return;
    };
    if sibling_id == account_id {
        flash.set("The last visited account is this one");
        return;
    }
    let Some(target_index) = wallet.accounts().position_of(sibling_id) else {
        flash.set("The last visited account is gone");
        return;
    };

    {
        let (Some(source), Some(target)) = (
            wallet.accounts().get(index),
            wallet.accounts().get(target_index),
        ) else {
            return;
        };
        let source_ids = state.source_ids(source.entries());
        if source_ids.is_empty() {
            return;
        }
        for moved in source
            .entries()
            .iter()
            .filter(|s| source_ids.contains(&s.id()))
        {
            if target.statements().iter().any(|t| t.date == moved.date) {
                flash.set(format!(
                    "{} already has a statement for {}",
                    target.name,
                    format_date(moved.date)
                ));
                return;
            }
        }
    }

    let Some((source, target)) = wallet.accounts_mut().pair_mut(index, target_index) else {
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
    let target_name = target.name.clone();
    match storage::save_account(session.paths, target) {
        Ok(()) => {
            let _ = session.audit.log(&AuditEntry::new(
                AuditAction::Reconcile,
                "statement",
                n,
                format!("to {}", target_name),
            ));
            flash.set(format!("Moved {} to {}", noun::<Statement>(n), target_name));
        }
        Err(e) => flash.set(format!(
            "Moved {} to {} but saving it failed: {}",
            noun::<Statement>(n),
            target_name,
            e
        )),
    }
}

fn try_exit(
    session: &mut BrowseSession,
    terminal: &mut Tui,
    wallet: &mut Wallet,
    index: usize,
    state: &BrowserState,
    flash: &mut Flash,
) -> Result<Option<ExitOutcome>> {
    let message = {
        let Some(account) = wallet.accounts().get(index) else {
            return Ok(Some(ExitOutcome::Clean));
        };
        if account_synced_deep(account) {
            return Ok(Some(ExitOutcome::Clean));
        }
        format!("Account {} has unsaved changes", account.name)
    };
    let choice = run_choice(
        terminal,
        &session.events,
        &mut |frame| {
            if let Some(account) = wallet.accounts().get(index) {
                draw(
                    frame,
                    account,
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

    let Some(account) = wallet.accounts_mut().get_mut(index) else {
        return Ok(Some(ExitOutcome::Clean));
    };
    match choice {
        Some(EXIT_SAVE) => {
            let name = account.name.clone();
            match storage::save_account(session.paths, account) {
                Ok(()) => {
                    let _ = session
                        .audit
                        .log(&AuditEntry::new(AuditAction::Save, "account", 1, name));
                    Ok(Some(ExitOutcome::Saved))
                }
                Err(e) => {
                    flash.set(format!("Save failed: {}", e));
                    Ok(None)
                }
            }
        }
        Some(EXIT_DISCARD) => {
            let name = account.name.clone();
            match storage::reload_account(session.paths, account) {
                Ok(()) => {
                    let _ = session
                        .audit
                        .log(&AuditEntry::new(AuditAction::Reload, "account", 1, name));
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
