//! The top-level browser: accounts in the wallet
//!
//! Account names double as directory names on disk, so creates and renames
//! are checked for collisions here, and pasted accounts are renamed with a
//! numeric suffix instead of being rejected.

use anyhow::Result;
use ratatui::layout::Constraint;
use ratatui::widgets::Cell;
use ratatui::Frame;

use crate::audit::{AuditAction, AuditEntry};
use crate::browse::{ops, Browsable, BrowseCommand, BrowserState};
use crate::clipboard::Clipboard;
use crate::models::{valid_account_name, Account, Record, Wallet};
use crate::storage;
use crate::tui::dialogs::{run_choice, run_form, run_help};
use crate::tui::layout::BrowseLayout;
use crate::tui::terminal::Tui;
use crate::tui::views::{self, StatusLine};

use super::{
    account, clipboard_status, handle_common, next_command, noun, record_values, report_outcome,
    row_map, sync_viewport, wallet_synced_deep, BrowseSession, Flash, EXIT_DISCARD, EXIT_OPTIONS,
    EXIT_SAVE,
};

pub fn browse_wallet(
    session: &mut BrowseSession,
    terminal: &mut Tui,
    wallet: &mut Wallet,
) -> Result<()> {
    let mut state = BrowserState::new();
    let mut flash = Flash::new();
    let mut last_exited = None;
    state.sync(wallet.entries());

    loop {
        sync_viewport(terminal, &mut state)?;
        terminal.draw(|frame| {
            draw(
                frame,
                wallet,
                &state,
                &session.clipboard,
                &session.settings.currency_symbol,
                flash.text(),
            );
        })?;

        let Some(command) = next_command(&session.events, &mut flash)? else {
            continue;
        };
        let place = wallet.name.clone();
        if handle_common(wallet, &mut state, session, &mut flash, command, &place) {
            continue;
        }

        match command {
            BrowseCommand::Open => {
                if let Some(id) = state.highlight_id() {
                    let outcome =
                        account::browse_account(session, terminal, wallet, id, last_exited)?;
                    last_exited = Some(id);
                    report_outcome(outcome, &mut flash);
                    state.sync(wallet.entries());
                }
            }
            BrowseCommand::Create => {
                create_account(session, terminal, wallet, &mut state, &mut flash)?;
            }
            BrowseCommand::Edit => {
                edit_account(session, terminal, wallet, &mut state, &mut flash)?;
            }
            BrowseCommand::Paste => {
                paste_accounts(session, wallet, &mut state, &mut flash);
            }
            BrowseCommand::Remove => {
                remove_accounts(session, terminal, wallet, &mut state, &mut flash)?;
            }
            BrowseCommand::Reconcile => {
                flash.set("There is no sibling wallet to move accounts into");
            }
            BrowseCommand::Save => save_now(session, wallet, &mut flash),
            BrowseCommand::Help => {
                run_help(terminal, &session.events, &mut |frame| {
                    draw(
                        frame,
                        wallet,
                        &state,
                        &session.clipboard,
                        &session.settings.currency_symbol,
                        None,
                    );
                })?;
            }
            BrowseCommand::ClearSelection if state.selection_count() > 0 => {
                state.clear_selection();
            }
            BrowseCommand::ClearSelection | BrowseCommand::Exit => {
                if try_exit(session, terminal, wallet, &state, &mut flash)? {
                    break;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn draw(
    frame: &mut Frame,
    wallet: &Wallet,
    state: &BrowserState,
    clipboard: &Clipboard,
    symbol: &str,
    message: Option<&str>,
) {
    let layout = BrowseLayout::new(frame.area());
    views::render_info(
        frame,
        layout.info,
        &format!("Wallet {}", wallet.name),
        views::wallet_info_lines(wallet, symbol),
    );
    views::render_entry_table(
        frame,
        layout.table,
        "Accounts",
        &["Name", "Balance", "Statements"],
        &[
            Constraint::Min(16),
            Constraint::Length(14),
            Constraint::Length(12),
        ],
        wallet.entries(),
        state,
        |account| {
            let balance = account.balance();
            vec![
                Cell::from(views::truncate_text(&account.name, 24)),
                views::amount_cell(balance.format_with_symbol(symbol), balance.is_negative()),
                Cell::from(account.statements().len().to_string()),
            ]
        },
    );
    views::status_bar::render(
        frame,
        layout.status,
        &StatusLine {
            synced: wallet_synced_deep(wallet),
            entry_count: wallet.entries().len(),
            selected: state.selection_count(),
            clipboard: clipboard_status(clipboard),
            message,
        },
    );
}

/// Reject empty names, path separators and collisions with `taken`
fn name_check(taken: &[String], raw: &str) -> std::result::Result<(), String> {
    let name = raw.trim();
    if !valid_account_name(name) {
        return Err("Account names cannot be empty or contain a path separator".to_string());
    }
    if taken.iter().any(|t| t == name) {
        return Err(format!("An account named {} already exists", name));
    }
    Ok(())
}

/// `base`, or `base 2`, `base 3`, ... whichever is free
fn unique_name(wallet: &Wallet, base: &str) -> String {
    let exists = |name: &str| wallet.accounts().iter().any(|a| a.name == name);
    if !exists(base) {
        return base.to_string();
    }
    let mut k = 2;
    loop {
        let candidate = format!("{} {}", base, k);
        if !exists(&candidate) {
            return candidate;
        }
        k += 1;
    }
}

fn create_account(
    session: &mut BrowseSession,
    terminal: &mut Tui,
    wallet: &mut Wallet,
    state: &mut BrowserState,
    flash: &mut Flash,
) -> Result<()> {
    let taken: Vec<String> = wallet.accounts().iter().map(|a| a.name.clone()).collect();
    let mut check = |values: &[String]| name_check(&taken, &values[0]);
    let submitted = run_form(
        terminal,
        &session.events,
        &mut |frame| {
            draw(
                frame,
                wallet,
                state,
                &session.clipboard,
                &session.settings.currency_symbol,
                None,
            );
        },
        "New Account",
        Account::field_defs(),
        vec![String::new()],
        &mut check,
    )?;

    if let Some(values) = submitted {
        match Account::from_row(&row_map::<Account>(&values)) {
            Ok(account) => {
                let id = account.id();
                let name = account.name.clone();
                wallet.insert_entry(account);
                state.set_highlight(Some(id));
                state.sync(wallet.entries());
                let _ = session
                    .audit
                    .log(&AuditEntry::new(AuditAction::Create, "account", 1, &name));
                flash.set(format!("Created account {}", name));
            }
            Err(e) => flash.set(format!("Could not create account: {}", e)),
        }
    }
    Ok(())
}

fn edit_account(
    session: &mut BrowseSession,
    terminal: &mut Tui,
    wallet: &mut Wallet,
    state: &mut BrowserState,
    flash: &mut Flash,
) -> Result<()> {
    let Some(id) = state.highlight_id() else {
        return Ok(());
    };
    let Some(current) = wallet.accounts().find(id) else {
        return Ok(());
    };
    let initial = record_values(current);
    let taken: Vec<String> = wallet
        .accounts()
        .iter()
        .filter(|a| a.id() != id)
        .map(|a| a.name.clone())
        .collect();
    let mut check = |values: &[String]| name_check(&taken, &values[0]);
    let submitted = run_form(
        terminal,
        &session.events,
        &mut |frame| {
            draw(
                frame,
                wallet,
                state,
                &session.clipboard,
                &session.settings.currency_symbol,
                None,
            );
        },
        "Edit Account",
        Account::field_defs(),
        initial,
        &mut check,
    )?;

    if let Some(values) = submitted {
        if wallet.apply_edit(id, &values) {
            state.sync(wallet.entries());
            let _ = session.audit.log(&AuditEntry::new(
                AuditAction::Edit,
                "account",
                1,
                values[0].trim(),
            ));
            flash.set("Account renamed");
        } else {
            flash.set("Nothing changed");
        }
    }
    Ok(())
}

fn paste_accounts(
    session: &mut BrowseSession,
    wallet: &mut Wallet,
    state: &mut BrowserState,
    flash: &mut Flash,
) {
    let items: Vec<Account> = session.clipboard.get();
    if items.is_empty() {
        flash.set("Nothing to paste here");
        return;
    }
    let n = items.len();
    let mut first = None;
    for mut account in items {
        account.name = unique_name(wallet, &account.name);
        if first.is_none() {
            first = Some(account.id());
        }
        wallet.insert_entry(account);
    }
    state.set_highlight(first);
    state.sync(wallet.entries());
    let _ = session.audit.log(&AuditEntry::new(
        AuditAction::Paste,
        "account",
        n,
        wallet.name.clone(),
    ));
    flash.set(format!("Pasted {}", noun::<Account>(n)));
}

fn remove_accounts(
    session: &mut BrowseSession,
    terminal: &mut Tui,
    wallet: &mut Wallet,
    state: &mut BrowserState,
    flash: &mut Flash,
) -> Result<()> {
    let n = state.source_ids(wallet.entries()).len();
    if n == 0 {
        return Ok(());
    }
    if session.settings.confirm_remove {
        let message = format!("Remove {}?", noun::<Account>(n));
        let choice = run_choice(
            terminal,
            &session.events,
            &mut |frame| {
                draw(
                    frame,
                    wallet,
                    state,
                    &session.clipboard,
                    &session.settings.currency_symbol,
                    None,
                );
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
    let removed = ops::remove_source_set(wallet, state);
    if removed > 0 {
        let _ = session.audit.log(&AuditEntry::new(
            AuditAction::Remove,
            "account",
            removed,
            wallet.name.clone(),
        ));
        flash.set(format!("Removed {}", noun::<Account>(removed)));
    }
    Ok(())
}

fn save_now(session: &mut BrowseSession, wallet: &mut Wallet, flash: &mut Flash) {
    match storage::save_wallet(session.paths, wallet) {
        Ok(()) => {
            let _ = session.audit.log(&AuditEntry::new(
                AuditAction::Save,
                "wallet",
                1,
                wallet.name.clone(),
            ));
            flash.set("Wallet saved");
        }
        Err(e) => flash.set(format!("Save failed: {}", e)),
    }
}

/// Returns true when the loop should end. With pending changes the user
/// picks between staying, saving first, or walking away from the edits.
fn try_exit(
    session: &mut BrowseSession,
    terminal: &mut Tui,
    wallet: &mut Wallet,
    state: &BrowserState,
    flash: &mut Flash,
) -> Result<bool> {
    if wallet_synced_deep(wallet) {
        return Ok(true);
    }
    let choice = run_choice(
        terminal,
        &session.events,
        &mut |frame| {
            draw(
                frame,
                wallet,
                state,
                &session.clipboard,
                &session.settings.currency_symbol,
                None,
            );
        },
        "Unsaved changes",
        "The wallet has unsaved changes",
        &EXIT_OPTIONS,
    )?;
    match choice {
        Some(EXIT_SAVE) => match storage::save_wallet(session.paths, wallet) {
            Ok(()) => {
                let _ = session.audit.log(&AuditEntry::new(
                    AuditAction::Save,
                    "wallet",
                    1,
                    wallet.name.clone(),
                ));
                Ok(true)
            }
            Err(e) => {
                flash.set(format!("Save failed: {}", e));
                Ok(false)
            }
        },
        Some(EXIT_DISCARD) => Ok(true),
        _ => Ok(false),
    }
}
