//! The nested browse loops
//!
//! One blocking loop per level of the hierarchy: accounts in the wallet,
//! statements in an account, operations in a statement. Opening an entry
//! runs the child loop to completion; returning hands control back to the
//! parent, which remembers that child as the target for moving entries
//! between siblings. Shared machinery lives here; each level's loop, screen
//! and forms live in its own module.

pub mod account;
pub mod statement;
pub mod wallet;

pub use wallet::browse_wallet;

use anyhow::Result;
use ratatui::layout::Rect;

use crate::audit::{AuditAction, AuditEntry, AuditLogger};
use crate::browse::{ops, Browsable, BrowseCommand, BrowserState, ExitOutcome};
use crate::clipboard::Clipboard;
use crate::config::{BankbookPaths, Settings};
use crate::models::{Account, Record, Wallet};
use crate::tui::event::{Event, EventHandler};
use crate::tui::keys::map_key;
use crate::tui::layout::BrowseLayout;
use crate::tui::terminal::Tui;

/// Everything the loops share besides the ledger itself
pub struct BrowseSession<'a> {
    pub paths: &'a BankbookPaths,
    pub settings: &'a Settings,
    pub audit: &'a AuditLogger,
    pub events: EventHandler,
    pub clipboard: Clipboard,
}

/// Three seconds at the default tick rate
const FLASH_TICKS: u8 = 12;

/// A transient status message with its remaining lifetime
pub(crate) struct Flash {
    text: Option<String>,
    ticks_left: u8,
}

impl Flash {
    pub(crate) fn new() -> Self {
        Self {
            text: None,
            ticks_left: 0,
        }
    }

    pub(crate) fn set(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.ticks_left = FLASH_TICKS;
    }

    pub(crate) fn tick(&mut self) {
        if self.ticks_left > 0 {
            self.ticks_left -= 1;
            if self.ticks_left == 0 {
                self.text = None;
            }
        }
    }

    pub(crate) fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Block until a bound key arrives; ticks age the flash message on the way
pub(crate) fn next_command(
    events: &EventHandler,
    flash: &mut Flash,
) -> Result<Option<BrowseCommand>> {
    match events.next()? {
        Event::Key(key) => Ok(map_key(key)),
        Event::Tick => {
            flash.tick();
            Ok(None)
        }
        Event::Resize(_, _) => Ok(None),
    }
}

/// Keep the viewport height in step with the terminal before each draw
pub(crate) fn sync_viewport(terminal: &Tui, state: &mut BrowserState) -> Result<()> {
    let size = terminal.size()?;
    let layout = BrowseLayout::new(Rect::new(0, 0, size.width, size.height));
    state.set_viewport_rows(layout.viewport_rows());
    Ok(())
}

/// Handle the commands every level treats identically: navigation,
/// selection, copy and cut. Returns false when the command is one the
/// caller has to deal with itself.
pub(crate) fn handle_common<B: Browsable>(
    pane: &mut B,
    state: &mut BrowserState,
    session: &mut BrowseSession,
    flash: &mut Flash,
    command: BrowseCommand,
    place: &str,
) -> bool {
    match command {
        BrowseCommand::MoveUp => state.move_up(pane.entries()),
        BrowseCommand::MoveDown => state.move_down(pane.entries()),
        BrowseCommand::PageUp => state.page_up(pane.entries()),
        BrowseCommand::PageDown => state.page_down(pane.entries()),
        BrowseCommand::ToggleSelect => state.toggle_selected(pane.entries()),
        BrowseCommand::SelectAll => state.select_all(pane.entries()),
        BrowseCommand::Copy => {
            let n = ops::copy_to_clipboard(pane, state, &mut session.clipboard);
            if n > 0 {
                flash.set(format!("Copied {}", noun::<B::Entry>(n)));
            }
        }
        BrowseCommand::Cut => {
            let n = ops::cut_to_clipboard(pane, state, &mut session.clipboard);
            if n > 0 {
                let _ = session.audit.log(&AuditEntry::new(
                    AuditAction::Cut,
                    B::Entry::kind_name().to_lowercase(),
                    n,
                    place,
                ));
                flash.set(format!("Cut {}", noun::<B::Entry>(n)));
            }
        }
        _ => return false,
    }
    true
}

/// "3 operations", "1 statement"
pub(crate) fn noun<T: Record>(count: usize) -> String {
    let kind = T::kind_name().to_lowercase();
    if count == 1 {
        format!("{} {}", count, kind)
    } else {
        format!("{} {}s", count, kind)
    }
}

/// Status-bar clipboard summary, if it holds anything
pub(crate) fn clipboard_status(clipboard: &Clipboard) -> Option<(usize, &'static str)> {
    clipboard.kind_name().map(|kind| (clipboard.len(), kind))
}

/// Current raw field values of a record, in schema order
pub(crate) fn record_values<T: Record>(record: &T) -> Vec<String> {
    (0..T::field_defs().len())
        .map(|i| record.field(i).map(|(_, value)| value).unwrap_or_default())
        .collect()
}

/// Form values keyed by field name, ready for `Record::from_row`
pub(crate) fn row_map<T: Record>(values: &[String]) -> std::collections::HashMap<String, String> {
    T::field_defs()
        .iter()
        .zip(values)
        .map(|(def, value)| (def.name.to_string(), value.clone()))
        .collect()
}

/// True when the whole account, operations included, matches disk
pub(crate) fn account_synced_deep(account: &Account) -> bool {
    account.is_synced() && account.statements().iter().all(|s| s.is_synced())
}

/// True when nothing anywhere in the wallet is waiting to be written
pub(crate) fn wallet_synced_deep(wallet: &Wallet) -> bool {
    wallet.is_synced() && wallet.accounts().iter().all(account_synced_deep)
}

/// Tell the parent's status line how a child loop ended
pub(crate) fn report_outcome(outcome: ExitOutcome, flash: &mut Flash) {
    match outcome {
        ExitOutcome::Clean => {}
        ExitOutcome::Saved => flash.set("Changes saved"),
        ExitOutcome::Discarded => flash.set("Changes discarded"),
    }
}

/// Options of the unsaved-changes prompt, in the order the dialog shows them.
/// Index 0 cancels, which the exit handlers treat as the fallthrough case.
pub(crate) const EXIT_OPTIONS: [&str; 3] = ["Cancel", "Save and exit", "Discard changes"];
pub(crate) const EXIT_SAVE: usize = 1;
pub(crate) const EXIT_DISCARD: usize = 2;
