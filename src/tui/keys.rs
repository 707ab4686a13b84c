//! Key bindings for the browse loops
//!
//! One flat map from key press to [`BrowseCommand`], shared by every level
//! of the hierarchy, plus the grouped descriptions the help overlay renders.
//! `Esc` maps to `ClearSelection`; a loop with nothing selected treats that
//! as leaving the level, so `Esc` backs out once the selection is gone.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::browse::BrowseCommand;

/// Translate a key press into a browse command, if it is bound
pub fn map_key(key: KeyEvent) -> Option<BrowseCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('u') => Some(BrowseCommand::PageUp),
            KeyCode::Char('d') => Some(BrowseCommand::PageDown),
            KeyCode::Char('s') => Some(BrowseCommand::Save),
            KeyCode::Char('c') => Some(BrowseCommand::Exit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(BrowseCommand::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(BrowseCommand::MoveDown),
        KeyCode::PageUp => Some(BrowseCommand::PageUp),
        KeyCode::PageDown => Some(BrowseCommand::PageDown),
        KeyCode::Char(' ') => Some(BrowseCommand::ToggleSelect),
        KeyCode::Char('a') => Some(BrowseCommand::SelectAll),
        KeyCode::Esc => Some(BrowseCommand::ClearSelection),
        KeyCode::Char('y') => Some(BrowseCommand::Copy),
        KeyCode::Char('x') => Some(BrowseCommand::Cut),
        KeyCode::Char('p') => Some(BrowseCommand::Paste),
        KeyCode::Char('r') => Some(BrowseCommand::Reconcile),
        KeyCode::Char('e') => Some(BrowseCommand::Edit),
        KeyCode::Enter => Some(BrowseCommand::Open),
        KeyCode::Char('n') => Some(BrowseCommand::Create),
        KeyCode::Delete | KeyCode::Backspace => Some(BrowseCommand::Remove),
        KeyCode::Char('s') => Some(BrowseCommand::Save),
        KeyCode::Char('?') => Some(BrowseCommand::Help),
        KeyCode::Char('q') => Some(BrowseCommand::Exit),
        _ => None,
    }
}

/// One titled group of key descriptions in the help overlay
pub struct HelpSection {
    pub title: &'static str,
    pub entries: &'static [(&'static str, &'static str)],
}

pub const KEY_HELP: &[HelpSection] = &[
    HelpSection {
        title: "Navigation",
        entries: &[
            ("↑/k", "Move highlight up"),
            ("↓/j", "Move highlight down"),
            ("PgUp/Ctrl+u", "Scroll the window up"),
            ("PgDn/Ctrl+d", "Scroll the window down"),
            ("Enter", "Open the highlighted entry"),
            ("q", "Leave this level"),
        ],
    },
    HelpSection {
        title: "Selection",
        entries: &[
            ("Space", "Select / deselect the highlighted entry"),
            ("a", "Select everything"),
            ("Esc", "Clear selection, or leave when nothing is selected"),
        ],
    },
    HelpSection {
        title: "Editing",
        entries: &[
            ("n", "Create a new entry"),
            ("e", "Edit the highlighted entry"),
            ("Del/Backspace", "Remove selected entries"),
            ("y", "Copy to the clipboard"),
            ("x", "Cut to the clipboard"),
            ("p", "Paste from the clipboard"),
            ("r", "Move selection to the last visited sibling"),
        ],
    },
    HelpSection {
        title: "Other",
        entries: &[
            ("s/Ctrl+s", "Save this level"),
            ("?", "Toggle this help"),
        ],
    },
];
