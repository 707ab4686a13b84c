//! Terminal lifecycle for the browser
//!
//! Raw mode and the alternate screen are entered on startup and must be left
//! again on every exit path, including panics, or the user's shell ends up
//! unusable. A panic hook restores the terminal before the panic message
//! prints.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

use crate::audit::AuditLogger;
use crate::clipboard::Clipboard;
use crate::config::paths::BankbookPaths;
use crate::config::settings::Settings;
use crate::models::Wallet;

use super::browser::{browse_wallet, BrowseSession};
use super::event::EventHandler;

/// The concrete terminal all draw code runs against
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enter raw mode and the alternate screen, with a panic hook that cleans up
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // leave the alternate screen first so the message lands in the shell
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Leave raw mode and the alternate screen
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the wallet browser until the user exits the top level
pub fn run_tui(
    paths: &BankbookPaths,
    settings: &Settings,
    audit: &AuditLogger,
    wallet: &mut Wallet,
) -> Result<()> {
    let mut terminal = init_terminal()?;

    let mut session = BrowseSession {
        paths,
        settings,
        audit,
        events: EventHandler::default(),
        clipboard: Clipboard::new(),
    };

    // the terminal is restored whether the browser returned or failed
    let result = browse_wallet(&mut session, &mut terminal, wallet);
    restore_terminal()?;
    result
}
