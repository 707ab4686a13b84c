//! Display formatting for terminal output
//!
//! Hand-formatted plain text for the non-interactive subcommands. Nothing
//! here touches ratatui; the TUI has its own rendering under `tui`.

pub mod balance;

pub use balance::format_balance_summary;
