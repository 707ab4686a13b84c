//! Rendering for the browse screens
//!
//! Every level draws the same three panes: a balance summary on top, the
//! entry table in the middle, and a one-line status bar. The browse loops
//! feed these functions already-formatted data; nothing in here mutates
//! the ledger.

pub mod info;
pub mod status_bar;
pub mod table;

pub use info::{account_info_lines, render_info, statement_info_lines, wallet_info_lines};
pub use status_bar::StatusLine;
pub use table::{amount_cell, render_entry_table, truncate_text};
