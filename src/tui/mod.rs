//! Terminal User Interface module
//!
//! This module provides the interactive wallet browser using ratatui: one
//! nested browse loop per hierarchy level, modal dialogs for editing, and
//! the key map gluing them together.

pub mod browser;
pub mod event;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

// Key map
pub mod keys;

pub use terminal::run_tui;
