//! CLI command handlers
//!
//! This module contains the implementation of the non-interactive commands,
//! bridging the clap argument parsing with storage and display. The
//! interactive browser lives under `tui`.

pub mod wallet;

pub use wallet::{handle_balance, handle_init};
