//! Bankbook - Terminal-based personal finance ledger
//!
//! This library provides the core functionality for the bankbook ledger
//! application. A wallet of bank accounts is kept as a directory tree of CSV
//! and JSON files; an interactive browser navigates the hierarchy and edits,
//! moves and reconciles records level by level.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (wallet, accounts, statements, operations)
//! - `clipboard`: Typed cut/copy/paste buffer shared across levels
//! - `browse`: Renderer-agnostic browser state machine and structural edits
//! - `storage`: CSV/JSON file storage layer with atomic writes
//! - `audit`: Append-only action log
//! - `tui`: The ratatui browser (nested loops, dialogs, views)
//! - `display`: Plain-text formatting for non-interactive commands
//! - `cli`: Subcommand handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use bankbook::config::{paths::BankbookPaths, settings::Settings};
//! use bankbook::storage;
//!
//! let paths = BankbookPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let wallet = storage::load_wallet(&paths, "wallet")?;
//! ```

pub mod audit;
pub mod browse;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;
pub mod tui;

pub use error::BankbookError;
