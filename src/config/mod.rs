//! Configuration module for bankbook
//!
//! Data directory resolution (flag, env var, XDG/APPDATA fallback) and
//! user settings persistence.

pub mod paths;
pub mod settings;

pub use paths::BankbookPaths;
pub use settings::Settings;
