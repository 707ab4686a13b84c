//! Path management for bankbook
//!
//! Resolves the wallet data directory and derives every file path in the
//! persisted tree from it:
//!
//! ```text
//! <data_dir>/info.json
//! <data_dir>/settings.json
//! <data_dir>/audit.log
//! <data_dir>/account_<name>/info.json
//! <data_dir>/account_<name>/statements.csv
//! <data_dir>/account_<name>/statements/<date>.csv
//! ```
//!
//! ## Resolution order
//!
//! 1. explicit directory (CLI flag or `BANKBOOK_DATA_DIR`)
//! 2. Unix (Linux/macOS): `$XDG_DATA_HOME/bankbook` or `~/.local/share/bankbook`
//! 3. Windows: `%APPDATA%\bankbook`

use std::path::{Path, PathBuf};

use crate::error::BankbookError;

/// Directory prefix marking an account under the wallet root
pub const ACCOUNT_DIR_PREFIX: &str = "account_";

/// All paths used by bankbook, derived from one base directory
#[derive(Debug, Clone)]
pub struct BankbookPaths {
    base_dir: PathBuf,
}

impl BankbookPaths {
    /// Resolve against the environment (no explicit directory given)
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, BankbookError> {
        let base_dir = if let Ok(custom) = std::env::var("BANKBOOK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Use a fixed base directory (CLI override, tests)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolve from an optional CLI override, falling back to [`Self::new`]
    pub fn resolve(dir: Option<PathBuf>) -> Result<Self, BankbookError> {
        match dir {
            Some(base_dir) => Ok(Self::with_base_dir(base_dir)),
            None => Self::new(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `info.json` with the wallet name
    pub fn wallet_info_file(&self) -> PathBuf {
        self.base_dir.join("info.json")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("settings.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// `account_<name>/` for one account
    pub fn account_dir(&self, account: &str) -> PathBuf {
        self.base_dir
            .join(format!("{}{}", ACCOUNT_DIR_PREFIX, account))
    }

    pub fn account_info_file(&self, account: &str) -> PathBuf {
        self.account_dir(account).join("info.json")
    }

    /// `statements.csv`: one summary row per statement
    pub fn statements_file(&self, account: &str) -> PathBuf {
        self.account_dir(account).join("statements.csv")
    }

    /// `statements/`: one operations file per statement
    pub fn operations_dir(&self, account: &str) -> PathBuf {
        self.account_dir(account).join("statements")
    }

    /// `statements/<date>.csv`, named after the statement date
    pub fn operations_file(&self, account: &str, date: &str) -> PathBuf {
        self.operations_dir(account).join(format!("{}.csv", date))
    }

    /// Create the wallet root if it does not exist yet
    pub fn ensure_base_dir(&self) -> Result<(), BankbookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BankbookError::Io(format!("Failed to create data directory: {}", e)))
    }

    /// A wallet lives here once `info.json` exists
    pub fn is_initialized(&self) -> bool {
        self.wallet_info_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, BankbookError> {
    // Unix (Linux/macOS): XDG_DATA_HOME if set, otherwise ~/.local/share
    let data_base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".local").join("share"))
                .map_err(|_| BankbookError::Config("HOME environment variable not set".into()))
        })?;
    Ok(data_base.join("bankbook"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, BankbookError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BankbookError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("bankbook"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.wallet_info_file(), temp_dir.path().join("info.json"));
    }

    #[test]
    fn test_account_tree_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        let dir = paths.account_dir("courant");
        assert_eq!(dir, temp_dir.path().join("account_courant"));
        assert_eq!(paths.statements_file("courant"), dir.join("statements.csv"));
        assert_eq!(
            paths.operations_file("courant", "2024-01-31"),
            dir.join("statements").join("2024-01-31.csv")
        );
    }

    #[test]
    fn test_resolve_prefers_explicit_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankbookPaths::resolve(Some(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("wallet");
        let paths = BankbookPaths::with_base_dir(nested.clone());

        assert!(!paths.is_initialized());
        paths.ensure_base_dir().unwrap();
        assert!(nested.exists());
    }
}
