//! Wallet directory tree persistence
//!
//! Maps the in-memory hierarchy onto the on-disk layout:
//!
//! ```text
//! <base>/info.json                      wallet name
//! <base>/account_<name>/info.json       account metadata
//! <base>/account_<name>/statements.csv  one summary row per statement
//! <base>/account_<name>/statements/<date>.csv   that statement's operations
//! ```
//!
//! Loading builds records via [`Record::from_row`]; one bad row fails the
//! whole load of that file, leaving whatever was already built in place.
//! A missing file or directory is an empty container, never an error.
//! Saving writes everything in sort order, prunes files and directories
//! that no longer correspond to a live record, and only then flips the
//! sync flags.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::paths::{BankbookPaths, ACCOUNT_DIR_PREFIX};
use crate::error::{BankbookError, BankbookResult};
use crate::models::{format_date, Account, Operation, Record, Statement, Wallet};

use super::csv_io::{read_rows, write_rows_atomic};
use super::json_io::{read_json, write_json_atomic};

/// Contents of the wallet-level `info.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WalletInfo {
    name: String,
}

/// Contents of the per-account `info.json` (nothing load-bearing yet; the
/// directory name is authoritative for the account name)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AccountInfo {
    name: String,
}

/// Create a fresh wallet skeleton at the given paths.
///
/// Fails if a wallet already lives there.
pub fn init_wallet(paths: &BankbookPaths, name: &str) -> BankbookResult<()> {
    if paths.is_initialized() {
        return Err(BankbookError::Storage(format!(
            "A wallet already exists at {}",
            paths.base_dir().display()
        )));
    }
    paths.ensure_base_dir()?;
    write_json_atomic(
        paths.wallet_info_file(),
        &WalletInfo {
            name: name.to_string(),
        },
    )
}

/// Load the whole wallet tree from disk.
///
/// `fallback_name` is used when no `info.json` has been written yet.
pub fn load_wallet(paths: &BankbookPaths, fallback_name: &str) -> BankbookResult<Wallet> {
    let info: WalletInfo = read_json(paths.wallet_info_file())?;
    let name = if info.name.is_empty() {
        fallback_name.to_string()
    } else {
        info.name
    };

    let mut wallet = Wallet::new(name);
    for account_name in account_dir_names(paths)? {
        let account = load_account(paths, &account_name)?;
        wallet.accounts_mut().insert(account);
    }
    wallet.accounts_mut().mark_synced();
    Ok(wallet)
}

/// Load one account, its statement summaries, and every statement's
/// operations.
pub fn load_account(paths: &BankbookPaths, name: &str) -> BankbookResult<Account> {
    let mut account = Account::new(name);
    for row in read_rows(paths.statements_file(name))? {
        let mut statement = Statement::from_row(&row)?;
        load_operations(paths, name, &mut statement)?;
        account.statements_mut().insert(statement);
    }
    account.statements_mut().mark_synced();
    Ok(account)
}

/// Write the full wallet tree and drop account directories that no longer
/// have an account.
pub fn save_wallet(paths: &BankbookPaths, wallet: &mut Wallet) -> BankbookResult<()> {
    paths.ensure_base_dir()?;
    write_json_atomic(
        paths.wallet_info_file(),
        &WalletInfo {
            name: wallet.name.clone(),
        },
    )?;

    for account in wallet.accounts_mut().iter_mut() {
        save_account(paths, account)?;
    }
    prune_stale_account_dirs(paths, wallet)?;
    wallet.accounts_mut().mark_synced();
    Ok(())
}

/// Write one account's summaries and all of its operation files, pruning
/// operation files whose statement is gone (renamed dates included).
pub fn save_account(paths: &BankbookPaths, account: &mut Account) -> BankbookResult<()> {
    write_json_atomic(
        paths.account_info_file(&account.name),
        &AccountInfo {
            name: account.name.clone(),
        },
    )?;

    let rows: Vec<Vec<String>> = account.statements().iter().map(record_row).collect();
    write_rows_atomic(
        paths.statements_file(&account.name),
        &column_names::<Statement>(),
        &rows,
    )?;

    for statement in account.statements().iter() {
        write_operations(paths, &account.name, statement)?;
    }
    prune_stale_operation_files(paths, account)?;

    for statement in account.statements_mut().iter_mut() {
        statement.mark_operations_synced();
    }
    account.statements_mut().mark_synced();
    Ok(())
}

/// Write a single statement's operations file (statement browser save).
pub fn save_statement(
    paths: &BankbookPaths,
    account_name: &str,
    statement: &mut Statement,
) -> BankbookResult<()> {
    write_operations(paths, account_name, statement)?;
    statement.mark_operations_synced();
    Ok(())
}

/// Throw away the in-memory statement list and refill it from disk.
///
/// On a bad row the error propagates with the rows read so far already
/// inserted; the container stays unsynced so the damage is visible.
pub fn reload_account(paths: &BankbookPaths, account: &mut Account) -> BankbookResult<()> {
    account.statements_mut().reset();
    for row in read_rows(paths.statements_file(&account.name))? {
        let mut statement = Statement::from_row(&row)?;
        load_operations(paths, &account.name, &mut statement)?;
        account.statements_mut().insert(statement);
    }
    account.statements_mut().mark_synced();
    Ok(())
}

/// Throw away one statement's in-memory operations and refill from disk.
pub fn reload_statement(
    paths: &BankbookPaths,
    account_name: &str,
    statement: &mut Statement,
) -> BankbookResult<()> {
    statement.reset_operations();
    load_operations(paths, account_name, statement)
}

fn load_operations(
    paths: &BankbookPaths,
    account_name: &str,
    statement: &mut Statement,
) -> BankbookResult<()> {
    let path = paths.operations_file(account_name, &format_date(statement.date));
    for row in read_rows(path)? {
        statement.add_operation(Operation::from_row(&row)?);
    }
    statement.mark_operations_synced();
    Ok(())
}

fn write_operations(
    paths: &BankbookPaths,
    account_name: &str,
    statement: &Statement,
) -> BankbookResult<()> {
    let rows: Vec<Vec<String>> = statement.operations().iter().map(record_row).collect();
    write_rows_atomic(
        paths.operations_file(account_name, &format_date(statement.date)),
        &column_names::<Operation>(),
        &rows,
    )
}

/// One CSV row in field order, straight from the record's field accessors.
fn record_row<T: Record>(record: &T) -> Vec<String> {
    (0..T::field_defs().len())
        .map(|i| record.field(i).map(|(_, value)| value).unwrap_or_default())
        .collect()
}

fn column_names<T: Record>() -> Vec<&'static str> {
    T::field_defs().iter().map(|def| def.name).collect()
}

/// Names of the accounts present on disk, from the directory prefix scan.
fn account_dir_names(paths: &BankbookPaths) -> BankbookResult<Vec<String>> {
    let base = paths.base_dir();
    if !base.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(base).map_err(|e| {
        BankbookError::Storage(format!("Failed to read {}: {}", base.display(), e))
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            BankbookError::Storage(format!("Failed to read {}: {}", base.display(), e))
        })?;
        if !entry.path().is_dir() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(dir_name) = file_name.to_str() else {
            continue;
        };
        if let Some(account_name) = dir_name.strip_prefix(ACCOUNT_DIR_PREFIX) {
            if !account_name.is_empty() {
                names.push(account_name.to_string());
            }
        }
    }
    Ok(names)
}

fn prune_stale_account_dirs(paths: &BankbookPaths, wallet: &Wallet) -> BankbookResult<()> {
    let keep: HashSet<PathBuf> = wallet
        .accounts()
        .iter()
        .map(|account| paths.account_dir(&account.name))
        .collect();

    for account_name in account_dir_names(paths)? {
        let dir = paths.account_dir(&account_name);
        if !keep.contains(&dir) {
            fs::remove_dir_all(&dir).map_err(|e| {
                BankbookError::Storage(format!("Failed to remove {}: {}", dir.display(), e))
            })?;
        }
    }
    Ok(())
}

fn prune_stale_operation_files(paths: &BankbookPaths, account: &Account) -> BankbookResult<()> {
    let dir = paths.operations_dir(&account.name);
    if !dir.exists() {
        return Ok(());
    }

    let keep: HashSet<PathBuf> = account
        .statements()
        .iter()
        .map(|s| paths.operations_file(&account.name, &format_date(s.date)))
        .collect();

    let entries = fs::read_dir(&dir)
        .map_err(|e| BankbookError::Storage(format!("Failed to read {}: {}", dir.display(), e)))?;
    for entry in entries {
        let entry = entry.map_err(|e| {
            BankbookError::Storage(format!("Failed to read {}: {}", dir.display(), e))
        })?;
        let path = entry.path();
        let is_csv = path.extension().is_some_and(|ext| ext == "csv");
        if path.is_file() && is_csv && !keep.contains(&path) {
            fs::remove_file(&path).map_err(|e| {
                BankbookError::Storage(format!("Failed to remove {}: {}", path.display(), e))
            })?;
        }
    }
    Ok(())
}
