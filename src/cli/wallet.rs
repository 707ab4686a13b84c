//! Wallet CLI commands
//!
//! `init` creates the skeleton a fresh data directory needs; `balance`
//! prints the account summary without entering the browser.

use crate::config::{BankbookPaths, Settings};
use crate::display::format_balance_summary;
use crate::error::{BankbookError, BankbookResult};
use crate::storage;

/// Create a fresh wallet skeleton in the data directory
///
/// Fails if a wallet already lives there; an existing tree is never
/// overwritten.
pub fn handle_init(paths: &BankbookPaths, settings: &Settings, name: &str) -> BankbookResult<()> {
    storage::init_wallet(paths, name)?;
    settings.save(paths)?;

    println!("Created wallet '{}' at {}", name, paths.base_dir().display());
    println!();
    println!("Run 'bankbook' to open the browser.");
    Ok(())
}

/// Print the wallet balance summary to stdout
pub fn handle_balance(
    paths: &BankbookPaths,
    settings: &Settings,
    fallback_name: &str,
) -> BankbookResult<()> {
    if !paths.is_initialized() {
        return Err(BankbookError::NotFound {
            entity_type: "Wallet",
            identifier: paths.base_dir().display().to_string(),
        });
    }
    let wallet = storage::load_wallet(paths, fallback_name)?;
    print!(
        "{}",
        format_balance_summary(&wallet, &settings.currency_symbol)
    );
    Ok(())
}
