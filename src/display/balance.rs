//! Wallet balance summary formatting
//!
//! Formats the wallet's accounts for `bankbook balance` as a plain table.

use crate::models::{format_date, Money, Wallet};

/// Format all accounts with their balances, plus a wallet total
pub fn format_balance_summary(wallet: &Wallet, symbol: &str) -> String {
    let accounts = wallet.accounts().items();
    if accounts.is_empty() {
        return format!("Wallet '{}' has no accounts yet.\n", wallet.name);
    }

    // Calculate column widths
    let name_width = accounts
        .iter()
        .map(|a| a.name.len())
        .max()
        .unwrap_or(7)
        .max(7);

    // Build header
    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {:>10}  {}\n",
        "Account",
        "Balance",
        "Statements",
        "Last statement",
        name_width = name_width,
    ));

    // Separator line
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:->10}  {:-<14}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    // Account rows
    for account in accounts {
        let last = account
            .statements()
            .items()
            .last()
            .map(|s| format_date(s.date))
            .unwrap_or_default();

        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:>10}  {}\n",
            account.name,
            account.balance().format_with_symbol(symbol),
            account.statements().len(),
            last,
            name_width = name_width,
        ));
    }

    // Total row
    let total: Money = accounts.iter().map(|a| a.balance()).sum();

    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:->10}  {:-<14}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    output.push_str(&format!(
        "{:<name_width$}  {:>12}\n",
        "TOTAL",
        total.format_with_symbol(symbol),
        name_width = name_width,
    ));

    output
}
