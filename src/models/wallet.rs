//! The wallet: root of the account hierarchy

use crate::models::{Account, Container, Money};

/// The top-level container, one per data directory
#[derive(Debug, Clone)]
pub struct Wallet {
    pub name: String,
    accounts: Container<Account>,
}

impl Wallet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accounts: Container::new(),
        }
    }

    pub fn accounts(&self) -> &Container<Account> {
        &self.accounts
    }

    pub fn accounts_mut(&mut self) -> &mut Container<Account> {
        &mut self.accounts
    }

    /// Sum of all account balances
    pub fn balance(&self) -> Money {
        self.accounts.iter().map(|a| a.balance()).sum()
    }

    /// True iff the account list matches the persisted directory layout
    pub fn is_synced(&self) -> bool {
        self.accounts.is_synced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Statement;
    use chrono::NaiveDate;

    #[test]
    fn test_wallet_balance_sums_accounts() {
        let mut wallet = Wallet::new("home");
        assert_eq!(wallet.balance(), Money::zero());

        let mut courant = Account::new("courant");
        courant.statements_mut().insert(Statement::new(
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            Money::zero(),
            Money::from_cents(12_000),
        ));
        let mut savings = Account::new("savings");
        savings.statements_mut().insert(Statement::new(
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            Money::zero(),
            Money::from_cents(50_000),
        ));

        wallet.accounts_mut().insert(courant);
        wallet.accounts_mut().insert(savings);
        assert_eq!(wallet.balance(), Money::from_cents(62_000));
    }
}
