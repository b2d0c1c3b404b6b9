use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Amount, Transaction, compute_balance, format_amount};

pub type WalletId = Uuid;

/// A named, single-currency container of an opening balance and an
/// append-only transaction log. The current balance is always derived
/// from the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: WalletId,
    pub name: String,
    /// Free-form currency code (e.g. "RUB", "EUR"); not checked against ISO 4217
    pub currency: String,
    #[serde(alias = "initialbalance")]
    pub initial_balance: Amount,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

impl Wallet {
    pub fn new(name: impl Into<String>, currency: impl Into<String>, initial_balance: Amount) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            currency: currency.into(),
            initial_balance,
            transactions: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: WalletId) -> Self {
        self.id = id;
        self
    }

    /// Transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn current_balance(&self) -> Amount {
        compute_balance(self.initial_balance, &self.transactions)
    }

    /// Append a transaction, refusing any expense larger than the current balance.
    /// Incomes are always accepted. On rejection the wallet is left untouched.
    pub fn try_add_transaction(&mut self, transaction: Transaction) -> Result<(), InsufficientFunds> {
        if transaction.is_expense() {
            let balance = self.current_balance();
            if transaction.amount > balance {
                return Err(InsufficientFunds {
                    balance,
                    currency: self.currency.clone(),
                    attempted: transaction.amount,
                });
            }
        }

        self.transactions.push(transaction);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsufficientFunds {
    pub balance: Amount,
    pub currency: String,
    pub attempted: Amount,
}

impl fmt::Display for InsufficientFunds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Insufficient funds. Balance: {} {}, attempted expense: {} {}",
            format_amount(self.balance),
            self.currency,
            format_amount(self.attempted),
            self.currency
        )
    }
}

impl std::error::Error for InsufficientFunds {}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::TransactionType;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn wallet(initial: Amount) -> Wallet {
        Wallet::new("Test wallet", "RUB", initial)
    }

    #[test]
    fn test_new_wallet_balance_is_initial() {
        let id = Uuid::new_v4();
        let wallet = Wallet::new("Savings", "EUR", dec!(2000)).with_id(id);

        assert_eq!(wallet.id, id);
        assert_eq!(wallet.name, "Savings");
        assert_eq!(wallet.currency, "EUR");
        assert_eq!(wallet.current_balance(), dec!(2000));
        assert!(wallet.transactions().is_empty());
    }

    #[test]
    fn test_income_increases_balance() {
        let mut wallet = wallet(dec!(1000));
        let result = wallet.try_add_transaction(Transaction::income(today(), dec!(500), "Salary"));

        assert!(result.is_ok());
        assert_eq!(wallet.current_balance(), dec!(1500));
    }

    #[test]
    fn test_expense_within_balance_succeeds() {
        let mut wallet = wallet(dec!(1000));
        let result = wallet.try_add_transaction(Transaction::expense(today(), dec!(500), "Shopping"));

        assert!(result.is_ok());
        assert_eq!(wallet.current_balance(), dec!(500));
    }

    #[test]
    fn test_expense_over_balance_is_rejected() {
        let mut wallet = wallet(dec!(1000));
        let err = wallet
            .try_add_transaction(Transaction::expense(today(), dec!(1500), "Shopping"))
            .unwrap_err();

        assert_eq!(err.balance, dec!(1000));
        assert_eq!(err.attempted, dec!(1500));
        let message = err.to_string();
        assert!(message.contains("1000.00"), "{}", message);
        assert!(message.contains("1500.00"), "{}", message);
        assert!(message.contains("RUB"), "{}", message);

        assert_eq!(wallet.current_balance(), dec!(1000));
        assert!(wallet.transactions().is_empty());
    }

    #[test]
    fn test_expense_equal_to_balance_succeeds() {
        let mut wallet = wallet(dec!(75.25));
        wallet
            .try_add_transaction(Transaction::expense(today(), dec!(75.25), "Everything"))
            .unwrap();

        assert_eq!(wallet.current_balance(), dec!(0));
    }

    #[test]
    fn test_negative_income_is_accepted() {
        let mut wallet = wallet(dec!(10));
        wallet
            .try_add_transaction(Transaction::new(today(), dec!(-50), TransactionType::Income, "Correction"))
            .unwrap();

        assert_eq!(wallet.current_balance(), dec!(-40));
    }

    #[test]
    fn test_negative_initial_balance_rejects_any_positive_expense() {
        let mut wallet = wallet(dec!(-5));
        assert!(wallet.try_add_transaction(Transaction::expense(today(), dec!(1), "")).is_err());
        wallet.try_add_transaction(Transaction::income(today(), dec!(20), "")).unwrap();
        assert_eq!(wallet.current_balance(), dec!(15));
    }

    #[test]
    fn test_transactions_keep_insertion_order() {
        let mut wallet = wallet(dec!(100));
        let later = Transaction::income(today(), dec!(1), "later");
        let earlier = Transaction::income(today().pred_opt().unwrap(), dec!(2), "earlier");
        wallet.try_add_transaction(later.clone()).unwrap();
        wallet.try_add_transaction(earlier.clone()).unwrap();

        assert_eq!(wallet.transactions(), &[later, earlier]);
    }

    #[test]
    fn test_rejection_is_checked_against_running_balance() {
        let mut wallet = wallet(dec!(100));
        wallet.try_add_transaction(Transaction::expense(today(), dec!(60), "")).unwrap();
        assert!(wallet.try_add_transaction(Transaction::expense(today(), dec!(50), "")).is_err());
        wallet.try_add_transaction(Transaction::expense(today(), dec!(40), "")).unwrap();

        assert_eq!(wallet.transactions().len(), 2);
        assert_eq!(wallet.current_balance(), dec!(0));
    }
}
