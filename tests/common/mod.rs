// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use fintrack::application::LedgerService;
use fintrack::domain::{Amount, Transaction, Wallet};
use fintrack::storage::Repository;
use tempfile::TempDir;

/// Helper to create a repository pointing into a fresh temporary directory
pub fn test_repository() -> Result<(Repository, TempDir)> {
    let temp_dir = TempDir::new()?;
    let repo = Repository::new(temp_dir.path().join("data.json"));
    Ok((repo, temp_dir))
}

/// Helper to create an empty service backed by a temporary data file
pub fn test_service() -> Result<(LedgerService, TempDir)> {
    let (repo, temp_dir) = test_repository()?;
    Ok((LedgerService::empty(repo), temp_dir))
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

pub fn income(date: &str, amount: Amount, description: &str) -> Transaction {
    Transaction::income(parse_date(date), amount, description)
}

pub fn expense(date: &str, amount: Amount, description: &str) -> Transaction {
    Transaction::expense(parse_date(date), amount, description)
}

/// Build a wallet and add the given transactions, failing on any rejection
pub fn wallet_with(
    name: &str,
    currency: &str,
    initial: Amount,
    transactions: Vec<Transaction>,
) -> Result<Wallet> {
    let mut wallet = Wallet::new(name, currency, initial);
    for tx in transactions {
        wallet.try_add_transaction(tx)?;
    }
    Ok(wallet)
}
