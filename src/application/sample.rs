use chrono::{Days, NaiveDate};
use rust_decimal_macros::dec;

use crate::domain::{Transaction, Wallet, YearMonth};

/// Demo wallets with a handful of transactions spread over `month`.
pub fn sample_wallets(month: YearMonth) -> Vec<Wallet> {
    let day = |n: u64| -> NaiveDate { month.first_day() + Days::new(n - 1) };

    let mut cash = Wallet::new("Wallet", "RUB", dec!(10000));
    seed(
        &mut cash,
        vec![
            Transaction::expense(day(2), dec!(1500), "Clothes"),
            Transaction::income(day(5), dec!(2000), "Salary"),
            Transaction::expense(day(10), dec!(300), "Lunch"),
        ],
    );

    let mut card = Wallet::new("Card", "RUB", dec!(50000));
    seed(
        &mut card,
        vec![
            Transaction::expense(day(3), dec!(12000), "Appliance repair"),
            Transaction::expense(day(8), dec!(4000), "TV"),
            Transaction::income(day(15), dec!(30000), "Salary"),
        ],
    );

    vec![cash, card]
}

fn seed(wallet: &mut Wallet, transactions: Vec<Transaction>) {
    for tx in transactions {
        if let Err(e) = wallet.try_add_transaction(tx) {
            log::warn!("Sample transaction skipped for {}: {}", wallet.name, e);
        }
    }
}
