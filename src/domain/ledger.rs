use super::{Amount, Transaction};

/// Compute a wallet balance from its opening amount and transaction log.
/// Balance = initial + sum of incomes - sum of expenses
pub fn compute_balance(initial_balance: Amount, transactions: &[Transaction]) -> Amount {
    transactions
        .iter()
        .fold(initial_balance, |balance, tx| balance + tx.signed_amount())
}

/// Income and expense sums over a transaction log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub income: Amount,
    pub expense: Amount,
}

impl Totals {
    pub fn net(&self) -> Amount {
        self.income - self.expense
    }
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    transactions
        .iter()
        .fold(Totals::default(), |mut totals, tx| {
            if tx.is_income() {
                totals.income += tx.amount;
            } else {
                totals.expense += tx.amount;
            }
            totals
        })
}
