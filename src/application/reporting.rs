use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Amount, Transaction, TransactionType, Wallet, WalletId, YearMonth};

/// How many expenses are ranked per wallet in a monthly report.
pub const TOP_EXPENSES_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub month: YearMonth,
    /// One summary per transaction type present in the month, largest total first
    pub groups: Vec<TypeSummary>,
    /// Every wallet, in input order, with its largest expenses of the month
    pub wallets: Vec<WalletExpenses>,
}

impl MonthlyReport {
    pub fn group(&self, kind: TransactionType) -> Option<&TypeSummary> {
        self.groups.iter().find(|g| g.kind == kind)
    }

    pub fn transaction_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeSummary {
    pub kind: TransactionType,
    pub total: Amount,
    /// Ordered by date; same-day entries keep their wallet/insertion order
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub wallet_name: String,
    pub currency: String,
    pub transaction: Transaction,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletExpenses {
    pub wallet_id: WalletId,
    pub wallet_name: String,
    pub currency: String,
    /// Current balance over the full history, not just the reported month
    pub balance: Amount,
    pub top_expenses: Vec<RankedExpense>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedExpense {
    pub rank: usize,
    pub date: NaiveDate,
    pub amount: Amount,
    pub description: String,
}

/// Build the report for `month` across all wallets.
/// Returns `None` when no wallet has a transaction in that month.
pub fn build_monthly_report(wallets: &[Wallet], month: YearMonth) -> Option<MonthlyReport> {
    let entries: Vec<ReportEntry> = wallets
        .iter()
        .flat_map(|wallet| {
            wallet
                .transactions()
                .iter()
                .filter(move |tx| month.contains(tx.date))
                .map(move |tx| ReportEntry {
                    wallet_name: wallet.name.clone(),
                    currency: wallet.currency.clone(),
                    transaction: tx.clone(),
                })
        })
        .collect();

    if entries.is_empty() {
        return None;
    }

    let groups = group_by_type(entries);
    let wallets = wallets
        .iter()
        .map(|wallet| WalletExpenses {
            wallet_id: wallet.id,
            wallet_name: wallet.name.clone(),
            currency: wallet.currency.clone(),
            balance: wallet.current_balance(),
            top_expenses: top_expenses(wallet, month, TOP_EXPENSES_LIMIT),
        })
        .collect();

    Some(MonthlyReport {
        month,
        groups,
        wallets,
    })
}

/// Group entries by transaction type, sum each group and order the groups by
/// descending total. Groups start in order of first appearance and all sorts
/// are stable.
fn group_by_type(entries: Vec<ReportEntry>) -> Vec<TypeSummary> {
    let mut groups: Vec<TypeSummary> = Vec::new();

    for entry in entries {
        let kind = entry.transaction.kind;
        let amount = entry.transaction.amount;
        match groups.iter_mut().find(|g| g.kind == kind) {
            Some(group) => {
                group.total += amount;
                group.entries.push(entry);
            }
            None => groups.push(TypeSummary {
                kind,
                total: amount,
                entries: vec![entry],
            }),
        }
    }

    for group in &mut groups {
        group.entries.sort_by_key(|e| e.transaction.date);
    }
    groups.sort_by(|a, b| b.total.cmp(&a.total));

    groups
}

/// The wallet's `limit` largest expenses dated in `month`, ranked from 1.
pub fn top_expenses(wallet: &Wallet, month: YearMonth, limit: usize) -> Vec<RankedExpense> {
    let mut expenses: Vec<&Transaction> = wallet
        .transactions()
        .iter()
        .filter(|tx| tx.is_expense() && month.contains(tx.date))
        .collect();
    expenses.sort_by(|a, b| b.amount.cmp(&a.amount));

    expenses
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, tx)| RankedExpense {
            rank: i + 1,
            date: tx.date,
            amount: tx.amount,
            description: tx.description.clone(),
        })
        .collect()
}
