use crate::domain::{Amount, Totals, Transaction, Wallet, YearMonth, totals};
use crate::storage::Repository;

use super::{AppError, MonthlyReport, build_monthly_report, sample_wallets};

/// Where the wallets held by a service came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Sample wallets for the current month
    Generate,
    /// The JSON data file
    File,
    /// Typed in interactively
    Manual,
}

/// Application service providing high-level operations over a wallet list.
/// This is the primary interface for any client (CLI, interactive prompt, tests).
pub struct LedgerService {
    repo: Repository,
    wallets: Vec<Wallet>,
    origin: DataSource,
}

/// Balance entry for a wallet
pub struct BalanceEntry {
    pub wallet_name: String,
    pub currency: String,
    pub initial_balance: Amount,
    pub totals: Totals,
    pub balance: Amount,
}

impl LedgerService {
    pub fn new(repo: Repository, wallets: Vec<Wallet>, origin: DataSource) -> Self {
        Self {
            repo,
            wallets,
            origin,
        }
    }

    /// Start with no wallets, for manual entry.
    pub fn empty(repo: Repository) -> Self {
        Self::new(repo, Vec::new(), DataSource::Manual)
    }

    /// Replace the data file with sample wallets for `month`.
    pub fn generate(repo: Repository, month: YearMonth) -> Result<Self, AppError> {
        let wallets = sample_wallets(month);
        repo.save(&wallets)?;
        log::info!("Generated {} sample wallet(s) for {}", wallets.len(), month);
        Ok(Self::new(repo, wallets, DataSource::Generate))
    }

    /// Load the data file, falling back to generated sample data when it is missing.
    /// Check `origin()` to tell the two apart.
    pub fn load_or_generate(repo: Repository, month: YearMonth) -> Result<Self, AppError> {
        match repo.load()? {
            Some(wallets) => Ok(Self::new(repo, wallets, DataSource::File)),
            None => {
                log::warn!(
                    "Data file {} not found, generating sample data",
                    repo.path().display()
                );
                Self::generate(repo, month)
            }
        }
    }

    /// Open the service for the requested source. `Manual` starts empty.
    pub fn open(repo: Repository, source: DataSource, month: YearMonth) -> Result<Self, AppError> {
        match source {
            DataSource::Generate => Self::generate(repo, month),
            DataSource::File => Self::load_or_generate(repo, month),
            DataSource::Manual => Ok(Self::empty(repo)),
        }
    }

    pub fn origin(&self) -> DataSource {
        self.origin
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    // ========================
    // Wallet operations
    // ========================

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    /// Get a wallet by name.
    pub fn get_wallet(&self, name: &str) -> Result<&Wallet, AppError> {
        self.wallets
            .iter()
            .find(|w| w.name == name)
            .ok_or_else(|| AppError::WalletNotFound(name.to_string()))
    }

    /// Create a new wallet. Names must be unique.
    pub fn create_wallet(
        &mut self,
        name: String,
        currency: String,
        initial_balance: Amount,
    ) -> Result<&Wallet, AppError> {
        if self.get_wallet(&name).is_ok() {
            return Err(AppError::WalletAlreadyExists(name));
        }

        let index = self.wallets.len();
        self.wallets.push(Wallet::new(name, currency, initial_balance));
        Ok(&self.wallets[index])
    }

    /// Get balances for all wallets, in wallet order.
    pub fn get_all_balances(&self) -> Vec<BalanceEntry> {
        self.wallets
            .iter()
            .map(|wallet| BalanceEntry {
                wallet_name: wallet.name.clone(),
                currency: wallet.currency.clone(),
                initial_balance: wallet.initial_balance,
                totals: totals(wallet.transactions()),
                balance: wallet.current_balance(),
            })
            .collect()
    }

    // ========================
    // Transaction operations
    // ========================

    /// Add a transaction to the named wallet, subject to the wallet's funds check.
    /// Returns the wallet's new balance.
    pub fn record_transaction(
        &mut self,
        wallet_name: &str,
        transaction: Transaction,
    ) -> Result<Amount, AppError> {
        let wallet = self
            .wallets
            .iter_mut()
            .find(|w| w.name == wallet_name)
            .ok_or_else(|| AppError::WalletNotFound(wallet_name.to_string()))?;

        if let Err(e) = wallet.try_add_transaction(transaction) {
            log::debug!("Rejected transaction for {}: {}", wallet_name, e);
            return Err(e.into());
        }

        Ok(wallet.current_balance())
    }

    // ========================
    // Reporting
    // ========================

    /// Monthly summary, or `None` if no wallet has transactions in `month`.
    pub fn monthly_report(&self, month: YearMonth) -> Option<MonthlyReport> {
        let report = build_monthly_report(&self.wallets, month);
        match &report {
            Some(r) => {
                log::debug!("Report for {}: {} transaction(s)", month, r.transaction_count())
            }
            None => log::debug!("Report for {}: no transactions", month),
        }
        report
    }

    /// Persist the current wallets to the data file.
    pub fn save(&self) -> Result<(), AppError> {
        self.repo.save(&self.wallets)?;
        Ok(())
    }
}
