mod prompt;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::application::{
    BalanceEntry, DataSource, LedgerService, MonthlyReport, TOP_EXPENSES_LIMIT,
};
use crate::domain::{Transaction, TransactionType, YearMonth, format_amount};
use crate::io::ReportExporter;
use crate::storage::{DEFAULT_DATA_FILE, Repository};

pub use prompt::Prompter;
use prompt::{parse_day, parse_month, parse_transaction_amount};

/// fintrack - Personal Finance Tracker
#[derive(Parser)]
#[command(name = "fintrack")]
#[command(about = "Track wallets and transactions, and report monthly income and expenses")]
#[command(version)]
pub struct Cli {
    /// Wallet data file (JSON)
    #[arg(long, default_value = DEFAULT_DATA_FILE, global = true)]
    pub data: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Omit to run the interactive mode
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Monthly report: totals by type and top expenses per wallet
    Report {
        /// Target month (YYYY-MM)
        #[arg(short, long)]
        month: String,

        /// Data source: file, generate, manual
        #[arg(short, long, default_value = "file")]
        source: String,

        /// Output format: table, json, csv
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show balances for all wallets
    Balance,

    /// Write sample wallets to the data file
    Generate {
        /// Month to place the sample transactions in (YYYY-MM, defaults to current)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Add a transaction to a wallet
    Add {
        /// Amount (e.g., "50.00" or "50")
        amount: String,

        /// Wallet name
        #[arg(short, long)]
        wallet: String,

        /// Transaction type: income, expense
        #[arg(short = 't', long = "type")]
        kind: String,

        /// Date of the transaction (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Description of the transaction
        #[arg(short, long)]
        description: Option<String>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock(), Local::now().date_naive())
    }

    /// Run against explicit input, output and "today", for embedding and tests.
    pub fn run_with<R: BufRead, W: Write>(self, input: R, mut output: W, today: NaiveDate) -> Result<()> {
        let repo = Repository::new(&self.data);
        let current_month = YearMonth::of(today);

        let Some(command) = self.command else {
            return run_interactive(repo, input, output, current_month);
        };

        match command {
            Commands::Report {
                month,
                source,
                format,
            } => {
                let month = parse_month(&month)?;
                let source = parse_source(&source)?;
                let mut prompter = Prompter::new(input, &mut output);
                let service = open_service(&mut prompter, repo, source, current_month)?;
                let report = service.monthly_report(month);
                run_report_command(&mut output, month, report.as_ref(), &format)?;
            }

            Commands::Balance => {
                let service = LedgerService::load_or_generate(repo, current_month)?;
                note_fallback(&mut output, &service)?;
                render_balances(&mut output, &service.get_all_balances())?;
            }

            Commands::Generate { month } => {
                let month = match month {
                    Some(m) => parse_month(&m)?,
                    None => current_month,
                };
                let service = LedgerService::generate(repo, month)?;
                writeln!(
                    output,
                    "Generated {} wallet(s) for {} in {}",
                    service.wallets().len(),
                    month,
                    service.repository().path().display()
                )?;
            }

            Commands::Add {
                amount,
                wallet,
                kind,
                date,
                description,
            } => {
                let amount = parse_transaction_amount(&amount)?;
                let kind: TransactionType = kind.parse()?;
                let date = match date {
                    Some(d) => parse_day(&d)?,
                    None => today,
                };

                let mut service = LedgerService::load_or_generate(repo, current_month)?;
                note_fallback(&mut output, &service)?;

                let transaction = Transaction::new(date, amount, kind, description.unwrap_or_default());
                let id = transaction.id;
                let balance = service.record_transaction(&wallet, transaction)?;
                service.save()?;

                let currency = &service.get_wallet(&wallet)?.currency;
                writeln!(
                    output,
                    "Recorded {} {} {} in {} ({})",
                    kind,
                    format_amount(amount),
                    currency,
                    wallet,
                    id
                )?;
                writeln!(output, "New balance: {} {}", format_amount(balance), currency)?;
            }
        }

        Ok(())
    }
}

/// The original console flow: pick a data source, enter a month, print the report.
fn run_interactive<R: BufRead, W: Write>(
    repo: Repository,
    input: R,
    output: W,
    current_month: YearMonth,
) -> Result<()> {
    let mut prompter = Prompter::new(input, output);
    writeln!(prompter.output(), "Personal finance tracker")?;

    let source = prompter.choose_source(repo.path())?;
    let service = open_service(&mut prompter, repo, source, current_month)?;

    let Some(month) = prompter.ask_month()? else {
        return Ok(());
    };

    let report = service.monthly_report(month);
    render_report(prompter.output(), month, report.as_ref())?;
    Ok(())
}

fn open_service<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    repo: Repository,
    source: DataSource,
    current_month: YearMonth,
) -> Result<LedgerService> {
    let mut service = LedgerService::open(repo, source, current_month)?;
    match source {
        DataSource::Manual => prompter.enter_wallets(&mut service)?,
        DataSource::File => note_fallback(prompter.output(), &service)?,
        DataSource::Generate => {}
    }
    Ok(service)
}

/// Tell the user when a missing data file was replaced by sample data.
fn note_fallback<W: Write>(output: &mut W, service: &LedgerService) -> io::Result<()> {
    if service.origin() == DataSource::Generate {
        writeln!(
            output,
            "File {} not found, generated sample data",
            service.repository().path().display()
        )?;
    }
    Ok(())
}

fn parse_source(source: &str) -> Result<DataSource> {
    match source.trim().to_lowercase().as_str() {
        "file" | "load" => Ok(DataSource::File),
        "generate" | "sample" => Ok(DataSource::Generate),
        "manual" => Ok(DataSource::Manual),
        other => bail!("Invalid source '{}'. Valid: file, generate, manual", other),
    }
}

fn run_report_command<W: Write>(
    output: &mut W,
    month: YearMonth,
    report: Option<&MonthlyReport>,
    format: &str,
) -> Result<()> {
    let Some(report) = report else {
        return Ok(render_report(output, month, None)?);
    };

    match format {
        "json" => ReportExporter::new(report)
            .export_json(output)
            .context("Failed to write JSON report")?,
        "csv" => {
            ReportExporter::new(report)
                .export_csv(output)
                .context("Failed to write CSV report")?;
        }
        "table" => render_report(output, month, Some(report))?,
        other => bail!("Invalid format '{}'. Valid: table, json, csv", other),
    }
    Ok(())
}

/// Human-readable monthly report.
pub fn render_report<W: Write>(
    out: &mut W,
    month: YearMonth,
    report: Option<&MonthlyReport>,
) -> io::Result<()> {
    let Some(report) = report else {
        writeln!(out, "No transactions found for {}", month)?;
        return Ok(());
    };

    writeln!(out)?;
    writeln!(out, "Transactions for {}:", report.month)?;
    for group in &report.groups {
        writeln!(out)?;
        writeln!(out, "{} - total: {}", group.kind, format_amount(group.total))?;
        for entry in &group.entries {
            let tx = &entry.transaction;
            writeln!(
                out,
                "{} | {:<10} | {:>10} {} | {}",
                tx.date.format("%Y-%m-%d"),
                truncate(&entry.wallet_name, 10),
                format_amount(tx.amount),
                entry.currency,
                tx.description
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Top {} expenses of the month:", TOP_EXPENSES_LIMIT)?;
    for wallet in &report.wallets {
        writeln!(out)?;
        writeln!(
            out,
            "{} ({}) - balance: {}",
            wallet.wallet_name,
            wallet.currency,
            format_amount(wallet.balance)
        )?;
        if wallet.top_expenses.is_empty() {
            writeln!(out, "  No expenses")?;
            continue;
        }
        for expense in &wallet.top_expenses {
            writeln!(
                out,
                "  {}. {} - {:>10} {} - {}",
                expense.rank,
                expense.date.format("%Y-%m-%d"),
                format_amount(expense.amount),
                wallet.currency,
                expense.description
            )?;
        }
    }
    Ok(())
}

pub fn render_balances<W: Write>(out: &mut W, entries: &[BalanceEntry]) -> io::Result<()> {
    if entries.is_empty() {
        writeln!(out, "No wallets found.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<20} {:<8} {:>12} {:>12} {:>12}",
        "WALLET", "CURRENCY", "INCOME", "EXPENSE", "BALANCE"
    )?;
    writeln!(out, "{}", "-".repeat(68))?;
    for entry in entries {
        writeln!(
            out,
            "{:<20} {:<8} {:>12} {:>12} {:>12}",
            truncate(&entry.wallet_name, 20),
            entry.currency,
            format_amount(entry.totals.income),
            format_amount(entry.totals.expense),
            format_amount(entry.balance)
        )?;
    }
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
