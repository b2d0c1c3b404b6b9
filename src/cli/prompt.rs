use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Result, bail};
use chrono::NaiveDate;

use crate::application::{AppError, DataSource, LedgerService};
use crate::domain::{Amount, Transaction, TransactionType, YearMonth, parse_amount};

/// Line-oriented question/answer driver for the interactive mode.
/// Generic over its input and output so the whole flow can run against
/// in-memory buffers.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `question` and read one line. Returns `None` at end of input.
    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask until `parse` accepts the answer, printing its complaint each time.
    fn ask_until<T, E: Display>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> Result<T> {
        loop {
            let Some(answer) = self.ask(question)? else {
                bail!("Input ended while waiting for: {}", question.trim());
            };
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(complaint) => writeln!(self.output, "{}", complaint)?,
            }
        }
    }

    /// Menu for picking where wallets come from. Anything unrecognized generates.
    pub fn choose_source(&mut self, data_file: &Path) -> Result<DataSource> {
        writeln!(self.output, "1 - Generate sample data")?;
        writeln!(self.output, "2 - Load from {}", data_file.display())?;
        writeln!(self.output, "3 - Enter manually")?;

        let choice = self.ask("Choice: ")?.unwrap_or_default();
        Ok(match choice.trim() {
            "2" => DataSource::File,
            "3" => DataSource::Manual,
            _ => DataSource::Generate,
        })
    }

    /// Read the target month. Prints an error and returns `None` on bad input.
    pub fn ask_month(&mut self) -> Result<Option<YearMonth>> {
        let answer = self.ask("Enter month (YYYY-MM): ")?.unwrap_or_default();
        match answer.parse::<YearMonth>() {
            Ok(month) => Ok(Some(month)),
            Err(e) => {
                log::debug!("{}", e);
                writeln!(self.output, "Invalid date format")?;
                Ok(None)
            }
        }
    }

    /// Enter wallets one by one until an empty name is given.
    pub fn enter_wallets(&mut self, service: &mut LedgerService) -> Result<()> {
        loop {
            let name = match self.ask("Wallet name (empty to finish): ")? {
                Some(name) if !name.trim().is_empty() => name.trim().to_string(),
                _ => break,
            };
            let currency = self
                .ask("Currency: ")?
                .unwrap_or_default()
                .trim()
                .to_string();
            let initial_balance = self.ask_until("Initial balance: ", |s| {
                parse_amount(s).map_err(|e| AppError::InvalidAmount(e.to_string()))
            })?;

            if let Err(e) = service.create_wallet(name.clone(), currency, initial_balance) {
                writeln!(self.output, "{}", e)?;
                continue;
            }

            self.enter_transactions(service, &name)?;
        }
        Ok(())
    }

    fn enter_transactions(&mut self, service: &mut LedgerService, wallet_name: &str) -> Result<()> {
        loop {
            let more = self
                .ask("Add a transaction? (y/n): ")?
                .is_some_and(|a| a.trim().eq_ignore_ascii_case("y"));
            if !more {
                return Ok(());
            }

            let date = self.ask_until("Date (YYYY-MM-DD): ", parse_day)?;
            let amount = self.ask_until("Amount: ", parse_transaction_amount)?;
            let kind = self.ask_until("Type (Income/Expense): ", |s| s.parse::<TransactionType>())?;
            let description = self.ask("Description: ")?.unwrap_or_default();

            let transaction = Transaction::new(date, amount, kind, description);
            if let Err(e) = service.record_transaction(wallet_name, transaction) {
                writeln!(self.output, "{}", e)?;
            }
        }
    }
}

pub(crate) fn parse_day(input: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(format!("'{}', expected YYYY-MM-DD", input.trim())))
}

pub(crate) fn parse_month(input: &str) -> Result<YearMonth, AppError> {
    input
        .parse()
        .map_err(|e: crate::domain::ParseMonthError| AppError::InvalidMonth(e.to_string()))
}

/// Transaction amounts are non-negative and at most `MAX_AMOUNT`; the type
/// carries the direction.
pub(crate) fn parse_transaction_amount(input: &str) -> Result<Amount, AppError> {
    let amount = parse_amount(input).map_err(|e| AppError::InvalidAmount(e.to_string()))?;
    if amount.is_sign_negative() {
        return Err(AppError::InvalidAmount("must not be negative".to_string()));
    }
    Ok(amount)
}
