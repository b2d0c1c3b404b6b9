use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Monetary amounts are exact decimals to avoid floating-point drift.
pub type Amount = Decimal;

/// Largest accepted magnitude for a single amount. Sums of bounded amounts
/// stay far below `Decimal::MAX`, so balances and totals cannot overflow.
pub const MAX_AMOUNT: Amount = dec!(1000000000000000000);

/// Whether `amount` lies within `-MAX_AMOUNT..=MAX_AMOUNT`.
pub fn in_range(amount: Amount) -> bool {
    amount.abs() <= MAX_AMOUNT
}

/// Format an amount with exactly two decimal places, rounding half away from zero.
/// Example: 1000 -> "1000.00", 12.345 -> "12.35", -0.5 -> "-0.50"
pub fn format_amount(amount: Amount) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Parse a user-supplied decimal string into an amount.
/// Accepts an optional sign and either `.` or `,` as the decimal separator.
/// Example: "50" -> 50, "12,5" -> 12.5, "-3.10" -> -3.10
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let normalized = input.replace(',', ".");
    let amount = Decimal::from_str(&normalized).map_err(|_| ParseAmountError::InvalidFormat)?;
    if !in_range(amount) {
        return Err(ParseAmountError::OutOfRange);
    }
    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
    OutOfRange,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
            ParseAmountError::OutOfRange => {
                write!(f, "amount exceeds {}", format_amount(MAX_AMOUNT))
            }
        }
    }
}

impl std::error::Error for ParseAmountError {}
