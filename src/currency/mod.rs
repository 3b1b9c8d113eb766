//! Currency, date and time rendering shared by the export text and the shell.

use chrono::{NaiveDate, NaiveDateTime};

use crate::ledger::Transaction;

/// Symbol used when no configuration overrides it.
pub const DEFAULT_SYMBOL: &str = "₹";

/// Renders `amount` with the symbol prefix and exactly two decimals.
///
/// Negative values keep the sign after the symbol, e.g. `₹-12.50`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    format!("{}{:.2}", symbol, amount)
}

/// Amount prefixed with `+` for income and `-` for expenses.
pub fn format_signed(transaction: &Transaction, symbol: &str) -> String {
    let sign = if transaction.kind.is_income() { '+' } else { '-' };
    format!("{}{}", sign, format_currency(transaction.amount, symbol))
}

/// Long header date, e.g. `Sunday, 28 September 2025`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}

/// Hour and minute on a 12-hour clock, e.g. `02:30 pm`.
pub fn format_time(timestamp: NaiveDateTime) -> String {
    timestamp.format("%I:%M %P").to_string()
}
