//! Plain-text day closing summary and its file output.

use std::{fmt, path::Path};

use chrono::NaiveDate;

use crate::{
    currency::{format_currency, format_long_date, format_time},
    errors::DayLedgerError,
    ledger::Ledger,
    utils::persistence::write_atomic,
};

pub const TITLE: &str = "DAY CLOSING BALANCE SUMMARY";
pub const DETAILS_TITLE: &str = "TRANSACTION DETAILS";
const RULE_WIDTH: usize = 40;

/// Day closing summary. Transaction details are appended only when the
/// ledger has transactions, most recent first.
pub struct DaySummary<'a> {
    pub ledger: &'a Ledger,
    pub date: NaiveDate,
    pub symbol: &'a str,
}

impl fmt::Display for DaySummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let totals = self.ledger.compute_totals();
        let money = |amount: f64| format_currency(amount, self.symbol);
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{TITLE}")?;
        writeln!(f, "Date: {}", format_long_date(self.date))?;
        writeln!(f, "{rule}\n")?;
        writeln!(f, "Opening Balance: {}", money(totals.opening_balance))?;
        writeln!(f, "Cash Sales: {}", money(totals.cash_sales))?;
        writeln!(f, "Digital Sales: {}", money(totals.digital_sales))?;
        writeln!(f, "Other Income: {}", money(totals.other_income))?;
        writeln!(f, "Total Income: {}", money(totals.total_income))?;
        writeln!(f, "Cash Expenses: {}", money(totals.expenses))?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Closing Balance: {}", money(totals.closing_balance))?;
        writeln!(
            f,
            "Physical Cash Balance: {}\n",
            money(totals.physical_cash_balance)
        )?;

        if self.ledger.is_empty() {
            return Ok(());
        }
        writeln!(f, "{DETAILS_TITLE}")?;
        writeln!(f, "{rule}")?;
        for txn in self.ledger.list_transactions_sorted() {
            writeln!(
                f,
                "{} - {}: {}",
                format_time(txn.timestamp),
                txn.kind.display_name(),
                money(txn.amount)
            )?;
            writeln!(f, "  Description: {}\n", txn.description)?;
        }
        Ok(())
    }
}

pub fn render_summary(ledger: &Ledger, date: NaiveDate, symbol: &str) -> String {
    DaySummary {
        ledger,
        date,
        symbol,
    }
    .to_string()
}

/// File name for a summary exported on `date`.
pub fn default_file_name(date: NaiveDate) -> String {
    format!("day-closing-balance-{}.txt", date.format("%Y-%m-%d"))
}

/// Writes `contents` to `path` through a temporary sibling file, creating
/// parent directories as needed.
pub fn write_summary(path: &Path, contents: &str) -> Result<(), DayLedgerError> {
    write_atomic(path, contents)?;
    tracing::info!(path = %path.display(), "summary exported");
    Ok(())
}
