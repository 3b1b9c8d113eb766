mod common;

use common::{day, fixed_session};
use day_ledger::{
    export::{default_file_name, render_summary, write_summary},
    Ledger,
};
use std::fs;
use tempfile::tempdir;

const SAMPLE_SUMMARY: &str = "DAY CLOSING BALANCE SUMMARY
Date: Sunday, 28 September 2025
========================================

Opening Balance: ₹1000.00
Cash Sales: ₹500.00
Digital Sales: ₹750.00
Other Income: ₹0.00
Total Income: ₹1250.00
Cash Expenses: ₹200.00
========================================
Closing Balance: ₹2050.00
Physical Cash Balance: ₹1300.00

TRANSACTION DETAILS
========================================
04:00 pm - Cash Expenses: ₹200.00
  Description: Supplies purchase

03:15 pm - Digital Sales: ₹750.00
  Description: UPI payment

02:30 pm - Cash Sales: ₹500.00
  Description: Medicine sale

";

#[test]
fn sample_summary_text_is_exact() {
    let mut session = fixed_session();
    session.load_sample_data();
    let text = render_summary(session.ledger(), session.current_date(), "₹");
    assert_eq!(text, SAMPLE_SUMMARY);
}

#[test]
fn empty_summary_stops_after_balances() {
    let mut ledger = Ledger::new();
    ledger.set_opening_balance(12.5).unwrap();
    let text = render_summary(&ledger, day(), "$");

    assert!(text.starts_with("DAY CLOSING BALANCE SUMMARY\nDate: Sunday, 28 September 2025\n"));
    assert!(text.contains("Opening Balance: $12.50\n"));
    assert!(text.ends_with("Physical Cash Balance: $12.50\n\n"));
    assert!(!text.contains("TRANSACTION DETAILS"));
    assert_eq!(text.matches(&"=".repeat(40)).count(), 2);
}

#[test]
fn write_summary_creates_file_and_parents() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("exports").join(default_file_name(day()));
    write_summary(&path, SAMPLE_SUMMARY).expect("export");

    assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE_SUMMARY);
    assert!(path.ends_with("day-closing-balance-2025-09-28.txt"));
    let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
