#![doc(test(attr(deny(warnings))))]

//! Day Ledger keeps a single day's cash register: an opening balance, the
//! day's sales, income and expenses, and the totals derived from them.

pub mod cli;
pub mod config;
pub mod currency;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod session;
pub mod utils;

pub use errors::{DayLedgerError, ValidationError};
pub use ledger::{Ledger, Totals, Transaction, TransactionId, TransactionType};
pub use session::DaySession;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Day Ledger tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
