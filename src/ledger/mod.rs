//! Ledger domain: transactions, the type registry, and totals.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use ledger::{Ledger, Totals};
pub use transaction::{CategoryKind, Transaction, TransactionId, TransactionType};
