use thiserror::Error;

use crate::ledger::TransactionId;

/// Rejections raised by ledger operations. A failed operation never mutates state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Opening balance cannot be negative")]
    NegativeOpeningBalance,
    #[error("Unknown transaction type `{0}`")]
    UnknownType(String),
    #[error("Please enter a valid amount")]
    InvalidAmount,
    #[error("Please enter a description")]
    EmptyDescription,
    #[error("Duplicate transaction id {0}")]
    DuplicateId(TransactionId),
    #[error("No transaction ids left for this day")]
    IdsExhausted,
}

/// Error type for the ambient layers: configuration and exported files.
#[derive(Debug, Error)]
pub enum DayLedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}
