//! Transaction records and the closed registry of transaction types.

use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Ledger-scoped transaction identifier handed out by a monotonic counter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TransactionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TransactionId)
    }
}

/// Whether a transaction type adds to or draws from the day's money.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    CashSale,
    DigitalSale,
    OtherIncome,
    Expense,
}

impl TransactionType {
    pub const ALL: [TransactionType; 4] = [
        TransactionType::CashSale,
        TransactionType::DigitalSale,
        TransactionType::OtherIncome,
        TransactionType::Expense,
    ];

    /// Stable key used by callers and the serialized form.
    pub fn key(self) -> &'static str {
        match self {
            TransactionType::CashSale => "cash_sale",
            TransactionType::DigitalSale => "digital_sale",
            TransactionType::OtherIncome => "other_income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TransactionType::CashSale => "Cash Sales",
            TransactionType::DigitalSale => "Digital Sales",
            TransactionType::OtherIncome => "Other Income",
            TransactionType::Expense => "Cash Expenses",
        }
    }

    pub fn category(self) -> CategoryKind {
        match self {
            TransactionType::CashSale
            | TransactionType::DigitalSale
            | TransactionType::OtherIncome => CategoryKind::Income,
            TransactionType::Expense => CategoryKind::Expense,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            TransactionType::CashSale => "💵",
            TransactionType::DigitalSale => "💳",
            TransactionType::OtherIncome => "💰",
            TransactionType::Expense => "💸",
        }
    }

    pub fn is_income(self) -> bool {
        self.category() == CategoryKind::Income
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        TransactionType::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| ValidationError::UnknownType(key.to_string()))
    }
}

/// A recorded movement of money. Immutable once stored; only removal is possible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub description: String,
    pub timestamp: NaiveDateTime,
}

impl Transaction {
    /// Builds a transaction without validation. Used for trusted bulk data.
    pub fn new(
        id: TransactionId,
        kind: TransactionType,
        amount: f64,
        description: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            kind,
            amount,
            description: description.into(),
            timestamp,
        }
    }
}
