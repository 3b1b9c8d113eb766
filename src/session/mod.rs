//! Day session: owns the ledger for the current day and its date.

mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::ValidationError;
use crate::ledger::{Ledger, Totals, Transaction, TransactionId, TransactionType};

pub const SAMPLE_OPENING_BALANCE: f64 = 1000.0;

/// The active day. Exactly one ledger is held at a time; starting a new day
/// replaces it.
#[derive(Debug)]
pub struct DaySession<C: Clock = SystemClock> {
    id: Uuid,
    ledger: Ledger,
    current_date: NaiveDate,
    clock: C,
}

impl DaySession<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for DaySession<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> DaySession<C> {
    pub fn with_clock(clock: C) -> Self {
        let current_date = clock.today();
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, date = %current_date, "day session opened");
        Self {
            id,
            ledger: Ledger::new(),
            current_date,
            clock,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn set_opening_balance(&mut self, value: f64) -> Result<(), ValidationError> {
        self.ledger.set_opening_balance(value)
    }

    /// Adds a transaction stamped with the clock's current time.
    pub fn add_transaction(
        &mut self,
        kind: &str,
        amount: f64,
        description: &str,
    ) -> Result<Transaction, ValidationError> {
        let now = self.clock.now();
        self.ledger.record(kind, amount, description, now)
    }

    pub fn delete_transaction(&mut self, id: TransactionId) -> bool {
        self.ledger.delete_transaction(id)
    }

    pub fn clear_all_transactions(&mut self) {
        self.ledger.clear_transactions();
    }

    pub fn compute_totals(&self) -> Totals {
        self.ledger.compute_totals()
    }

    pub fn list_transactions_sorted(&self) -> Vec<&Transaction> {
        self.ledger.list_transactions_sorted()
    }

    /// Replaces transactions and opening balance with caller-trusted data.
    ///
    /// Per-field rules are not applied; duplicate ids are rejected and leave
    /// the session untouched.
    pub fn load_bulk(
        &mut self,
        transactions: Vec<Transaction>,
        opening_balance: f64,
    ) -> Result<(), ValidationError> {
        let count = transactions.len();
        self.ledger.replace_all(transactions, opening_balance)?;
        tracing::info!(session = %self.id, count, opening_balance, "bulk data loaded");
        Ok(())
    }

    pub fn load_sample_data(&mut self) {
        let sample = sample_transactions(self.current_date);
        // Sample ids are distinct by construction.
        if let Err(err) = self.load_bulk(sample, SAMPLE_OPENING_BALANCE) {
            tracing::error!(%err, "sample data rejected");
        }
    }

    /// Discards the current ledger and date. There is no undo.
    pub fn start_new_day(&mut self) {
        let previous = self.id;
        self.ledger = Ledger::new();
        self.current_date = self.clock.today();
        self.id = Uuid::new_v4();
        tracing::info!(
            previous = %previous,
            session = %self.id,
            date = %self.current_date,
            "new day started"
        );
    }
}

/// Demo dataset: one cash sale, one digital sale, one expense on `date`.
pub fn sample_transactions(date: NaiveDate) -> Vec<Transaction> {
    let entries = [
        (1, TransactionType::CashSale, 500.0, "Medicine sale", (14, 30)),
        (2, TransactionType::DigitalSale, 750.0, "UPI payment", (15, 15)),
        (3, TransactionType::Expense, 200.0, "Supplies purchase", (16, 0)),
    ];
    entries
        .into_iter()
        .filter_map(|(id, kind, amount, description, (hour, minute))| {
            let timestamp = date.and_hms_opt(hour, minute, 0)?;
            Some(Transaction::new(
                TransactionId(id),
                kind,
                amount,
                description,
                timestamp,
            ))
        })
        .collect()
}
