use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

use super::transaction::{Transaction, TransactionId, TransactionType};

/// Opening balance plus the day's transactions, in insertion order.
///
/// Deserializing goes through the same checks as the ledger operations: the
/// balance must be a non-negative number, ids must be distinct, and the id
/// counter resumes after the highest loaded id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LedgerRecord")]
pub struct Ledger {
    opening_balance: f64,
    transactions: Vec<Transaction>,
    /// `None` once every id has been handed out.
    #[serde(skip_serializing)]
    next_id: Option<u64>,
}

#[derive(Deserialize)]
struct LedgerRecord {
    opening_balance: f64,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

impl TryFrom<LedgerRecord> for Ledger {
    type Error = ValidationError;

    fn try_from(record: LedgerRecord) -> Result<Self, Self::Error> {
        let mut ledger = Ledger::new();
        ledger.set_opening_balance(record.opening_balance)?;
        ledger.replace_all(record.transactions, record.opening_balance)?;
        Ok(ledger)
    }
}

/// Figures derived from a ledger. Digital sales count toward the closing
/// balance but never toward the physical cash balance.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    pub opening_balance: f64,
    pub cash_sales: f64,
    pub digital_sales: f64,
    pub other_income: f64,
    pub expenses: f64,
    pub total_sales: f64,
    pub total_income: f64,
    pub net_cash_flow: f64,
    pub closing_balance: f64,
    pub physical_cash_balance: f64,
}

impl Totals {
    pub fn from_parts(
        opening_balance: f64,
        cash_sales: f64,
        digital_sales: f64,
        other_income: f64,
        expenses: f64,
    ) -> Self {
        let total_sales = cash_sales + digital_sales;
        let total_income = cash_sales + digital_sales + other_income;
        let net_cash_flow = total_income - expenses;
        Self {
            opening_balance,
            cash_sales,
            digital_sales,
            other_income,
            expenses,
            total_sales,
            total_income,
            net_cash_flow,
            closing_balance: opening_balance + net_cash_flow,
            physical_cash_balance: opening_balance + cash_sales + other_income - expenses,
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            opening_balance: 0.0,
            transactions: Vec::new(),
            next_id: Some(1),
        }
    }

    pub fn opening_balance(&self) -> f64 {
        self.opening_balance
    }

    pub fn set_opening_balance(&mut self, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidAmount);
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeOpeningBalance);
        }
        self.opening_balance = value;
        tracing::debug!(opening_balance = value, "opening balance set");
        Ok(())
    }

    /// Validates and stores a new transaction, returning the stored copy.
    ///
    /// Amount is checked before description, so a call failing both reports
    /// [`ValidationError::InvalidAmount`].
    pub fn add_transaction(
        &mut self,
        kind: TransactionType,
        amount: f64,
        description: &str,
        timestamp: NaiveDateTime,
    ) -> Result<Transaction, ValidationError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::InvalidAmount);
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let transaction = Transaction::new(
            self.allocate_id()?,
            kind,
            amount,
            description,
            timestamp,
        );
        tracing::debug!(
            id = %transaction.id,
            kind = kind.key(),
            amount,
            "transaction added"
        );
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Same as [`Ledger::add_transaction`] but takes the type as its string key.
    pub fn record(
        &mut self,
        kind: &str,
        amount: f64,
        description: &str,
        timestamp: NaiveDateTime,
    ) -> Result<Transaction, ValidationError> {
        let kind: TransactionType = kind.parse()?;
        self.add_transaction(kind, amount, description, timestamp)
    }

    pub fn delete_transaction(&mut self, id: TransactionId) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id != id);
        let removed = self.transactions.len() != before;
        if removed {
            tracing::debug!(%id, "transaction deleted");
        }
        removed
    }

    pub fn clear_transactions(&mut self) {
        tracing::debug!(count = self.transactions.len(), "transactions cleared");
        self.transactions.clear();
    }

    /// Replaces balance and transactions with trusted data. Only id
    /// uniqueness is checked.
    pub fn replace_all(
        &mut self,
        transactions: Vec<Transaction>,
        opening_balance: f64,
    ) -> Result<(), ValidationError> {
        let mut ids: Vec<TransactionId> = transactions.iter().map(|txn| txn.id).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(ValidationError::DuplicateId(pair[0]));
        }
        let resume = match ids.last() {
            Some(highest) => highest.0.checked_add(1),
            None => Some(1),
        };
        // The counter never moves backward.
        self.next_id = self.next_id.zip(resume).map(|(current, resume)| current.max(resume));
        self.transactions = transactions;
        self.opening_balance = opening_balance;
        Ok(())
    }

    pub fn compute_totals(&self) -> Totals {
        let mut cash_sales = 0.0;
        let mut digital_sales = 0.0;
        let mut other_income = 0.0;
        let mut expenses = 0.0;
        for txn in &self.transactions {
            match txn.kind {
                TransactionType::CashSale => cash_sales += txn.amount,
                TransactionType::DigitalSale => digital_sales += txn.amount,
                TransactionType::OtherIncome => other_income += txn.amount,
                TransactionType::Expense => expenses += txn.amount,
            }
        }
        Totals::from_parts(
            self.opening_balance,
            cash_sales,
            digital_sales,
            other_income,
            expenses,
        )
    }

    /// Most recent first. Equal timestamps list the later insertion first.
    pub fn list_transactions_sorted(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().rev().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn allocate_id(&mut self) -> Result<TransactionId, ValidationError> {
        let id = self.next_id.ok_or(ValidationError::IdsExhausted)?;
        self.next_id = id.checked_add(1);
        Ok(TransactionId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 28)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn new_ledger_is_empty_with_zero_balance() {
        let ledger = Ledger::new();
        assert_eq!(ledger.opening_balance(), 0.0);
        assert!(ledger.is_empty());
        assert_eq!(ledger.compute_totals(), Totals::default());
    }

    #[test]
    fn negative_opening_balance_leaves_state_unchanged() {
        let mut ledger = Ledger::new();
        ledger.set_opening_balance(250.0).unwrap();
        let err = ledger.set_opening_balance(-0.01).unwrap_err();
        assert_eq!(err, ValidationError::NegativeOpeningBalance);
        assert_eq!(ledger.opening_balance(), 250.0);
    }

    #[test]
    fn non_finite_opening_balance_is_rejected() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger.set_opening_balance(f64::NAN),
            Err(ValidationError::InvalidAmount)
        );
        assert_eq!(ledger.opening_balance(), 0.0);
    }

    #[test]
    fn same_instant_additions_get_distinct_ids() {
        let mut ledger = Ledger::new();
        let first = ledger
            .add_transaction(TransactionType::CashSale, 10.0, "a", at(9, 0))
            .unwrap();
        let second = ledger
            .add_transaction(TransactionType::CashSale, 10.0, "b", at(9, 0))
            .unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn description_is_stored_trimmed() {
        let mut ledger = Ledger::new();
        let txn = ledger
            .add_transaction(TransactionType::OtherIncome, 5.0, "  tip jar \n", at(9, 0))
            .unwrap();
        assert_eq!(txn.description, "tip jar");
    }

    #[test]
    fn amount_is_checked_before_description() {
        let mut ledger = Ledger::new();
        let err = ledger
            .add_transaction(TransactionType::Expense, 0.0, "   ", at(9, 0))
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidAmount);
    }

    #[test]
    fn record_checks_type_first() {
        let mut ledger = Ledger::new();
        let err = ledger.record("gift", -1.0, "", at(9, 0)).unwrap_err();
        assert_eq!(err, ValidationError::UnknownType("gift".into()));
        assert!(ledger.is_empty());
    }

    #[test]
    fn ties_list_later_insertion_first() {
        let mut ledger = Ledger::new();
        let early = ledger
            .add_transaction(TransactionType::CashSale, 1.0, "early", at(8, 0))
            .unwrap();
        let first = ledger
            .add_transaction(TransactionType::CashSale, 1.0, "first", at(10, 0))
            .unwrap();
        let second = ledger
            .add_transaction(TransactionType::CashSale, 1.0, "second", at(10, 0))
            .unwrap();
        let ids: Vec<_> = ledger
            .list_transactions_sorted()
            .into_iter()
            .map(|txn| txn.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id, early.id]);
        assert_eq!(ledger.transactions()[0].id, early.id);
    }

    #[test]
    fn replace_all_rejects_duplicate_ids() {
        let mut ledger = Ledger::new();
        ledger.set_opening_balance(10.0).unwrap();
        let dup = vec![
            Transaction::new(TransactionId(4), TransactionType::CashSale, 1.0, "x", at(9, 0)),
            Transaction::new(TransactionId(4), TransactionType::Expense, 1.0, "y", at(9, 5)),
        ];
        let err = ledger.replace_all(dup, 99.0).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateId(TransactionId(4)));
        assert_eq!(ledger.opening_balance(), 10.0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn ids_continue_after_bulk_load() {
        let mut ledger = Ledger::new();
        let loaded = vec![Transaction::new(
            TransactionId(7),
            TransactionType::CashSale,
            1.0,
            "x",
            at(9, 0),
        )];
        ledger.replace_all(loaded, 0.0).unwrap();
        let next = ledger
            .add_transaction(TransactionType::CashSale, 2.0, "y", at(9, 1))
            .unwrap();
        assert_eq!(next.id, TransactionId(8));
    }

    #[test]
    fn highest_possible_id_is_never_reused() {
        let mut ledger = Ledger::new();
        let loaded = vec![Transaction::new(
            TransactionId(u64::MAX),
            TransactionType::CashSale,
            1.0,
            "x",
            at(9, 0),
        )];
        ledger.replace_all(loaded, 0.0).unwrap();
        let err = ledger
            .add_transaction(TransactionType::CashSale, 2.0, "y", at(9, 1))
            .unwrap_err();
        assert_eq!(err, ValidationError::IdsExhausted);
        assert_eq!(ledger.transaction_count(), 1);
    }

    #[test]
    fn last_id_is_handed_out_once() {
        let mut ledger = Ledger::new();
        let loaded = vec![Transaction::new(
            TransactionId(u64::MAX - 1),
            TransactionType::CashSale,
            1.0,
            "x",
            at(9, 0),
        )];
        ledger.replace_all(loaded, 0.0).unwrap();
        let last = ledger
            .add_transaction(TransactionType::Expense, 2.0, "y", at(9, 1))
            .unwrap();
        assert_eq!(last.id, TransactionId(u64::MAX));
        assert_eq!(
            ledger.add_transaction(TransactionType::Expense, 3.0, "z", at(9, 2)),
            Err(ValidationError::IdsExhausted)
        );
    }

    #[test]
    fn deserializing_resumes_ids_after_loaded_ones() {
        let json = r#"{
            "opening_balance": 50.0,
            "transactions": [
                {"id": 1, "type": "cash_sale", "amount": 10.0, "description": "a", "timestamp": "2025-09-28T09:00:00"},
                {"id": 5, "type": "expense", "amount": 2.0, "description": "b", "timestamp": "2025-09-28T09:30:00"}
            ]
        }"#;
        let mut ledger: Ledger = serde_json::from_str(json).unwrap();
        assert_eq!(ledger.opening_balance(), 50.0);
        let next = ledger
            .add_transaction(TransactionType::CashSale, 1.0, "c", at(10, 0))
            .unwrap();
        assert_eq!(next.id, TransactionId(6));
    }

    #[test]
    fn deserializing_rejects_invalid_ledgers() {
        let negative = r#"{"opening_balance": -50.0, "transactions": []}"#;
        let err = serde_json::from_str::<Ledger>(negative).unwrap_err();
        assert!(err.to_string().contains("Opening balance cannot be negative"));

        let duplicate = r#"{
            "opening_balance": 0.0,
            "transactions": [
                {"id": 1, "type": "cash_sale", "amount": 10.0, "description": "a", "timestamp": "2025-09-28T09:00:00"},
                {"id": 1, "type": "expense", "amount": 2.0, "description": "b", "timestamp": "2025-09-28T09:30:00"}
            ]
        }"#;
        let err = serde_json::from_str::<Ledger>(duplicate).unwrap_err();
        assert!(err.to_string().contains("Duplicate transaction id 1"));
    }

    #[test]
    fn serialized_ledger_reloads_with_same_contents() {
        let mut ledger = Ledger::new();
        ledger.set_opening_balance(100.0).unwrap();
        ledger
            .add_transaction(TransactionType::DigitalSale, 20.0, "card", at(11, 0))
            .unwrap();
        let json = serde_json::to_string(&ledger).unwrap();
        assert!(!json.contains("next_id"));
        let mut reloaded: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.compute_totals(), ledger.compute_totals());
        let next = reloaded
            .add_transaction(TransactionType::Expense, 1.0, "bag", at(11, 5))
            .unwrap();
        assert_eq!(next.id, TransactionId(2));
    }
}
