//! Transaction ledger
//!
//! The ordered, newest-first collection of payment transactions. New entries
//! are pushed onto the front so the ledger is always in display order
//! without a sort step.

use std::collections::{HashSet, VecDeque};
use std::sync::RwLock;

use chrono::{Local, NaiveDate};

use crate::error::PaySphereError;
use crate::models::{
    Direction, Money, Transaction, TransactionId, TransactionState, MANUAL_ENTRY_CATEGORY,
    MAX_TRANSACTION_AMOUNT,
};

type Clock = Box<dyn Fn() -> NaiveDate + Send + Sync>;

/// The id after `id`; the id space running out is a validation failure
fn following(id: TransactionId) -> Result<TransactionId, PaySphereError> {
    id.next()
        .ok_or_else(|| PaySphereError::Validation(format!("No transaction id follows {}", id)))
}

struct LedgerState {
    /// Newest first
    transactions: VecDeque<Transaction>,
    /// Next id to hand out; always greater than every id in `transactions`
    next_id: TransactionId,
}

/// In-memory ledger with single-writer locking.
///
/// Every mutation takes the write lock once, so id assignment and insertion
/// happen as one unit and readers never see a partial write.
pub struct TransactionLedger {
    state: RwLock<LedgerState>,
    clock: Clock,
}

impl TransactionLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LedgerState {
                transactions: VecDeque::new(),
                next_id: TransactionId::new(1),
            }),
            clock: Box::new(|| Local::now().date_naive()),
        }
    }

    /// Create a ledger from seed transactions given newest-first.
    ///
    /// Fails if any seed record is invalid or two share an id.
    pub fn from_seed(seed: Vec<Transaction>) -> Result<Self, PaySphereError> {
        let mut seen = HashSet::new();
        for txn in &seed {
            txn.validate()
                .map_err(|e| PaySphereError::Validation(format!("Seed {}: {}", txn.id, e)))?;
            if !seen.insert(txn.id) {
                return Err(PaySphereError::Validation(format!(
                    "Duplicate transaction id in seed: {}",
                    txn.id
                )));
            }
        }

        let next_id = match seed.iter().map(|t| t.id).max() {
            Some(max) => following(max)?,
            None => TransactionId::new(1),
        };

        let ledger = Self::new();
        {
            let mut state = ledger.write()?;
            state.transactions = seed.into();
            state.next_id = next_id;
        }
        Ok(ledger)
    }

    /// Replace the date source used for new transactions
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, LedgerState>, PaySphereError> {
        self.state
            .read()
            .map_err(|e| PaySphereError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, LedgerState>, PaySphereError> {
        self.state
            .write()
            .map_err(|e| PaySphereError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Insert a transaction at the front.
    ///
    /// The record must be valid and its id unused. Later generated ids are
    /// kept above it.
    pub fn append(&self, txn: Transaction) -> Result<(), PaySphereError> {
        txn.validate()
            .map_err(|e| PaySphereError::Validation(e.to_string()))?;

        let mut state = self.write()?;
        if state.transactions.iter().any(|t| t.id == txn.id) {
            return Err(PaySphereError::Validation(format!(
                "Transaction id already exists: {}",
                txn.id
            )));
        }
        if txn.id >= state.next_id {
            state.next_id = following(txn.id)?;
        }
        state.transactions.push_front(txn);
        Ok(())
    }

    /// Record a completed outgoing payment dated today
    pub fn create_sent(
        &self,
        counterparty: &str,
        amount: Money,
        note: Option<&str>,
    ) -> Result<Transaction, PaySphereError> {
        self.create(
            Direction::Outgoing,
            TransactionState::Completed,
            counterparty,
            amount,
            note,
        )
    }

    /// Record a pending incoming payment request dated today.
    ///
    /// Pending requests are excluded from received totals until settled.
    pub fn create_requested(
        &self,
        counterparty: &str,
        amount: Money,
        note: Option<&str>,
    ) -> Result<Transaction, PaySphereError> {
        self.create(
            Direction::Incoming,
            TransactionState::Pending,
            counterparty,
            amount,
            note,
        )
    }

    fn create(
        &self,
        direction: Direction,
        state: TransactionState,
        counterparty: &str,
        amount: Money,
        note: Option<&str>,
    ) -> Result<Transaction, PaySphereError> {
        let counterparty = counterparty.trim();
        if counterparty.is_empty() {
            return Err(PaySphereError::Validation(
                "Counterparty is required".into(),
            ));
        }
        if !amount.is_positive() {
            return Err(PaySphereError::Validation(format!(
                "Amount must be greater than zero, got {}",
                amount
            )));
        }
        if amount > MAX_TRANSACTION_AMOUNT {
            return Err(PaySphereError::Validation(format!(
                "Amount {} exceeds the limit of {}",
                amount, MAX_TRANSACTION_AMOUNT
            )));
        }

        let note = note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        let occurred_on = (self.clock)();

        let mut ledger = self.write()?;
        let id = ledger.next_id;
        let next_id = following(id)?;
        let txn = Transaction::new(
            id,
            direction,
            counterparty,
            amount,
            occurred_on,
            state,
            Some(MANUAL_ENTRY_CATEGORY),
            note,
        );
        ledger.next_id = next_id;
        ledger.transactions.push_front(txn.clone());
        Ok(txn)
    }

    /// Copy of the ledger in its current order.
    ///
    /// Later mutations do not affect a snapshot already taken.
    pub fn snapshot(&self) -> Result<Vec<Transaction>, PaySphereError> {
        let state = self.read()?;
        Ok(state.transactions.iter().cloned().collect())
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Transaction, PaySphereError> {
        let state = self.read()?;
        state
            .transactions
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| PaySphereError::transaction_not_found(id.to_string()))
    }

    /// Count transactions
    pub fn len(&self) -> Result<usize, PaySphereError> {
        Ok(self.read()?.transactions.len())
    }

    pub fn is_empty(&self) -> Result<bool, PaySphereError> {
        Ok(self.len()? == 0)
    }
}

impl Default for TransactionLedger {
    fn default() -> Self {
        Self::new()
    }
}
