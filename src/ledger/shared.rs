// SharedLedger - a cloneable handle that serialises access to one ledger
//
// Every call takes the same lock, so a transaction and the commit it may
// trigger are never observed half done by another caller.

use crate::ledger::account::Account;
use crate::ledger::block::Block;
use crate::ledger::chain::Ledger;
use crate::ledger::error::LedgerError;
use crate::ledger::transaction::Transaction;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Thread-safe handle to a ledger
#[derive(Clone, Debug)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
    next_id: Arc<AtomicU64>,
}

impl SharedLedger {
    /// Wrap a ledger for shared use
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    // A panic while holding the lock cannot leave the ledger half mutated,
    // since blocks validate fully before writing, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Generate a fresh transaction id ("tx-1", "tx-2", ...)
    pub fn next_transaction_id(&self) -> String {
        format!("tx-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Run a closure with read access to the ledger
    pub fn with_ledger<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        let guard = self.lock();
        f(&*guard)
    }

    /// Create an account in the working block
    pub fn create_account(&self, address: impl Into<String>) -> Result<Account, LedgerError> {
        self.lock().create_account(address)
    }

    /// Process a transaction, including any commit it triggers
    pub fn process_transaction(&self, transaction: Transaction) -> Result<(), LedgerError> {
        self.lock().process_transaction(transaction)
    }

    /// Get an account balance as of the last committed block
    pub fn account_balance(&self, address: &str) -> Result<i64, LedgerError> {
        self.lock().account_balance(address)
    }

    /// Get all balances as of the last committed block
    pub fn account_balances(&self) -> Result<BTreeMap<String, i64>, LedgerError> {
        self.lock().account_balances()
    }

    /// Get a copy of a committed transaction
    pub fn transaction(&self, id: &str) -> Result<Transaction, LedgerError> {
        self.lock().transaction(id).cloned()
    }

    /// Get a copy of a committed block
    pub fn block(&self, number: usize) -> Result<Block, LedgerError> {
        self.lock().block(number).cloned()
    }

    /// Validate the committed chain
    pub fn validate(&self) -> Result<(), LedgerError> {
        self.lock().validate()
    }
}
