// Block - one slot of chain state
//
// A block starts out WORKING: it owns a private copy of every account and
// accepts transactions until it reaches the configured size. The ledger
// then commits it, caching its hash, and it never changes again.

use crate::ledger::account::Account;
use crate::ledger::config::LedgerConfig;
use crate::ledger::error::LedgerError;
use crate::ledger::hash::merkle_hash;
use crate::ledger::transaction::Transaction;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Lifecycle state of a block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockState {
    /// Accepting transactions, no hash yet
    Working,
    /// Hashed and linked into the chain
    Committed,
}

/// A block of transactions and the account snapshot they produced
#[derive(Clone, Debug)]
pub struct Block {
    /// 1-based position in the chain
    number: usize,
    /// Ledger seed, mixed into the hash
    seed: String,
    config: Arc<LedgerConfig>,
    /// Accounts keyed by address; owned copies, never shared
    accounts: BTreeMap<String, Account>,
    /// Transactions keyed by id
    transactions: BTreeMap<String, Transaction>,
    /// Hash of the predecessor, cached when this block was created
    previous_hash: String,
    /// Hash of this block, set on commit
    hash: Option<String>,
}

impl Block {
    /// Create the first block of a chain: no predecessor and no accounts
    pub fn genesis(seed: impl Into<String>, config: Arc<LedgerConfig>) -> Self {
        Self {
            number: 1,
            seed: seed.into(),
            config,
            accounts: BTreeMap::new(),
            transactions: BTreeMap::new(),
            previous_hash: String::new(),
            hash: None,
        }
    }

    /// Spawn the next working block from this one
    ///
    /// The accounts are deep copies, so the new block can never alter this
    /// one's snapshot.
    pub fn successor(&self) -> Block {
        Block {
            number: self.number + 1,
            seed: self.seed.clone(),
            config: Arc::clone(&self.config),
            accounts: self.accounts.clone(),
            transactions: BTreeMap::new(),
            previous_hash: self.hash.clone().unwrap_or_else(|| self.compute_hash()),
            hash: None,
        }
    }

    /// Get the block number
    pub fn number(&self) -> usize {
        self.number
    }

    /// Get the hash, present once the block is committed
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Get the cached hash of the previous block (empty for genesis)
    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    /// Get the lifecycle state
    pub fn state(&self) -> BlockState {
        if self.hash.is_some() {
            BlockState::Committed
        } else {
            BlockState::Working
        }
    }

    /// Check whether the block has been committed
    pub fn is_committed(&self) -> bool {
        self.state() == BlockState::Committed
    }

    /// Number of transactions recorded in this block
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Check whether the block has reached its transaction threshold
    pub fn is_full(&self) -> bool {
        self.transactions.len() >= self.config.transactions_per_block
    }

    /// Compute the Merkle hash of this block's current contents
    pub fn compute_hash(&self) -> String {
        merkle_hash([
            self.seed.clone(),
            merkle_hash([self.number.to_string(), self.previous_hash.clone()]),
            merkle_hash(self.transactions.values()),
            merkle_hash(self.accounts.values()),
        ])
    }

    /// Compute and cache this block's hash, moving it to COMMITTED
    pub(crate) fn commit(&mut self) -> String {
        let hash = self.compute_hash();
        self.hash = Some(hash.clone());
        hash
    }

    // ========================================================================
    // ACCOUNTS
    // ========================================================================

    /// Add an account to this block's snapshot
    pub fn add_account(&mut self, account: Account) -> Result<(), LedgerError> {
        let address = account.address().to_string();
        if self.accounts.contains_key(&address) {
            return Err(LedgerError::DuplicateAccount { address });
        }

        debug!(block = self.number, address = %address, "account added");
        self.accounts.insert(address, account);
        Ok(())
    }

    /// Get an account by address
    pub fn account(&self, address: &str) -> Option<&Account> {
        self.accounts.get(address)
    }

    /// Iterate over accounts in address order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Get the balance of one account as recorded in this block
    pub fn account_balance(&self, address: &str) -> Result<i64, LedgerError> {
        self.accounts
            .get(address)
            .map(Account::balance)
            .ok_or_else(|| LedgerError::UnknownAccount {
                address: address.to_string(),
            })
    }

    /// Get all balances as recorded in this block
    pub fn account_balances(&self) -> BTreeMap<String, i64> {
        self.accounts
            .values()
            .map(|acct| (acct.address().to_string(), acct.balance()))
            .collect()
    }

    // ========================================================================
    // TRANSACTIONS
    // ========================================================================

    /// Look up a transaction recorded in this block
    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    /// Iterate over transactions in id order
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values()
    }

    /// Validate and apply a transaction
    ///
    /// `ancestors` are every block that precedes this one in the chain;
    /// they are searched for a transaction with the same id. Nothing is
    /// mutated unless every check passes. Returns whether the block still
    /// has room for more transactions.
    pub fn process_transaction(
        &mut self,
        transaction: Transaction,
        ancestors: &[Block],
    ) -> Result<bool, LedgerError> {
        let updates = self.validate_transaction(&transaction, ancestors)?;

        for (address, balance) in updates {
            if let Some(account) = self.accounts.get_mut(&address) {
                account.set_balance(balance);
            }
        }

        debug!(
            block = self.number,
            id = transaction.id(),
            payer = transaction.payer(),
            receiver = transaction.receiver(),
            amount = transaction.amount(),
            fee = transaction.fee(),
            "transfer applied"
        );

        self.transactions
            .insert(transaction.id().to_string(), transaction);
        Ok(!self.is_full())
    }

    /// Run every check and compute the resulting balances
    fn validate_transaction(
        &self,
        transaction: &Transaction,
        ancestors: &[Block],
    ) -> Result<Vec<(String, i64)>, LedgerError> {
        let id = transaction.id();
        // master is matched by exact address, not case-insensitively
        let master = self.config.master_account.as_str();

        let duplicate = std::iter::once(self)
            .chain(ancestors.iter().rev())
            .any(|block| block.transaction(id).is_some());
        if duplicate {
            return Err(LedgerError::DuplicateTransactionId { id: id.to_string() });
        }

        let payer = self.accounts.get(transaction.payer()).ok_or_else(|| {
            LedgerError::UnknownPayerAccount {
                id: id.to_string(),
                address: transaction.payer().to_string(),
            }
        })?;

        let receiver = self.accounts.get(transaction.receiver()).ok_or_else(|| {
            LedgerError::UnknownReceiverAccount {
                id: id.to_string(),
                address: transaction.receiver().to_string(),
            }
        })?;

        if transaction.fee() < self.config.minimum_fee {
            return Err(LedgerError::FeeBelowMinimum {
                id: id.to_string(),
                fee: transaction.fee(),
                minimum: self.config.minimum_fee,
            });
        }

        let amount = i128::from(transaction.amount());
        let fee = i128::from(transaction.fee());

        // master pays its own fee back to itself
        let required = if payer.address() == master {
            amount - fee
        } else {
            amount + fee
        };
        if i128::from(payer.balance()) < required {
            return Err(LedgerError::InsufficientFunds {
                id: id.to_string(),
                address: payer.address().to_string(),
            });
        }

        let receiver_after = if receiver.address() == master {
            i128::from(receiver.balance()) + amount + fee
        } else {
            i128::from(receiver.balance()) + amount - fee
        };
        if receiver_after < 0 || receiver_after > i128::from(i64::MAX) {
            return Err(LedgerError::ReceiverOverflow {
                id: id.to_string(),
                address: receiver.address().to_string(),
            });
        }

        // Net effect per account; payer, receiver and master may coincide
        let mut deltas: BTreeMap<&str, i128> = BTreeMap::new();
        *deltas.entry(payer.address()).or_default() -= amount + fee;
        *deltas.entry(receiver.address()).or_default() += amount;
        *deltas.entry(master).or_default() += fee;

        let mut updates = Vec::with_capacity(deltas.len());
        for (address, delta) in deltas {
            let current = self.account_balance(address)?;
            let balance = i64::try_from(i128::from(current) + delta).map_err(|_| {
                LedgerError::ReceiverOverflow {
                    id: id.to_string(),
                    address: address.to_string(),
                }
            })?;
            updates.push((address.to_string(), balance));
        }

        Ok(updates)
    }

    /// Check the link to the previous block
    ///
    /// Recomputes the hash of `previous` and compares it with the value
    /// cached in this block when it was created. Only this one link is
    /// checked; the genesis block has none.
    pub fn validate(&self, previous: Option<&Block>) -> Result<(), LedgerError> {
        let Some(previous) = previous else {
            return Ok(());
        };

        let computed = previous.compute_hash();
        if computed != self.previous_hash {
            return Err(LedgerError::HashMismatch {
                block: previous.number(),
                expected: self.previous_hash.clone(),
                computed,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Block {}", self.number)?;
        writeln!(f, "  Hash: {}", self.hash.as_deref().unwrap_or(""))?;
        write!(f, "  Accounts:")?;
        for account in self.accounts.values() {
            write!(f, "\n    {}", account)?;
        }
        write!(f, "\n  Transactions:")?;
        for transaction in self.transactions.values() {
            write!(f, "\n    {}", transaction)?;
        }
        Ok(())
    }
}
