// Ledger - owns the committed chain and the single working block

use crate::ledger::account::Account;
use crate::ledger::block::Block;
use crate::ledger::config::{LedgerConfig, MASTER_ENDOWMENT};
use crate::ledger::error::{LedgerError, Operation};
use crate::ledger::transaction::Transaction;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// The top-level ledger
///
/// Committed blocks are append-only. All money movement happens in the
/// working block, which is replaced wholesale each time it is committed.
#[derive(Debug)]
pub struct Ledger {
    name: String,
    seed: String,
    description: String,
    config: Arc<LedgerConfig>,
    /// Committed blocks, in chain order
    committed: Vec<Block>,
    /// The block currently accepting transactions
    working: Block,
}

impl Ledger {
    /// Create a ledger with the default configuration
    pub fn new(name: impl Into<String>, seed: impl Into<String>) -> Result<Self, LedgerError> {
        Self::with_config(name, seed, LedgerConfig::default())
    }

    /// Create a ledger with an explicit configuration
    ///
    /// Builds the genesis block and endows the master account with the
    /// whole money supply. This is the only place value is created.
    pub fn with_config(
        name: impl Into<String>,
        seed: impl Into<String>,
        config: LedgerConfig,
    ) -> Result<Self, LedgerError> {
        config.validate()?;

        let name = name.into();
        let seed = seed.into();
        let config = Arc::new(config);

        let mut working = Block::genesis(seed.clone(), Arc::clone(&config));
        working.add_account(Account::new(config.master_account.clone()).with_balance(MASTER_ENDOWMENT))?;

        info!(ledger = %name, master = %config.master_account, "ledger created");

        Ok(Self {
            name,
            seed,
            description: String::new(),
            config,
            committed: Vec::new(),
            working,
        })
    }

    /// Set the description (builder pattern)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Get the name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the seed
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Get the description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the configuration
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Number of committed blocks
    pub fn committed_count(&self) -> usize {
        self.committed.len()
    }

    /// The block currently accepting transactions
    pub fn working_block(&self) -> &Block {
        &self.working
    }

    /// Create an account with a zero balance in the working block
    pub fn create_account(&mut self, address: impl Into<String>) -> Result<Account, LedgerError> {
        let account = Account::new(address);
        self.working.add_account(account.clone())?;
        Ok(account)
    }

    /// Validate and apply a transaction, committing the working block if
    /// it is now full
    pub fn process_transaction(&mut self, transaction: Transaction) -> Result<(), LedgerError> {
        let id = transaction.id().to_string();

        let has_room = self
            .working
            .process_transaction(transaction, &self.committed)
            .inspect_err(|err| warn!(id = %id, error = %err, "transaction rejected"))?;

        if !has_room {
            self.commit_working_block();
        }
        Ok(())
    }

    /// Hash the working block, append it to the chain, and start a new one
    fn commit_working_block(&mut self) {
        let hash = self.working.commit();
        let next = self.working.successor();
        let block = std::mem::replace(&mut self.working, next);

        info!(block = block.number(), hash = %hash, "block committed");
        self.committed.push(block);
    }

    fn last_committed(&self, operation: Operation) -> Result<&Block, LedgerError> {
        self.committed
            .last()
            .ok_or(LedgerError::NoCommittedBlocks { operation })
    }

    /// Get an account balance as of the last committed block
    pub fn account_balance(&self, address: &str) -> Result<i64, LedgerError> {
        self.last_committed(Operation::GetAccountBalance)?
            .account_balance(address)
    }

    /// Get all account balances as of the last committed block
    pub fn account_balances(&self) -> Result<BTreeMap<String, i64>, LedgerError> {
        Ok(self
            .last_committed(Operation::GetAccountBalances)?
            .account_balances())
    }

    /// Find a transaction in the committed blocks
    ///
    /// The working block is not searched: a transaction only becomes
    /// visible here once its block is committed.
    pub fn transaction(&self, id: &str) -> Result<&Transaction, LedgerError> {
        self.committed
            .iter()
            .find_map(|block| block.transaction(id))
            .ok_or_else(|| LedgerError::UnknownTransactionId { id: id.to_string() })
    }

    /// Get a committed block by its 1-based number
    pub fn block(&self, number: usize) -> Result<&Block, LedgerError> {
        number
            .checked_sub(1)
            .and_then(|index| self.committed.get(index))
            .ok_or(LedgerError::UnknownBlockNumber { number })
    }

    /// Iterate over the committed blocks in chain order
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.committed.iter()
    }

    /// Re-verify every link of the committed chain
    pub fn validate(&self) -> Result<(), LedgerError> {
        for (index, block) in self.committed.iter().enumerate() {
            let previous = index.checked_sub(1).and_then(|p| self.committed.get(p));
            block
                .validate(previous)
                .inspect_err(|err| warn!(block = block.number(), error = %err, "chain validation failed"))?;
        }
        Ok(())
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ledger {}", self.name)?;
        if !self.seed.is_empty() {
            write!(f, ", seed {}", self.seed)?;
        }
        if !self.description.is_empty() {
            write!(f, ", description {}", self.description)?;
        }
        Ok(())
    }
}
