// Ledger configuration - block size, fee floor, and the master account

use crate::ledger::error::LedgerError;

/// Transactions accepted into a block before it is committed
pub const DEFAULT_TRANSACTIONS_PER_BLOCK: usize = 1;

/// Smallest fee (in whole units) a transaction may carry
pub const MINIMUM_FEE: u64 = 10;

/// Address of the account that holds the money supply and collects fees
pub const MASTER_ACCOUNT: &str = "master";

/// Balance the master account is endowed with at genesis
pub const MASTER_ENDOWMENT: i64 = i64::MAX;

/// Configuration for a ledger instance
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Block is committed once it holds this many transactions
    pub transactions_per_block: usize,
    /// Transactions with a lower fee are rejected
    pub minimum_fee: u64,
    /// Address of the master account
    pub master_account: String,
}

impl LedgerConfig {
    /// Create a new config with builder pattern
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of transactions per block
    pub fn with_transactions_per_block(mut self, count: usize) -> Self {
        self.transactions_per_block = count;
        self
    }

    /// Set the minimum transaction fee
    pub fn with_minimum_fee(mut self, fee: u64) -> Self {
        self.minimum_fee = fee;
        self
    }

    /// Set the master account address
    pub fn with_master_account(mut self, address: impl Into<String>) -> Self {
        self.master_account = address.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.transactions_per_block == 0 {
            return Err(LedgerError::InvalidConfig(
                "transactions_per_block must be > 0".to_string(),
            ));
        }
        if self.master_account.is_empty() {
            return Err(LedgerError::InvalidConfig(
                "master_account must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            transactions_per_block: DEFAULT_TRANSACTIONS_PER_BLOCK,
            minimum_fee: MINIMUM_FEE,
            master_account: MASTER_ACCOUNT.to_string(),
        }
    }
}
