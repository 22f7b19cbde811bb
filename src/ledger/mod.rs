// Ledger module - THE CITY CURRENCY
// Accounts, transactions, hash-chained blocks, and the ledger that commits them

mod account;
mod block;
mod chain;
mod config;
mod error;
mod hash;
mod shared;
mod transaction;

pub use account::Account;
pub use block::{Block, BlockState};
pub use chain::Ledger;
pub use config::{
    LedgerConfig, DEFAULT_TRANSACTIONS_PER_BLOCK, MASTER_ACCOUNT, MASTER_ENDOWMENT, MINIMUM_FEE,
};
pub use error::{LedgerError, Operation};
pub use hash::{hash_pair, merkle_hash};
pub use shared::SharedLedger;
pub use transaction::{Transaction, TransactionBuildError, TransactionBuilder};
