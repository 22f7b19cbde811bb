use std::fmt;
use thiserror::Error;

/// The ledger operation an error was raised by
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateLedger,
    CreateAccount,
    GetAccountBalance,
    GetAccountBalances,
    ProcessTransaction,
    GetTransaction,
    GetBlock,
    Validate,
}

impl Operation {
    /// All operations, in command-table order
    pub const ALL: [Operation; 8] = [
        Operation::CreateLedger,
        Operation::CreateAccount,
        Operation::GetAccountBalance,
        Operation::GetAccountBalances,
        Operation::ProcessTransaction,
        Operation::GetTransaction,
        Operation::GetBlock,
        Operation::Validate,
    ];

    /// The command keyword for this operation
    pub fn keyword(&self) -> &'static str {
        match self {
            Operation::CreateLedger => "create-ledger",
            Operation::CreateAccount => "create-account",
            Operation::GetAccountBalance => "get-account-balance",
            Operation::GetAccountBalances => "get-account-balances",
            Operation::ProcessTransaction => "process-transaction",
            Operation::GetTransaction => "get-transaction",
            Operation::GetBlock => "get-block",
            Operation::Validate => "validate",
        }
    }

    /// Look up an operation by keyword (case-insensitive)
    pub fn from_keyword(keyword: &str) -> Option<Operation> {
        Self::ALL
            .into_iter()
            .find(|op| op.keyword().eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Errors raised by the ledger core
///
/// Every error is raised before any state is touched, so the ledger is
/// exactly as it was before the failing call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account {address} already exists")]
    DuplicateAccount { address: String },

    #[error("Invalid transaction {id}: duplicate identifier")]
    DuplicateTransactionId { id: String },

    #[error("Invalid transaction {id}: payer account {address} does not exist")]
    UnknownPayerAccount { id: String, address: String },

    #[error("Invalid transaction {id}: receiver account {address} does not exist")]
    UnknownReceiverAccount { id: String, address: String },

    #[error("Invalid transaction {id}: fee {fee} is less than the minimum {minimum}")]
    FeeBelowMinimum { id: String, fee: u64, minimum: u64 },

    #[error("Invalid transaction {id}: payer account {address} does not have enough funds")]
    InsufficientFunds { id: String, address: String },

    #[error("Invalid transaction {id}: receiver account {address} cannot hold more funds than exist")]
    ReceiverOverflow { id: String, address: String },

    #[error("Account {address} does not exist")]
    UnknownAccount { address: String },

    #[error("Transaction {id} does not exist in any of the committed blocks")]
    UnknownTransactionId { id: String },

    #[error("Block {number} has not been committed")]
    UnknownBlockNumber { number: usize },

    #[error("Verification of block {block} failed: expected hash {expected}, but computed {computed}")]
    HashMismatch {
        block: usize,
        expected: String,
        computed: String,
    },

    #[error("There are no committed blocks")]
    NoCommittedBlocks { operation: Operation },

    #[error("Invalid ledger configuration: {0}")]
    InvalidConfig(String),
}

impl LedgerError {
    /// The operation tag this error is reported under
    pub fn operation(&self) -> Operation {
        match self {
            LedgerError::DuplicateAccount { .. } => Operation::CreateAccount,
            LedgerError::DuplicateTransactionId { .. }
            | LedgerError::UnknownPayerAccount { .. }
            | LedgerError::UnknownReceiverAccount { .. }
            | LedgerError::FeeBelowMinimum { .. }
            | LedgerError::InsufficientFunds { .. }
            | LedgerError::ReceiverOverflow { .. } => Operation::ProcessTransaction,
            LedgerError::UnknownAccount { .. } => Operation::GetAccountBalance,
            LedgerError::UnknownTransactionId { .. } => Operation::GetTransaction,
            LedgerError::UnknownBlockNumber { .. } => Operation::GetBlock,
            LedgerError::HashMismatch { .. } => Operation::Validate,
            LedgerError::NoCommittedBlocks { operation } => *operation,
            LedgerError::InvalidConfig(_) => Operation::CreateLedger,
        }
    }
}
