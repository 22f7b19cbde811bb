use crate::ledger::config::MINIMUM_FEE;
use std::fmt;
use thiserror::Error;

/// A request to move funds from one account to another
///
/// Only the fee and memo can change after construction, and only until
/// the transaction is handed to the ledger, which takes it by value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    id: String,
    payer: String,
    receiver: String,
    amount: u64,
    fee: u64,
    memo: Option<String>,
}

impl Transaction {
    /// Create a transaction carrying the minimum fee and no memo
    pub fn new(
        id: impl Into<String>,
        payer: impl Into<String>,
        receiver: impl Into<String>,
        amount: u64,
    ) -> Self {
        Self {
            id: id.into(),
            payer: payer.into(),
            receiver: receiver.into(),
            amount,
            fee: MINIMUM_FEE,
            memo: None,
        }
    }

    /// Set the fee
    pub fn with_fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    /// Set the memo
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Get the identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the payer address
    pub fn payer(&self) -> &str {
        &self.payer
    }

    /// Get the receiver address
    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    /// Get the amount
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Get the fee
    pub fn fee(&self) -> u64 {
        self.fee
    }

    /// Get the memo, if any
    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transaction {}: {} from {} to {}",
            self.id, self.amount, self.payer, self.receiver
        )?;
        if self.fee != 0 {
            write!(f, ", fee {}", self.fee)?;
        }
        if let Some(memo) = &self.memo {
            write!(f, ", memo {}", memo)?;
        }
        Ok(())
    }
}

/// Errors that can occur when building a transaction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionBuildError {
    #[error("Missing id: transaction identifier is required")]
    MissingId,

    #[error("Missing payer: payer address is required")]
    MissingPayer,

    #[error("Missing receiver: receiver address is required")]
    MissingReceiver,

    #[error("Missing amount: transfer amount is required")]
    MissingAmount,
}

/// Builder for transactions
#[derive(Debug, Default)]
pub struct TransactionBuilder {
    id: Option<String>,
    payer: Option<String>,
    receiver: Option<String>,
    amount: Option<u64>,
    fee: Option<u64>,
    memo: Option<String>,
}

impl TransactionBuilder {
    /// Create a new TransactionBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier (required)
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the payer (required)
    pub fn payer(mut self, address: impl Into<String>) -> Self {
        self.payer = Some(address.into());
        self
    }

    /// Set the receiver (required)
    pub fn receiver(mut self, address: impl Into<String>) -> Self {
        self.receiver = Some(address.into());
        self
    }

    /// Set the amount (required)
    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the fee (optional - defaults to the minimum fee)
    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Set the memo (optional)
    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Build the transaction
    pub fn build(self) -> Result<Transaction, TransactionBuildError> {
        let id = self.id.ok_or(TransactionBuildError::MissingId)?;
        let payer = self.payer.ok_or(TransactionBuildError::MissingPayer)?;
        let receiver = self.receiver.ok_or(TransactionBuildError::MissingReceiver)?;
        let amount = self.amount.ok_or(TransactionBuildError::MissingAmount)?;

        let mut transaction = Transaction::new(id, payer, receiver, amount);
        if let Some(fee) = self.fee {
            transaction = transaction.with_fee(fee);
        }
        if let Some(memo) = self.memo {
            transaction = transaction.with_memo(memo);
        }
        Ok(transaction)
    }
}
