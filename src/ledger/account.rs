use std::fmt;

/// An address and the balance held under it
///
/// Blocks own their accounts outright; a new block receives cloned
/// copies, so no two blocks share an account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    address: String,
    balance: i64,
}

impl Account {
    /// Create an account with a zero balance
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            balance: 0,
        }
    }

    /// Set the balance (builder pattern)
    pub fn with_balance(mut self, balance: i64) -> Self {
        self.balance = balance;
        self
    }

    /// Get the address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Get the balance
    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Adjust the balance by a signed delta
    ///
    /// No solvency check happens here; the block validates the transfer
    /// before it ever calls this.
    pub fn add_to_balance(&mut self, delta: i64) {
        self.balance += delta;
    }

    pub(crate) fn set_balance(&mut self, balance: i64) {
        self.balance = balance;
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.address, self.balance)
    }
}
