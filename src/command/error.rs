use crate::ledger::{LedgerError, Operation};
use thiserror::Error;

/// Errors from parsing or executing a command
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("no command given")]
    EmptyCommand,

    #[error("command not recognized")]
    UnknownCommand(String),

    #[error("no ledger")]
    NoLedger(Operation),

    #[error("no {what} supplied")]
    MissingArgument { operation: Operation, what: &'static str },

    #[error("the {field} is not valid")]
    InvalidNumber { operation: Operation, field: &'static str },

    #[error("one of the required transaction fields is missing")]
    MissingTransactionField,

    #[error("{0}")]
    Ledger(#[from] LedgerError),

    #[error("could not write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("could not read commands from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CommandError {
    /// The tag a failure is reported under: the operation keyword, or the
    /// raw command word when it was not recognised
    pub fn tag(&self) -> String {
        match self {
            CommandError::EmptyCommand => String::new(),
            CommandError::UnknownCommand(word) => word.clone(),
            CommandError::NoLedger(operation)
            | CommandError::MissingArgument { operation, .. }
            | CommandError::InvalidNumber { operation, .. } => operation.to_string(),
            CommandError::MissingTransactionField => Operation::ProcessTransaction.to_string(),
            CommandError::Ledger(err) => err.operation().to_string(),
            CommandError::Output(_) | CommandError::Io { .. } => "run".to_string(),
        }
    }

    /// Render as "<tag> failed: <message>"
    pub fn report(&self) -> String {
        format!("{} failed: {}", self.tag(), self)
    }
}
