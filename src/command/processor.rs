// CommandProcessor - executes ledger commands and command scripts
//
// The first command of a session must be create-ledger; every other
// command runs against the ledger it created.

use crate::command::error::CommandError;
use crate::command::parser::{parse_options, tokenize};
use crate::ledger::{Ledger, LedgerConfig, Operation, SharedLedger, TransactionBuilder};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, info};

/// Option keywords for create-ledger
mod ledger_options {
    pub const SEED: &str = "seed";
    pub const DESCRIPTION: &str = "description";
    pub const ALL: &[&str] = &[SEED, DESCRIPTION];
}

/// Option keywords for process-transaction
mod transaction_options {
    pub const ID: &str = "id";
    pub const PAYER: &str = "payer";
    pub const RECEIVER: &str = "receiver";
    pub const AMOUNT: &str = "amount";
    pub const FEE: &str = "fee";
    pub const NOTE: &str = "note";
    pub const ALL: &[&str] = &[ID, PAYER, RECEIVER, AMOUNT, FEE, NOTE];
}

/// Executes text commands against a ledger, writing results to `W`
pub struct CommandProcessor<W: Write> {
    ledger: Option<SharedLedger>,
    config: LedgerConfig,
    output: W,
}

impl<W: Write> CommandProcessor<W> {
    /// Create a processor writing results to `output`
    pub fn new(output: W) -> Self {
        Self {
            ledger: None,
            config: LedgerConfig::default(),
            output,
        }
    }

    /// Set the configuration used by create-ledger
    pub fn with_config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    /// The ledger created by the last create-ledger, if any
    pub fn ledger(&self) -> Option<&SharedLedger> {
        self.ledger.as_ref()
    }

    /// Get the output writer
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Consume the processor, returning the output writer
    pub fn into_output(self) -> W {
        self.output
    }

    fn require_ledger(&self, operation: Operation) -> Result<&SharedLedger, CommandError> {
        self.ledger.as_ref().ok_or(CommandError::NoLedger(operation))
    }

    /// Execute one tokenised command and return its result line
    pub fn process_command<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<String, CommandError> {
        let (keyword, args) = tokens.split_first().ok_or(CommandError::EmptyCommand)?;
        let keyword = keyword.as_ref();
        let operation = Operation::from_keyword(keyword)
            .ok_or_else(|| CommandError::UnknownCommand(keyword.to_string()))?;

        debug!(command = %operation, "processing command");

        match operation {
            Operation::CreateLedger => self.create_ledger(args),
            Operation::CreateAccount => self.create_account(args),
            Operation::GetAccountBalance => self.get_account_balance(args),
            Operation::GetAccountBalances => self.get_account_balances(),
            Operation::ProcessTransaction => self.process_transaction(args),
            Operation::GetTransaction => self.get_transaction(args),
            Operation::GetBlock => self.get_block(args),
            Operation::Validate => self.validate(),
        }
    }

    /// Execute one command line
    pub fn process_line(&mut self, line: &str) -> Result<String, CommandError> {
        self.process_command(&tokenize(line)[..])
    }

    fn create_ledger<S: AsRef<str>>(&mut self, args: &[S]) -> Result<String, CommandError> {
        let name = first_arg(args, Operation::CreateLedger, "name")?;
        let parsed = parse_options(&args[1..], ledger_options::ALL);

        let seed = parsed.single(ledger_options::SEED).unwrap_or_default();
        let mut ledger = Ledger::with_config(name, seed, self.config.clone())?;
        if let Some(description) = parsed.joined(ledger_options::DESCRIPTION) {
            ledger = ledger.with_description(description);
        }

        let result = format!("created {}", ledger);
        self.ledger = Some(SharedLedger::new(ledger));
        Ok(result)
    }

    fn create_account<S: AsRef<str>>(&mut self, args: &[S]) -> Result<String, CommandError> {
        let ledger = self.require_ledger(Operation::CreateAccount)?;
        let address = first_arg(args, Operation::CreateAccount, "address")?;

        let account = ledger.create_account(address)?;
        Ok(format!("created account {}", account))
    }

    fn get_account_balance<S: AsRef<str>>(&mut self, args: &[S]) -> Result<String, CommandError> {
        let ledger = self.require_ledger(Operation::GetAccountBalance)?;
        let address = first_arg(args, Operation::GetAccountBalance, "address")?;

        let balance = ledger.account_balance(address)?;
        Ok(format!("balance for {}: {}", address, balance))
    }

    fn get_account_balances(&mut self) -> Result<String, CommandError> {
        let ledger = self.require_ledger(Operation::GetAccountBalances)?;

        let mut result = String::from("account balances:");
        for (address, balance) in ledger.account_balances()? {
            result.push_str(&format!("\n  {}: {}", address, balance));
        }
        Ok(result)
    }

    fn process_transaction<S: AsRef<str>>(&mut self, args: &[S]) -> Result<String, CommandError> {
        let ledger = self.require_ledger(Operation::ProcessTransaction)?;
        let id = first_arg(args, Operation::ProcessTransaction, "transaction id")?;
        let parsed = parse_options(&args[1..], transaction_options::ALL);

        let payer = parsed
            .first(transaction_options::PAYER)
            .ok_or(CommandError::MissingTransactionField)?;
        let receiver = parsed
            .first(transaction_options::RECEIVER)
            .ok_or(CommandError::MissingTransactionField)?;
        let amount = parsed
            .first(transaction_options::AMOUNT)
            .ok_or(CommandError::MissingTransactionField)?;
        let amount = parse_number(amount, Operation::ProcessTransaction, "amount")?;

        let mut builder = TransactionBuilder::new()
            .id(id)
            .payer(payer)
            .receiver(receiver)
            .amount(amount);
        let fee = match parsed.single(transaction_options::FEE) {
            Some(fee) => parse_number(fee, Operation::ProcessTransaction, "fee")?,
            None => self.config.minimum_fee,
        };
        builder = builder.fee(fee);
        if let Some(note) = parsed.joined(transaction_options::NOTE) {
            builder = builder.memo(note);
        }
        let transaction = builder
            .build()
            .map_err(|_| CommandError::MissingTransactionField)?;

        let result = format!("processed {}", transaction);
        ledger.process_transaction(transaction)?;
        Ok(result)
    }

    fn get_transaction<S: AsRef<str>>(&mut self, args: &[S]) -> Result<String, CommandError> {
        let ledger = self.require_ledger(Operation::GetTransaction)?;
        let id = first_arg(args, Operation::GetTransaction, "transaction id")?;

        Ok(ledger.transaction(id)?.to_string())
    }

    fn get_block<S: AsRef<str>>(&mut self, args: &[S]) -> Result<String, CommandError> {
        let ledger = self.require_ledger(Operation::GetBlock)?;
        let number = first_arg(args, Operation::GetBlock, "block number")?;
        let number = parse_number(number, Operation::GetBlock, "block number")?;

        Ok(ledger.block(number)?.to_string())
    }

    fn validate(&mut self) -> Result<String, CommandError> {
        let ledger = self.require_ledger(Operation::Validate)?;

        ledger.validate()?;
        Ok("committed blocks validated successfully.".to_string())
    }

    // ========================================================================
    // SCRIPTS
    // ========================================================================

    /// Run every command read from `reader`
    ///
    /// Blank lines and `#` comments are echoed. Each command prints
    /// `At line N <result>`, or the failure report; a failing command does
    /// not stop the run. Only I/O failures are returned as errors.
    pub fn run_lines<R: BufRead>(&mut self, reader: R) -> Result<(), CommandError> {
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                writeln!(self.output, "{}", line)?;
                continue;
            }

            match self.process_line(trimmed) {
                Ok(result) => writeln!(self.output, "At line {} {}", line_number, result)?,
                Err(err) => writeln!(self.output, "At line {} {}", line_number, err.report())?,
            }
        }
        self.output.flush()?;
        Ok(())
    }

    /// Run a command script file
    pub fn run_script<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CommandError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CommandError::Io {
            path: path.display().to_string(),
            source,
        })?;

        info!(script = %path.display(), "running command script");
        self.run_lines(BufReader::new(file))
    }
}

fn first_arg<'a, S: AsRef<str>>(
    args: &'a [S],
    operation: Operation,
    what: &'static str,
) -> Result<&'a str, CommandError> {
    args.first()
        .map(|arg| arg.as_ref())
        .ok_or(CommandError::MissingArgument { operation, what })
}

fn parse_number<T: std::str::FromStr>(
    value: &str,
    operation: Operation,
    field: &'static str,
) -> Result<T, CommandError> {
    value
        .parse()
        .map_err(|_| CommandError::InvalidNumber { operation, field })
}
