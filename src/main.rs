// ledger - run city ledger commands from a script or the command line

use clap::{Parser, Subcommand};
use cityledger::command::CommandProcessor;
use cityledger::ledger::{LedgerConfig, DEFAULT_TRANSACTIONS_PER_BLOCK, MINIMUM_FEE};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ledger", version, about = "City services currency ledger")]
struct Cli {
    /// Transactions per block before it is committed
    #[arg(long, env = "LEDGER_TRANSACTIONS_PER_BLOCK", default_value_t = DEFAULT_TRANSACTIONS_PER_BLOCK)]
    transactions_per_block: usize,

    /// Minimum fee a transaction must carry
    #[arg(long, env = "LEDGER_MINIMUM_FEE", default_value_t = MINIMUM_FEE)]
    minimum_fee: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a command script, one command per line
    Run {
        /// Script file
        script: PathBuf,
        /// Write results here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run commands given inline, separated by `;`
    /// e.g. `ledger exec create-ledger city seed s1 \; create-account alice`
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = LedgerConfig::new()
        .with_transactions_per_block(cli.transactions_per_block)
        .with_minimum_fee(cli.minimum_fee);

    if let Err(err) = config.validate() {
        error!("{err}");
        return ExitCode::FAILURE;
    }

    match cli.command {
        Command::Run { script, output } => {
            let writer: Box<dyn Write> = match output {
                Some(path) => match File::create(&path) {
                    Ok(file) => Box::new(BufWriter::new(file)),
                    Err(err) => {
                        error!("could not create {}: {err}", path.display());
                        return ExitCode::FAILURE;
                    }
                },
                None => Box::new(io::stdout().lock()),
            };

            let mut processor = CommandProcessor::new(writer).with_config(config);
            if let Err(err) = processor.run_script(&script) {
                error!("{err}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Command::Exec { tokens } => {
            let script = tokens.join(" ").replace(';', "\n");
            let mut processor = CommandProcessor::new(io::stdout().lock()).with_config(config);
            if let Err(err) = processor.run_lines(script.as_bytes()) {
                error!("{err}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
    }
}
