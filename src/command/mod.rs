// Command module - drives a ledger from text commands
// Tokenising, option parsing, and the command processor / script runner

mod error;
mod parser;
mod processor;

pub use error::CommandError;
pub use parser::{parse_options, tokenize, ParsedOptions};
pub use processor::CommandProcessor;
