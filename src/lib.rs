// cityledger - the currency core of the city services simulation
//
// An in-memory, hash-chained ledger of accounts and transfers, plus the
// text-command layer that drives it from scripts.

pub mod command;
pub mod ledger;
