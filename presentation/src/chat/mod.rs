//! Interactive chat session

pub mod command;
pub mod repl;

pub use command::ReplCommand;
pub use repl::{ChatRepl, CommandOutcome};
