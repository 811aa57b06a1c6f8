//! Presentation layer for toolchat
//!
//! This crate contains the CLI definition, the interactive chat REPL,
//! console formatters and progress indicators.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, CommandOutcome, ReplCommand};
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use progress::spinner::ThinkingSpinner;
