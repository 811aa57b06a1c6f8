//! Slash commands understood by the chat REPL

use std::path::PathBuf;
use toolchat_domain::ExportFormat;

/// A parsed `/command` line
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Help,
    Tools,
    Stats,
    Health,
    Context,
    Clear,
    Summarize,
    Export { path: PathBuf, format: ExportFormat },
    /// Show the model (`None`) or switch to another one
    Model(Option<String>),
    Exit,
    /// Recognized command with bad arguments
    Usage(&'static str),
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  /help, /h, /?               - Show this help
  /tools                      - List the tools the model can call
  /stats                      - Requests, tokens, cost and tool calls
  /health                     - Per-tool success rates and health
  /context                    - Context window usage
  /clear                      - Start over (keeps the persona)
  /summarize                  - Condense older history now
  /export <path> [json|text]  - Save the conversation to a file
  /model [name]               - Show or switch the model
  /exit, /quit, /q            - Exit chat";

impl ReplCommand {
    /// Parse a line; `None` when it is a chat message rather than a command.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let command = match name {
            "help" | "h" | "?" => Self::Help,
            "tools" => Self::Tools,
            "stats" => Self::Stats,
            "health" => Self::Health,
            "context" => Self::Context,
            "clear" => Self::Clear,
            "summarize" => Self::Summarize,
            "exit" | "quit" | "q" => Self::Exit,
            "model" => Self::Model(args.first().map(|s| s.to_string())),
            "export" => match args.as_slice() {
                [path] => Self::Export {
                    path: PathBuf::from(path),
                    format: ExportFormat::default(),
                },
                [path, format] => match format.parse() {
                    Ok(format) => Self::Export {
                        path: PathBuf::from(path),
                        format,
                    },
                    Err(_) => Self::Usage("/export <path> [json|text]"),
                },
                _ => Self::Usage("/export <path> [json|text]"),
            },
            _ => Self::Unknown(line.to_string()),
        };
        Some(command)
    }
}
