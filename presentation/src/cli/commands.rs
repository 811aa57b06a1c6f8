//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for toolchat
#[derive(Parser, Debug)]
#[command(name = "toolchat")]
#[command(author, version, about = "Chat with a model that can run your command-line tools")]
#[command(long_about = r#"
toolchat is a terminal chat assistant. The model can call a catalog of
twelve local utilities (code analysis, file diffing, TODO extraction, ...)
as functions; every call is run as a child process with a timeout and its
outcome is fed back into the conversation.

With a MESSAGE argument, one turn is run and the answer printed. Without
one, an interactive session starts (type /help for commands).

Configuration files are loaded from (in priority order):
1. TOOLCHAT_* environment variables (TOOLCHAT_CHAT__MODEL=gpt-4.1)
2. --config <path>                       Explicit config file
3. ./toolchat.toml                       Project-level config
4. ~/.config/toolchat/config.toml        Global config

Example:
  toolchat "List the TODOs under src/"
  toolchat -m gpt-4.1 --tool extract_todos --tool compare_files
  toolchat --no-tools --no-stream "Explain borrow checking"
"#)]
pub struct Cli {
    /// Send one message and exit instead of starting a session
    pub message: Option<String>,

    /// Model to use
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Wait for complete answers instead of streaming them
    #[arg(long)]
    pub no_stream: bool,

    /// Do not offer any tools to the model
    #[arg(long)]
    pub no_tools: bool,

    /// Only offer these tools, by function or utility name (repeatable)
    #[arg(short, long = "tool", value_name = "NAME")]
    pub tools: Vec<String>,

    /// Directory containing the tool programs
    #[arg(long, value_name = "DIR")]
    pub tools_dir: Option<PathBuf>,

    /// Conversation history file
    #[arg(long, value_name = "PATH")]
    pub history_file: Option<PathBuf>,

    /// Do not load or save conversation history
    #[arg(long)]
    pub no_history: bool,

    /// Maximum nested tool-call rounds per message
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
