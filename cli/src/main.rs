//! CLI entrypoint for toolchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use toolchat_application::{
    ChatConfig, ChatOrchestrator, ConversationRepository, ConversationStore, LlmProvider,
    LlmSummarizer, NoPersistence, ToolExecutorPort, default_persona,
};
use toolchat_domain::{Conversation, Message, Model};
use toolchat_infrastructure::{
    API_KEY_ENV, ConfigLoader, FileConfig, FileExporter, JsonFileRepository, OpenAiProvider,
    ProcessToolExecutor, ToolRegistry,
};
use toolchat_presentation::{ChatRepl, Cli};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize logging based on verbosity level, `RUST_LOG` and `[logging]`.
///
/// The returned guard flushes the log file on drop.
fn init_logging(cli: &Cli, config: &FileConfig) -> Option<WorkerGuard> {
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(config.logging.level.as_deref().unwrap_or("warn"))
        }),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let log_file = config.logging.file_path();
    let Some((dir, name)) = log_file.as_deref().and_then(|path| {
        let name = path.file_name()?.to_os_string();
        let dir = path
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();
        Some((dir, name))
    }) else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return None;
    };

    let appender = tracing_appender::rolling::daily(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Some(guard)
}

/// Fold command-line overrides into the file configuration.
fn chat_config(cli: &Cli, config: &FileConfig) -> Result<ChatConfig> {
    let mut chat = config.chat.clone();
    if let Some(model) = &cli.model {
        chat = chat.with_model(model.parse::<Model>()?);
    }
    if cli.no_stream {
        chat = chat.with_stream(false);
    }
    if cli.no_tools {
        chat = chat.with_tools_enabled(false);
    }
    if let Some(depth) = cli.max_depth {
        if depth == 0 {
            bail!("--max-depth must be at least 1");
        }
        chat = chat.with_max_tool_call_depth(depth);
    }
    Ok(chat)
}

fn tool_registry(cli: &Cli, config: &FileConfig) -> ToolRegistry {
    let mut executor_config = config.tools.to_executor_config();
    if let Some(dir) = &cli.tools_dir {
        executor_config = executor_config.with_tools_dir(dir);
    }
    let allow_list = if cli.tools.is_empty() {
        &config.tools.enabled
    } else {
        &cli.tools
    };
    ToolRegistry::new(ProcessToolExecutor::new(executor_config)).with_allow_list(allow_list)
}

fn repository(cli: &Cli, config: &FileConfig) -> Arc<dyn ConversationRepository> {
    if cli.no_history || !config.history.enabled {
        return Arc::new(NoPersistence);
    }
    let path = cli
        .history_file
        .clone()
        .unwrap_or_else(|| config.history.path());
    info!("Conversation history: {}", path.display());
    Arc::new(JsonFileRepository::new(path))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        println!("{}", ConfigLoader::describe_sources(cli.config.as_deref()));
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    let _log_guard = init_logging(&cli, &config);
    info!("Starting toolchat");

    let chat = chat_config(&cli, &config)?;

    // === Dependency Injection ===
    let openai = config.provider.to_openai_config().with_context(|| {
        format!(
            "No API key configured. Set {} or [provider].api_key",
            API_KEY_ENV
        )
    })?;
    let provider: Arc<dyn LlmProvider> = Arc::new(OpenAiProvider::new(openai)?);

    let registry = tool_registry(&cli, &config);
    let persona = if chat.enable_tools {
        default_persona(registry.get_tools())
    } else {
        default_persona(&[])
    };
    let executor: Arc<dyn ToolExecutorPort> = Arc::new(registry);

    let conversation =
        Conversation::new(chat.max_context_tokens).with_messages(vec![Message::system(persona)]);
    let store = ConversationStore::open(conversation, repository(&cli, &config));

    let summarizer = Arc::new(LlmSummarizer::new(provider.clone(), chat.model.clone()));
    let orchestrator =
        ChatOrchestrator::new(provider, executor, store, chat).with_summarizer(summarizer);

    let mut repl = ChatRepl::new(orchestrator, Arc::new(FileExporter)).with_progress(!cli.quiet);

    match &cli.message {
        Some(message) => repl.process_message(message).await,
        None => repl.run().await?,
    }

    Ok(())
}
