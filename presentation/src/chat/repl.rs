//! REPL (Read-Eval-Print Loop) for interactive chat

use super::command::{HELP, ReplCommand};
use crate::output::console::ConsoleFormatter;
use crate::progress::spinner::ThinkingSpinner;
use colored::Colorize;
use futures::StreamExt;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use toolchat_application::{ChatOrchestrator, ConversationExporter};
use toolchat_domain::Model;
use tracing::warn;

const LINE_HISTORY_SIZE: usize = 1000;

/// What the REPL should do after a command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Continue(String),
    Exit,
}

/// Interactive chat REPL
pub struct ChatRepl {
    orchestrator: ChatOrchestrator,
    exporter: Arc<dyn ConversationExporter>,
    show_progress: bool,
    line_history: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(orchestrator: ChatOrchestrator, exporter: Arc<dyn ConversationExporter>) -> Self {
        Self {
            orchestrator,
            exporter,
            show_progress: true,
            line_history: dirs::data_dir().map(|p| p.join("toolchat").join("input_history.txt")),
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// File for the line editor's input history; `None` keeps it in memory
    pub fn with_line_history(mut self, path: Option<PathBuf>) -> Self {
        self.line_history = path;
        self
    }

    pub fn orchestrator(&self) -> &ChatOrchestrator {
        &self.orchestrator
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.line_history else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(LINE_HISTORY_SIZE, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Input history unavailable ({}): {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = self.editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("toolchat".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(buffer) => {
                    let line = buffer.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if let Some(command) = ReplCommand::parse(line) {
                        match self.execute(command).await {
                            CommandOutcome::Continue(output) => println!("{}", output),
                            CommandOutcome::Exit => {
                                println!("Bye!");
                                break;
                            }
                        }
                        continue;
                    }

                    self.process_message(line).await;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                _ => {
                    println!("^C");
                }
            }
        }

        Ok(())
    }

    /// Send one message and print the answer.
    pub async fn process_message(&mut self, message: &str) {
        println!();
        if self.orchestrator.config().stream {
            let mut stdout = std::io::stdout();
            let mut chunks = self.orchestrator.chat(message);
            while let Some(chunk) = chunks.next().await {
                print!("{}", chunk);
                let _ = stdout.flush();
            }
            println!();
        } else {
            let spinner = ThinkingSpinner::start("Thinking...", self.show_progress);
            let answer = self.orchestrator.send(message).await;
            spinner.finish();
            println!("{}", answer);
        }
        println!();
    }

    fn print_welcome(&self) {
        let config = self.orchestrator.config();
        let tools = self.orchestrator.executor().tool_definitions().len();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│             toolchat - Chat Mode            │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("{} {}", "Model:".cyan().bold(), config.model);
        if config.enable_tools {
            println!("{} {} available", "Tools:".cyan().bold(), tools);
        } else {
            println!("{} disabled", "Tools:".cyan().bold());
        }
        let history = self.orchestrator.store().stats().total_messages;
        if history > 1 {
            println!("{} {} messages restored", "History:".cyan().bold(), history);
        }
        println!();
        println!("Type /help for commands.");
        println!();
    }

    /// Execute a slash command.
    pub async fn execute(&mut self, command: ReplCommand) -> CommandOutcome {
        let output = match command {
            ReplCommand::Exit => return CommandOutcome::Exit,
            ReplCommand::Help => HELP.to_string(),
            ReplCommand::Tools => {
                let tools: &[_] = if self.orchestrator.config().enable_tools {
                    self.orchestrator.executor().tool_definitions()
                } else {
                    &[]
                };
                ConsoleFormatter::format_tools(tools)
            }
            ReplCommand::Stats => ConsoleFormatter::format_stats(
                self.orchestrator.config().model.as_str(),
                self.orchestrator.usage(),
                &self.orchestrator.store().stats(),
            ),
            ReplCommand::Health => ConsoleFormatter::format_health(self.orchestrator.telemetry()),
            ReplCommand::Context => {
                ConsoleFormatter::format_context(&self.orchestrator.store().context_usage())
            }
            ReplCommand::Clear => {
                self.orchestrator.reset(true);
                "Conversation cleared.".to_string()
            }
            ReplCommand::Summarize => match self.orchestrator.summarize().await {
                Ok(report) => ConsoleFormatter::format_summary(&report),
                Err(skip) => skip.to_string(),
            },
            ReplCommand::Export { path, format } => {
                let snapshot = self.orchestrator.store().snapshot();
                match self.exporter.export(&snapshot, &path, format) {
                    Ok(()) => format!(
                        "Exported {} messages to {}",
                        snapshot.messages.len(),
                        path.display()
                    ),
                    Err(e) => format!("{} {}", "Export failed:".red(), e),
                }
            }
            ReplCommand::Model(None) => {
                format!("Current model: {}", self.orchestrator.config().model)
            }
            ReplCommand::Model(Some(name)) => match name.parse::<Model>() {
                Ok(model) => {
                    self.orchestrator.set_model(model);
                    format!("Model set to {}", self.orchestrator.config().model)
                }
                Err(e) => e.to_string(),
            },
            ReplCommand::Usage(usage) => format!("Usage: {}", usage),
            ReplCommand::Unknown(line) => {
                format!("Unknown command: {}\nType /help for available commands", line)
            }
        };
        CommandOutcome::Continue(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Mutex;
    use toolchat_application::{
        ChatConfig, CompletionRequest, ConversationStore, LlmProvider, ProviderError,
        RepositoryError, ToolExecutorPort,
    };
    use toolchat_domain::{
        Completion, Conversation, ConversationSnapshot, ExportFormat, Message, ToolArguments,
        ToolDefinition, ToolExecutionResult,
    };

    struct EchoProvider;

    #[async_trait]
    impl LlmProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
            let last = request
                .messages
                .last()
                .map(|m| m.content_str().to_string())
                .unwrap_or_default();
            Ok(Completion::text(format!("echo: {}", last)))
        }
    }

    struct NoTools;

    #[async_trait]
    impl ToolExecutorPort for NoTools {
        fn tool_definitions(&self) -> &[ToolDefinition] {
            &[]
        }

        async fn execute(&self, name: &str, _arguments: &ToolArguments) -> ToolExecutionResult {
            ToolExecutionResult::unknown_tool(name)
        }
    }

    #[derive(Default)]
    struct RecordingExporter {
        calls: Mutex<Vec<(PathBuf, ExportFormat, usize)>>,
    }

    impl ConversationExporter for RecordingExporter {
        fn export(
            &self,
            snapshot: &ConversationSnapshot,
            path: &Path,
            format: ExportFormat,
        ) -> Result<(), RepositoryError> {
            self.calls
                .lock()
                .unwrap()
                .push((path.to_path_buf(), format, snapshot.messages.len()));
            Ok(())
        }
    }

    fn repl(exporter: Arc<RecordingExporter>) -> ChatRepl {
        colored::control::set_override(false);
        let conversation = Conversation::new(10_000).with_messages(vec![Message::system("persona")]);
        let orchestrator = ChatOrchestrator::new(
            Arc::new(EchoProvider),
            Arc::new(NoTools),
            ConversationStore::in_memory(conversation),
            ChatConfig::default().with_stream(false),
        );
        ChatRepl::new(orchestrator, exporter).with_line_history(None)
    }

    #[tokio::test]
    async fn test_exit_and_help() {
        let mut repl = repl(Arc::default());
        assert_eq!(repl.execute(ReplCommand::Exit).await, CommandOutcome::Exit);
        let CommandOutcome::Continue(help) = repl.execute(ReplCommand::Help).await else {
            panic!("help should not exit");
        };
        assert!(help.contains("/export <path> [json|text]"));
    }

    #[tokio::test]
    async fn test_model_switch() {
        let mut repl = repl(Arc::default());
        let outcome = repl
            .execute(ReplCommand::Model(Some("gpt-4.1".to_string())))
            .await;
        assert_eq!(
            outcome,
            CommandOutcome::Continue("Model set to gpt-4.1".to_string())
        );
        assert_eq!(repl.orchestrator().store().model().as_str(), "gpt-4.1");
    }

    #[tokio::test]
    async fn test_clear_keeps_persona() {
        let mut repl = repl(Arc::default());
        repl.process_message("hello").await;
        assert_eq!(repl.orchestrator().store().messages().len(), 3);

        repl.execute(ReplCommand::Clear).await;
        let messages = repl.orchestrator().store().messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].is_system());
        assert_eq!(repl.orchestrator().usage().requests, 0);
    }

    #[tokio::test]
    async fn test_export_uses_snapshot() {
        let exporter = Arc::new(RecordingExporter::default());
        let mut repl = repl(exporter.clone());
        repl.process_message("hello").await;

        let outcome = repl
            .execute(ReplCommand::Export {
                path: PathBuf::from("out.txt"),
                format: ExportFormat::Text,
            })
            .await;

        assert_eq!(
            outcome,
            CommandOutcome::Continue("Exported 3 messages to out.txt".to_string())
        );
        let calls = exporter.calls.lock().unwrap();
        assert_eq!(calls[0], (PathBuf::from("out.txt"), ExportFormat::Text, 3));
    }

    #[tokio::test]
    async fn test_summarize_short_conversation() {
        let mut repl = repl(Arc::default());
        let CommandOutcome::Continue(output) = repl.execute(ReplCommand::Summarize).await else {
            panic!("summarize should not exit");
        };
        assert!(output.contains("too short"));
    }

    #[tokio::test]
    async fn test_tools_when_none_enabled() {
        let mut repl = repl(Arc::default());
        let CommandOutcome::Continue(output) = repl.execute(ReplCommand::Tools).await else {
            panic!("tools should not exit");
        };
        assert!(output.contains("tools disabled"));
    }
}
