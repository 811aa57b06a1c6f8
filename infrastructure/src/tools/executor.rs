//! Process tool executor, the concrete implementation of [`ToolExecutorPort`].
//!
//! [`ProcessToolExecutor`] runs catalog programs as child processes and folds
//! every outcome into a [`ToolExecutionResult`]. It never returns an error.
//!
//! # Execution Path
//!
//! ```text
//! execute(name, args)
//!   ├─ unknown name?          → Error (UnknownFunctionError), nothing spawned
//!   ├─ always-manual recipe?  → ManualRequired, nothing spawned
//!   ├─ schema violation?      → Error (InvalidArguments), nothing spawned
//!   ├─ recipe builds Manual?  → ManualRequired, nothing spawned
//!   ├─ program missing?       → Error (FileNotFoundError), nothing spawned
//!   └─ spawn interpreter program args...
//!        ├─ exit 0            → Success (+ JSON payload when stdout is JSON)
//!        ├─ exit N            → Error (SubprocessError)
//!        ├─ over the timeout  → Timeout (process killed)
//!        └─ spawn/wait error  → Error
//! ```
//!
//! Exactly one attempt is made per call; there are no retries.

use super::catalog::{self, Invocation, ToolRecipe};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use toolchat_application::ports::tool_executor::ToolExecutorPort;
use toolchat_domain::{
    DefaultToolValidator, ToolArguments, ToolDefinition, ToolExecutionResult, ToolResultMetadata,
    ToolValidator,
};
use tracing::{debug, warn};

/// Default ceiling on one tool process
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Where and how tool programs run
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorConfig {
    /// Directory the recipe program paths are relative to
    pub tools_dir: PathBuf,
    /// Interpreter the programs are run with
    pub interpreter: String,
    pub timeout: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            tools_dir: PathBuf::from("."),
            interpreter: "python3".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ExecutorConfig {
    pub fn with_tools_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tools_dir = dir.into();
        self
    }

    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Executor that runs catalog programs on the local machine.
#[derive(Debug, Clone)]
pub struct ProcessToolExecutor {
    config: ExecutorConfig,
    recipes: Vec<ToolRecipe>,
    definitions: Vec<ToolDefinition>,
}

impl ProcessToolExecutor {
    /// Executor over the full twelve-tool catalog.
    pub fn new(config: ExecutorConfig) -> Self {
        Self::with_recipes(config, catalog::default_catalog())
    }

    /// Executor over a custom set of recipes.
    pub fn with_recipes(config: ExecutorConfig, recipes: Vec<ToolRecipe>) -> Self {
        if which::which(&config.interpreter).is_err() {
            warn!(
                "Tool interpreter '{}' not found on PATH; tool calls will fail",
                config.interpreter
            );
        }
        let definitions = recipes.iter().map(|r| r.definition.clone()).collect();
        Self {
            config,
            recipes,
            definitions,
        }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn recipe(&self, function_name: &str) -> Option<&ToolRecipe> {
        self.recipes.iter().find(|r| r.name() == function_name)
    }

    /// Spawn `argv` and classify the outcome.
    async fn run(
        &self,
        metadata: ToolResultMetadata,
        argv: Vec<String>,
        start: Instant,
    ) -> ToolExecutionResult {
        let Some((program, args)) = argv.split_first() else {
            return ToolExecutionResult::failed(metadata, "Empty command line", "SpawnError");
        };

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                return ToolExecutionResult::failed(
                    metadata,
                    format!("Error executing command: {}", e),
                    "SpawnError",
                )
                .with_command(&argv)
                .with_duration(start.elapsed());
            }
        };

        // On timeout the wait future is dropped with the child, which kills it
        match tokio::time::timeout(self.config.timeout, child.wait_with_output()).await {
            Err(_) => {
                warn!(
                    tool = %metadata.tool_name,
                    "Tool timed out after {}s",
                    self.config.timeout.as_secs()
                );
                ToolExecutionResult::timed_out(metadata, self.config.timeout).with_command(&argv)
            }
            Ok(Err(e)) => ToolExecutionResult::failed(
                metadata,
                format!("Error executing command: {}", e),
                "IoError",
            )
            .with_command(&argv)
            .with_duration(start.elapsed()),
            Ok(Ok(output)) => ToolExecutionResult::from_exit(
                metadata,
                output.status.code(),
                &String::from_utf8_lossy(&output.stdout),
                &String::from_utf8_lossy(&output.stderr),
            )
            .with_command(&argv)
            .with_duration(start.elapsed()),
        }
    }
}

impl Default for ProcessToolExecutor {
    fn default() -> Self {
        Self::new(ExecutorConfig::default())
    }
}

#[async_trait]
impl ToolExecutorPort for ProcessToolExecutor {
    fn tool_definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    async fn execute(&self, function_name: &str, arguments: &ToolArguments) -> ToolExecutionResult {
        let start = Instant::now();

        let Some(recipe) = self.recipe(function_name) else {
            warn!(tool = %function_name, "Unknown tool requested");
            return ToolExecutionResult::unknown_tool(function_name).with_duration(start.elapsed());
        };
        let metadata = ToolResultMetadata::from_definition(&recipe.definition);

        if !recipe.always_manual
            && let Err(reason) = DefaultToolValidator.validate(arguments, &recipe.definition)
        {
            return ToolExecutionResult::invalid_arguments(metadata, reason)
                .with_duration(start.elapsed());
        }

        let argv = match recipe.build(arguments) {
            Ok(Invocation::Run(args)) => args,
            Ok(Invocation::Manual { message, details }) => {
                debug!(tool = %function_name, "Tool requires manual action");
                return ToolExecutionResult::manual_required(metadata, message, details)
                    .with_duration(start.elapsed());
            }
            Err(e) => {
                return ToolExecutionResult::invalid_arguments(metadata, e.to_string())
                    .with_duration(start.elapsed());
            }
        };

        let program = self.config.tools_dir.join(&recipe.program);
        if !program.exists() {
            return ToolExecutionResult::failed(
                metadata,
                format!("Tool program not found: {}", program.display()),
                "FileNotFoundError",
            )
            .with_duration(start.elapsed());
        }

        let mut command = vec![
            self.config.interpreter.clone(),
            program.display().to_string(),
        ];
        command.extend(argv);
        debug!(tool = %function_name, "Running: {}", command.join(" "));

        self.run(metadata, command, start).await
    }
}
