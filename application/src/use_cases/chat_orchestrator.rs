//! Chat Orchestrator use case.
//!
//! Drives one user turn at a time:
//!
//! ```text
//! user message ─▶ completion ─┬─ text ──────────────────────────▶ answer
//!                             └─ tool calls ─▶ dispatch (in order)
//!                                  ▲                │
//!                                  │                ▼
//!                                  └── tool calls ◀ follow-up completion (no tools)
//!                                                   │
//!                                                   └─ text ─────▶ answer
//! ```
//!
//! Every round holds a [`DepthGuard`]; entering a round beyond
//! `max_tool_call_depth` ends the turn with an error chunk. The guards
//! release on every exit path, including a dropped chunk stream.
//!
//! Streaming and single-shot completions share one output shape: a lazy
//! stream of text chunks. Nothing runs until the stream is polled.

use crate::config::ChatConfig;
use crate::ports::llm_provider::{CompletionRequest, LlmProvider, ProviderError};
use crate::ports::summarizer::ConversationSummarizer;
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::conversation_store::ConversationStore;
use futures::channel::mpsc;
use futures::future;
use futures::stream::{self, BoxStream};
use futures::{FutureExt, StreamExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use toolchat_domain::{
    Completion, Message, Model, StreamAccumulator, StreamEvent, SummaryReport, SummarySkip,
    ToolArguments, ToolTelemetry, UsageStats,
};
use tracing::{debug, info, warn};

/// Separator emitted between text already streamed and a follow-up answer
const FOLLOW_UP_SEPARATOR: &str = "\n\n";

/// Errors that end a turn early.
///
/// These never escape the public API; they are rendered as an
/// `Error: ...` chunk.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Maximum tool call depth ({0}) exceeded. Stopping to prevent infinite recursion.")]
    DepthExceeded(usize),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Scoped increment of the tool-call depth counter.
struct DepthGuard {
    depth: Arc<AtomicUsize>,
}

impl DepthGuard {
    /// Increment the counter; fails (and undoes the increment) past `max`.
    fn enter(depth: &Arc<AtomicUsize>, max: usize) -> Result<Self, ChatError> {
        let current = depth.fetch_add(1, Ordering::SeqCst) + 1;
        let guard = Self {
            depth: Arc::clone(depth),
        };
        if current > max {
            return Err(ChatError::DepthExceeded(max));
        }
        Ok(guard)
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Writer side of the chunk stream handed to the caller.
struct ChunkSink {
    tx: mpsc::UnboundedSender<String>,
    emitted: bool,
    pending_separator: bool,
}

impl ChunkSink {
    fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self {
            tx,
            emitted: false,
            pending_separator: false,
        }
    }

    fn send(&mut self, chunk: String) {
        if chunk.is_empty() {
            return;
        }
        if std::mem::take(&mut self.pending_separator) && self.emitted {
            let _ = self.tx.unbounded_send(FOLLOW_UP_SEPARATOR.to_string());
        }
        self.emitted = true;
        // The receiver lives in the same stream as the turn, so a failed
        // send only happens while the turn is being dropped. Tool calls
        // left unanswered that way are repaired when the next turn starts.
        let _ = self.tx.unbounded_send(chunk);
    }

    /// The next chunk starts a new paragraph
    fn break_paragraph(&mut self) {
        self.pending_separator = true;
    }

    fn error(&mut self, error: &ChatError) {
        self.break_paragraph();
        self.send(format!("Error: {}", error));
    }
}

/// Use case for running a tool-calling chat session.
///
/// Owns the conversation, tool telemetry and usage counters for one session.
pub struct ChatOrchestrator {
    provider: Arc<dyn LlmProvider>,
    executor: Arc<dyn ToolExecutorPort>,
    store: ConversationStore,
    summarizer: Option<Arc<dyn ConversationSummarizer>>,
    config: ChatConfig,
    telemetry: ToolTelemetry,
    usage: UsageStats,
    depth: Arc<AtomicUsize>,
}

impl ChatOrchestrator {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        executor: Arc<dyn ToolExecutorPort>,
        store: ConversationStore,
        config: ChatConfig,
    ) -> Self {
        let store = store
            .with_model(config.model.clone())
            .with_summarize_target(config.summarize_target_ratio);
        Self {
            provider,
            executor,
            store,
            summarizer: None,
            config,
            telemetry: ToolTelemetry::new(),
            usage: UsageStats::default(),
            depth: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Use a model-backed summarizer instead of the structural fallback.
    pub fn with_summarizer(mut self, summarizer: Arc<dyn ConversationSummarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    // ==================== Accessors ====================

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConversationStore {
        &mut self.store
    }

    pub fn executor(&self) -> &Arc<dyn ToolExecutorPort> {
        &self.executor
    }

    pub fn telemetry(&self) -> &ToolTelemetry {
        &self.telemetry
    }

    pub fn usage(&self) -> &UsageStats {
        &self.usage
    }

    /// Current tool-call nesting; zero between turns
    pub fn tool_call_depth(&self) -> usize {
        self.depth.load(Ordering::SeqCst)
    }

    pub fn set_model(&mut self, model: Model) {
        info!("Switching model to {}", model);
        self.config.model = model.clone();
        self.store.set_model(model);
    }

    /// Clear history and usage counters. Tool telemetry is kept.
    pub fn reset(&mut self, keep_system: bool) {
        self.store.clear(keep_system);
        self.usage = UsageStats::default();
    }

    /// Summarize old history now, regardless of usage.
    pub async fn summarize(&mut self) -> Result<SummaryReport, SummarySkip> {
        let summarizer = self.summarizer.clone();
        self.store
            .summarize(self.config.summarize_target_ratio, summarizer.as_deref())
            .await
    }

    // ==================== Turns ====================

    /// Run one user turn, yielding the answer as text chunks.
    ///
    /// The returned stream is lazy and finite; dropping it cancels the turn.
    pub fn chat(&mut self, message: impl Into<String>) -> BoxStream<'_, String> {
        let message = message.into();
        let (tx, rx) = mpsc::unbounded();
        let driver = async move {
            let mut sink = ChunkSink::new(tx);
            self.run_turn(message, &mut sink).await;
        };
        let driver = driver
            .into_stream()
            .filter_map(|()| future::ready(None::<String>));
        stream::select(rx, driver).boxed()
    }

    /// Run one user turn and return the full answer.
    pub async fn send(&mut self, message: impl Into<String>) -> String {
        self.chat(message).collect::<Vec<_>>().await.concat()
    }

    async fn run_turn(&mut self, message: String, sink: &mut ChunkSink) {
        info!("Starting chat turn ({} chars)", message.chars().count());
        self.store.repair_tool_calls();
        self.store.append(Message::user(message));

        if self.config.auto_summarize {
            let summarizer = self.summarizer.clone();
            self.store
                .auto_summarize_if_needed(self.config.summarize_threshold, summarizer.as_deref())
                .await;
        }
        self.store.trim_if_over_budget();

        let result = match self.request(self.config.enable_tools, sink).await {
            Ok(completion) if completion.has_tool_calls() => {
                self.run_tool_rounds(completion, sink).await
            }
            Ok(completion) => {
                self.store.append(Message::assistant(completion.text));
                Ok(())
            }
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(()) => info!("Chat turn complete"),
            Err(e) => {
                warn!("Chat turn ended early: {}", e);
                sink.error(&e);
            }
        }
    }

    /// Handle tool-call rounds until the model answers in text.
    async fn run_tool_rounds(
        &mut self,
        mut completion: Completion,
        sink: &mut ChunkSink,
    ) -> Result<(), ChatError> {
        let mut guards = Vec::new();
        loop {
            guards.push(DepthGuard::enter(
                &self.depth,
                self.config.max_tool_call_depth,
            )?);
            debug!("Tool-call round {}", guards.len());

            self.dispatch_tool_calls(completion).await;

            sink.break_paragraph();
            completion = self.request(false, sink).await?;
            if !completion.has_tool_calls() {
                self.store.append(Message::assistant(completion.text));
                return Ok(());
            }
        }
    }

    /// Record the request, then execute each call in order.
    async fn dispatch_tool_calls(&mut self, completion: Completion) {
        let calls = completion.tool_calls;
        self.usage.record_tool_calls(calls.len());
        let content = (!completion.text.is_empty()).then_some(completion.text);
        self.store
            .append(Message::assistant_tool_calls(content, calls.clone()));

        for call in &calls {
            let name = call.function_name();
            let content = match ToolArguments::parse(call.arguments_json()) {
                Ok(arguments) => {
                    debug!(tool = %name, call_id = %call.id, "Dispatching tool call");
                    let result = self.executor.execute(name, &arguments).await;
                    if result.status.is_failure() {
                        warn!(tool = %name, status = result.status.as_str(), "{}", result.failure_message());
                    } else {
                        debug!(tool = %name, "{}", result.summary_line());
                    }
                    self.telemetry.record_execution(&result);
                    self.executor.serialize_result(&result)
                }
                Err(e) => {
                    warn!(tool = %name, "Failed to parse tool arguments: {}", e);
                    serde_json::json!({ "error": format!("Error parsing tool arguments: {}", e) })
                        .to_string()
                }
            };
            self.store
                .append(Message::tool_result(call.id.clone(), name, content));
        }
    }

    /// One provider request over the current history.
    async fn request(
        &mut self,
        with_tools: bool,
        sink: &mut ChunkSink,
    ) -> Result<Completion, ProviderError> {
        let tools = if with_tools {
            self.executor.tool_definitions().to_vec()
        } else {
            Vec::new()
        };
        let request =
            CompletionRequest::new(self.config.model.clone(), self.store.messages().to_vec())
                .with_tools(tools)
                .with_temperature(self.config.temperature)
                .with_max_tokens(self.config.max_response_tokens)
                .with_parallel_tool_calls(self.config.parallel_tool_calls);
        debug!(
            provider = self.provider.name(),
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending completion request"
        );

        let completion = if self.config.stream {
            let mut handle = self.provider.stream(&request).await?;
            let mut accumulator = StreamAccumulator::new();
            while let Some(event) = handle.recv().await {
                match event {
                    StreamEvent::Completed => break,
                    StreamEvent::Error(e) => return Err(ProviderError::Stream(e)),
                    event => {
                        if let Some(text) = accumulator.push(&event) {
                            sink.send(text);
                        }
                    }
                }
            }
            accumulator.finish()
        } else {
            let completion = self.provider.complete(&request).await?;
            sink.send(completion.text.clone());
            completion
        };

        self.usage
            .record_request(self.config.model.as_str(), completion.usage.as_ref());
        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_provider::StreamHandle;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::mpsc as tokio_mpsc;
    use toolchat_domain::{
        Conversation, Role, TokenUsage, ToolCallRecord, ToolDefinition, ToolExecutionResult,
        ToolResultMetadata,
    };

    /// Provider answering from a script; falls back to "done" when empty.
    #[derive(Default)]
    struct ScriptedProvider {
        replies: Mutex<VecDeque<Result<Completion, String>>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn new(replies: Vec<Result<Completion, String>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
            self.requests.lock().unwrap().push(request.clone());
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(completion)) => Ok(completion),
                Some(Err(e)) => Err(ProviderError::RequestFailed(e)),
                None => Ok(Completion::text("done")),
            }
        }
    }

    /// Provider that streams a fixed sequence of text deltas.
    struct ChunkedProvider(Vec<&'static str>);

    #[async_trait]
    impl LlmProvider for ChunkedProvider {
        fn name(&self) -> &str {
            "chunked"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<Completion, ProviderError> {
            Ok(Completion::text(self.0.concat()))
        }

        async fn stream(&self, _request: &CompletionRequest) -> Result<StreamHandle, ProviderError> {
            let (tx, rx) = tokio_mpsc::channel(16);
            for chunk in &self.0 {
                tx.send(StreamEvent::Delta(chunk.to_string())).await.unwrap();
            }
            tx.send(StreamEvent::Usage(TokenUsage::new(12, 3))).await.unwrap();
            tx.send(StreamEvent::Completed).await.unwrap();
            Ok(StreamHandle::new(rx))
        }
    }

    struct MockExecutor {
        definitions: Vec<ToolDefinition>,
        calls: Mutex<Vec<(String, ToolArguments)>>,
    }

    impl MockExecutor {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                definitions: vec![ToolDefinition::new(
                    "extract_todos",
                    "TodoExtractor",
                    "Extract TODO comments",
                )],
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ToolExecutorPort for MockExecutor {
        fn tool_definitions(&self) -> &[ToolDefinition] {
            &self.definitions
        }

        async fn execute(&self, function_name: &str, arguments: &ToolArguments) -> ToolExecutionResult {
            self.calls
                .lock()
                .unwrap()
                .push((function_name.to_string(), arguments.clone()));
            ToolExecutionResult::from_exit(
                ToolResultMetadata::for_tool(function_name),
                Some(0),
                "{\"todos\": 2}",
                "",
            )
        }
    }

    /// Executor whose tools never finish.
    struct StalledExecutor(Vec<ToolDefinition>);

    #[async_trait]
    impl ToolExecutorPort for StalledExecutor {
        fn tool_definitions(&self) -> &[ToolDefinition] {
            &self.0
        }

        async fn execute(&self, _function_name: &str, _arguments: &ToolArguments) -> ToolExecutionResult {
            future::pending().await
        }
    }

    fn tool_call(id: &str, args: &str) -> Completion {
        Completion::default().with_tool_calls(vec![ToolCallRecord::new(id, "extract_todos", args)])
    }

    fn orchestrator(
        provider: Arc<dyn LlmProvider>,
        executor: Arc<MockExecutor>,
        stream: bool,
    ) -> ChatOrchestrator {
        let mut conversation = Conversation::new(128_000);
        conversation.set_persona("persona");
        ChatOrchestrator::new(
            provider,
            executor,
            ConversationStore::in_memory(conversation),
            ChatConfig::default().with_stream(stream),
        )
    }

    fn roles(orchestrator: &ChatOrchestrator) -> Vec<Role> {
        orchestrator.store().messages().iter().map(|m| m.role).collect()
    }

    #[tokio::test]
    async fn test_plain_answer() {
        let provider = ScriptedProvider::new(vec![Ok(
            Completion::text("Hello there").with_usage(TokenUsage::new(20, 5))
        )]);
        let mut chat = orchestrator(provider.clone(), MockExecutor::new(), false);

        let answer = chat.send("hi").await;
        assert_eq!(answer, "Hello there");
        assert_eq!(roles(&chat), vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(chat.usage().requests, 1);
        assert_eq!(chat.usage().input_tokens, 20);
        assert!(provider.requests.lock().unwrap()[0].tools_enabled());
    }

    #[tokio::test]
    async fn test_tool_round_then_follow_up_without_tools() {
        let provider = ScriptedProvider::new(vec![
            Ok(tool_call("c1", "{\"path\": \".\"}")),
            Ok(Completion::text("Found 2 TODOs")),
        ]);
        let executor = MockExecutor::new();
        let mut chat = orchestrator(provider.clone(), executor.clone(), false);

        let answer = chat.send("find todos").await;
        assert_eq!(answer, "Found 2 TODOs");
        assert_eq!(
            roles(&chat),
            vec![Role::System, Role::User, Role::Assistant, Role::Tool, Role::Assistant]
        );

        let messages = chat.store().messages();
        assert!(messages[2].has_tool_calls());
        assert_eq!(messages[3].tool_call_id.as_deref(), Some("c1"));
        assert!(messages[3].content_str().contains("\"status\":\"success\""));

        let requests = provider.requests.lock().unwrap();
        assert!(requests[0].tools_enabled());
        assert!(!requests[1].tools_enabled());

        assert_eq!(executor.calls.lock().unwrap()[0].1.get_str("path"), Some("."));
        assert_eq!(chat.telemetry().get("extract_todos").unwrap().total_calls(), 1);
        assert_eq!(chat.usage().tool_calls, 1);
        assert_eq!(chat.tool_call_depth(), 0);
    }

    #[tokio::test]
    async fn test_bad_arguments_do_not_abort_batch() {
        let batch = Completion::default().with_tool_calls(vec![
            ToolCallRecord::new("bad", "extract_todos", "{not json"),
            ToolCallRecord::new("good", "extract_todos", "{}"),
        ]);
        let provider = ScriptedProvider::new(vec![Ok(batch), Ok(Completion::text("ok"))]);
        let executor = MockExecutor::new();
        let mut chat = orchestrator(provider, executor.clone(), false);

        chat.send("go").await;

        let tool_messages: Vec<&Message> = chat
            .store()
            .messages()
            .iter()
            .filter(|m| m.role == Role::Tool)
            .collect();
        assert_eq!(tool_messages.len(), 2);
        assert_eq!(tool_messages[0].tool_call_id.as_deref(), Some("bad"));
        assert!(
            tool_messages[0]
                .content_str()
                .contains("Error parsing tool arguments")
        );
        assert_eq!(tool_messages[1].tool_call_id.as_deref(), Some("good"));
        assert_eq!(executor.call_count(), 1);
    }

    #[tokio::test]
    async fn test_depth_limit_stops_recursion() {
        let replies = (0..12)
            .map(|i| Ok(tool_call(&format!("c{}", i), "{}")))
            .collect();
        let provider = ScriptedProvider::new(replies);
        let executor = MockExecutor::new();
        let mut chat = orchestrator(provider.clone(), executor.clone(), false);

        let answer = chat.send("loop forever").await;
        assert!(answer.contains("Maximum tool call depth (5) exceeded."));
        assert_eq!(executor.call_count(), 5);
        assert_eq!(provider.request_count(), 6);
        assert_eq!(chat.tool_call_depth(), 0);
        assert_ne!(chat.store().messages().last().unwrap().role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_custom_depth_limit() {
        let replies = (0..4).map(|i| Ok(tool_call(&format!("c{}", i), "{}"))).collect();
        let provider = ScriptedProvider::new(replies);
        let executor = MockExecutor::new();
        let mut chat = orchestrator(provider, executor.clone(), false);
        chat.config.max_tool_call_depth = 2;

        let answer = chat.send("x").await;
        assert!(answer.contains("Maximum tool call depth (2) exceeded."));
        assert_eq!(executor.call_count(), 2);
    }

    #[tokio::test]
    async fn test_provider_error_becomes_error_chunk() {
        let provider = ScriptedProvider::new(vec![Err("boom".into())]);
        let mut chat = orchestrator(provider, MockExecutor::new(), false);

        let answer = chat.send("hi").await;
        assert_eq!(answer, "Error: Request failed: boom");
        assert_eq!(roles(&chat), vec![Role::System, Role::User]);
    }

    #[tokio::test]
    async fn test_follow_up_failure_releases_depth() {
        let provider = ScriptedProvider::new(vec![Ok(tool_call("c1", "{}")), Err("gone".into())]);
        let mut chat = orchestrator(provider, MockExecutor::new(), false);

        let answer = chat.send("hi").await;
        assert!(answer.ends_with("Error: Request failed: gone"));
        assert_eq!(chat.tool_call_depth(), 0);
    }

    #[tokio::test]
    async fn test_streaming_yields_chunks() {
        let provider = Arc::new(ChunkedProvider(vec!["Hel", "lo", " world"]));
        let mut chat = orchestrator(provider, MockExecutor::new(), true);

        let chunks: Vec<String> = chat.chat("hi").collect().await;
        assert_eq!(chunks, vec!["Hel", "lo", " world"]);
        assert_eq!(
            chat.store().messages().last().unwrap().content_str(),
            "Hello world"
        );
        assert_eq!(chat.usage().output_tokens, 3);
    }

    #[tokio::test]
    async fn test_streaming_separates_follow_up_answer() {
        let provider = ScriptedProvider::new(vec![
            Ok(Completion::text("Let me check.")
                .with_tool_calls(vec![ToolCallRecord::new("c1", "extract_todos", "{}")])),
            Ok(Completion::text("Done.")),
        ]);
        let mut chat = orchestrator(provider, MockExecutor::new(), true);

        let chunks: Vec<String> = chat.chat("hi").collect().await;
        assert_eq!(chunks, vec!["Let me check.", "\n\n", "Done."]);
        let assistant = &chat.store().messages()[2];
        assert_eq!(assistant.content_str(), "Let me check.");
        assert!(assistant.has_tool_calls());
    }

    #[tokio::test]
    async fn test_chat_is_lazy() {
        let provider = ScriptedProvider::new(Vec::new());
        let mut chat = orchestrator(provider.clone(), MockExecutor::new(), false);

        drop(chat.chat("never sent"));
        assert_eq!(provider.request_count(), 0);
        assert_eq!(roles(&chat), vec![Role::System]);
    }

    #[tokio::test]
    async fn test_usage_accumulates_until_reset() {
        let provider = ScriptedProvider::new(Vec::new());
        let mut chat = orchestrator(provider, MockExecutor::new(), false);

        chat.send("one").await;
        chat.send("two").await;
        assert_eq!(chat.usage().requests, 2);

        chat.reset(true);
        assert_eq!(chat.usage().requests, 0);
        assert_eq!(roles(&chat), vec![Role::System]);
    }

    #[tokio::test]
    async fn test_tools_disabled_by_config() {
        let provider = ScriptedProvider::new(Vec::new());
        let executor = MockExecutor::new();
        let mut chat = ChatOrchestrator::new(
            provider.clone(),
            executor,
            ConversationStore::in_memory(Conversation::new(128_000)),
            ChatConfig::default().with_stream(false).with_tools_enabled(false),
        );
        chat.send("hi").await;
        assert!(!provider.requests.lock().unwrap()[0].tools_enabled());
    }
    #[tokio::test]
    async fn test_dropped_turn_leaves_no_unanswered_tool_calls() {
        let provider = ScriptedProvider::new(vec![
            Ok(tool_call("c1", "{}")),
            Ok(Completion::text("fresh answer")),
        ]);
        let executor = Arc::new(StalledExecutor(MockExecutor::new().definitions.clone()));
        let mut conversation = Conversation::new(128_000);
        conversation.set_persona("persona");
        let mut chat = ChatOrchestrator::new(
            provider.clone(),
            executor,
            ConversationStore::in_memory(conversation),
            ChatConfig::default().with_stream(false),
        );

        {
            let mut turn = chat.chat("find todos");
            assert!(turn.next().now_or_never().is_none());
        }
        assert!(chat.store().messages().last().unwrap().has_tool_calls());
        assert_eq!(chat.tool_call_depth(), 0);

        let answer = chat.send("try again").await;
        assert_eq!(answer, "fresh answer");

        let requests = provider.requests.lock().unwrap();
        let sent = &requests[1].messages;
        let roles: Vec<Role> = sent.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::Tool, Role::User]
        );
        assert_eq!(sent[3].tool_call_id.as_deref(), Some("c1"));
    }
}
