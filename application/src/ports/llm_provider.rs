//! LLM Provider port
//!
//! Defines the interface for requesting chat completions from a model
//! provider. The provider is a black box: it receives the ordered messages,
//! the active tool definitions and sampling parameters, and answers with
//! text and/or tool-call requests plus token usage.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use toolchat_domain::{
    Completion, Message, Model, StreamAccumulator, StreamEvent, ToolDefinition,
};

/// Errors that can occur during provider operations
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// One completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: Model,
    pub messages: Vec<Message>,
    /// Tools offered to the model; empty disables tool calling
    pub tools: Vec<ToolDefinition>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub parallel_tool_calls: bool,
}

impl CompletionRequest {
    pub fn new(model: Model, messages: Vec<Message>) -> Self {
        Self {
            model,
            messages,
            tools: Vec::new(),
            temperature: 0.7,
            max_tokens: 4096,
            parallel_tool_calls: false,
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_parallel_tool_calls(mut self, parallel: bool) -> Self {
        self.parallel_tool_calls = parallel;
        self
    }

    pub fn tools_enabled(&self) -> bool {
        !self.tools.is_empty()
    }
}

/// Handle for receiving streaming events from a provider.
///
/// Wraps an `mpsc::Receiver<StreamEvent>` and provides convenience methods
/// for consuming the stream.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Replay a finished completion as a stream of events.
    pub fn from_completion(completion: Completion) -> Self {
        let events = completion_events(completion);
        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            // Capacity covers every event, so this cannot fail while rx is alive
            let _ = tx.try_send(event);
        }
        Self::new(rx)
    }

    pub async fn recv(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    /// Consume the stream and reassemble the full completion.
    pub async fn collect(mut self) -> Result<Completion, ProviderError> {
        let mut accumulator = StreamAccumulator::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Completed => break,
                StreamEvent::Error(e) => return Err(ProviderError::Stream(e)),
                other => {
                    accumulator.push(&other);
                }
            }
        }
        // Channel closed without Completed: return what we have
        Ok(accumulator.finish())
    }
}

fn completion_events(completion: Completion) -> Vec<StreamEvent> {
    let mut events = Vec::new();
    if !completion.text.is_empty() {
        events.push(StreamEvent::Delta(completion.text));
    }
    for (index, call) in completion.tool_calls.into_iter().enumerate() {
        events.push(StreamEvent::ToolCallDelta {
            index,
            id: Some(call.id),
            name: Some(call.function.name),
            arguments_delta: Some(call.function.arguments),
        });
    }
    if let Some(usage) = completion.usage {
        events.push(StreamEvent::Usage(usage));
    }
    events.push(StreamEvent::Completed);
    events
}

/// Chat model provider
///
/// This port defines how the application layer talks to a model provider.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &str;

    /// Request a single-shot completion
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError>;

    /// Request a streamed completion.
    ///
    /// Default implementation calls `complete()` and replays the result as
    /// events, so providers without streaming work unchanged.
    async fn stream(&self, request: &CompletionRequest) -> Result<StreamHandle, ProviderError> {
        let completion = self.complete(request).await?;
        Ok(StreamHandle::from_completion(completion))
    }
}
