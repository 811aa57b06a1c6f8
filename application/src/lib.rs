//! Application layer for toolchat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatConfig;
pub use ports::{
    conversation_repository::{
        ConversationExporter, ConversationRepository, NoPersistence, RepositoryError,
    },
    llm_provider::{CompletionRequest, LlmProvider, ProviderError, StreamHandle},
    summarizer::{ConversationSummarizer, SummarizeError},
    tool_executor::ToolExecutorPort,
};
pub use use_cases::chat_orchestrator::{ChatError, ChatOrchestrator};
pub use use_cases::conversation_store::{ConversationStore, DEFAULT_SUMMARIZE_TARGET};
pub use use_cases::llm_summarizer::LlmSummarizer;
pub use use_cases::persona::default_persona;
