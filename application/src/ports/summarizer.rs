//! Port for condensing old conversation history.

use async_trait::async_trait;
use thiserror::Error;
use toolchat_domain::Message;

/// Errors raised by a summarizer
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("Summarizer request failed: {0}")]
    RequestFailed(String),

    #[error("Summarizer returned an empty summary")]
    Empty,
}

/// Condenses a slice of messages into a short text.
///
/// The conversation store falls back to a structural summary whenever this
/// returns an error.
#[async_trait]
pub trait ConversationSummarizer: Send + Sync {
    /// Summarize `messages` in roughly `max_tokens` tokens or fewer.
    async fn summarize(&self, messages: &[Message], max_tokens: usize)
    -> Result<String, SummarizeError>;
}
