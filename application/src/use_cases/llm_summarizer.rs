//! Model-backed conversation summarizer.

use crate::ports::llm_provider::{CompletionRequest, LlmProvider};
use crate::ports::summarizer::{ConversationSummarizer, SummarizeError};
use async_trait::async_trait;
use std::sync::Arc;
use toolchat_domain::{Message, Model, Role};

const SUMMARY_INSTRUCTIONS: &str = "You condense chat transcripts. Summarize the conversation \
below so it can replace the original messages. Keep user goals, decisions, file paths, tool \
results that matter later and any open questions. Write plain prose, no preamble.";

/// Asks the chat model itself to summarize old history, with tools disabled.
pub struct LlmSummarizer {
    provider: Arc<dyn LlmProvider>,
    model: Model,
}

impl LlmSummarizer {
    pub fn new(provider: Arc<dyn LlmProvider>, model: Model) -> Self {
        Self { provider, model }
    }
}

/// Flatten messages into a `role: text` transcript.
fn transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .filter_map(|m| {
            let text = match (m.role, m.content_str().is_empty()) {
                (Role::Assistant, true) if m.has_tool_calls() => {
                    let names: Vec<&str> = m
                        .tool_calls
                        .iter()
                        .flatten()
                        .map(|c| c.function_name())
                        .collect();
                    format!("(called tools: {})", names.join(", "))
                }
                (_, true) => return None,
                (_, false) => m.content_str().to_string(),
            };
            Some(format!("{}: {}", m.role.as_str(), text))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl ConversationSummarizer for LlmSummarizer {
    async fn summarize(
        &self,
        messages: &[Message],
        max_tokens: usize,
    ) -> Result<String, SummarizeError> {
        let request = CompletionRequest::new(
            self.model.clone(),
            vec![
                Message::system(SUMMARY_INSTRUCTIONS),
                Message::user(transcript(messages)),
            ],
        )
        .with_temperature(0.3)
        .with_max_tokens(u32::try_from(max_tokens).unwrap_or(u32::MAX));

        let completion = self
            .provider
            .complete(&request)
            .await
            .map_err(|e| SummarizeError::RequestFailed(e.to_string()))?;

        let text = completion.text.trim();
        if text.is_empty() {
            return Err(SummarizeError::Empty);
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_provider::ProviderError;
    use std::sync::Mutex;
    use toolchat_domain::{Completion, ToolCallRecord};

    struct Capture {
        reply: String,
        seen: Mutex<Option<CompletionRequest>>,
    }

    #[async_trait]
    impl LlmProvider for Capture {
        fn name(&self) -> &str {
            "capture"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
            *self.seen.lock().unwrap() = Some(request.clone());
            Ok(Completion::text(self.reply.clone()))
        }
    }

    #[test]
    fn test_transcript_format() {
        let messages = vec![
            Message::user("find todos"),
            Message::assistant_tool_calls(
                None,
                vec![ToolCallRecord::new("c1", "extract_todos", "{}")],
            ),
            Message::tool_result("c1", "extract_todos", "{\"status\":\"success\"}"),
        ];
        let text = transcript(&messages);
        assert_eq!(
            text,
            "user: find todos\nassistant: (called tools: extract_todos)\ntool: {\"status\":\"success\"}"
        );
    }

    #[tokio::test]
    async fn test_sends_budget_without_tools() {
        let provider = Arc::new(Capture {
            reply: "  condensed  ".into(),
            seen: Mutex::new(None),
        });
        let summarizer = LlmSummarizer::new(provider.clone(), Model::default());
        let text = summarizer
            .summarize(&[Message::user("hello")], 300)
            .await
            .unwrap();
        assert_eq!(text, "condensed");

        let request = provider.seen.lock().unwrap().clone().unwrap();
        assert!(!request.tools_enabled());
        assert_eq!(request.max_tokens, 300);
        assert_eq!(request.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_reply_is_an_error() {
        let provider = Arc::new(Capture {
            reply: "   ".into(),
            seen: Mutex::new(None),
        });
        let summarizer = LlmSummarizer::new(provider, Model::default());
        let err = summarizer.summarize(&[Message::user("x")], 300).await;
        assert!(matches!(err, Err(SummarizeError::Empty)));
    }
}
