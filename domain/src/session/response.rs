//! Completion types returned by a chat model provider.
//!
//! A [`Completion`] is either plain text or one or more tool-call requests
//! (possibly with accompanying text), plus optional token usage counters.

use super::entities::ToolCallRecord;
use serde::{Deserialize, Serialize};

/// Token counters reported by the provider for one request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    pub fn total(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Structured response of one completion request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub text: String,
    pub tool_calls: Vec<ToolCallRecord>,
    pub usage: Option<TokenUsage>,
    /// Model name echoed by the provider, if any
    pub model: Option<String>,
}

impl Completion {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_tool_calls(mut self, calls: Vec<ToolCallRecord>) -> Self {
        self.tool_calls = calls;
        self
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_completion() {
        let completion = Completion::text("Hello");
        assert!(!completion.has_tool_calls());
        assert!(completion.usage.is_none());
    }

    #[test]
    fn test_tool_call_completion() {
        let completion = Completion::default()
            .with_tool_calls(vec![ToolCallRecord::new("c1", "extract_todos", "{}")])
            .with_usage(TokenUsage::new(120, 30));
        assert!(completion.has_tool_calls());
        assert_eq!(completion.usage.map(|u| u.total()), Some(150));
    }
}
