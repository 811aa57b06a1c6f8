//! Chat parameters: model, sampling, tool calling and context control.
//!
//! [`ChatConfig`] groups the static parameters that control one
//! [`ChatOrchestrator`](crate::use_cases::chat_orchestrator::ChatOrchestrator)
//! session. These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use toolchat_domain::Model;

/// Chat session parameters.
///
/// | Field | Default | Effect |
/// |-------|---------|--------|
/// | `model` | `gpt-4o` | Model sent with every request |
/// | `max_context_tokens` | 128 000 | Context budget for trimming/summarizing |
/// | `max_response_tokens` | 4 096 | Completion length cap |
/// | `temperature` | 0.7 | Sampling temperature (ignored by reasoning models) |
/// | `stream` | true | Stream text as it is generated |
/// | `enable_tools` | true | Offer the tool catalog to the model |
/// | `parallel_tool_calls` | false | Let the model request several calls at once |
/// | `max_tool_call_depth` | 5 | Bound on nested tool-call rounds per turn |
/// | `auto_summarize` | true | Summarize when usage crosses the threshold |
/// | `summarize_threshold` | 0.85 | Usage ratio that triggers summarization |
/// | `summarize_target_ratio` | 0.6 | Usage ratio summarization aims for |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub model: Model,
    pub max_context_tokens: usize,
    pub max_response_tokens: u32,
    pub temperature: f32,
    pub stream: bool,
    pub enable_tools: bool,
    pub parallel_tool_calls: bool,
    pub max_tool_call_depth: usize,
    pub auto_summarize: bool,
    pub summarize_threshold: f64,
    pub summarize_target_ratio: f64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            max_context_tokens: 128_000,
            max_response_tokens: 4096,
            temperature: 0.7,
            stream: true,
            enable_tools: true,
            parallel_tool_calls: false,
            max_tool_call_depth: 5,
            auto_summarize: true,
            summarize_threshold: 0.85,
            summarize_target_ratio: 0.6,
        }
    }
}

impl ChatConfig {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_context_tokens(mut self, max: usize) -> Self {
        self.max_context_tokens = max;
        self
    }

    pub fn with_max_response_tokens(mut self, max: u32) -> Self {
        self.max_response_tokens = max;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn with_tools_enabled(mut self, enabled: bool) -> Self {
        self.enable_tools = enabled;
        self
    }

    pub fn with_parallel_tool_calls(mut self, parallel: bool) -> Self {
        self.parallel_tool_calls = parallel;
        self
    }

    pub fn with_max_tool_call_depth(mut self, depth: usize) -> Self {
        self.max_tool_call_depth = depth;
        self
    }

    pub fn with_auto_summarize(mut self, enabled: bool) -> Self {
        self.auto_summarize = enabled;
        self
    }

    pub fn with_summarize_threshold(mut self, threshold: f64) -> Self {
        self.summarize_threshold = threshold;
        self
    }
}
