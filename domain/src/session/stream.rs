//! Streaming events for chat completions.
//!
//! [`StreamEvent`] represents individual events in a streaming response.
//! Tool calls arrive in fragments: the first delta for an index carries the
//! `id` and `name`, later deltas carry pieces of the argument JSON that must
//! be concatenated. [`StreamAccumulator`] folds the events back into one
//! [`Completion`].

use super::entities::ToolCallRecord;
use super::response::{Completion, TokenUsage};
use std::collections::BTreeMap;

/// An event in a streaming completion.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A text chunk from the model.
    Delta(String),
    /// Incremental tool call data.
    ///
    /// `index` identifies which tool call this delta belongs to when
    /// the model makes multiple tool calls in a single response.
    ToolCallDelta {
        index: usize,
        id: Option<String>,
        name: Option<String>,
        arguments_delta: Option<String>,
    },
    /// Token usage, usually sent just before the end of the stream.
    Usage(TokenUsage),
    /// The stream ended normally.
    Completed,
    /// An error that occurred during streaming.
    Error(String),
}

impl StreamEvent {
    /// Returns the text content if this is a Delta event.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Delta(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed | StreamEvent::Error(_))
    }
}

#[derive(Debug, Default)]
struct PartialToolCall {
    id: String,
    name: String,
    arguments: String,
}

/// Reassembles streamed events into a [`Completion`].
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    text: String,
    calls: BTreeMap<usize, PartialToolCall>,
    usage: Option<TokenUsage>,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event in; returns the text to show immediately, if any.
    pub fn push(&mut self, event: &StreamEvent) -> Option<String> {
        match event {
            StreamEvent::Delta(chunk) => {
                self.text.push_str(chunk);
                Some(chunk.clone())
            }
            StreamEvent::ToolCallDelta {
                index,
                id,
                name,
                arguments_delta,
            } => {
                let call = self.calls.entry(*index).or_default();
                if let Some(id) = id {
                    call.id.clone_from(id);
                }
                if let Some(name) = name {
                    call.name.push_str(name);
                }
                if let Some(fragment) = arguments_delta {
                    call.arguments.push_str(fragment);
                }
                None
            }
            StreamEvent::Usage(usage) => {
                self.usage = Some(*usage);
                None
            }
            StreamEvent::Completed | StreamEvent::Error(_) => None,
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.calls.is_empty()
    }

    /// Finish accumulation. Calls are ordered by index; a call whose id never
    /// arrived gets a synthetic `call_<index>` id.
    pub fn finish(self) -> Completion {
        let tool_calls = self
            .calls
            .into_iter()
            .map(|(index, call)| {
                let id = if call.id.is_empty() {
                    format!("call_{}", index)
                } else {
                    call.id
                };
                ToolCallRecord::new(id, call.name, call.arguments)
            })
            .collect();
        Completion {
            text: self.text,
            tool_calls,
            usage: self.usage,
            model: None,
        }
    }
}
