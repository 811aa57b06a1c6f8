//! Conversation entity: ordered message history under a token budget.
//!
//! The history has two kinds of system messages:
//!
//! - **persona** messages, the instructions governing the assistant. They
//!   are never trimmed or summarized away and are replaced only wholesale
//!   through [`Conversation::set_persona`].
//! - **summary** messages (content starts with `[Summary] `), produced by
//!   summarization. At most one survives each summarization.
//!
//! Everything here is pure; persistence is layered on top by the
//! application's conversation store.

use super::summary::{
    MIN_MESSAGES_TO_SUMMARIZE, SummaryPlan, SummaryReport, SummarySkip, recent_keep_count,
};
use super::token::{CharRatioEstimator, MESSAGE_OVERHEAD_TOKENS, TokenEstimator};
use crate::session::entities::{Message, Role};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Default context window, in tokens
pub const DEFAULT_MAX_CONTEXT_TOKENS: usize = 128_000;
/// Default trim target as a share of the context window, in percent
pub const DEFAULT_TRIM_PERCENT: usize = 80;
/// Error recorded for a tool call whose turn was interrupted
pub const INTERRUPTED_TOOL_CALL: &str = "Tool call was interrupted before it produced a result";

/// Snapshot of how much of the context window is in use
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContextUsage {
    pub used: usize,
    pub max: usize,
    pub remaining: usize,
    /// Percentage of `max` in use (may exceed 100)
    pub percent: f64,
}

impl ContextUsage {
    pub fn ratio(&self) -> f64 {
        self.percent / 100.0
    }
}

/// Outcome of a trim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimReport {
    pub removed: usize,
    pub tokens_before: usize,
    pub tokens_after: usize,
    pub target: usize,
}

/// Message counts and time span of a conversation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationStats {
    pub total_messages: usize,
    pub system_messages: usize,
    pub user_messages: usize,
    pub assistant_messages: usize,
    pub tool_messages: usize,
    pub usage: ContextUsage,
    pub first_message_at: Option<DateTime<Utc>>,
    pub last_message_at: Option<DateTime<Utc>>,
}

/// Ordered, role-tagged message history (Entity)
#[derive(Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    max_tokens: usize,
    estimator: Arc<dyn TokenEstimator>,
}

impl fmt::Debug for Conversation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversation")
            .field("messages", &self.messages.len())
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTEXT_TOKENS)
    }
}

impl Conversation {
    pub fn new(max_tokens: usize) -> Self {
        Self {
            messages: Vec::new(),
            max_tokens,
            estimator: Arc::new(CharRatioEstimator::default()),
        }
    }

    pub fn with_estimator(mut self, estimator: Arc<dyn TokenEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn set_max_tokens(&mut self, max_tokens: usize) {
        self.max_tokens = max_tokens;
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn non_system_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.is_system()).count()
    }

    /// Text of the persona messages, joined by blank lines
    pub fn persona(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .messages
            .iter()
            .filter(|m| m.is_persona())
            .map(Message::content_str)
            .collect();
        (!parts.is_empty()).then(|| parts.join("\n\n"))
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Replace the persona wholesale; the new one goes first.
    pub fn set_persona(&mut self, text: impl Into<String>) {
        self.messages.retain(|m| !m.is_persona());
        self.messages.insert(0, Message::system(text));
    }

    /// Drop history. With `keep_system`, persona messages survive; summaries
    /// describe dropped history and go with it.
    pub fn clear(&mut self, keep_system: bool) {
        if keep_system {
            self.messages.retain(Message::is_persona);
        } else {
            self.messages.clear();
        }
    }

    /// Estimated tokens of a single message
    pub fn message_tokens(&self, message: &Message) -> usize {
        let content = message
            .content
            .as_deref()
            .map_or(0, |c| self.estimator.estimate(c));
        let calls = message
            .tool_calls
            .iter()
            .flatten()
            .filter_map(|call| serde_json::to_string(call).ok())
            .map(|json| self.estimator.estimate(&json))
            .sum::<usize>();
        content + calls + MESSAGE_OVERHEAD_TOKENS
    }

    /// Estimated tokens of `messages`
    pub fn token_count_of(&self, messages: &[Message]) -> usize {
        messages.iter().map(|m| self.message_tokens(m)).sum()
    }

    /// Estimated tokens of the whole history
    pub fn token_count(&self) -> usize {
        self.token_count_of(&self.messages)
    }

    pub fn context_usage(&self) -> ContextUsage {
        let used = self.token_count();
        let percent = if self.max_tokens == 0 {
            100.0
        } else {
            used as f64 / self.max_tokens as f64 * 100.0
        };
        ContextUsage {
            used,
            max: self.max_tokens,
            remaining: self.max_tokens.saturating_sub(used),
            percent: (percent * 100.0).round() / 100.0,
        }
    }

    /// Default trim target: 80% of the context window
    pub fn default_trim_target(&self) -> usize {
        self.max_tokens * DEFAULT_TRIM_PERCENT / 100
    }

    /// Remove the oldest non-system messages until the estimate fits `target`.
    ///
    /// System messages are never removed and at least one non-system
    /// message always remains. Tool results left at the front of the
    /// non-system history lose their requesting assistant message, so they
    /// are removed along with it.
    pub fn trim(&mut self, target: Option<usize>) -> TrimReport {
        let target = target.unwrap_or_else(|| self.default_trim_target());
        let tokens_before = self.token_count();
        let mut tokens = tokens_before;
        let mut non_system = self.non_system_count();
        let mut removed = 0;

        while non_system > 1 {
            let Some(oldest) = self.messages.iter().position(|m| !m.is_system()) else {
                break;
            };
            let orphan = self.messages[oldest].role == Role::Tool;
            if tokens <= target && !orphan {
                break;
            }
            let message = self.messages.remove(oldest);
            tokens -= self.message_tokens(&message);
            non_system -= 1;
            removed += 1;
        }

        TrimReport {
            removed,
            tokens_before,
            tokens_after: tokens,
            target,
        }
    }

    /// Split the history for summarization.
    ///
    /// Keeps the most recent ⌈30%⌉ (at least 3) non-system messages; the
    /// rest, together with earlier summaries, becomes the part to condense.
    /// The recent part is extended backwards so it never starts with a tool
    /// result whose request would be summarized away.
    pub fn plan_summary(&self) -> Result<SummaryPlan, SummarySkip> {
        let non_system = self.non_system_count();
        if non_system < MIN_MESSAGES_TO_SUMMARIZE {
            return Err(SummarySkip::TooShort { non_system });
        }

        let body: Vec<&Message> = self.messages.iter().filter(|m| !m.is_persona()).collect();
        let mut recent_start = body.len() - recent_keep_count(non_system).min(body.len());
        while recent_start > 2 && body[recent_start].role == Role::Tool {
            recent_start -= 1;
        }
        if body[recent_start].role == Role::Tool {
            return Err(SummarySkip::WouldOrphanToolResults);
        }

        Ok(SummaryPlan {
            old: body[..recent_start].iter().map(|m| (*m).clone()).collect(),
            recent_start,
            recent_len: body.len() - recent_start,
            total_len: self.messages.len(),
        })
    }

    /// Replace the planned old part with one summary message.
    ///
    /// Result order: persona messages, the summary, the recent messages.
    pub fn apply_summary(
        &mut self,
        plan: &SummaryPlan,
        summary_text: &str,
    ) -> Result<SummaryReport, SummarySkip> {
        if self.messages.len() != plan.total_len {
            return Err(SummarySkip::Changed);
        }
        let messages_before = self.messages.len();
        let tokens_before = self.token_count();

        let (persona, body): (Vec<Message>, Vec<Message>) = std::mem::take(&mut self.messages)
            .into_iter()
            .partition(Message::is_persona);

        let mut rebuilt = persona;
        rebuilt.push(Message::summary(summary_text));
        rebuilt.extend(body.into_iter().skip(plan.recent_start));
        self.messages = rebuilt;

        Ok(SummaryReport {
            messages_before,
            messages_after: self.messages.len(),
            summarized: plan.old.len(),
            kept_recent: plan.recent_len,
            tokens_before,
            tokens_after: self.token_count(),
        })
    }

    pub fn stats(&self) -> ConversationStats {
        let count = |role: Role| self.messages.iter().filter(|m| m.role == role).count();
        ConversationStats {
            total_messages: self.messages.len(),
            system_messages: count(Role::System),
            user_messages: count(Role::User),
            assistant_messages: count(Role::Assistant),
            tool_messages: count(Role::Tool),
            usage: self.context_usage(),
            first_message_at: self.messages.first().map(|m| m.timestamp),
            last_message_at: self.messages.last().map(|m| m.timestamp),
        }
    }

    /// Answer tool calls that never got a result.
    ///
    /// An interrupted turn can leave an assistant `tool_calls` message
    /// without its `tool` replies. Each missing reply is filled with an
    /// error result placed after the replies that do exist. Returns how
    /// many were added.
    pub fn answer_pending_tool_calls(&mut self) -> usize {
        let mut added = 0;
        let mut i = 0;
        while i < self.messages.len() {
            if !self.messages[i].has_tool_calls() {
                i += 1;
                continue;
            }
            let mut end = i + 1;
            while end < self.messages.len() && self.messages[end].role == Role::Tool {
                end += 1;
            }
            let answered: Vec<&str> = self.messages[i + 1..end]
                .iter()
                .filter_map(|m| m.tool_call_id.as_deref())
                .collect();
            let missing: Vec<Message> = self.messages[i]
                .tool_calls
                .iter()
                .flatten()
                .filter(|call| !answered.contains(&call.id.as_str()))
                .map(|call| {
                    Message::tool_result(
                        call.id.clone(),
                        call.function_name(),
                        serde_json::json!({ "error": INTERRUPTED_TOOL_CALL }).to_string(),
                    )
                })
                .collect();
            let count = missing.len();
            self.messages.splice(end..end, missing);
            added += count;
            i = end + count;
        }
        added
    }
}
