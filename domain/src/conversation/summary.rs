//! Summarization planning and the structural fallback summary.

use crate::core::string::excerpt;
use crate::session::entities::{Message, Role};
use std::fmt;

/// Fewer non-system messages than this cannot be summarized
pub const MIN_MESSAGES_TO_SUMMARIZE: usize = 5;
/// Minimum number of recent non-system messages kept verbatim
pub const MIN_RECENT_MESSAGES: usize = 3;
/// Share of non-system messages kept verbatim, in percent (rounded up)
pub const RECENT_SHARE_PERCENT: usize = 30;
/// Characters of the first/last message quoted by the structural summary
const EXCERPT_CHARS: usize = 50;

/// Why a summarization did not happen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarySkip {
    /// Not enough non-system history to be worth condensing
    TooShort { non_system: usize },
    /// The only possible split would separate tool results from their request
    WouldOrphanToolResults,
    /// The history changed between planning and applying
    Changed,
}

impl fmt::Display for SummarySkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummarySkip::TooShort { non_system } => write!(
                f,
                "Conversation too short to summarize ({} messages, need {})",
                non_system, MIN_MESSAGES_TO_SUMMARIZE
            ),
            SummarySkip::WouldOrphanToolResults => {
                write!(f, "Cannot summarize without separating tool results from their call")
            }
            SummarySkip::Changed => write!(f, "Conversation changed while summarizing"),
        }
    }
}

/// How many of `non_system` messages stay verbatim: ⌈30%⌉, at least 3
pub fn recent_keep_count(non_system: usize) -> usize {
    (non_system * RECENT_SHARE_PERCENT)
        .div_ceil(100)
        .max(MIN_RECENT_MESSAGES)
}

/// A computed split of the history, ready to be condensed.
///
/// `old` holds every message that will be replaced by the summary,
/// including earlier summaries.
#[derive(Debug, Clone)]
pub struct SummaryPlan {
    pub old: Vec<Message>,
    pub(crate) recent_start: usize,
    pub(crate) recent_len: usize,
    pub(crate) total_len: usize,
}

impl SummaryPlan {
    /// Number of recent messages that survive verbatim
    pub fn recent_len(&self) -> usize {
        self.recent_len
    }
}

/// Outcome of an applied summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    pub messages_before: usize,
    pub messages_after: usize,
    pub summarized: usize,
    pub kept_recent: usize,
    pub tokens_before: usize,
    pub tokens_after: usize,
}

impl SummaryReport {
    pub fn messages_saved(&self) -> usize {
        self.messages_before.saturating_sub(self.messages_after)
    }
}

/// Summary built without the model: counts by role plus first/last excerpts.
pub fn structural_summary(old: &[Message]) -> String {
    let count = |role: Role| old.iter().filter(|m| m.role == role).count();

    let mut lines = vec![
        format!("Summarized {} messages:", old.len()),
        format!("  - User messages: {}", count(Role::User)),
        format!("  - Assistant messages: {}", count(Role::Assistant)),
    ];
    let tool_results = count(Role::Tool);
    if tool_results > 0 {
        lines.push(format!("  - Tool results: {}", tool_results));
    }

    let with_text: Vec<&Message> = old
        .iter()
        .filter(|m| !m.content_str().is_empty())
        .collect();
    if let (Some(first), Some(last)) = (with_text.first(), with_text.last()) {
        lines.push(format!(
            "\nFirst: {}",
            excerpt(first.content_str(), EXCERPT_CHARS)
        ));
        lines.push(format!("Last: {}", excerpt(last.content_str(), EXCERPT_CHARS)));
    }

    lines.join("\n")
}
