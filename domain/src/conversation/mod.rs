//! Conversation domain: token-budgeted history with trimming and
//! summarization.
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`Conversation::append`] | Adds a message at the end |
//! | [`Conversation::trim`] | Drops oldest non-system messages down to a token target |
//! | [`Conversation::plan_summary`] / [`Conversation::apply_summary`] | Replaces old history with one summary message |
//! | [`Conversation::set_persona`] | Replaces the system persona wholesale |
//! | [`Conversation::clear`] | Drops history, optionally keeping the persona |

pub mod entities;
pub mod export;
pub mod snapshot;
pub mod summary;
pub mod token;

pub use entities::{
    ContextUsage, Conversation, ConversationStats, DEFAULT_MAX_CONTEXT_TOKENS,
    INTERRUPTED_TOOL_CALL, TrimReport,
};
pub use export::{ExportFormat, render_text};
pub use snapshot::ConversationSnapshot;
pub use summary::{SummaryPlan, SummaryReport, SummarySkip, structural_summary};
pub use token::{CharRatioEstimator, MESSAGE_OVERHEAD_TOKENS, TokenEstimator};
