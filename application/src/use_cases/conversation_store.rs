//! Conversation store use case.
//!
//! Wraps the [`Conversation`] entity with persistence and model-backed
//! summarization. Every mutation writes a [`ConversationSnapshot`] through
//! the [`ConversationRepository`] port; a failed write is logged and the
//! in-memory history stays authoritative.

use crate::ports::conversation_repository::{ConversationRepository, NoPersistence};
use crate::ports::summarizer::ConversationSummarizer;
use std::sync::Arc;
use toolchat_domain::{
    ContextUsage, Conversation, ConversationSnapshot, ConversationStats, Message, Model,
    SummaryReport, SummarySkip, TrimReport, structural_summary,
};
use tracing::{debug, info, warn};

/// Usage ratio a summarization aims to bring the history down to
pub const DEFAULT_SUMMARIZE_TARGET: f64 = 0.6;
/// Lower bound on the token budget handed to a summarizer
const MIN_SUMMARY_TOKENS: usize = 256;

/// Persisted, token-budgeted conversation history.
pub struct ConversationStore {
    conversation: Conversation,
    repository: Arc<dyn ConversationRepository>,
    model: Model,
    summarize_target: f64,
}

impl ConversationStore {
    /// Create a store around `conversation` without loading anything.
    pub fn new(conversation: Conversation, repository: Arc<dyn ConversationRepository>) -> Self {
        Self {
            conversation,
            repository,
            model: Model::default(),
            summarize_target: DEFAULT_SUMMARIZE_TARGET,
        }
    }

    /// In-memory store that never persists.
    pub fn in_memory(conversation: Conversation) -> Self {
        Self::new(conversation, Arc::new(NoPersistence))
    }

    /// Create a store and restore persisted history.
    ///
    /// History is only restored when `conversation` holds no user-visible
    /// messages yet. A persona already present in `conversation` replaces
    /// the restored one.
    pub fn open(conversation: Conversation, repository: Arc<dyn ConversationRepository>) -> Self {
        let mut store = Self::new(conversation, repository);
        if store.conversation.non_system_count() > 0 {
            return store;
        }

        match store.repository.load() {
            Ok(Some(snapshot)) if !snapshot.messages.is_empty() => {
                let persona = store.conversation.persona();
                let restored = snapshot.messages.len();
                store.conversation = store.conversation.clone().with_messages(snapshot.messages);
                if let Some(persona) = persona {
                    store.conversation.set_persona(persona);
                }
                info!("Restored {} messages from conversation history", restored);
                store.repair_tool_calls();
            }
            Ok(_) => debug!("No conversation history to restore"),
            Err(e) => warn!("Failed to load conversation history: {}", e),
        }
        store
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Usage ratio that [`auto_summarize_if_needed`](Self::auto_summarize_if_needed) aims for
    pub fn with_summarize_target(mut self, ratio: f64) -> Self {
        self.summarize_target = ratio;
        self
    }

    // ==================== Queries ====================

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn token_count(&self) -> usize {
        self.conversation.token_count()
    }

    pub fn context_usage(&self) -> ContextUsage {
        self.conversation.context_usage()
    }

    pub fn stats(&self) -> ConversationStats {
        self.conversation.stats()
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot::new(self.model.as_str(), self.conversation.messages().to_vec())
    }

    // ==================== Mutations ====================

    pub fn append(&mut self, message: Message) {
        self.conversation.append(message);
        self.persist();
    }

    /// Drop oldest history down to `target` tokens (default: 80% of the window).
    pub fn trim(&mut self, target: Option<usize>) -> TrimReport {
        let report = self.conversation.trim(target);
        if report.removed > 0 {
            info!(
                "Trimmed {} messages ({} -> {} tokens, target {})",
                report.removed, report.tokens_before, report.tokens_after, report.target
            );
            self.persist();
        }
        report
    }

    /// Trim only when the history no longer fits the context window.
    pub fn trim_if_over_budget(&mut self) -> Option<TrimReport> {
        if self.conversation.token_count() > self.conversation.max_tokens() {
            Some(self.trim(None))
        } else {
            None
        }
    }

    /// Replace older history with a single summary message.
    ///
    /// The summarizer gets a budget of `target_ratio` of the window minus
    /// what the kept messages already cost. Without a summarizer, or when
    /// it fails, a structural summary is used instead.
    pub async fn summarize(
        &mut self,
        target_ratio: f64,
        summarizer: Option<&dyn ConversationSummarizer>,
    ) -> Result<SummaryReport, SummarySkip> {
        let plan = self.conversation.plan_summary()?;

        let kept_tokens = self
            .conversation
            .token_count()
            .saturating_sub(self.conversation.token_count_of(&plan.old));
        let target_tokens = (self.conversation.max_tokens() as f64 * target_ratio) as usize;
        let budget = target_tokens
            .saturating_sub(kept_tokens)
            .max(MIN_SUMMARY_TOKENS);

        let text = match summarizer {
            Some(summarizer) => match summarizer.summarize(&plan.old, budget).await {
                Ok(text) if !text.trim().is_empty() => text,
                Ok(_) => {
                    warn!("Summarizer returned empty text, using structural summary");
                    structural_summary(&plan.old)
                }
                Err(e) => {
                    warn!("Summarization failed, using structural summary: {}", e);
                    structural_summary(&plan.old)
                }
            },
            None => structural_summary(&plan.old),
        };

        let report = self.conversation.apply_summary(&plan, &text)?;
        info!(
            "Summarized {} messages, kept {} ({} -> {} tokens)",
            report.summarized, report.kept_recent, report.tokens_before, report.tokens_after
        );
        self.persist();
        Ok(report)
    }

    /// Summarize when usage has reached `threshold` of the window.
    ///
    /// Returns true when a summary was applied.
    pub async fn auto_summarize_if_needed(
        &mut self,
        threshold: f64,
        summarizer: Option<&dyn ConversationSummarizer>,
    ) -> bool {
        let usage = self.conversation.context_usage();
        if usage.ratio() < threshold {
            return false;
        }
        info!(
            "Context usage at {:.1}%, summarizing conversation",
            usage.percent
        );
        match self.summarize(self.summarize_target, summarizer).await {
            Ok(_) => true,
            Err(skip) => {
                debug!("Auto-summarize skipped: {}", skip);
                false
            }
        }
    }

    pub fn clear(&mut self, keep_system: bool) {
        self.conversation.clear(keep_system);
        self.persist();
    }

    pub fn set_persona(&mut self, text: impl Into<String>) {
        self.conversation.set_persona(text);
        self.persist();
    }

    pub fn set_model(&mut self, model: Model) {
        self.model = model;
        self.persist();
    }

    /// Give every unanswered tool call an error result.
    ///
    /// Providers reject a history holding tool calls without replies,
    /// which is what an interrupted turn leaves behind.
    pub fn repair_tool_calls(&mut self) -> usize {
        let added = self.conversation.answer_pending_tool_calls();
        if added > 0 {
            warn!("Answered {} interrupted tool calls with an error result", added);
            self.persist();
        }
        added
    }

    fn persist(&self) {
        if let Err(e) = self.repository.save(&self.snapshot()) {
            warn!("Failed to save conversation history: {}", e);
        }
    }
}
