//! Domain layer for toolchat
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tool invocation contract
//!
//! Every external tool call ends in a [`ToolExecutionResult`] whose
//! [`ToolStatus`] is one of Success, Error, Timeout or ManualRequired.
//!
//! ## Conversation
//!
//! A [`Conversation`] is the ordered message history of one session. It
//! estimates its own token cost and can be trimmed or summarized to stay
//! inside the model's context window.
//!
//! ## Telemetry
//!
//! [`ToolTelemetry`] folds results into per-tool [`ToolMetrics`] and a
//! derived [`HealthStatus`].

pub mod conversation;
pub mod core;
pub mod session;
pub mod telemetry;
pub mod tool;
pub mod usage;

// Re-export commonly used types
pub use conversation::{
    CharRatioEstimator, ContextUsage, Conversation, ConversationSnapshot, ConversationStats,
    ExportFormat, INTERRUPTED_TOOL_CALL, SummaryPlan, SummaryReport, SummarySkip, TokenEstimator,
    TrimReport,
    render_text, structural_summary,
};
pub use core::{error::DomainError, model::Model};
pub use session::{
    Completion, FunctionCall, Message, Role, StreamAccumulator, StreamEvent, TokenUsage,
    ToolCallRecord,
};
pub use telemetry::{ErrorRecord, HealthStatus, HealthSummary, ToolMetrics, ToolTelemetry};
pub use tool::{
    DefaultToolValidator, MAX_OUTPUT_CHARS, ParamType, ToolArguments, ToolDefinition,
    ToolExecutionResult, ToolParameter, ToolResultMetadata, ToolStatus, ToolValidator,
};
pub use usage::{ModelPricing, UsageStats, calculate_cost, pricing_for};
