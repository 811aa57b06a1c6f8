//! Tool domain module
//!
//! Defines how the assistant sees and calls external command-line tools,
//! and the uniform result every invocation produces.
//!
//! ```text
//! ┌────────────────┐    ┌───────────────┐    ┌─────────────────────┐
//! │ ToolDefinition │───▶│ ToolArguments │───▶│ ToolExecutionResult │
//! │ (schema)       │    │ (model input) │    │ (closed contract)   │
//! └────────────────┘    └───────────────┘    └─────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolDefinition`]: Schema for a single tool (name, params, side effects)
//! - [`ToolArguments`]: Parsed argument object from a tool call
//! - [`ToolExecutionResult`]: Status, bounded output, payload, timing, metadata
//! - [`ToolValidator`]: Pure domain trait for argument validation
//!
//! # Architecture
//!
//! - **Domain** (this module): Pure definitions, no I/O
//! - **Application** (`ToolExecutorPort`): Port trait for tool execution
//! - **Infrastructure** (`ProcessToolExecutor`): Builds argument vectors and
//!   runs the programs under a timeout

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ParamType, ToolArguments, ToolDefinition, ToolParameter};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{MAX_OUTPUT_CHARS, ToolExecutionResult, ToolResultMetadata, ToolStatus};
