//! Tool implementations
//!
//! Every tool is an external Python utility run as a child process.
//!
//! ## Layout
//!
//! - `catalog`: the twelve tool recipes (definition plus argv builder)
//! - `executor`: runs a recipe under a timeout and normalizes its output
//! - `registry`: allow-listed view of the catalog handed to a chat session
//! - `schema`: OpenAI function-calling schema export

pub mod catalog;
pub mod executor;
pub mod registry;
pub mod schema;

pub use catalog::{Invocation, ToolError, ToolRecipe, default_catalog};
pub use executor::{DEFAULT_TIMEOUT_SECS, ExecutorConfig, ProcessToolExecutor};
pub use registry::ToolRegistry;
pub use schema::{tool_to_schema, tools_to_schema};
