//! Tool Executor port
//!
//! Defines the interface for executing cataloged tools. An executor never
//! fails with an `Err`: unknown tools, bad arguments, crashes and timeouts
//! are all reported through the returned [`ToolExecutionResult`].

use async_trait::async_trait;
use toolchat_domain::{ToolArguments, ToolDefinition, ToolExecutionResult};

/// Port for tool execution
///
/// This port defines how the application layer executes tools.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Definitions of the tools exposed to the model
    fn tool_definitions(&self) -> &[ToolDefinition];

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_definitions().iter().any(|t| t.name == name)
    }

    /// Get the definition of a specific tool
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_definitions().iter().find(|t| t.name == name)
    }

    /// Execute one tool call. Exactly one attempt, no retries.
    async fn execute(&self, function_name: &str, arguments: &ToolArguments) -> ToolExecutionResult;

    /// Render a result as the content of a `tool` message.
    ///
    /// Default implementation serializes the whole result as JSON.
    fn serialize_result(&self, result: &ToolExecutionResult) -> String {
        serde_json::to_string(result).unwrap_or_else(|e| {
            serde_json::json!({
                "status": result.status.as_str(),
                "error": format!("Failed to serialize tool result: {}", e),
            })
            .to_string()
        })
    }
}
