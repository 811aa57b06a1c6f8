//! Tool Registry
//!
//! The [`ToolRegistry`] exposes a subset of the catalog to one session and
//! implements [`ToolExecutorPort`] over it. The subset is chosen once, at
//! construction, from an allow-list of function or utility names.
//!
//! # Usage
//!
//! ```ignore
//! use toolchat_infrastructure::tools::{ExecutorConfig, ProcessToolExecutor, ToolRegistry};
//!
//! let executor = ProcessToolExecutor::new(ExecutorConfig::default());
//! let registry = ToolRegistry::new(executor)
//!     .with_allow_list(["TodoExtractor", "compare_files"]);
//!
//! assert!(registry.has_tool("extract_todos"));
//! assert!(!registry.has_tool("bulk_rename_files"));
//! ```
//!
//! Calls to tools outside the allow-list are answered as unknown tools.

use super::executor::ProcessToolExecutor;
use super::schema;
use async_trait::async_trait;
use serde_json::Value;
use toolchat_application::ports::tool_executor::ToolExecutorPort;
use toolchat_domain::{ToolArguments, ToolDefinition, ToolExecutionResult};
use tracing::{debug, warn};

/// Allow-listed view of the tool catalog
pub struct ToolRegistry {
    executor: ProcessToolExecutor,
    enabled: Vec<ToolDefinition>,
}

impl ToolRegistry {
    /// Registry exposing every tool the executor knows.
    pub fn new(executor: ProcessToolExecutor) -> Self {
        let enabled = executor.tool_definitions().to_vec();
        Self { executor, enabled }
    }

    /// Restrict the exposed tools to those named in `names`.
    ///
    /// Names match either the function name or the utility name. An empty
    /// list keeps every tool.
    pub fn with_allow_list<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = names.into_iter().collect();
        if names.is_empty() {
            return self;
        }

        for name in &names {
            let name = name.as_ref();
            if !self.executor.tool_definitions().iter().any(|t| t.answers_to(name)) {
                warn!("Allow-list names unknown tool '{}'", name);
            }
        }

        self.enabled = self
            .executor
            .tool_definitions()
            .iter()
            .filter(|t| names.iter().any(|n| t.answers_to(n.as_ref())))
            .cloned()
            .collect();
        debug!("{} tools enabled", self.enabled.len());
        self
    }

    /// Definitions exposed to the model
    pub fn get_tools(&self) -> &[ToolDefinition] {
        &self.enabled
    }

    /// Function-calling schemas of the exposed tools
    pub fn get_tool_schemas(&self) -> Vec<Value> {
        schema::tools_to_schema(&self.enabled)
    }

    /// The underlying process executor
    pub fn get_executor(&self) -> &ProcessToolExecutor {
        &self.executor
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_definitions(&self) -> &[ToolDefinition] {
        &self.enabled
    }

    async fn execute(&self, function_name: &str, arguments: &ToolArguments) -> ToolExecutionResult {
        if !self.has_tool(function_name) {
            warn!(tool = %function_name, "Tool not enabled for this session");
            return ToolExecutionResult::unknown_tool(function_name);
        }
        self.executor.execute(function_name, arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::catalog::{BULK_RENAME_FILES, COMPARE_FILES, EXTRACT_TODOS};
    use crate::tools::executor::ExecutorConfig;
    use toolchat_domain::ToolStatus;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(ProcessToolExecutor::new(ExecutorConfig::default()))
    }

    #[test]
    fn test_default_exposes_all_tools() {
        let registry = registry();
        assert_eq!(registry.get_tools().len(), 12);
        assert_eq!(registry.get_tool_schemas().len(), 12);
    }

    #[test]
    fn test_allow_list_matches_function_or_utility_name() {
        let registry = registry().with_allow_list(["TodoExtractor", COMPARE_FILES, "Nope"]);
        let names: Vec<&str> = registry.get_tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec![COMPARE_FILES, EXTRACT_TODOS]);
    }

    #[test]
    fn test_empty_allow_list_keeps_everything() {
        let registry = registry().with_allow_list(Vec::<String>::new());
        assert_eq!(registry.get_tools().len(), 12);
    }

    #[tokio::test]
    async fn test_disabled_tool_is_unknown() {
        let registry = registry().with_allow_list([EXTRACT_TODOS]);
        let result = registry
            .execute(BULK_RENAME_FILES, &ToolArguments::new())
            .await;
        assert_eq!(result.status, ToolStatus::Error);
        assert_eq!(result.error_type.as_deref(), Some("UnknownFunctionError"));
    }

    #[tokio::test]
    async fn test_serialize_result_is_json() {
        let registry = registry();
        let result = registry
            .execute(BULK_RENAME_FILES, &ToolArguments::new())
            .await;
        let text = registry.serialize_result(&result);
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["status"], "manual_required");
        assert_eq!(value["metadata"]["tool_name"], BULK_RENAME_FILES);
    }
}
