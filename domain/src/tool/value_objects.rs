//! Tool domain value objects: the invocation result contract
//!
//! Every tool invocation, whether it spawned a process or not, produces one
//! [`ToolExecutionResult`]. Its [`ToolStatus`] is a closed taxonomy:
//!
//! | Status | Produced when | Process spawned? |
//! |--------|---------------|:---:|
//! | `Success` | exit code 0 | yes |
//! | `Error` | non-zero exit, unknown tool, bad arguments, spawn failure | maybe |
//! | `Timeout` | process exceeded the ceiling timeout | yes |
//! | `ManualRequired` | side-effecting action refused for unattended execution | no |
//!
//! `stdout` and `stderr` are each bounded to [`MAX_OUTPUT_CHARS`] characters
//! by the builders, so no caller can store an unbounded capture.

use super::entities::ToolDefinition;
use crate::core::string::truncate_output;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;

/// Maximum characters kept for each of stdout and stderr
pub const MAX_OUTPUT_CHARS: usize = 8192;

/// Outcome class of a tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Success,
    Error,
    Timeout,
    ManualRequired,
}

impl ToolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolStatus::Success => "success",
            ToolStatus::Error => "error",
            ToolStatus::Timeout => "timeout",
            ToolStatus::ManualRequired => "manual_required",
        }
    }

    /// Error and Timeout count as failures; ManualRequired is a deliberate refusal
    pub fn is_failure(&self) -> bool {
        matches!(self, ToolStatus::Error | ToolStatus::Timeout)
    }
}

impl std::fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifying metadata attached to every result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    pub tool_name: String,
    pub tool_version: String,
    pub has_side_effects: bool,
    /// Exit code of the spawned process; `None` when nothing ran to completion
    #[serde(default)]
    pub exit_code: Option<i32>,
    /// Command line that was run, space-joined
    #[serde(default)]
    pub command: Option<String>,
}

impl ToolResultMetadata {
    /// Metadata for a name that may not correspond to any known tool
    pub fn for_tool(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_version: "1.0".to_string(),
            has_side_effects: false,
            exit_code: None,
            command: None,
        }
    }

    pub fn from_definition(definition: &ToolDefinition) -> Self {
        Self {
            tool_name: definition.name.clone(),
            tool_version: definition.version.clone(),
            has_side_effects: definition.has_side_effects,
            exit_code: None,
            command: None,
        }
    }

    pub fn with_command<I, S>(mut self, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts: Vec<String> = argv.into_iter().map(|s| s.as_ref().to_string()).collect();
        self.command = Some(parts.join(" "));
        self
    }
}

/// Normalized result of one tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolExecutionResult {
    pub status: ToolStatus,
    pub stdout: String,
    pub stderr: String,
    /// Parsed JSON document when stdout held exactly one object or array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_payload: Option<Value>,
    /// Wall-clock seconds
    pub duration: f64,
    pub metadata: ToolResultMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ToolExecutionResult {
    fn new(status: ToolStatus, metadata: ToolResultMetadata) -> Self {
        Self {
            status,
            stdout: String::new(),
            stderr: String::new(),
            structured_payload: None,
            duration: 0.0,
            metadata,
            error_message: None,
            error_type: None,
            timestamp: Utc::now(),
        }
    }

    /// Classify a finished process.
    ///
    /// Exit code 0 is `Success` with a best-effort JSON payload. Any other
    /// code is `Error`; a process with no exit code (killed by a signal) is
    /// also `Error`. An empty stderr on failure is replaced by an explanation.
    pub fn from_exit(
        mut metadata: ToolResultMetadata,
        exit_code: Option<i32>,
        stdout: &str,
        stderr: &str,
    ) -> Self {
        metadata.exit_code = exit_code;
        match exit_code {
            Some(0) => Self::new(ToolStatus::Success, metadata)
                .with_payload(parse_structured_payload(stdout))
                .with_stdout(stdout)
                .with_stderr(stderr),
            _ => {
                let fallback = match exit_code {
                    Some(code) => format!("Command failed with exit code {}", code),
                    None => "Command terminated by signal".to_string(),
                };
                let message = match stderr.trim() {
                    "" => fallback.clone(),
                    trimmed => trimmed.to_string(),
                };
                let stderr = if stderr.trim().is_empty() {
                    fallback.as_str()
                } else {
                    stderr
                };
                Self::new(ToolStatus::Error, metadata)
                    .with_stdout(stdout)
                    .with_stderr(stderr)
                    .with_error(message, "SubprocessError")
            }
        }
    }

    /// `Error` result produced without running anything
    pub fn failed(
        metadata: ToolResultMetadata,
        message: impl Into<String>,
        error_type: impl Into<String>,
    ) -> Self {
        let message = message.into();
        Self::new(ToolStatus::Error, metadata)
            .with_stderr(&message)
            .with_error(message, error_type)
    }

    /// Result for a function name absent from the catalog
    pub fn unknown_tool(tool_name: &str) -> Self {
        Self::failed(
            ToolResultMetadata::for_tool(tool_name),
            format!("Unknown function: {}", tool_name),
            "UnknownFunctionError",
        )
    }

    /// Result for arguments that do not satisfy the tool's schema
    pub fn invalid_arguments(metadata: ToolResultMetadata, reason: impl Into<String>) -> Self {
        Self::failed(
            metadata,
            format!("Invalid arguments: {}", reason.into()),
            "InvalidArguments",
        )
    }

    pub fn timed_out(mut metadata: ToolResultMetadata, timeout: Duration) -> Self {
        metadata.exit_code = None;
        let message = format!("Command timed out after {} seconds", timeout.as_secs());
        Self::new(ToolStatus::Timeout, metadata)
            .with_stderr(&message)
            .with_error(message, "TimeoutError")
            .with_duration(timeout)
    }

    /// Deliberate refusal to run a side-effecting action unattended.
    ///
    /// The instruction lands in both `stdout` and the payload's `message`;
    /// `details` (the intended action) are merged into the payload.
    pub fn manual_required(
        mut metadata: ToolResultMetadata,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        let message = message.into();
        metadata.exit_code = None;
        metadata.has_side_effects = true;
        let mut payload = json!({ "message": message });
        if let (Some(target), Value::Object(extra)) = (payload.as_object_mut(), details) {
            for (key, value) in extra {
                target.entry(key).or_insert(value);
            }
        }
        Self::new(ToolStatus::ManualRequired, metadata)
            .with_stdout(&message)
            .with_payload(Some(payload))
    }

    pub fn with_stdout(mut self, stdout: &str) -> Self {
        self.stdout = truncate_output(stdout, MAX_OUTPUT_CHARS);
        self
    }

    pub fn with_stderr(mut self, stderr: &str) -> Self {
        self.stderr = truncate_output(stderr, MAX_OUTPUT_CHARS);
        self
    }

    pub fn with_payload(mut self, payload: Option<Value>) -> Self {
        self.structured_payload = payload;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration.as_secs_f64();
        self
    }

    pub fn with_command<I, S>(mut self, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.metadata = self.metadata.with_command(argv);
        self
    }

    fn with_error(mut self, message: impl Into<String>, error_type: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self.error_type = Some(error_type.into());
        self
    }

    pub fn tool_name(&self) -> &str {
        &self.metadata.tool_name
    }

    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }

    pub fn requires_manual_action(&self) -> bool {
        self.status == ToolStatus::ManualRequired
    }

    /// stdout, falling back to stderr
    pub fn primary_output(&self) -> &str {
        if self.stdout.is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }

    /// Best description of what went wrong, for telemetry and display
    pub fn failure_message(&self) -> &str {
        self.error_message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or_else(|| Some(self.stderr.as_str()).filter(|s| !s.is_empty()))
            .unwrap_or("Unknown error")
    }

    /// One-line summary like `analyze_python_code: SUCCESS (0.523s)`
    pub fn summary_line(&self) -> String {
        format!(
            "{}: {} ({:.3}s)",
            self.metadata.tool_name,
            self.status.as_str().to_uppercase(),
            self.duration
        )
    }

    /// `{success, result | error}` view for callers that predate the status taxonomy
    pub fn to_legacy(&self) -> Value {
        match self.status {
            ToolStatus::Success => json!({
                "success": true,
                "result": self.structured_payload.clone()
                    .unwrap_or_else(|| Value::String(self.primary_output().to_string())),
            }),
            ToolStatus::ManualRequired => {
                let message = self
                    .structured_payload
                    .as_ref()
                    .and_then(|p| p.get("message"))
                    .and_then(Value::as_str)
                    .unwrap_or("Manual intervention required");
                json!({
                    "success": false,
                    "error": message,
                    "status": self.status.as_str(),
                    "requires_manual_action": true,
                })
            }
            ToolStatus::Error | ToolStatus::Timeout => json!({
                "success": false,
                "error": self.failure_message(),
                "status": self.status.as_str(),
            }),
        }
    }
}

/// Parse stdout as one JSON object or array; anything else yields `None`.
pub fn parse_structured_payload(stdout: &str) -> Option<Value> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::string::TRUNCATION_MARKER;

    fn meta() -> ToolResultMetadata {
        ToolResultMetadata::for_tool("extract_todos")
    }

    #[test]
    fn test_exit_zero_is_success_with_payload() {
        let result = ToolExecutionResult::from_exit(meta(), Some(0), r#"{"todos": 3}"#, "");
        assert_eq!(result.status, ToolStatus::Success);
        assert_eq!(result.structured_payload, Some(json!({"todos": 3})));
        assert_eq!(result.metadata.exit_code, Some(0));
        assert!(result.error_message.is_none());
    }

    #[test]
    fn test_exit_zero_plain_text_has_no_payload() {
        let result = ToolExecutionResult::from_exit(meta(), Some(0), "3 TODOs found", "");
        assert_eq!(result.status, ToolStatus::Success);
        assert!(result.structured_payload.is_none());
        assert_eq!(result.stdout, "3 TODOs found");
    }

    #[test]
    fn test_scalar_json_is_not_a_payload() {
        assert!(parse_structured_payload("42").is_none());
        assert!(parse_structured_payload("\"text\"").is_none());
        assert_eq!(parse_structured_payload(" [1] \n"), Some(json!([1])));
    }

    #[test]
    fn test_nonzero_exit_defaults_stderr() {
        let result = ToolExecutionResult::from_exit(meta(), Some(2), "", "");
        assert_eq!(result.status, ToolStatus::Error);
        assert_eq!(result.stderr, "Command failed with exit code 2");
        assert_eq!(result.failure_message(), "Command failed with exit code 2");
        assert_eq!(result.metadata.exit_code, Some(2));
    }

    #[test]
    fn test_nonzero_exit_keeps_stderr() {
        let result = ToolExecutionResult::from_exit(meta(), Some(1), "", "boom\n");
        assert_eq!(result.stderr, "boom\n");
        assert_eq!(result.error_message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_classification_is_stable() {
        for _ in 0..3 {
            assert_eq!(
                ToolExecutionResult::from_exit(meta(), Some(0), "", "").status,
                ToolStatus::Success
            );
            assert_eq!(
                ToolExecutionResult::from_exit(meta(), Some(127), "", "").status,
                ToolStatus::Error
            );
            assert_eq!(
                ToolExecutionResult::from_exit(meta(), None, "", "").status,
                ToolStatus::Error
            );
        }
    }

    #[test]
    fn test_outputs_are_bounded() {
        let long = "x".repeat(MAX_OUTPUT_CHARS * 3);
        let result = ToolExecutionResult::from_exit(meta(), Some(1), &long, &long);
        assert_eq!(result.stdout.chars().count(), MAX_OUTPUT_CHARS);
        assert_eq!(result.stderr.chars().count(), MAX_OUTPUT_CHARS);
        assert!(result.stdout.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_unknown_tool() {
        let result = ToolExecutionResult::unknown_tool("nonexistent_function");
        assert_eq!(result.status, ToolStatus::Error);
        assert_eq!(result.tool_name(), "nonexistent_function");
        assert_eq!(result.duration, 0.0);
        assert_eq!(result.metadata.exit_code, None);
        assert_eq!(result.failure_message(), "Unknown function: nonexistent_function");
    }

    #[test]
    fn test_manual_required_shape() {
        let result = ToolExecutionResult::manual_required(
            ToolResultMetadata::for_tool("bulk_rename_files"),
            "Use the CLI directly.",
            json!({"path": "/tmp", "dry_run": true}),
        );
        assert_eq!(result.status, ToolStatus::ManualRequired);
        assert_eq!(result.metadata.exit_code, None);
        assert!(result.metadata.has_side_effects);
        assert_eq!(result.stdout, "Use the CLI directly.");
        let payload = result.structured_payload.as_ref().unwrap();
        assert_eq!(payload["message"], "Use the CLI directly.");
        assert_eq!(payload["dry_run"], true);
        assert!(!result.status.is_failure());
    }

    #[test]
    fn test_timeout() {
        let result = ToolExecutionResult::timed_out(meta(), Duration::from_secs(60));
        assert_eq!(result.status, ToolStatus::Timeout);
        assert_eq!(result.stderr, "Command timed out after 60 seconds");
        assert_eq!(result.duration, 60.0);
    }

    #[test]
    fn test_summary_line() {
        let result = ToolExecutionResult::from_exit(
            ToolResultMetadata::for_tool("analyze_python_code"),
            Some(0),
            "",
            "",
        )
        .with_duration(Duration::from_millis(523));
        assert_eq!(result.summary_line(), "analyze_python_code: SUCCESS (0.523s)");
    }

    #[test]
    fn test_legacy_view() {
        let ok = ToolExecutionResult::from_exit(meta(), Some(0), "done", "");
        assert_eq!(ok.to_legacy(), json!({"success": true, "result": "done"}));

        let err = ToolExecutionResult::from_exit(meta(), Some(3), "", "bad input");
        assert_eq!(err.to_legacy()["error"], "bad input");

        let manual = ToolExecutionResult::manual_required(meta(), "do it by hand", json!({}));
        assert_eq!(manual.to_legacy()["requires_manual_action"], true);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let value = serde_json::to_value(ToolStatus::ManualRequired).unwrap();
        assert_eq!(value, json!("manual_required"));
    }
}
