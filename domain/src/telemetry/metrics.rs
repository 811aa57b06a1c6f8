//! Per-tool metrics folded from execution results.

use crate::tool::value_objects::{ToolExecutionResult, ToolStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

/// Number of recent failures retained per tool
pub const MAX_RECENT_ERRORS: usize = 10;
/// Success rate (percent) at or above which a tool is healthy
pub const HEALTHY_THRESHOLD: f64 = 90.0;
/// Success rate (percent) at or above which a tool is degraded rather than unhealthy
pub const DEGRADED_THRESHOLD: f64 = 70.0;

/// Health classification derived from the success rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
    Unknown,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Unhealthy => "unhealthy",
            HealthStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One failed invocation kept in the rolling window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecord {
    pub timestamp: DateTime<Utc>,
    pub status: ToolStatus,
    pub message: String,
}

impl std::fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.message
        )
    }
}

/// Aggregate counters and timings for one tool.
///
/// Only [`record_execution`](Self::record_execution) mutates it; every rate
/// and the health status are computed from the counters on read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolMetrics {
    pub tool_name: String,
    pub success_count: u64,
    pub error_count: u64,
    pub timeout_count: u64,
    pub manual_required_count: u64,
    pub total_duration: f64,
    pub min_duration: Option<f64>,
    pub max_duration: Option<f64>,
    pub last_success: Option<DateTime<Utc>>,
    pub last_error: Option<DateTime<Utc>>,
    pub recent_errors: VecDeque<ErrorRecord>,
}

impl ToolMetrics {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success_count: 0,
            error_count: 0,
            timeout_count: 0,
            manual_required_count: 0,
            total_duration: 0.0,
            min_duration: None,
            max_duration: None,
            last_success: None,
            last_error: None,
            recent_errors: VecDeque::with_capacity(MAX_RECENT_ERRORS),
        }
    }

    pub fn record_execution(&mut self, result: &ToolExecutionResult) {
        match result.status {
            ToolStatus::Success => {
                self.success_count += 1;
                self.last_success = Some(result.timestamp);
            }
            ToolStatus::Error | ToolStatus::Timeout => {
                if result.status == ToolStatus::Error {
                    self.error_count += 1;
                } else {
                    self.timeout_count += 1;
                }
                self.last_error = Some(result.timestamp);
                if self.recent_errors.len() == MAX_RECENT_ERRORS {
                    self.recent_errors.pop_front();
                }
                self.recent_errors.push_back(ErrorRecord {
                    timestamp: result.timestamp,
                    status: result.status,
                    message: result.failure_message().to_string(),
                });
            }
            ToolStatus::ManualRequired => self.manual_required_count += 1,
        }

        let duration = result.duration;
        self.total_duration += duration;
        self.min_duration = Some(self.min_duration.map_or(duration, |d| d.min(duration)));
        self.max_duration = Some(self.max_duration.map_or(duration, |d| d.max(duration)));
    }

    pub fn total_calls(&self) -> u64 {
        self.success_count + self.error_count + self.timeout_count + self.manual_required_count
    }

    fn rate(&self, count: u64) -> f64 {
        match self.total_calls() {
            0 => 0.0,
            total => count as f64 / total as f64 * 100.0,
        }
    }

    /// Success rate as a percentage (0-100)
    pub fn success_rate(&self) -> f64 {
        self.rate(self.success_count)
    }

    pub fn error_rate(&self) -> f64 {
        self.rate(self.error_count)
    }

    pub fn timeout_rate(&self) -> f64 {
        self.rate(self.timeout_count)
    }

    /// Average duration in seconds
    pub fn avg_duration(&self) -> f64 {
        match self.total_calls() {
            0 => 0.0,
            total => self.total_duration / total as f64,
        }
    }

    pub fn health_status(&self) -> HealthStatus {
        if self.total_calls() == 0 {
            return HealthStatus::Unknown;
        }
        let rate = self.success_rate();
        if rate >= HEALTHY_THRESHOLD {
            HealthStatus::Healthy
        } else if rate >= DEGRADED_THRESHOLD {
            HealthStatus::Degraded
        } else {
            HealthStatus::Unhealthy
        }
    }

    pub fn last_error_message(&self) -> Option<&str> {
        self.recent_errors.back().map(|e| e.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::value_objects::ToolResultMetadata;
    use std::time::Duration;

    fn meta() -> ToolResultMetadata {
        ToolResultMetadata::for_tool("compare_files")
    }

    fn success(ms: u64) -> ToolExecutionResult {
        ToolExecutionResult::from_exit(meta(), Some(0), "", "")
            .with_duration(Duration::from_millis(ms))
    }

    fn failure(msg: &str) -> ToolExecutionResult {
        ToolExecutionResult::from_exit(meta(), Some(1), "", msg)
    }

    #[test]
    fn test_empty_metrics_are_unknown() {
        let metrics = ToolMetrics::new("compare_files");
        assert_eq!(metrics.total_calls(), 0);
        assert_eq!(metrics.success_rate(), 0.0);
        assert_eq!(metrics.avg_duration(), 0.0);
        assert_eq!(metrics.health_status(), HealthStatus::Unknown);
    }

    #[test]
    fn test_each_status_updates_one_counter() {
        let mut metrics = ToolMetrics::new("compare_files");
        metrics.record_execution(&success(100));
        metrics.record_execution(&failure("bad"));
        metrics.record_execution(&ToolExecutionResult::timed_out(meta(), Duration::from_secs(60)));
        metrics.record_execution(&ToolExecutionResult::manual_required(
            meta(),
            "manual",
            serde_json::json!({}),
        ));

        assert_eq!(metrics.success_count, 1);
        assert_eq!(metrics.error_count, 1);
        assert_eq!(metrics.timeout_count, 1);
        assert_eq!(metrics.manual_required_count, 1);
        assert_eq!(metrics.total_calls(), 4);
        assert_eq!(metrics.recent_errors.len(), 2);
        assert_eq!(metrics.recent_errors[1].status, ToolStatus::Timeout);
        assert!(metrics.last_success.is_some());
        assert!(metrics.last_error.is_some());
    }

    #[test]
    fn test_durations() {
        let mut metrics = ToolMetrics::new("compare_files");
        metrics.record_execution(&success(100));
        metrics.record_execution(&success(300));
        assert_eq!(metrics.min_duration, Some(0.1));
        assert_eq!(metrics.max_duration, Some(0.3));
        assert!((metrics.avg_duration() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_error_window_is_capped() {
        let mut metrics = ToolMetrics::new("compare_files");
        for i in 0..15 {
            metrics.record_execution(&failure(&format!("error {}", i)));
        }
        assert_eq!(metrics.error_count, 15);
        assert_eq!(metrics.recent_errors.len(), MAX_RECENT_ERRORS);
        assert_eq!(metrics.recent_errors[0].message, "error 5");
        assert_eq!(metrics.last_error_message(), Some("error 14"));
    }

    #[test]
    fn test_health_thresholds() {
        let mut metrics = ToolMetrics::new("compare_files");
        for _ in 0..9 {
            metrics.record_execution(&success(1));
        }
        metrics.record_execution(&failure("x"));
        assert_eq!(metrics.success_rate(), 90.0);
        assert_eq!(metrics.health_status(), HealthStatus::Healthy);

        metrics.record_execution(&failure("x"));
        metrics.record_execution(&failure("x"));
        assert_eq!(metrics.health_status(), HealthStatus::Degraded);

        for _ in 0..5 {
            metrics.record_execution(&failure("x"));
        }
        assert_eq!(metrics.health_status(), HealthStatus::Unhealthy);
    }

    #[test]
    fn test_error_record_display() {
        let mut metrics = ToolMetrics::new("compare_files");
        metrics.record_execution(&failure("disk full"));
        let line = metrics.recent_errors[0].to_string();
        assert!(line.ends_with(": disk full"));
    }
}
