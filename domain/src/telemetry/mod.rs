//! Tool telemetry: per-tool health derived from a stream of results.

pub mod metrics;

pub use metrics::{ErrorRecord, HealthStatus, MAX_RECENT_ERRORS, ToolMetrics};

use crate::tool::value_objects::ToolExecutionResult;
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts of tools in each health state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HealthSummary {
    pub healthy: usize,
    pub degraded: usize,
    pub unhealthy: usize,
    pub unknown: usize,
}

/// Metrics for every tool that has been invoked, keyed by tool name.
///
/// Entries are created on first use and never removed.
#[derive(Debug, Clone, Default)]
pub struct ToolTelemetry {
    tools: BTreeMap<String, ToolMetrics>,
}

impl ToolTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_execution(&mut self, result: &ToolExecutionResult) {
        let name = result.tool_name();
        if let Some(metrics) = self.tools.get_mut(name) {
            metrics.record_execution(result);
        } else {
            let mut metrics = ToolMetrics::new(name);
            metrics.record_execution(result);
            self.tools.insert(name.to_string(), metrics);
        }
    }

    pub fn get(&self, tool_name: &str) -> Option<&ToolMetrics> {
        self.tools.get(tool_name)
    }

    /// Metrics in tool-name order
    pub fn iter(&self) -> impl Iterator<Item = &ToolMetrics> {
        self.tools.values()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn total_calls(&self) -> u64 {
        self.tools.values().map(ToolMetrics::total_calls).sum()
    }

    pub fn health_summary(&self) -> HealthSummary {
        let mut summary = HealthSummary::default();
        for metrics in self.tools.values() {
            match metrics.health_status() {
                HealthStatus::Healthy => summary.healthy += 1,
                HealthStatus::Degraded => summary.degraded += 1,
                HealthStatus::Unhealthy => summary.unhealthy += 1,
                HealthStatus::Unknown => summary.unknown += 1,
            }
        }
        summary
    }
}
