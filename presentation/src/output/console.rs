//! Console output formatter for session reports

use colored::Colorize;
use toolchat_domain::{
    ContextUsage, ConversationStats, HealthStatus, SummaryReport, ToolDefinition, ToolTelemetry,
    UsageStats,
};

/// Formats session state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Numbered tool list with utility names and side-effect markers
    pub fn format_tools(tools: &[ToolDefinition]) -> String {
        let mut output = Self::section_header("Available Tools");
        if tools.is_empty() {
            output.push_str("  (tools disabled)\n");
            return output;
        }
        for (i, tool) in tools.iter().enumerate() {
            let marker = if tool.has_side_effects {
                format!(" {}", "[manual]".yellow())
            } else {
                String::new()
            };
            output.push_str(&format!(
                "  {:>2}. {} ({}){}\n      {}\n",
                i + 1,
                tool.utility.bold(),
                tool.name.dimmed(),
                marker,
                tool.description
            ));
        }
        output
    }

    /// Request, token, cost and message counters
    pub fn format_stats(model: &str, usage: &UsageStats, stats: &ConversationStats) -> String {
        let mut output = Self::section_header("Session Statistics");
        output.push_str(&format!("  {:<18} {}\n", "Model:".cyan(), model));
        output.push_str(&format!("  {:<18} {}\n", "Requests:".cyan(), usage.requests));
        output.push_str(&format!(
            "  {:<18} {} in / {} out ({} total)\n",
            "Tokens:".cyan(),
            usage.input_tokens,
            usage.output_tokens,
            usage.total_tokens()
        ));
        output.push_str(&format!(
            "  {:<18} ${:.4}\n",
            "Estimated cost:".cyan(),
            usage.estimated_cost
        ));
        output.push_str(&format!("  {:<18} {}\n", "Tool calls:".cyan(), usage.tool_calls));
        output.push_str(&format!(
            "  {:<18} {} ({} user, {} assistant, {} tool, {} system)\n",
            "Messages:".cyan(),
            stats.total_messages,
            stats.user_messages,
            stats.assistant_messages,
            stats.tool_messages,
            stats.system_messages
        ));
        if let (Some(first), Some(last)) = (stats.first_message_at, stats.last_message_at) {
            output.push_str(&format!(
                "  {:<18} {} .. {}\n",
                "Span:".cyan(),
                first.format("%Y-%m-%d %H:%M:%S"),
                last.format("%Y-%m-%d %H:%M:%S")
            ));
        }
        output
    }

    fn health_label(status: HealthStatus) -> String {
        match status {
            HealthStatus::Healthy => status.as_str().green().to_string(),
            HealthStatus::Degraded => status.as_str().yellow().to_string(),
            HealthStatus::Unhealthy => status.as_str().red().to_string(),
            HealthStatus::Unknown => status.as_str().dimmed().to_string(),
        }
    }

    /// Per-tool health table plus the aggregate counts
    pub fn format_health(telemetry: &ToolTelemetry) -> String {
        let mut output = Self::section_header("Tool Health");
        if telemetry.is_empty() {
            output.push_str("  No tools have been called yet.\n");
            return output;
        }

        for metrics in telemetry.iter() {
            output.push_str(&format!(
                "  {:<28} {:<10} {:>5.1}% ok  {:>4} calls  avg {:.3}s\n",
                metrics.tool_name,
                Self::health_label(metrics.health_status()),
                metrics.success_rate(),
                metrics.total_calls(),
                metrics.avg_duration()
            ));
            if let Some(error) = metrics.last_error_message() {
                output.push_str(&format!("      {} {}\n", "last error:".dimmed(), error));
            }
        }

        let summary = telemetry.health_summary();
        output.push_str(&format!(
            "\n  {} healthy, {} degraded, {} unhealthy, {} unknown ({} calls)\n",
            summary.healthy,
            summary.degraded,
            summary.unhealthy,
            summary.unknown,
            telemetry.total_calls()
        ));
        output
    }

    /// Context window usage with a bar
    pub fn format_context(usage: &ContextUsage) -> String {
        const WIDTH: usize = 30;
        let filled = ((usage.ratio().clamp(0.0, 1.0)) * WIDTH as f64).round() as usize;
        let bar = format!("{}{}", "#".repeat(filled), "-".repeat(WIDTH - filled));
        let bar = if usage.percent >= 85.0 {
            bar.red()
        } else if usage.percent >= 70.0 {
            bar.yellow()
        } else {
            bar.green()
        };

        let mut output = Self::section_header("Context Window");
        output.push_str(&format!(
            "  [{}] {:.1}%\n  {} / {} tokens used, {} remaining\n",
            bar, usage.percent, usage.used, usage.max, usage.remaining
        ));
        output
    }

    pub fn format_summary(report: &SummaryReport) -> String {
        format!(
            "{} {} messages condensed, {} kept ({} -> {} tokens)",
            "Summarized:".green().bold(),
            report.summarized,
            report.kept_recent,
            report.tokens_before,
            report.tokens_after
        )
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
