//! Usage statistics and cost estimation.
//!
//! Prices are USD per one million tokens. Model names are matched by the
//! longest known prefix, so dated variants such as `gpt-4o-2024-08-06`
//! price like their family; unknown models fall back to `gpt-4o`.

use crate::session::response::TokenUsage;
use serde::Serialize;

/// Input/output price per one million tokens
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl ModelPricing {
    const fn new(input_per_million: f64, output_per_million: f64) -> Self {
        Self {
            input_per_million,
            output_per_million,
        }
    }

    pub fn cost(&self, usage: &TokenUsage) -> f64 {
        usage.prompt_tokens as f64 / 1_000_000.0 * self.input_per_million
            + usage.completion_tokens as f64 / 1_000_000.0 * self.output_per_million
    }
}

const FALLBACK_MODEL: &str = "gpt-4o";

const PRICING: &[(&str, ModelPricing)] = &[
    ("gpt-4o", ModelPricing::new(2.50, 10.00)),
    ("gpt-4o-mini", ModelPricing::new(0.15, 0.60)),
    ("gpt-4.1", ModelPricing::new(2.00, 8.00)),
    ("gpt-4.1-mini", ModelPricing::new(0.12, 0.48)),
    ("gpt-4.1-nano", ModelPricing::new(0.08, 0.32)),
    ("o3-mini", ModelPricing::new(1.00, 4.00)),
    ("o3", ModelPricing::new(10.00, 40.00)),
    ("gpt-5", ModelPricing::new(15.00, 60.00)),
];

/// Pricing for `model`, by longest matching prefix
pub fn pricing_for(model: &str) -> ModelPricing {
    let lookup = |name: &str| {
        PRICING
            .iter()
            .filter(|(prefix, _)| name.starts_with(prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, pricing)| *pricing)
    };
    lookup(model)
        .or_else(|| lookup(FALLBACK_MODEL))
        .unwrap_or(ModelPricing::new(2.50, 10.00))
}

pub fn calculate_cost(model: &str, usage: &TokenUsage) -> f64 {
    pricing_for(model).cost(usage)
}

/// Per-session counters; only an explicit reset clears them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageStats {
    pub requests: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub tool_calls: u64,
    /// Estimated cost in USD
    pub estimated_cost: f64,
}

impl UsageStats {
    /// Count one provider request, with its token usage when reported
    pub fn record_request(&mut self, model: &str, usage: Option<&TokenUsage>) {
        self.requests += 1;
        if let Some(usage) = usage {
            self.input_tokens += usage.prompt_tokens;
            self.output_tokens += usage.completion_tokens;
            self.estimated_cost += calculate_cost(model, usage);
        }
    }

    pub fn record_tool_calls(&mut self, count: usize) {
        self.tool_calls += count as u64;
    }

    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}
