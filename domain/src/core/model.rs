//! Model value object identifying the chat model

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Chat model identifier (Value Object)
///
/// Providers accept free-form model names, so this wraps the raw string and
/// adds the few behaviors that depend on the model family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reasoning models (o1/o3 families) reject `temperature` and take
    /// `max_completion_tokens` instead of `max_tokens`.
    pub fn is_reasoning(&self) -> bool {
        let name = self.0.to_ascii_lowercase();
        name.starts_with("o1") || name.starts_with("o3")
    }
}

impl Default for Model {
    fn default() -> Self {
        Self(DEFAULT_MODEL.to_string())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Model {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidModel("model name is empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}
