//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use application types where the
//! shapes coincide (`[chat]` is a [`ChatConfig`] as-is).

mod history;
mod logging;
mod provider;
mod tools;

pub use history::FileHistoryConfig;
pub use logging::FileLoggingConfig;
pub use provider::{API_KEY_ENV, FileProviderConfig};
pub use tools::FileToolsConfig;

use super::ConfigError;
use serde::{Deserialize, Serialize};
use toolchat_application::ChatConfig;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model, sampling and context control
    pub chat: ChatConfig,
    /// Tool catalog location and allow-list
    pub tools: FileToolsConfig,
    /// Conversation persistence
    pub history: FileHistoryConfig,
    /// Model provider endpoint
    pub provider: FileProviderConfig,
    /// Diagnostic logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Reject values no session could run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chat = &self.chat;

        if chat.model.as_str().trim().is_empty() {
            return Err(ConfigError::Invalid("chat.model cannot be empty".to_string()));
        }
        if chat.max_context_tokens == 0 {
            return Err(ConfigError::Invalid(
                "chat.max_context_tokens cannot be 0".to_string(),
            ));
        }
        if chat.max_tool_call_depth == 0 {
            return Err(ConfigError::Invalid(
                "chat.max_tool_call_depth cannot be 0".to_string(),
            ));
        }
        for (field, value) in [
            ("chat.summarize_threshold", chat.summarize_threshold),
            ("chat.summarize_target_ratio", chat.summarize_target_ratio),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be in (0, 1], got {}",
                    field, value
                )));
            }
        }
        if chat.summarize_target_ratio >= chat.summarize_threshold {
            return Err(ConfigError::Invalid(
                "chat.summarize_target_ratio must be below chat.summarize_threshold".to_string(),
            ));
        }
        if self.tools.timeout_secs == 0 {
            return Err(ConfigError::Invalid("tools.timeout_secs cannot be 0".to_string()));
        }
        Ok(())
    }
}
