//! Provider configuration from TOML (`[provider]` section)

use crate::providers::openai::{DEFAULT_BASE_URL, OpenAiConfig};
use serde::{Deserialize, Serialize};

/// Environment variable consulted when no key is configured
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Raw provider configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// API key; prefer the environment variable
    pub api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl FileProviderConfig {
    /// Configured key, falling back to `OPENAI_API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Connection settings, if a key is available.
    pub fn to_openai_config(&self) -> Option<OpenAiConfig> {
        self.resolve_api_key()
            .map(|key| OpenAiConfig::new(key).with_base_url(&self.base_url))
    }
}
