//! Configuration file loading for toolchat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `TOOLCHAT_CHAT__MODEL=gpt-4.1` style variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./toolchat.toml` or `./.toolchat.toml`
//! 4. Global: `$XDG_CONFIG_HOME/toolchat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    API_KEY_ENV, FileConfig, FileHistoryConfig, FileLoggingConfig, FileProviderConfig,
    FileToolsConfig,
};
pub use loader::ConfigLoader;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_home("rel"), PathBuf::from("rel"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/x.json"), home.join("x.json"));
        }
    }
}
