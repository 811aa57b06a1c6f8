//! History configuration from TOML (`[history]` section)

use super::super::expand_home;
use crate::persistence::default_history_path;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw history configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHistoryConfig {
    /// Persist the conversation between sessions
    pub enabled: bool,
    /// Path to the history file (default `~/.toolchat_history.json`)
    pub file: Option<String>,
}

impl Default for FileHistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
        }
    }
}

impl FileHistoryConfig {
    pub fn path(&self) -> PathBuf {
        self.file
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(default_history_path)
    }
}
