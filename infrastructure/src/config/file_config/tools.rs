//! Tools configuration from TOML (`[tools]` section)
//!
//! ```toml
//! [tools]
//! enabled = ["extract_todos", "FileDiff"]   # function or utility names; empty = all
//! dir = "~/toolchat-tools"                  # root holding <Utility>/<script>.py
//! interpreter = "python3"
//! timeout_secs = 60
//! ```

use super::super::expand_home;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use crate::tools::{DEFAULT_TIMEOUT_SECS, ExecutorConfig};

/// Raw tools configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Allow-list of tools exposed to the model
    pub enabled: Vec<String>,
    /// Directory containing the tool programs
    pub dir: Option<String>,
    /// Interpreter used to run tool programs
    pub interpreter: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        Self {
            enabled: Vec::new(),
            dir: None,
            interpreter: "python3".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl FileToolsConfig {
    pub fn to_executor_config(&self) -> ExecutorConfig {
        let mut config = ExecutorConfig::default()
            .with_interpreter(&self.interpreter)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(dir) = &self.dir {
            config = config.with_tools_dir(expand_home(dir));
        }
        config
    }
}
