//! Logging configuration from TOML (`[logging]` section)

use super::super::expand_home;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write logs to this file (daily rotation) instead of stderr
    pub file: Option<String>,
    /// Filter directive used when neither `-v` nor `RUST_LOG` is given
    pub level: Option<String>,
}

impl FileLoggingConfig {
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file.as_deref().map(expand_home)
    }
}
