//! Infrastructure layer for toolchat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the process tool executor and its catalog,
//! the JSON history file, the OpenAI-compatible provider, and
//! configuration file loading.

pub mod config;
pub mod persistence;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{
    API_KEY_ENV, ConfigError, ConfigLoader, FileConfig, FileHistoryConfig, FileLoggingConfig,
    FileProviderConfig, FileToolsConfig,
};
pub use persistence::{FileExporter, JsonFileRepository, default_history_path};
pub use providers::{OpenAiConfig, OpenAiProvider};
pub use tools::{
    DEFAULT_TIMEOUT_SECS, ExecutorConfig, ProcessToolExecutor, ToolRegistry, default_catalog,
    tools_to_schema,
};
