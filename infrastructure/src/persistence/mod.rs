//! Conversation persistence and export.

pub mod export;
pub mod json_repository;

pub use export::FileExporter;
pub use json_repository::{DEFAULT_HISTORY_FILE, JsonFileRepository, default_history_path};
