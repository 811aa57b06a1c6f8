//! Port for persisting conversation history.
//!
//! The store writes the full snapshot after every mutation and reads it
//! once at start-up. Failures are reported so the caller can log them, but
//! callers never treat them as fatal.

use std::path::Path;
use thiserror::Error;
use toolchat_domain::{ConversationSnapshot, ExportFormat};

/// Errors raised by a conversation repository
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Corrupt history: {0}")]
    Corrupt(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for loading and saving conversation snapshots.
pub trait ConversationRepository: Send + Sync {
    /// Load the stored snapshot; `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<ConversationSnapshot>, RepositoryError>;

    /// Overwrite the stored snapshot.
    fn save(&self, snapshot: &ConversationSnapshot) -> Result<(), RepositoryError>;
}

/// Port for writing a snapshot somewhere a user asked for.
pub trait ConversationExporter: Send + Sync {
    fn export(
        &self,
        snapshot: &ConversationSnapshot,
        path: &Path,
        format: ExportFormat,
    ) -> Result<(), RepositoryError>;
}

/// No-op implementation for tests and when history is disabled.
pub struct NoPersistence;

impl ConversationRepository for NoPersistence {
    fn load(&self) -> Result<Option<ConversationSnapshot>, RepositoryError> {
        Ok(None)
    }

    fn save(&self, _snapshot: &ConversationSnapshot) -> Result<(), RepositoryError> {
        Ok(())
    }
}
