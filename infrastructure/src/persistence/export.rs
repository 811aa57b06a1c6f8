//! Conversation export to files.

use std::fs;
use std::path::Path;
use toolchat_application::ports::conversation_repository::{
    ConversationExporter, RepositoryError,
};
use toolchat_domain::{ConversationSnapshot, ExportFormat, render_text};
use tracing::info;

/// Writes exports to the local filesystem, creating parent directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileExporter;

impl ConversationExporter for FileExporter {
    fn export(
        &self,
        snapshot: &ConversationSnapshot,
        path: &Path,
        format: ExportFormat,
    ) -> Result<(), RepositoryError> {
        let content = match format {
            ExportFormat::Json => serde_json::to_string_pretty(snapshot)
                .map_err(|e| RepositoryError::Serialization(e.to_string()))?,
            ExportFormat::Text => render_text(snapshot),
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| RepositoryError::Io(e.to_string()))?;
        }
        fs::write(path, content).map_err(|e| RepositoryError::Io(e.to_string()))?;
        info!(
            "Exported {} messages to {} ({})",
            snapshot.messages.len(),
            path.display(),
            format
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use toolchat_domain::Message;

    fn snapshot() -> ConversationSnapshot {
        ConversationSnapshot::new(
            "gpt-4o",
            vec![Message::system("persona"), Message::user("find todos")],
        )
    }

    #[test]
    fn test_export_json_is_loadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/chat.json");
        FileExporter
            .export(&snapshot(), &path, ExportFormat::Json)
            .unwrap();

        let back: ConversationSnapshot =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.messages.len(), 2);
    }

    #[test]
    fn test_export_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat.txt");
        FileExporter
            .export(&snapshot(), &path, ExportFormat::Text)
            .unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("USER:\nfind todos"));
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let err = FileExporter
            .export(&snapshot(), &blocker.join("chat.json"), ExportFormat::Json)
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Io(_)));
    }
}
