//! JSON file conversation repository.
//!
//! The whole snapshot is rewritten on every save. Writes go to a sibling
//! temporary file first and are renamed into place, so a crash mid-write
//! leaves the previous history intact.

use std::fs;
use std::path::{Path, PathBuf};
use toolchat_application::ports::conversation_repository::{
    ConversationRepository, RepositoryError,
};
use toolchat_domain::ConversationSnapshot;
use tracing::debug;

/// File name used under the home directory when no path is configured
pub const DEFAULT_HISTORY_FILE: &str = ".toolchat_history.json";

/// `~/.toolchat_history.json`, or the working directory when there is no home.
pub fn default_history_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_HISTORY_FILE)
}

/// Stores the conversation as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for JsonFileRepository {
    fn default() -> Self {
        Self::new(default_history_path())
    }
}

impl ConversationRepository for JsonFileRepository {
    fn load(&self) -> Result<Option<ConversationSnapshot>, RepositoryError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RepositoryError::Io(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let snapshot: ConversationSnapshot = serde_json::from_str(&content).map_err(|e| {
            RepositoryError::Corrupt(format!("{}: {}", self.path.display(), e))
        })?;

        debug!(
            "Loaded {} messages from {}",
            snapshot.messages.len(),
            self.path.display()
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &ConversationSnapshot) -> Result<(), RepositoryError> {
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| RepositoryError::Io(e.to_string()))?;
        }

        let temp = self.temp_path();
        fs::write(&temp, json).map_err(|e| RepositoryError::Io(e.to_string()))?;
        fs::rename(&temp, &self.path).map_err(|e| RepositoryError::Io(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use toolchat_domain::{Message, Role, ToolCallRecord};

    #[test]
    fn test_missing_file_is_no_history() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("history.json"));
        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("nested/history.json"));
        let snapshot = ConversationSnapshot::new(
            "gpt-4o",
            vec![Message::system("persona"), Message::user("hello")],
        );

        repo.save(&snapshot).unwrap();
        let loaded = repo.load().unwrap().unwrap();

        assert_eq!(loaded, snapshot);
        assert!(!repo.temp_path().exists());
    }

    #[test]
    fn test_tool_messages_survive_save_and_load() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("history.json"));
        let messages = vec![
            Message::system("persona"),
            Message::user("list the TODOs"),
            Message::assistant_tool_calls(
                Some("Checking.".into()),
                vec![
                    ToolCallRecord::new("call_a", "extract_todos", r#"{"path":"src"}"#),
                    ToolCallRecord::new("call_b", "compare_files", "{}"),
                ],
            ),
            Message::tool_result("call_a", "extract_todos", r#"{"status":"success"}"#),
            Message::tool_result("call_b", "compare_files", r#"{"status":"error"}"#),
            Message::assistant("Two TODOs found."),
        ];

        repo.save(&ConversationSnapshot::new("gpt-4o", messages.clone()))
            .unwrap();
        let loaded = repo.load().unwrap().unwrap().messages;

        assert_eq!(loaded, messages);
        let calls = loaded[2].tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].id, "call_a");
        assert_eq!(calls[0].function_name(), "extract_todos");
        assert_eq!(calls[0].arguments_json(), r#"{"path":"src"}"#);
        assert_eq!(loaded[4].role, Role::Tool);
        assert_eq!(loaded[4].tool_call_id.as_deref(), Some("call_b"));
        assert_eq!(loaded[4].name.as_deref(), Some("compare_files"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{not json").unwrap();

        let err = JsonFileRepository::new(&path).load().unwrap_err();
        assert!(matches!(err, RepositoryError::Corrupt(_)));
    }

    #[test]
    fn test_tolerates_missing_optional_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(
            &path,
            r#"{"messages": [{"role": "user", "content": "hi"}, {"role": "assistant"}]}"#,
        )
        .unwrap();

        let loaded = JsonFileRepository::new(&path).load().unwrap().unwrap();
        assert_eq!(loaded.model, "");
        assert_eq!(loaded.messages.len(), 2);
        assert!(loaded.messages[1].content.is_none());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("history.json"));
        repo.save(&ConversationSnapshot::new("a", vec![Message::user("one")]))
            .unwrap();
        repo.save(&ConversationSnapshot::new("b", vec![])).unwrap();

        let loaded = repo.load().unwrap().unwrap();
        assert_eq!(loaded.model, "b");
        assert!(loaded.messages.is_empty());
    }
}
