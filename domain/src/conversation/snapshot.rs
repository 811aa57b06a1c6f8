//! Persisted form of a conversation.

use crate::session::entities::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `{model, timestamp, messages}` document written after every mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    #[serde(default)]
    pub model: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl ConversationSnapshot {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            timestamp: Utc::now(),
            messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default() {
        let snapshot: ConversationSnapshot =
            serde_json::from_value(json!({"messages": [{"role": "user", "content": "hi"}]}))
                .unwrap();
        assert_eq!(snapshot.model, "");
        assert_eq!(snapshot.messages.len(), 1);
    }

    #[test]
    fn test_round_trip() {
        let snapshot = ConversationSnapshot::new(
            "gpt-4o",
            vec![Message::system("persona"), Message::user("hello")],
        );
        let text = serde_json::to_string_pretty(&snapshot).unwrap();
        let back: ConversationSnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(back, snapshot);
    }
}
