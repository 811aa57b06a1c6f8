//! Export formats for a conversation snapshot.

use super::snapshot::ConversationSnapshot;
use crate::core::error::DomainError;
use crate::session::entities::Message;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// The persisted document shape, pretty-printed
    #[default]
    Json,
    /// Human-readable transcript
    Text,
}

impl FromStr for ExportFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            other => Err(DomainError::InvalidExportFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Text => write!(f, "text"),
        }
    }
}

fn render_message(message: &Message) -> String {
    let header = format!(
        "[{}] {}",
        message.timestamp.format("%Y-%m-%d %H:%M:%S"),
        message.role.as_str().to_uppercase()
    );
    let mut body = message.content_str().to_string();
    if let Some(calls) = &message.tool_calls {
        let names: Vec<&str> = calls.iter().map(|c| c.function_name()).collect();
        if !body.is_empty() {
            body.push('\n');
        }
        body.push_str(&format!("(called tools: {})", names.join(", ")));
    }
    match &message.tool_call_id {
        Some(id) => format!("{} ({}):\n{}", header, id, body),
        None => format!("{}:\n{}", header, body),
    }
}

/// Plain-text transcript, one block per message.
pub fn render_text(snapshot: &ConversationSnapshot) -> String {
    let mut out = format!(
        "Conversation export\nModel: {}\nExported: {}\n",
        snapshot.model,
        snapshot.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    for message in &snapshot.messages {
        out.push('\n');
        out.push_str(&render_message(message));
        out.push('\n');
    }
    out
}
