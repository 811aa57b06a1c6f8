//! Default system persona.

use toolchat_domain::ToolDefinition;

const CLOSING: &str = "When users ask you to perform tasks, analyze if any tools can help. \
Break complex tasks into steps and execute them systematically. Always explain what you're \
doing and provide clear results.";

/// Build the default persona, listing the tools offered to the model.
///
/// With no tools the persona just describes a general assistant.
pub fn default_persona(tools: &[ToolDefinition]) -> String {
    if tools.is_empty() {
        return format!("You are a helpful AI assistant.\n\n{}", CLOSING);
    }

    let mut lines = vec![
        "You are an advanced AI assistant with access to powerful utilities:".to_string(),
        String::new(),
    ];
    for (i, tool) in tools.iter().enumerate() {
        lines.push(format!(
            "{}. **{}** ({}) - {}",
            i + 1,
            tool.utility,
            tool.name,
            tool.description
        ));
    }
    lines.push(String::new());
    lines.push(CLOSING.to_string());
    lines.join("\n")
}
