//! Request and response bodies of the chat completions protocol.

use serde::Deserialize;
use serde_json::{Map, Value, json};
use toolchat_application::ports::llm_provider::{CompletionRequest, ProviderError};
use toolchat_domain::{Completion, Message, TokenUsage, ToolCallRecord};

use crate::tools::schema::tools_to_schema;

/// Message in the shape the API accepts; timestamps stay local.
fn wire_message(message: &Message) -> Value {
    let mut obj = Map::new();
    obj.insert("role".to_string(), json!(message.role.as_str()));
    obj.insert(
        "content".to_string(),
        message.content.as_ref().map_or(Value::Null, |c| json!(c)),
    );
    if let Some(calls) = &message.tool_calls {
        obj.insert("tool_calls".to_string(), json!(calls));
    }
    if let Some(id) = &message.tool_call_id {
        obj.insert("tool_call_id".to_string(), json!(id));
    }
    if let Some(name) = &message.name {
        obj.insert("name".to_string(), json!(name));
    }
    Value::Object(obj)
}

/// Build the JSON body for one request.
///
/// Reasoning models get `max_completion_tokens` and no `temperature`.
pub(crate) fn request_body(request: &CompletionRequest, stream: bool) -> Value {
    let mut body = Map::new();
    body.insert("model".to_string(), json!(request.model.as_str()));
    body.insert(
        "messages".to_string(),
        Value::Array(request.messages.iter().map(wire_message).collect()),
    );

    if request.model.is_reasoning() {
        body.insert(
            "max_completion_tokens".to_string(),
            json!(request.max_tokens),
        );
    } else {
        body.insert("max_tokens".to_string(), json!(request.max_tokens));
        body.insert("temperature".to_string(), json!(request.temperature));
    }

    if request.tools_enabled() {
        body.insert("tools".to_string(), json!(tools_to_schema(&request.tools)));
        body.insert("tool_choice".to_string(), json!("auto"));
        body.insert(
            "parallel_tool_calls".to_string(),
            json!(request.parallel_tool_calls),
        );
    }

    if stream {
        body.insert("stream".to_string(), json!(true));
        body.insert("stream_options".to_string(), json!({"include_usage": true}));
    }

    Value::Object(body)
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
}

impl From<WireUsage> for TokenUsage {
    fn from(usage: WireUsage) -> Self {
        TokenUsage::new(usage.prompt_tokens, usage.completion_tokens)
    }
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCallRecord>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

/// Parse a non-streaming response body.
pub(crate) fn parse_completion(body: &str) -> Result<Completion, ProviderError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::InvalidResponse("Response has no choices".to_string()))?;

    let mut completion = Completion::text(choice.message.content.unwrap_or_default())
        .with_tool_calls(choice.message.tool_calls.unwrap_or_default());
    completion.model = response.model;
    if let Some(usage) = response.usage {
        completion = completion.with_usage(usage.into());
    }
    Ok(completion)
}

/// Turn a non-success HTTP response into a provider error.
pub(crate) fn http_error(status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());

    match status {
        401 | 403 => ProviderError::Authentication(message),
        _ => ProviderError::RequestFailed(format!("HTTP {}: {}", status, message)),
    }
}
