//! JSON Schema tool converter.
//!
//! Produces the OpenAI function-calling shape for a [`ToolDefinition`]:
//!
//! ```json
//! {"type": "function",
//!  "function": {"name": "...", "description": "...", "strict": false,
//!               "parameters": {"type": "object", "properties": {...},
//!                              "required": [...], "additionalProperties": false}}}
//! ```

use serde_json::{Map, Value, json};
use toolchat_domain::{ParamType, ToolDefinition, ToolParameter};

fn parameter_schema(param: &ToolParameter) -> Value {
    let mut prop = Map::new();
    prop.insert("type".to_string(), json!(param.param_type.json_type()));
    match param.param_type {
        ParamType::StringArray => {
            prop.insert("items".to_string(), json!({"type": "string"}));
        }
        ParamType::StringMap => {
            prop.insert(
                "additionalProperties".to_string(),
                json!({"type": "string"}),
            );
        }
        _ => {}
    }
    if !param.enum_values.is_empty() {
        prop.insert("enum".to_string(), json!(param.enum_values));
    }
    prop.insert("description".to_string(), json!(param.description));
    if let Some(default) = &param.default {
        prop.insert("default".to_string(), default.clone());
    }
    Value::Object(prop)
}

/// Function schema for one tool
pub fn tool_to_schema(tool: &ToolDefinition) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for param in &tool.parameters {
        properties.insert(param.name.clone(), parameter_schema(param));
        if param.required {
            required.push(json!(param.name));
        }
    }

    json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
                "additionalProperties": false,
            },
            "strict": tool.strict,
        }
    })
}

/// Function schemas for `tools`, in the given order
pub fn tools_to_schema(tools: &[ToolDefinition]) -> Vec<Value> {
    tools.iter().map(tool_to_schema).collect()
}
