//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

use super::entities::{ToolArguments, ToolDefinition};

/// Validator for tool arguments
///
/// This is a pure domain trait that validates parsed arguments
/// against a tool definition without any I/O operations.
pub trait ToolValidator {
    /// Validate arguments against their definition
    fn validate(&self, arguments: &ToolArguments, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
///
/// Applied uniformly to every tool: required keys must be present, no
/// unknown keys, every value must match its declared type, and enumerated
/// parameters must use one of the listed values.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, arguments: &ToolArguments, definition: &ToolDefinition) -> Result<(), String> {
        for param in definition.required_parameters() {
            if !arguments.contains(&param.name) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        for (name, value) in arguments.iter() {
            let Some(param) = definition.parameter(name) else {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    name, definition.name
                ));
            };

            if !param.param_type.accepts(value) {
                return Err(format!(
                    "Parameter '{}' for tool '{}' must be {}",
                    name, definition.name, param.param_type
                ));
            }

            if !param.enum_values.is_empty()
                && let Some(text) = value.as_str()
                && !param.enum_values.iter().any(|allowed| allowed == text)
            {
                return Err(format!(
                    "Parameter '{}' for tool '{}' must be one of [{}], got '{}'",
                    name,
                    definition.name,
                    param.enum_values.join(", "),
                    text
                ));
            }
        }

        Ok(())
    }
}
