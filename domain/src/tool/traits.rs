//! Tool domain traits
//!
//! Pure validation of a call against its definition. Execution lives behind
//! the application layer's `ToolExecutorPort`.

use super::entities::{ToolCall, ToolDefinition};
use serde_json::Value;

/// Validator for tool calls
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Checks required parameters, unknown parameters and JSON type hints
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            match call.arguments.get(&param.name) {
                None | Some(Value::Null) if param.required => {
                    return Err(format!(
                        "Missing required parameter '{}' for tool '{}'",
                        param.name, definition.name
                    ));
                }
                Some(value) if !value.is_null() && !type_matches(&param.param_type, value) => {
                    return Err(format!(
                        "Parameter '{}' for tool '{}' must be of type {}",
                        param.name, definition.name, param.param_type
                    ));
                }
                _ => {}
            }
        }

        for arg_name in call.arguments.keys() {
            if !definition.parameters.iter().any(|p| &p.name == arg_name) {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            }
        }

        Ok(())
    }
}

fn type_matches(param_type: &str, value: &Value) -> bool {
    match param_type {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        // Unknown hints are not enforced
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ToolParameter;

    fn definition() -> ToolDefinition {
        ToolDefinition::new("champion_details", "Stats")
            .with_parameter(ToolParameter::new("name", "Champion name", true))
            .with_parameter(ToolParameter::new("level", "Level", false).with_type("integer"))
    }

    #[test]
    fn test_validator_missing_required() {
        let call = ToolCall::new("c", "champion_details");
        let err = DefaultToolValidator.validate(&call, &definition()).unwrap_err();
        assert!(err.contains("Missing required parameter 'name'"));
    }

    #[test]
    fn test_validator_unknown_param() {
        let call = ToolCall::new("c", "champion_details")
            .with_arg("name", "Han Solo")
            .with_arg("ship", "Falcon");
        let err = DefaultToolValidator.validate(&call, &definition()).unwrap_err();
        assert!(err.contains("Unknown parameter 'ship'"));
    }

    #[test]
    fn test_validator_type_mismatch() {
        let call = ToolCall::new("c", "champion_details")
            .with_arg("name", "Han Solo")
            .with_arg("level", "high");
        let err = DefaultToolValidator.validate(&call, &definition()).unwrap_err();
        assert!(err.contains("must be of type integer"));
    }

    #[test]
    fn test_validator_valid_call() {
        let call = ToolCall::new("c", "champion_details")
            .with_arg("name", "Han Solo")
            .with_arg("level", 12);
        assert!(DefaultToolValidator.validate(&call, &definition()).is_ok());
    }
}
