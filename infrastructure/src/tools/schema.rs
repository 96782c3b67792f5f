//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the function-calling
//! format of OpenAI-compatible chat completion APIs.

use droidmind_application::ports::tool_schema::ToolSchemaPort;
use droidmind_domain::{ToolDefinition, ToolSpec};
use serde_json::{Map, Value, json};

/// Maps parameter types onto JSON Schema types:
/// - `"number"`, `"integer"`, `"boolean"`, `"object"`, `"array"` pass through
/// - anything else → `"string"`
pub struct JsonSchemaToolConverter;

fn schema_type(param_type: &str) -> &'static str {
    match param_type {
        "number" => "number",
        "integer" => "integer",
        "boolean" => "boolean",
        "object" => "object",
        "array" => "array",
        _ => "string",
    }
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            properties.insert(
                param.name.clone(),
                json!({
                    "type": schema_type(&param.param_type),
                    "description": param.description,
                }),
            );
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
                }
            }
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<Value> {
        let mut tools: Vec<&ToolDefinition> = spec.all().collect();
        tools.sort_by_key(|t| &t.name);
        tools.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droidmind_domain::ToolParameter;

    #[test]
    fn test_tool_to_schema() {
        let tool = ToolDefinition::new("champion_lore", "Background of a champion")
            .with_parameter(ToolParameter::new("name", "Champion name", true))
            .with_parameter(ToolParameter::new("depth", "Detail level", false).with_type("integer"));

        let schema = JsonSchemaToolConverter.tool_to_schema(&tool);

        assert_eq!(schema["type"], "function");
        assert_eq!(schema["function"]["name"], "champion_lore");
        let params = &schema["function"]["parameters"];
        assert_eq!(params["type"], "object");
        assert_eq!(params["properties"]["name"]["type"], "string");
        assert_eq!(params["properties"]["depth"]["type"], "integer");

        let required = params["required"].as_array().unwrap();
        assert_eq!(required, &vec![json!("name")]);
    }

    #[test]
    fn test_all_tools_schema_sorted() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("squad_stats", "Stats"))
            .register(ToolDefinition::new("champion_lore", "Lore"));

        let tools = JsonSchemaToolConverter.all_tools_schema(&spec);
        let names: Vec<&str> = tools
            .iter()
            .map(|t| t["function"]["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["champion_lore", "squad_stats"]);
    }
}
