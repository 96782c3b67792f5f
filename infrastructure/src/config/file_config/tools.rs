//! Tool configuration from TOML (`[tools.<name>]` sections)

use super::ConfigIssue;
use droidmind_domain::{ToolDefinition, ToolParameter};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Parameter definition for a configured tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileToolParameter {
    /// Parameter type: "string", "number", "integer", "boolean", "object", "array"
    #[serde(rename = "type", default = "default_string_type")]
    pub param_type: String,
    /// Human-readable description of the parameter
    #[serde(default)]
    pub description: String,
    /// Whether this parameter is required (default: true)
    #[serde(default = "default_true")]
    pub required: bool,
}

fn default_string_type() -> String {
    "string".to_string()
}

fn default_true() -> bool {
    true
}

/// A tool backed by an HTTP endpoint or a fixed response.
///
/// # Example
///
/// ```toml
/// [tools.champion_details]
/// description = "Structured stats for a champion"
/// endpoint = "http://localhost:8080/champions"
/// complementary = "champion_lore"
///
/// [tools.champion_details.parameters.name]
/// type = "string"
/// description = "Champion name"
///
/// [tools.daily_tip]
/// description = "Tip of the day"
/// response = "Upgrade your hyperdrive first."
/// cache_duration = 5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolConfig {
    /// Human-readable description of what this tool does
    pub description: String,
    /// URL the arguments are POSTed to
    pub endpoint: Option<String>,
    /// Fixed payload returned instead of calling an endpoint
    pub response: Option<Value>,
    /// Tool called alongside this one with the same arguments
    pub complementary: Option<String>,
    /// Other names the model may use for this tool
    pub aliases: Vec<String>,
    /// Turns a result stays cached when the backend gives no hint
    pub cache_duration: Option<u32>,
    /// Parameter definitions
    pub parameters: BTreeMap<String, FileToolParameter>,
}

impl FileToolConfig {
    pub fn to_definition(&self, name: &str) -> ToolDefinition {
        let mut definition = ToolDefinition::new(name, &self.description);
        for (param_name, param) in &self.parameters {
            definition = definition.with_parameter(
                ToolParameter::new(param_name, &param.description, param.required)
                    .with_type(&param.param_type),
            );
        }
        if let Some(partner) = &self.complementary {
            definition = definition.with_complementary(partner);
        }
        definition
    }

    pub(super) fn validate(&self, name: &str) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        match (&self.endpoint, &self.response) {
            (None, None) => issues.push(ConfigIssue::error(
                format!("tools.{name}"),
                "needs either `endpoint` or `response`",
            )),
            (Some(_), Some(_)) => issues.push(ConfigIssue::warning(
                format!("tools.{name}.response"),
                "ignored because `endpoint` is set",
            )),
            _ => {}
        }
        if self.description.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                format!("tools.{name}.description"),
                "empty description; the model may not know when to call it",
            ));
        }
        if self.complementary.as_deref() == Some(name) {
            issues.push(ConfigIssue::error(
                format!("tools.{name}.complementary"),
                "a tool cannot complement itself",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_definition() {
        let config: FileToolConfig = toml::from_str(
            r#"
description = "Stats"
endpoint = "http://localhost/champions"
complementary = "champion_lore"

[parameters.name]
description = "Champion name"

[parameters.level]
type = "integer"
required = false
"#,
        )
        .unwrap();
        let definition = config.to_definition("champion_details");

        assert_eq!(definition.name, "champion_details");
        assert_eq!(definition.complementary.as_deref(), Some("champion_lore"));
        assert_eq!(definition.parameters.len(), 2);
        let level = definition.parameters.iter().find(|p| p.name == "level").unwrap();
        assert_eq!(level.param_type, "integer");
        assert!(!level.required);
        assert!(config.validate("champion_details").is_empty());
    }

    #[test]
    fn test_needs_a_backend() {
        let config = FileToolConfig {
            description: "Nothing behind it".to_string(),
            ..Default::default()
        };
        let issues = config.validate("ghost");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_static_response() {
        let config: FileToolConfig = toml::from_str(
            r#"
description = "Tip of the day"
response = { tip = "Upgrade your hyperdrive first.", llm_cache_duration = 2 }
"#,
        )
        .unwrap();
        assert_eq!(
            config.response.as_ref().and_then(|r| r["tip"].as_str()),
            Some("Upgrade your hyperdrive first.")
        );
    }
}
