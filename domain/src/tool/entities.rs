//! Tool domain entities

use super::canonical::{cache_key, canonical_json, parse_arguments};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Definition of a tool that the model may call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "champion_details")
    pub name: String,
    /// Human-readable description shown to the model
    pub description: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
    /// Partner tool called alongside this one with identical arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complementary: Option<String>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// JSON type hint (e.g., "string", "integer", "boolean")
    pub param_type: String,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            complementary: None,
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Declare a partner tool that receives a copy of every call to this one
    pub fn with_complementary(mut self, partner: impl Into<String>) -> Self {
        self.complementary = Some(partner.into());
        self
    }

    /// Structural checks that do not depend on other tools.
    pub fn check(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidToolDefinition(
                "tool name must not be empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for param in &self.parameters {
            if !seen.insert(param.name.as_str()) {
                return Err(DomainError::InvalidToolDefinition(format!(
                    "duplicate parameter '{}' on tool '{}'",
                    param.name, self.name
                )));
            }
        }
        if self.complementary.as_deref() == Some(self.name.as_str()) {
            return Err(DomainError::InvalidToolDefinition(format!(
                "tool '{}' cannot be its own complement",
                self.name
            )));
        }
        Ok(())
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// Specification of available tools for the agent
///
/// Tools are kept in name order so schema lists handed to the model are
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: BTreeMap<String, ToolDefinition>,
    /// Alias → canonical name mapping (e.g. "character_lore" → "champion_lore")
    aliases: HashMap<String, String>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    /// Register a single alias mapping (builder pattern)
    pub fn register_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), canonical.into());
        self
    }

    /// Resolve a name: the canonical name if registered, else the alias target
    pub fn resolve<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.tools.contains_key(name) {
            Some(name)
        } else {
            self.aliases
                .get(name)
                .map(|s| s.as_str())
                .filter(|canonical| self.tools.contains_key(*canonical))
        }
    }

    /// Get tool definition by canonical name or alias
    pub fn get_resolved(&self, name: &str) -> Option<&ToolDefinition> {
        self.resolve(name).and_then(|canonical| self.tools.get(canonical))
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// The declared partner of `name`, if any
    pub fn complement_of(&self, name: &str) -> Option<&str> {
        self.tools
            .get(name)
            .and_then(|t| t.complementary.as_deref())
    }

    /// Cross-tool consistency: every definition is well formed and every
    /// declared partner and alias target is a registered tool.
    pub fn validate(&self) -> Result<(), DomainError> {
        for tool in self.tools.values() {
            tool.check()?;
            if let Some(partner) = &tool.complementary
                && !self.tools.contains_key(partner)
            {
                return Err(DomainError::InvalidToolDefinition(format!(
                    "tool '{}' declares unknown complementary tool '{}'",
                    tool.name, partner
                )));
            }
        }
        for (alias, canonical) in &self.aliases {
            if !self.tools.contains_key(canonical) {
                return Err(DomainError::InvalidToolDefinition(format!(
                    "alias '{}' points at unknown tool '{}'",
                    alias, canonical
                )));
            }
        }
        Ok(())
    }
}

/// A tool request exactly as the model sent it, before argument parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawToolCall {
    pub id: String,
    pub name: String,
    /// An argument object, or a string encoding one
    pub arguments: Value,
}

impl RawToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Parse the arguments into a [`ToolCall`]
    pub fn parse(&self) -> Result<ToolCall, DomainError> {
        Ok(ToolCall {
            id: self.id.clone(),
            tool_name: self.name.clone(),
            arguments: parse_arguments(&self.arguments)?,
        })
    }
}

/// A call to a tool with parsed arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call identifier used to pair the call with its result
    pub id: String,
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, tool_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tool_name: tool_name.into(),
            arguments: Map::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_arguments(mut self, arguments: Map<String, Value>) -> Self {
        self.arguments = arguments;
        self
    }

    /// A call to `partner` with the same arguments, identified after this call
    pub fn complement(&self, partner: &str) -> Self {
        Self {
            id: format!("{}_{}", self.id, partner),
            tool_name: partner.to_string(),
            arguments: self.arguments.clone(),
        }
    }

    /// `name(canonical arguments)`
    pub fn signature(&self) -> String {
        format!("{}({})", self.tool_name, canonical_json(&self.arguments))
    }

    /// Identity of the call ignoring its id; equal for semantically identical calls
    pub fn fingerprint(&self) -> String {
        cache_key(&self.tool_name, &self.arguments)
    }

    /// Whether both calls name the same tool with equal arguments
    pub fn same_invocation(&self, other: &ToolCall) -> bool {
        self.tool_name == other.tool_name
            && canonical_json(&self.arguments) == canonical_json(&other.arguments)
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn details() -> ToolDefinition {
        ToolDefinition::new("champion_details", "Structured champion stats")
            .with_parameter(ToolParameter::new("name", "Champion name", true))
            .with_complementary("champion_lore")
    }

    fn lore() -> ToolDefinition {
        ToolDefinition::new("champion_lore", "Narrative champion background")
            .with_parameter(ToolParameter::new("name", "Champion name", true))
    }

    #[test]
    fn test_tool_spec_lookup_and_complement() {
        let spec = ToolSpec::new().register(details()).register(lore());

        assert!(spec.contains("champion_details"));
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.complement_of("champion_details"), Some("champion_lore"));
        assert_eq!(spec.complement_of("champion_lore"), None);
        assert_eq!(spec.complement_of("unknown"), None);
        assert_eq!(
            spec.names().collect::<Vec<_>>(),
            vec!["champion_details", "champion_lore"]
        );
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_tool_spec_aliases() {
        let spec = ToolSpec::new()
            .register(lore())
            .register_alias("character_lore", "champion_lore");

        assert_eq!(spec.resolve("champion_lore"), Some("champion_lore"));
        assert_eq!(spec.resolve("character_lore"), Some("champion_lore"));
        assert_eq!(spec.resolve("unknown"), None);
        assert_eq!(spec.get_resolved("character_lore").unwrap().name, "champion_lore");
        assert!(spec.get("character_lore").is_none());
    }

    #[test]
    fn test_validate_rejects_unknown_partner() {
        let spec = ToolSpec::new().register(details());
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("unknown complementary tool 'champion_lore'"));
    }

    #[test]
    fn test_validate_rejects_dangling_alias() {
        let spec = ToolSpec::new().register(lore()).register_alias("bio", "biography");
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_check_rejects_self_complement_and_duplicate_params() {
        let selfish = ToolDefinition::new("loop", "x").with_complementary("loop");
        assert!(selfish.check().is_err());

        let dup = ToolDefinition::new("dup", "x")
            .with_parameter(ToolParameter::new("a", "", true))
            .with_parameter(ToolParameter::new("a", "", false));
        assert!(dup.check().is_err());
    }

    #[test]
    fn test_raw_call_parses_string_arguments() {
        let raw = RawToolCall::new("call_1", "champion_details", json!("{\"name\":\"Han Solo\"}"));
        let call = raw.parse().unwrap();
        assert_eq!(call.id, "call_1");
        assert_eq!(call.get_string("name"), Some("Han Solo"));

        let bad = RawToolCall::new("call_2", "champion_details", json!("{oops"));
        assert!(bad.parse().is_err());
    }

    #[test]
    fn test_complement_copies_arguments() {
        let call = ToolCall::new("call_1", "champion_details").with_arg("name", "Han Solo");
        let partner = call.complement("champion_lore");

        assert_eq!(partner.tool_name, "champion_lore");
        assert_eq!(partner.arguments, call.arguments);
        assert_ne!(partner.id, call.id);
    }

    #[test]
    fn test_same_invocation_ignores_id_and_key_order() {
        let a = ToolCall::new("a", "search")
            .with_arg("query", "falcon")
            .with_arg("limit", 3);
        let b = ToolCall::new("b", "search")
            .with_arg("limit", 3)
            .with_arg("query", "falcon");
        let c = ToolCall::new("c", "search").with_arg("query", "falcon");

        assert!(a.same_invocation(&b));
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert!(!a.same_invocation(&c));
    }
}
