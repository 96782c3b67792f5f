//! Canonical argument encoding and cache-key derivation.
//!
//! Two calls are "the same call" when their tool names match and their
//! arguments are equal as JSON values, regardless of key order. Everything
//! that compares calls (deduplication, the result cache) goes through
//! [`canonical_json`] so that equality is defined in exactly one place.

use crate::core::error::DomainError;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Re-build a value with every object's keys in sorted order.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key.as_str()]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Compact JSON text of `arguments` with keys sorted at every depth.
pub fn canonical_json(arguments: &Map<String, Value>) -> String {
    canonicalize(&Value::Object(arguments.clone())).to_string()
}

/// Stable key for a `(tool_name, arguments)` pair: hex SHA-256 of `name:canonical_json`.
pub fn cache_key(tool_name: &str, arguments: &Map<String, Value>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(tool_name.as_bytes());
    hasher.update(b":");
    hasher.update(canonical_json(arguments).as_bytes());
    hex::encode(hasher.finalize())
}

/// Coerce raw model-provided arguments into an argument map.
///
/// Models send either a JSON object or a string containing one. `null` and
/// blank strings mean "no arguments".
pub fn parse_arguments(raw: &Value) -> Result<Map<String, Value>, DomainError> {
    match raw {
        Value::Object(map) => Ok(map.clone()),
        Value::Null => Ok(Map::new()),
        Value::String(text) if text.trim().is_empty() => Ok(Map::new()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(DomainError::ArgumentsNotAnObject(json_type(&other).to_string())),
            Err(e) => Err(DomainError::MalformedArguments(e.to_string())),
        },
        other => Err(DomainError::ArgumentsNotAnObject(json_type(other).to_string())),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
