//! Tool domain value objects: immutable output and error types
//!
//! A backend answers a call with a [`ToolOutput`]; the invoker pairs it with
//! the originating call to form the [`ToolResult`] that lands in the
//! transcript. Bad calls become a [`ToolResult`] too, carrying a
//! [`ToolError`] payload the model can read and react to.
//!
//! | Code | Raised for | Turn continues? |
//! |------|-----------|-----------------|
//! | `INVALID_ARGUMENT` | Malformed/non-object arguments, failed validation | Yes |
//! | `NOT_FOUND` | Unknown tool name | Yes |
//! | `EXECUTION_FAILED` | Backend failure | No |
//! | `TIMEOUT` | Backend exceeded its time budget | No |

use super::entities::ToolCall;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Key in a structured tool result that carries the cache duration hint
pub const CACHE_DURATION_KEY: &str = "llm_cache_duration";

/// Error raised while handling a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "EXECUTION_FAILED")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", format!("Unknown tool: {}", name.into()))
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            "TIMEOUT",
            format!("Operation timed out: {}", operation.into()),
        )
    }

    /// Errors the model caused and can correct by issuing a different call
    pub fn is_recoverable(&self) -> bool {
        matches!(self.code.as_str(), "INVALID_ARGUMENT" | "NOT_FOUND")
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// What a backend returns for one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Text or structured result
    pub result: Value,
    /// Number of turns the result stays reusable; `None`/0 means never cache
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_duration: Option<u32>,
}

impl ToolOutput {
    pub fn new(result: impl Into<Value>) -> Self {
        Self {
            result: result.into(),
            cache_duration: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Value::String(text.into()))
    }

    pub fn with_cache_duration(mut self, turns: u32) -> Self {
        self.cache_duration = Some(turns);
        self
    }

    /// Build from a backend JSON reply, lifting `llm_cache_duration` out of
    /// an object result into the cache hint.
    pub fn from_json(result: Value) -> Self {
        let cache_duration = result
            .get(CACHE_DURATION_KEY)
            .and_then(Value::as_u64)
            .map(|d| d.min(u32::MAX as u64) as u32);
        Self {
            result,
            cache_duration,
        }
    }

    /// A positive cache hint, if present
    pub fn cacheable_for(&self) -> Option<u32> {
        self.cache_duration.filter(|d| *d > 0)
    }
}

/// Result of a tool call as recorded in the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Id of the call this result answers
    pub call_id: String,
    /// Name of the tool that was called
    pub function_name: String,
    /// Arguments the tool was called with
    pub arguments: Map<String, Value>,
    /// Output, or `{"error": {...}}` for a rejected call
    pub result: Value,
    /// Served from the result cache instead of the backend
    #[serde(default)]
    pub from_cache: bool,
}

impl ToolResult {
    pub fn new(call: &ToolCall, result: Value) -> Self {
        Self {
            call_id: call.id.clone(),
            function_name: call.tool_name.clone(),
            arguments: call.arguments.clone(),
            result,
            from_cache: false,
        }
    }

    /// Result for a call that was rejected before reaching a backend
    pub fn rejected(
        call_id: impl Into<String>,
        function_name: impl Into<String>,
        arguments: Map<String, Value>,
        error: &ToolError,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            function_name: function_name.into(),
            arguments,
            result: json!({ "error": error }),
            from_cache: false,
        }
    }

    pub fn cached(mut self) -> Self {
        self.from_cache = true;
        self
    }

    /// Whether the payload is an error object
    pub fn is_error(&self) -> bool {
        self.result.get("error").is_some_and(Value::is_object)
    }

    /// Result rendered as plain text (strings verbatim, everything else as JSON)
    pub fn result_text(&self) -> String {
        match &self.result {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_codes() {
        let err = ToolError::unknown_tool("warp_drive").with_details("not registered");
        assert_eq!(err.code, "NOT_FOUND");
        assert!(err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "[NOT_FOUND] Unknown tool: warp_drive (not registered)"
        );
        assert!(!ToolError::execution_failed("db down").is_recoverable());
        assert!(!ToolError::timeout("champion_lore").is_recoverable());
    }

    #[test]
    fn test_output_lifts_cache_hint() {
        let out = ToolOutput::from_json(json!({"faction": "Rebels", "llm_cache_duration": 3}));
        assert_eq!(out.cache_duration, Some(3));
        assert_eq!(out.cacheable_for(), Some(3));

        let volatile = ToolOutput::from_json(json!({"greeting": "hi", "llm_cache_duration": 0}));
        assert_eq!(volatile.cacheable_for(), None);

        assert_eq!(ToolOutput::text("plain").cacheable_for(), None);
    }

    #[test]
    fn test_rejected_result_is_error() {
        let err = ToolError::invalid_argument("bad json");
        let result = ToolResult::rejected("call_9", "champion_details", Map::new(), &err);

        assert!(result.is_error());
        assert_eq!(result.result["error"]["code"], "INVALID_ARGUMENT");
        assert!(!ToolResult::new(&ToolCall::new("c", "t"), json!("fine")).is_error());
    }

    #[test]
    fn test_result_text() {
        let call = ToolCall::new("c", "t");
        assert_eq!(ToolResult::new(&call, json!("verbatim")).result_text(), "verbatim");
        assert_eq!(ToolResult::new(&call, json!({"a": 1})).result_text(), r#"{"a":1}"#);
        assert!(ToolResult::new(&call, json!("x")).cached().from_cache);
    }
}
