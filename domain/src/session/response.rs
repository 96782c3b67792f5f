//! What a model call returns.
//!
//! A response is a list of content blocks mixing text with tool requests.
//! Tool request arguments are kept exactly as the provider delivered them
//! (an object, or a string encoding one) so that parsing failures surface
//! per call instead of failing the whole response.

use crate::tool::entities::RawToolCall;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single block of content within a model response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A text content block from the model.
    Text { text: String },

    /// A tool use request from the model.
    ToolUse {
        /// Provider-assigned id for pairing the request with its result.
        id: String,
        /// Requested tool name; not guaranteed to exist.
        name: String,
        /// Raw arguments: an object or a JSON string.
        input: Value,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn tool_use(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        ContentBlock::ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    /// Returns the text content if this is a `Text` block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response
    EndTurn,
    /// The model wants tools executed
    ToolUse,
    /// Hit the token limit
    MaxTokens,
    /// Provider-specific stop reason
    Other(String),
}

impl StopReason {
    /// Map an OpenAI-style `finish_reason`
    pub fn from_finish_reason(reason: &str) -> Self {
        match reason {
            "stop" => StopReason::EndTurn,
            "tool_calls" | "function_call" => StopReason::ToolUse,
            "length" => StopReason::MaxTokens,
            other => StopReason::Other(other.to_string()),
        }
    }
}

/// A structured response from a model.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    /// Content blocks in the response (text and/or tool use).
    pub content: Vec<ContentBlock>,
    /// Why the model stopped generating.
    pub stop_reason: Option<StopReason>,
    /// Model identifier (if returned by the API).
    pub model: Option<String>,
}

impl LlmResponse {
    /// Create a text-only response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }
    }

    /// Create a response that only requests tools.
    pub fn from_tool_calls(calls: impl IntoIterator<Item = RawToolCall>) -> Self {
        Self {
            content: calls
                .into_iter()
                .map(|c| ContentBlock::tool_use(c.id, c.name, c.arguments))
                .collect(),
            stop_reason: Some(StopReason::ToolUse),
            model: None,
        }
    }

    /// Concatenate all `Text` content blocks into a single string.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Tool requests in the order the model issued them.
    pub fn tool_calls(&self) -> Vec<RawToolCall> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => {
                    Some(RawToolCall::new(id, name, input.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if the response contains any tool use requests.
    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }
}
