//! Transcript entities

use crate::tool::entities::ToolCall;
use crate::tool::value_objects::ToolResult;
use serde::{Deserialize, Serialize};

/// Role of a message in a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
    /// A tool invocation requested by the model
    ToolCall,
    /// The outcome of a tool invocation
    ToolResult,
    /// Out-of-band guidance injected by the runtime (summaries, screen context)
    Developer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::ToolCall => "tool_call",
            Role::ToolResult => "tool_result",
            Role::Developer => "developer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message in a transcript (Entity)
///
/// Messages are never edited after being appended; tool messages carry the
/// structured call or result next to a plain-text rendering in `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_result: Option<ToolResult>,
}

impl Message {
    fn plain(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_call: None,
            tool_result: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain(Role::Assistant, content)
    }

    pub fn developer(content: impl Into<String>) -> Self {
        Self::plain(Role::Developer, content)
    }

    /// Record a tool invocation. `content` holds `name(arguments)` for plain-text consumers.
    pub fn tool_call(call: ToolCall) -> Self {
        Self {
            role: Role::ToolCall,
            content: call.signature(),
            tool_call: Some(call),
            tool_result: None,
        }
    }

    /// Record a tool outcome. `content` holds the result rendered as text.
    pub fn tool_result(result: ToolResult) -> Self {
        Self {
            role: Role::ToolResult,
            content: result.result_text(),
            tool_call: None,
            tool_result: Some(result),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }

    /// The structured call if this is a tool-call message
    pub fn as_tool_call(&self) -> Option<&ToolCall> {
        self.tool_call.as_ref()
    }

    /// The structured result if this is a tool-result message
    pub fn as_tool_result(&self) -> Option<&ToolResult> {
        self.tool_result.as_ref()
    }
}
