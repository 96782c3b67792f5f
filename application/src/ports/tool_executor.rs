//! Tool Executor port
//!
//! Defines the interface for running tools against external knowledge backends.

use async_trait::async_trait;
use droidmind_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::{ToolError, ToolOutput},
};

/// Port for tool execution
///
/// `execute` receives calls whose tool name is registered and whose
/// arguments passed validation. An `Err` with a recoverable code
/// (`INVALID_ARGUMENT`, `NOT_FOUND`) is shown to the model; any other error
/// means the backend is broken and aborts the current attempt.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().get(name).is_some()
    }

    /// Get the definition of a specific tool
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get(name)
    }

    /// Execute a tool call asynchronously
    async fn execute(&self, call: &ToolCall) -> Result<ToolOutput, ToolError>;
}
