//! Execution parameters for the tool loop
//!
//! [`ExecutionParams`] groups the static parameters that bound one turn of
//! the tool-calling agent. These are application-layer concerns, not domain
//! policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tool loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum model calls per turn; the last one is made without tools.
    pub max_iterations: usize,
    /// Time budget for one model call.
    pub model_timeout: Option<Duration>,
    /// Time budget for one tool execution.
    pub tool_timeout: Option<Duration>,
    /// Run independent tool calls of one batch concurrently.
    pub parallel_tool_calls: bool,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            model_timeout: Some(Duration::from_secs(60)),
            tool_timeout: Some(Duration::from_secs(30)),
            parallel_tool_calls: false,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_model_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.model_timeout = timeout;
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.tool_timeout = timeout;
        self
    }

    pub fn with_parallel_tool_calls(mut self, parallel: bool) -> Self {
        self.parallel_tool_calls = parallel;
        self
    }

    /// Iteration budget, never below one model call
    pub fn iteration_budget(&self) -> usize {
        self.max_iterations.max(1)
    }
}
