//! Agent configuration from TOML (`[agent]` section)

use super::ConfigIssue;
use droidmind_application::ExecutionParams;
use droidmind_domain::PersonaPrompt;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// max_iterations = 10
/// model_timeout_secs = 60      # 0 disables the limit
/// tool_timeout_secs = 30
/// parallel_tool_calls = false
///
/// [agent.persona]
/// apologies = ["My circuits are overheating, cadet."]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Maximum model calls per turn
    pub max_iterations: usize,
    /// Seconds allowed for one model call (0 = unlimited)
    pub model_timeout_secs: u64,
    /// Seconds allowed for one tool execution (0 = unlimited)
    pub tool_timeout_secs: u64,
    /// Run independent tool calls concurrently
    pub parallel_tool_calls: bool,
    /// Prompts and canned replies
    pub persona: PersonaPrompt,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            max_iterations: params.max_iterations,
            model_timeout_secs: params.model_timeout.map_or(0, |d| d.as_secs()),
            tool_timeout_secs: params.tool_timeout.map_or(0, |d| d.as_secs()),
            parallel_tool_calls: params.parallel_tool_calls,
            persona: PersonaPrompt::default(),
        }
    }
}

fn seconds(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

impl FileAgentConfig {
    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_iterations(self.max_iterations)
            .with_model_timeout(seconds(self.model_timeout_secs))
            .with_tool_timeout(seconds(self.tool_timeout_secs))
            .with_parallel_tool_calls(self.parallel_tool_calls)
    }

    pub fn model_timeout(&self) -> Option<Duration> {
        seconds(self.model_timeout_secs)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.max_iterations == 0 {
            issues.push(ConfigIssue::warning(
                "agent.max_iterations",
                "0 is treated as 1 (a single call without tools)",
            ));
        }
        if self.persona.system_prompt.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                "agent.persona.system_prompt",
                "empty system prompt",
            ));
        }
        issues
    }
}
