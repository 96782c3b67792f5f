//! Agent entities: tiers, phases and the per-tier result contract.

use crate::session::entities::Message;
use serde::{Deserialize, Serialize};

/// Position of an agent in the fallback chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Tool-using conversational agent
    Primary,
    /// Tool-free agent backed by general knowledge
    Secondary,
    /// Canned in-character apologies; cannot fail
    Emergency,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Primary => "primary",
            Tier::Secondary => "secondary",
            Tier::Emergency => "emergency",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// States of the tool-calling loop
///
/// ```text
/// BuildPrompt ──▶ CallModel ──▶ RunTools ──┐
///                    ▲                      │
///                    └──────────────────────┘
///                    │
///                    └──▶ Done
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopPhase {
    BuildPrompt,
    CallModel,
    RunTools,
    Done,
}

impl LoopPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopPhase::BuildPrompt => "build_prompt",
            LoopPhase::CallModel => "call_model",
            LoopPhase::RunTools => "run_tools",
            LoopPhase::Done => "done",
        }
    }
}

impl std::fmt::Display for LoopPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one tier's attempt at a turn.
///
/// A non-empty `final_answer` means success; otherwise `error_content`
/// explains the failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgentResult {
    pub final_answer: Option<String>,
    pub error_content: Option<String>,
    /// Follow-up agents the tier asks the supervisor to run
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spawn_agents: Vec<String>,
    /// Messages produced during the turn (user message, tool traffic, answer)
    #[serde(skip)]
    pub messages: Vec<Message>,
}

impl AgentResult {
    pub fn answer(text: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            final_answer: Some(text.into()),
            messages,
            ..Default::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error_content: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn with_spawn_agents(mut self, agents: Vec<String>) -> Self {
        self.spawn_agents = agents;
        self
    }

    /// The answer, if present and not blank
    pub fn answer_text(&self) -> Option<&str> {
        self.final_answer
            .as_deref()
            .filter(|answer| !answer.trim().is_empty())
    }

    pub fn is_success(&self) -> bool {
        self.answer_text().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_order_and_display() {
        assert!(Tier::Primary < Tier::Secondary);
        assert!(Tier::Secondary < Tier::Emergency);
        assert_eq!(Tier::Emergency.to_string(), "emergency");
    }

    #[test]
    fn test_result_success_requires_non_blank_answer() {
        assert!(AgentResult::answer("Han Solo flew the Falcon.", vec![]).is_success());
        assert!(!AgentResult::answer("   ", vec![]).is_success());
        assert!(!AgentResult::failure("gateway down").is_success());
        assert_eq!(
            AgentResult::failure("gateway down").error_content.as_deref(),
            Some("gateway down")
        );
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(LoopPhase::RunTools.to_string(), "run_tools");
    }
}
