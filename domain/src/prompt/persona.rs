//! Persona prompts and canned replies.

use serde::{Deserialize, Serialize};

/// Returned when every tier, including the canned one, produced nothing.
pub const ULTIMATE_APOLOGY: &str =
    "ERROR 1138: Primary directive compromised. Rebooting memory core.";

const DEFAULT_SYSTEM_PROMPT: &str = "You are a tactical droid advisor embedded in a strategy game. \
Answer questions about characters, ships and game mechanics. Use the available tools to look up \
facts instead of guessing, and keep answers short and in character.";

const DEFAULT_FALLBACK_PROMPT: &str = "You are a tactical droid advisor embedded in a strategy game. \
Your lookup systems are offline. Answer from the knowledge provided below and your own training; \
say so plainly when you are unsure.";

const DEFAULT_FINAL_DIRECTIVE: &str = "This is your final attempt. Provide a complete answer now. \
No tools are available; use only the information already gathered in this conversation.";

const DEFAULT_APOLOGIES: [&str; 8] = [
    "My circuits are overheating from that request. Try asking in simpler terms, cadet.",
    "Tactical error detected in my processors. Recalibrating... please rephrase your query.",
    "My data banks returned static on that one. Ask me again in a moment.",
    "Signal lost somewhere between here and the archives. Please repeat the question.",
    "My logic core flagged that as inconclusive. Could you phrase it differently?",
    "Diagnostic subroutine engaged. I cannot answer that right now, cadet.",
    "Even a droid needs a reboot now and then. Try me again shortly.",
    "Interference detected on all channels. Please resend your request.",
];

/// The text a persona speaks with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaPrompt {
    /// System prompt of the tool-using primary tier
    pub system_prompt: String,
    /// System prompt of the tool-free secondary tier
    pub fallback_prompt: String,
    /// Developer message sent with the last, tool-less model call
    pub final_iteration_directive: String,
    /// Pool the emergency tier picks from
    pub apologies: Vec<String>,
}

impl Default for PersonaPrompt {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            fallback_prompt: DEFAULT_FALLBACK_PROMPT.to_string(),
            final_iteration_directive: DEFAULT_FINAL_DIRECTIVE.to_string(),
            apologies: DEFAULT_APOLOGIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PersonaPrompt {
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Apologies to choose from; falls back to the built-in pool when the
    /// configured one is empty or blank.
    pub fn apology_pool(&self) -> Vec<&str> {
        let configured: Vec<&str> = self
            .apologies
            .iter()
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
            .collect();
        if configured.is_empty() {
            DEFAULT_APOLOGIES.to_vec()
        } else {
            configured
        }
    }

    /// Developer message carrying retrieved knowledge for the secondary tier
    pub fn knowledge_block(knowledge: &str) -> String {
        format!("Available knowledge:\n{}", knowledge)
    }

    /// Developer message carrying the rolling summary
    pub fn summary_block(summary: &str) -> String {
        format!("Previous conversation summary: {}", summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_not_empty() {
        let persona = PersonaPrompt::default();
        assert_eq!(persona.apology_pool().len(), DEFAULT_APOLOGIES.len());
        assert!(!persona.system_prompt.is_empty());
    }

    #[test]
    fn test_blank_pool_falls_back_to_defaults() {
        let persona = PersonaPrompt {
            apologies: vec!["  ".to_string()],
            ..Default::default()
        };
        assert_eq!(persona.apology_pool(), DEFAULT_APOLOGIES.to_vec());
    }

    #[test]
    fn test_custom_pool_used() {
        let persona = PersonaPrompt {
            apologies: vec!["Beep.".to_string()],
            ..Default::default()
        };
        assert_eq!(persona.apology_pool(), vec!["Beep."]);
    }

    #[test]
    fn test_blocks() {
        assert_eq!(
            PersonaPrompt::summary_block("talked about Han"),
            "Previous conversation summary: talked about Han"
        );
        assert!(PersonaPrompt::knowledge_block("facts").starts_with("Available knowledge:"));
    }
}
