//! Agent value objects - per-turn inputs handed to each tier.

use crate::memory::entities::LastExchange;
use crate::session::entities::Message;
use crate::tool::value_objects::ToolResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the user currently sees in the client UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenContext {
    /// Screen identifier (e.g., "champion_roster")
    pub screen: String,
    /// Structured data shown on that screen
    #[serde(default)]
    pub data: Value,
}

impl ScreenContext {
    pub fn new(screen: impl Into<String>, data: Value) -> Self {
        Self {
            screen: screen.into(),
            data,
        }
    }

    /// One-paragraph description suitable for a developer message
    pub fn describe(&self) -> String {
        if self.data.is_null() {
            format!("The user is on the '{}' screen.", self.screen)
        } else {
            format!(
                "The user is on the '{}' screen showing: {}",
                self.screen, self.data
            )
        }
    }
}

/// Everything a tier needs to answer one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentContext {
    pub session_id: String,
    /// Turn counter of the owning session
    pub action_id: u64,
    pub user_message: String,
    /// Running window replayed before the new user message
    pub memory_window: Vec<Message>,
    pub summary: Option<String>,
    pub screen: Option<ScreenContext>,
    pub last_exchange: Option<LastExchange>,
    /// Messages recorded in the session before this turn
    pub prior_messages: usize,
    /// Cached tool results this session used recently and may replay
    pub cached_tools: Vec<ToolResult>,
}

impl AgentContext {
    pub fn new(session_id: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            action_id: 0,
            user_message: user_message.into(),
            memory_window: Vec::new(),
            summary: None,
            screen: None,
            last_exchange: None,
            prior_messages: 0,
            cached_tools: Vec::new(),
        }
    }

    pub fn with_memory_window(mut self, window: Vec<Message>) -> Self {
        self.memory_window = window;
        self
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_screen(mut self, screen: Option<ScreenContext>) -> Self {
        self.screen = screen;
        self
    }

    pub fn with_action_id(mut self, action_id: u64) -> Self {
        self.action_id = action_id;
        self
    }

    pub fn with_last_exchange(mut self, exchange: Option<LastExchange>) -> Self {
        self.last_exchange = exchange;
        self
    }

    pub fn with_prior_messages(mut self, count: usize) -> Self {
        self.prior_messages = count;
        self
    }

    pub fn with_cached_tools(mut self, results: Vec<ToolResult>) -> Self {
        self.cached_tools = results;
        self
    }
}
