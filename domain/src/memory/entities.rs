//! Memory entities

use super::render::serialized_size;
use crate::session::entities::Message;
use serde::{Deserialize, Serialize};

/// Bounds for a session's running window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryLimits {
    /// Maximum number of messages kept in the running window
    pub max_exchanges: usize,
    /// Maximum serialized size (bytes) of the running window
    pub max_summary_size: usize,
    /// Size (bytes) the rolling summary is compressed to
    pub summary_target_size: usize,
}

impl Default for MemoryLimits {
    fn default() -> Self {
        Self {
            max_exchanges: 10,
            max_summary_size: 4000,
            summary_target_size: 3000,
        }
    }
}

impl MemoryLimits {
    /// Whether `window` breaks either bound
    pub fn exceeded_by(&self, window: &[Message]) -> bool {
        window.len() > self.max_exchanges || serialized_size(window) > self.max_summary_size
    }
}

/// The most recent completed user → assistant pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastExchange {
    pub user: Message,
    pub assistant: Message,
}

/// Per-session conversation state.
///
/// `old_messages ++ running_messages` is the full transcript; `summary`
/// compresses everything in `old_messages`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationMemory {
    pub summary: Option<String>,
    pub running_messages: Vec<Message>,
    pub old_messages: Vec<Message>,
    pub last_user_message: Option<String>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages replayed to the model on the next turn
    pub fn window(&self) -> &[Message] {
        &self.running_messages
    }

    /// Messages ever recorded (archived + window)
    pub fn total_messages(&self) -> usize {
        self.old_messages.len() + self.running_messages.len()
    }

    /// Whether the conversation has at most `n` recorded messages
    pub fn is_fresh(&self, n: usize) -> bool {
        self.total_messages() <= n
    }

    /// Most recent assistant answer and the user message that preceded it.
    ///
    /// Scans archived messages, the window and the pending user message.
    pub fn last_exchange(&self) -> Option<LastExchange> {
        let pending = self.last_user_message.as_deref().map(Message::user);
        let transcript: Vec<&Message> = self
            .old_messages
            .iter()
            .chain(self.running_messages.iter())
            .chain(pending.iter())
            .collect();

        let assistant_at = transcript.iter().rposition(|m| m.is_assistant())?;
        let user_at = transcript[..assistant_at].iter().rposition(|m| m.is_user())?;

        Some(LastExchange {
            user: transcript[user_at].clone(),
            assistant: transcript[assistant_at].clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_default() {
        let limits = MemoryLimits::default();
        assert_eq!(limits.max_exchanges, 10);
        assert_eq!(limits.max_summary_size, 4000);
        assert_eq!(limits.summary_target_size, 3000);
    }

    #[test]
    fn test_limits_exceeded_by_count_or_size() {
        let limits = MemoryLimits {
            max_exchanges: 2,
            max_summary_size: 200,
            summary_target_size: 100,
        };
        assert!(!limits.exceeded_by(&[Message::user("a"), Message::assistant("b")]));
        assert!(limits.exceeded_by(&[
            Message::user("a"),
            Message::assistant("b"),
            Message::user("c"),
        ]));
        assert!(limits.exceeded_by(&[Message::user("x".repeat(300))]));
    }

    #[test]
    fn test_last_exchange_empty() {
        assert_eq!(ConversationMemory::new().last_exchange(), None);

        let memory = ConversationMemory {
            running_messages: vec![Message::assistant("Greetings, cadet.")],
            ..Default::default()
        };
        assert_eq!(memory.last_exchange(), None);
    }

    #[test]
    fn test_last_exchange_spans_archive_and_window() {
        let memory = ConversationMemory {
            old_messages: vec![Message::user("Who is Han Solo?")],
            running_messages: vec![
                Message::assistant("A smuggler."),
                Message::developer("screen: roster"),
            ],
            last_user_message: Some("And Chewbacca?".to_string()),
            ..Default::default()
        };

        let exchange = memory.last_exchange().unwrap();
        assert_eq!(exchange.user.content, "Who is Han Solo?");
        assert_eq!(exchange.assistant.content, "A smuggler.");
    }

    #[test]
    fn test_last_exchange_picks_latest_pair() {
        let memory = ConversationMemory {
            running_messages: vec![
                Message::user("first"),
                Message::assistant("one"),
                Message::user("second"),
                Message::assistant("two"),
                Message::user("third"),
            ],
            ..Default::default()
        };
        let exchange = memory.last_exchange().unwrap();
        assert_eq!(exchange.user.content, "second");
        assert_eq!(exchange.assistant.content, "two");
    }

    #[test]
    fn test_window_and_counts() {
        let memory = ConversationMemory {
            old_messages: vec![Message::user("a")],
            running_messages: vec![Message::assistant("b")],
            ..Default::default()
        };
        assert_eq!(memory.window().len(), 1);
        assert_eq!(memory.total_messages(), 2);
        assert!(memory.is_fresh(2));
        assert!(!memory.is_fresh(1));
    }
}
