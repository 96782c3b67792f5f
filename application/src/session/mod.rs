//! Sessions - per-conversation state and the store that owns them.
//!
//! A [`Session`] owns its memory, turn counter and screen context. Turns of
//! one session never overlap: the [`SessionStore`] hands out sessions behind
//! a `tokio::sync::Mutex`.
//!
//! A session also remembers which cached tool results it used, so they can be
//! replayed on its following turns without leaking into other sessions that
//! share the same [`ToolResultCache`].

use crate::cache::ToolResultCache;
use crate::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use crate::ports::summarizer::SummarizerPort;
use crate::use_cases::compact_memory::{CompactionReport, MemoryCompactor};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use droidmind_domain::{
    AgentContext, ConversationMemory, MemoryLimits, Message, ScreenContext, ToolResult,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// One end-user conversation
pub struct Session {
    id: String,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
    action_id: u64,
    message_count: usize,
    screen: Option<ScreenContext>,
    compactor: MemoryCompactor,
    /// Replayable tool results by cache key
    cached_tools: BTreeMap<String, ReplayEntry>,
}

#[derive(Debug, Clone)]
struct ReplayEntry {
    result: ToolResult,
    remaining: u32,
}

impl Session {
    pub fn new(id: impl Into<String>, compactor: MemoryCompactor) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            created_at: now,
            last_activity: now,
            action_id: 0,
            message_count: 0,
            screen: None,
            compactor,
            cached_tools: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    /// Turns started so far
    pub fn action_id(&self) -> u64 {
        self.action_id
    }

    /// User messages received so far
    pub fn message_count(&self) -> usize {
        self.message_count
    }

    pub fn screen(&self) -> Option<&ScreenContext> {
        self.screen.as_ref()
    }

    /// Replace the screen the user is looking at (`None` clears it).
    pub fn set_screen(&mut self, screen: Option<ScreenContext>) {
        self.screen = screen;
    }

    pub fn memory(&self) -> &ConversationMemory {
        self.compactor.memory()
    }

    pub fn compactor(&self) -> &MemoryCompactor {
        &self.compactor
    }

    /// Start a turn and build the context the tiers answer from.
    pub fn begin_turn(&mut self, user_message: &str) -> AgentContext {
        self.action_id += 1;
        self.message_count += 1;
        self.last_activity = Utc::now();

        let memory = self.compactor.memory();
        let prior_messages = memory.total_messages();
        let window = memory.window().to_vec();
        let summary = memory.summary.clone();
        self.compactor.begin_turn(user_message);
        let last_exchange = self.compactor.memory().last_exchange();

        debug!(session = %self.id, action_id = self.action_id, "Turn started");
        AgentContext::new(&self.id, user_message)
            .with_action_id(self.action_id)
            .with_memory_window(window)
            .with_summary(summary)
            .with_screen(self.screen.clone())
            .with_last_exchange(last_exchange)
            .with_prior_messages(prior_messages)
            .with_cached_tools(self.cached_tool_results())
    }

    /// Record the turn's messages in memory.
    pub async fn finish_turn(&mut self, messages: Vec<Message>) -> CompactionReport {
        self.last_activity = Utc::now();
        self.compactor.finalize(messages).await
    }

    /// Remember the turn's tool results that are still live in `cache`, then
    /// age everything this session holds by one turn. Returns how many
    /// results stay replayable.
    pub fn track_cached_tools(&mut self, messages: &[Message], cache: &ToolResultCache) -> usize {
        let live = messages
            .iter()
            .filter_map(Message::as_tool_result)
            .filter(|result| !result.is_error())
            .filter_map(|result| {
                cache
                    .peek(&result.function_name, &result.arguments)
                    .map(|entry| (entry, result))
            });
        for (entry, result) in live {
            self.cached_tools.insert(
                entry.key,
                ReplayEntry {
                    result: result.clone(),
                    remaining: entry.original_duration,
                },
            );
        }

        self.cached_tools.retain(|_, entry| {
            entry.remaining = entry.remaining.saturating_sub(1);
            entry.remaining > 0
        });
        self.cached_tools.len()
    }

    /// Tool results to replay on the next turn
    pub fn cached_tool_results(&self) -> Vec<ToolResult> {
        self.cached_tools
            .values()
            .map(|entry| entry.result.clone())
            .collect()
    }

    /// Drop the turn in progress; memory stays as it was.
    pub fn abandon_turn(&mut self) {
        self.compactor.abandon_turn();
    }

    /// Time since the last turn started or finished
    pub fn idle_for(&self) -> Duration {
        (Utc::now() - self.last_activity).to_std().unwrap_or_default()
    }
}

/// Sessions by id, created on first use
pub struct SessionStore {
    sessions: DashMap<String, Arc<Mutex<Session>>>,
    limits: MemoryLimits,
    summarizer: Option<Arc<dyn SummarizerPort>>,
    logger: Arc<dyn ConversationLogger>,
}

impl SessionStore {
    pub fn new(limits: MemoryLimits) -> Self {
        Self {
            sessions: DashMap::new(),
            limits,
            summarizer: None,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_summarizer(mut self, summarizer: Arc<dyn SummarizerPort>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// A fresh session configured like the ones this store creates
    pub fn new_session(&self, id: &str) -> Session {
        let mut compactor = MemoryCompactor::new(self.limits).with_logger(self.logger.clone());
        if let Some(summarizer) = &self.summarizer {
            compactor = compactor.with_summarizer(summarizer.clone());
        }
        Session::new(id, compactor)
    }

    pub fn get_or_create(&self, id: &str) -> Arc<Mutex<Session>> {
        self.sessions
            .entry(id.to_string())
            .or_insert_with(|| {
                info!(session = %id, "Created session");
                Arc::new(Mutex::new(self.new_session(id)))
            })
            .clone()
    }

    pub fn get(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.get(id).map(|s| s.value().clone())
    }

    pub fn remove(&self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Drop sessions idle longer than `max_idle`. Sessions in the middle of a
    /// turn are kept. Returns the number removed.
    pub fn prune_idle(&self, max_idle: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| match session.try_lock() {
            Ok(session) => session.idle_for() <= max_idle,
            Err(_) => true,
        });
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            info!(removed, remaining = self.sessions.len(), "Pruned idle sessions");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
