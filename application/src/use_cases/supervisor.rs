//! FallbackSupervisor - answers a turn by trying tiers in order.
//!
//! ```text
//! primary ──fail──▶ secondary ──fail──▶ emergency (cannot fail)
//!    │                  │                    │
//!    └──────── first answer wins ────────────┘
//!                       ▼
//!   fold turn into memory, track replayable tool results, sweep the cache
//! ```
//!
//! Tier failures are logged and never reach the user.

use crate::cache::ToolResultCache;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::session::Session;
use crate::use_cases::agent::Agent;
use crate::use_cases::fallback_agents::EmergencyAgent;
use crate::use_cases::shared::is_cancelled;
use droidmind_domain::{AgentContext, AgentResult, ConversationMemory, Message, Tier, ULTIMATE_APOLOGY};
use futures::FutureExt;
use serde_json::json;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub struct FallbackSupervisor {
    tiers: Vec<Arc<dyn Agent>>,
    emergency: EmergencyAgent,
    cache: Arc<ToolResultCache>,
    logger: Arc<dyn ConversationLogger>,
    cancellation: Option<CancellationToken>,
}

impl FallbackSupervisor {
    /// `tiers` run in the given order before the emergency tier.
    pub fn new(tiers: Vec<Arc<dyn Agent>>, cache: Arc<ToolResultCache>) -> Self {
        Self {
            tiers,
            emergency: EmergencyAgent::default(),
            cache,
            logger: Arc::new(NoConversationLogger),
            cancellation: None,
        }
    }

    pub fn with_emergency(mut self, emergency: EmergencyAgent) -> Self {
        self.emergency = emergency;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Answer one user message. Always returns text.
    pub async fn process_turn(&self, user_message: &str, session: &mut Session) -> String {
        let ctx = session.begin_turn(user_message);
        self.logger.log(ConversationEvent::new(
            "turn_started",
            json!({
                "session_id": ctx.session_id,
                "action_id": ctx.action_id,
                "user_message": user_message,
            }),
        ));

        let (tier, result) = self.run_tiers(&ctx).await;
        let answer = result
            .answer_text()
            .unwrap_or(ULTIMATE_APOLOGY)
            .to_string();

        if is_cancelled(&self.cancellation) {
            warn!(session = %ctx.session_id, "Turn cancelled, memory left unchanged");
            session.abandon_turn();
            return self.emergency.apology();
        }

        let messages = if result.messages.is_empty() {
            vec![Message::user(user_message), Message::assistant(&answer)]
        } else {
            result.messages
        };
        let replayable = session.track_cached_tools(&messages, &self.cache);
        let report = session.finish_turn(messages).await;
        let swept = self.cache.sweep();

        info!(
            session = %ctx.session_id,
            action_id = ctx.action_id,
            tier = %tier,
            "Turn completed"
        );
        self.logger.log(ConversationEvent::new(
            "turn_completed",
            json!({
                "session_id": ctx.session_id,
                "action_id": ctx.action_id,
                "tier": tier.as_str(),
                "answer": answer,
                "compacted": report.compacted(),
                "cache_swept": swept,
                "cached_tools": replayable,
            }),
        ));
        answer
    }

    /// Read-only copy of a session's memory
    pub fn memory_snapshot(&self, session: &Session) -> ConversationMemory {
        session.memory().clone()
    }

    async fn run_tiers(&self, ctx: &AgentContext) -> (Tier, AgentResult) {
        for agent in &self.tiers {
            if is_cancelled(&self.cancellation) {
                break;
            }
            let tier = agent.tier();
            let result = match AssertUnwindSafe(agent.execute(ctx)).catch_unwind().await {
                Ok(result) => result,
                Err(_) => {
                    error!(tier = %tier, "Tier panicked");
                    AgentResult::failure("tier panicked")
                }
            };
            if result.is_success() {
                return (tier, result);
            }

            let reason = result
                .error_content
                .clone()
                .unwrap_or_else(|| "no answer".to_string());
            warn!(tier = %tier, error = %reason, "Tier failed, falling back");
            self.logger.log(ConversationEvent::new(
                "tier_failed",
                json!({
                    "session_id": ctx.session_id,
                    "action_id": ctx.action_id,
                    "tier": tier.as_str(),
                    "error": reason,
                }),
            ));
        }

        (Tier::Emergency, self.emergency.execute(ctx).await)
    }
}
