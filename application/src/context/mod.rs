//! Context injectors - extra developer messages placed around the user message.
//!
//! An injector may contribute to three slots of the primary tier's prompt:
//!
//! ```text
//! [system] [start ...] [memory window ...] [before_user ...] [user] [after_user ...]
//! ```

use crate::ports::context_retriever::ContextRetrieverPort;
use async_trait::async_trait;
use droidmind_domain::{AgentContext, Message, PersonaPrompt, ToolCall};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

const GREETING_HINT: &str = "This is the start of a new conversation. Greet the user briefly \
before answering.";

#[async_trait]
pub trait ContextInjector: Send + Sync {
    fn name(&self) -> &'static str;

    async fn inject_start(&self, _ctx: &AgentContext) -> Vec<Message> {
        Vec::new()
    }

    async fn inject_before_user(&self, _ctx: &AgentContext) -> Vec<Message> {
        Vec::new()
    }

    async fn inject_after_user(&self, _ctx: &AgentContext) -> Vec<Message> {
        Vec::new()
    }
}

/// Messages gathered from all injectors for one turn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InjectedContext {
    pub start: Vec<Message>,
    pub before_user: Vec<Message>,
    pub after_user: Vec<Message>,
}

impl InjectedContext {
    /// Run every injector in order.
    pub async fn collect(injectors: &[Arc<dyn ContextInjector>], ctx: &AgentContext) -> Self {
        let mut injected = Self::default();
        for injector in injectors {
            injected.start.extend(injector.inject_start(ctx).await);
            injected.before_user.extend(injector.inject_before_user(ctx).await);
            injected.after_user.extend(injector.inject_after_user(ctx).await);
            debug!(injector = injector.name(), "Collected injected context");
        }
        injected
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.before_user.is_empty() && self.after_user.is_empty()
    }
}

/// Injectors every session uses unless configured otherwise
pub fn default_injectors() -> Vec<Arc<dyn ContextInjector>> {
    vec![
        Arc::new(SummaryInjector),
        Arc::new(ScreenContextInjector),
        Arc::new(CachedToolsInjector),
        Arc::new(GreetingInjector),
    ]
}

/// Puts the rolling summary right after the system prompt.
pub struct SummaryInjector;

#[async_trait]
impl ContextInjector for SummaryInjector {
    fn name(&self) -> &'static str {
        "summary"
    }

    async fn inject_start(&self, ctx: &AgentContext) -> Vec<Message> {
        ctx.summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| vec![Message::developer(PersonaPrompt::summary_block(s))])
            .unwrap_or_default()
    }
}

/// Describes the screen the user is looking at.
pub struct ScreenContextInjector;

#[async_trait]
impl ContextInjector for ScreenContextInjector {
    fn name(&self) -> &'static str {
        "screen"
    }

    async fn inject_before_user(&self, ctx: &AgentContext) -> Vec<Message> {
        ctx.screen
            .as_ref()
            .map(|screen| vec![Message::developer(screen.describe())])
            .unwrap_or_default()
    }
}

/// Replays cached tool results the session used recently as call/result
/// pairs, so the model can reuse them without asking again. Results whose
/// call is still in the memory window are not repeated.
pub struct CachedToolsInjector;

#[async_trait]
impl ContextInjector for CachedToolsInjector {
    fn name(&self) -> &'static str {
        "cached_tools"
    }

    async fn inject_before_user(&self, ctx: &AgentContext) -> Vec<Message> {
        let in_window: HashSet<&str> = ctx
            .memory_window
            .iter()
            .filter_map(Message::as_tool_result)
            .map(|result| result.call_id.as_str())
            .collect();

        ctx.cached_tools
            .iter()
            .filter(|result| !in_window.contains(result.call_id.as_str()))
            .flat_map(|result| {
                let call = ToolCall::new(&result.call_id, &result.function_name)
                    .with_arguments(result.arguments.clone());
                [Message::tool_call(call), Message::tool_result(result.clone())]
            })
            .collect()
    }
}

/// Asks for a greeting on a new conversation.
pub struct GreetingInjector;

#[async_trait]
impl ContextInjector for GreetingInjector {
    fn name(&self) -> &'static str {
        "greeting"
    }

    async fn inject_start(&self, ctx: &AgentContext) -> Vec<Message> {
        if ctx.prior_messages <= 1 {
            vec![Message::developer(GREETING_HINT)]
        } else {
            Vec::new()
        }
    }
}

/// Adds snippets related to the previous exchange.
///
/// Not part of [`default_injectors`]: it needs a retriever supplied by the
/// embedding host.
pub struct RecallInjector<R: ContextRetrieverPort> {
    retriever: Arc<R>,
}

impl<R: ContextRetrieverPort> RecallInjector<R> {
    pub fn new(retriever: Arc<R>) -> Self {
        Self { retriever }
    }
}

#[async_trait]
impl<R: ContextRetrieverPort + 'static> ContextInjector for RecallInjector<R> {
    fn name(&self) -> &'static str {
        "recall"
    }

    async fn inject_after_user(&self, ctx: &AgentContext) -> Vec<Message> {
        let Some(exchange) = &ctx.last_exchange else {
            return Vec::new();
        };
        match self.retriever.retrieve(exchange).await {
            Ok(snippets) => snippets
                .into_iter()
                .filter(|s| !s.trim().is_empty())
                .map(|s| Message::developer(format!("Related context: {s}")))
                .collect(),
            Err(e) => {
                warn!(error = %e, "Context retrieval failed, continuing without it");
                Vec::new()
            }
        }
    }
}
