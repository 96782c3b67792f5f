//! Dependency wiring
//!
//! Builds every adapter from the loaded configuration and hands back an
//! [`Assistant`] owning the supervisor and the session store.

use anyhow::{Context, Result, bail};
use droidmind_application::{
    Agent, ConversationLogger, EmergencyAgent, FallbackSupervisor, KnowledgeAgent,
    NoConversationLogger, NoKnowledge, Session, SessionStore, ToolCallingAgent, ToolResultCache,
};
use droidmind_domain::{ConversationMemory, ScreenContext};
use droidmind_infrastructure::{
    FileConfig, HttpKnowledgeSource, JsonSchemaToolConverter, JsonlConversationLogger,
    OpenAiGateway, OpenAiSummarizer, ToolRegistry,
};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub struct Assistant {
    supervisor: FallbackSupervisor,
    store: SessionStore,
    session_id: String,
}

impl Assistant {
    pub fn session(&self) -> Arc<Mutex<Session>> {
        self.store.get_or_create(&self.session_id)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Drop the current conversation and start over under the same id
    pub fn reset(&self) {
        self.store.remove(&self.session_id);
    }

    pub async fn ask(&self, question: &str) -> String {
        let session = self.session();
        let mut session = session.lock().await;
        self.supervisor.process_turn(question, &mut session).await
    }

    pub async fn memory_snapshot(&self) -> (ConversationMemory, usize) {
        let session = self.session();
        let session = session.lock().await;
        (
            self.supervisor.memory_snapshot(&session),
            session.compactor().llm_summarization_count(),
        )
    }

    pub async fn set_screen(&self, screen: Option<ScreenContext>) {
        let session = self.session();
        session.lock().await.set_screen(screen);
    }
}

/// `name` or `name=<json>`
pub fn parse_screen(raw: &str) -> Result<ScreenContext> {
    match raw.split_once('=') {
        Some((name, data)) => {
            let data: Value = serde_json::from_str(data)
                .with_context(|| format!("screen data for '{name}' is not valid JSON"))?;
            Ok(ScreenContext::new(name.trim(), data))
        }
        None => Ok(ScreenContext::new(raw.trim(), Value::Null)),
    }
}

fn conversation_logger(
    config: &FileConfig,
    log_dir: Option<&Path>,
    session_id: &str,
) -> Arc<dyn ConversationLogger> {
    let logger = match (&config.logging.conversation_log, log_dir) {
        (Some(path), _) => JsonlConversationLogger::new(path),
        (None, Some(dir)) => JsonlConversationLogger::for_session(dir, session_id),
        (None, None) => return Arc::new(NoConversationLogger),
    };
    match logger {
        Some(logger) => {
            info!(path = %logger.path().display(), "Conversation log enabled");
            Arc::new(logger)
        }
        None => Arc::new(NoConversationLogger),
    }
}

pub fn build(
    config: &FileConfig,
    session_id: String,
    log_dir: Option<&Path>,
    cancellation: CancellationToken,
) -> Result<Assistant> {
    if session_id.trim().is_empty() {
        bail!("session id must not be empty");
    }
    if config.provider.resolve_api_key().is_none() {
        warn!(
            env = %config.provider.api_key_env,
            "No API key configured; requests are sent without authorization"
        );
    }

    let client = reqwest::Client::new();
    let logger = conversation_logger(config, log_dir, &session_id);
    let cache = Arc::new(ToolResultCache::new(config.cache.to_cache_config()));
    let persona = config.agent.persona.clone();

    let registry = Arc::new(
        ToolRegistry::from_config(&config.tools, client.clone())
            .context("invalid [tools] configuration")?,
    );
    info!(tools = registry.len(), "Tool registry ready");

    let gateway = Arc::new(OpenAiGateway::from_config(&config.provider));
    let summarizer = OpenAiSummarizer::new(
        OpenAiGateway::from_config(&config.provider).with_model(config.provider.summary_model()),
    );

    let primary: Arc<dyn Agent> = Arc::new(
        ToolCallingAgent::new(gateway.clone(), registry, cache.clone(), &JsonSchemaToolConverter)
            .with_params(config.agent.to_execution_params())
            .with_persona(persona.clone())
            .with_logger(logger.clone())
            .with_cancellation(cancellation.clone()),
    );

    let secondary: Arc<dyn Agent> = match &config.knowledge.endpoint {
        Some(endpoint) => Arc::new(
            KnowledgeAgent::new(
                gateway,
                Arc::new(HttpKnowledgeSource::new(endpoint).with_client(client)),
            )
            .with_persona(persona.clone())
            .with_model_timeout(config.agent.model_timeout())
            .with_cancellation(cancellation.clone()),
        ),
        None => Arc::new(
            KnowledgeAgent::new(gateway, Arc::new(NoKnowledge))
                .with_persona(persona.clone())
                .with_model_timeout(config.agent.model_timeout())
                .with_cancellation(cancellation.clone()),
        ),
    };

    let supervisor = FallbackSupervisor::new(vec![primary, secondary], cache)
        .with_emergency(EmergencyAgent::new(persona))
        .with_logger(logger.clone())
        .with_cancellation(cancellation);

    let store = SessionStore::new(config.memory)
        .with_summarizer(Arc::new(summarizer))
        .with_logger(logger);

    Ok(Assistant {
        supervisor,
        store,
        session_id,
    })
}
