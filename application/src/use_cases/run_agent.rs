//! ToolCallingAgent - the primary tier.
//!
//! Runs the bounded loop of one turn:
//!
//! 1. BuildPrompt - system prompt, injected context, memory window, user message
//! 2. CallModel - transcript plus tool schemas (none on the final iteration)
//! 3. RunTools - the requested batch through the [`ToolInvoker`], then back to 2
//! 4. Done - the model's text is the answer
//!
//! The final iteration offers no tools and asks for an answer, so the loop
//! ends after at most `max_iterations` model calls.

use crate::cache::ToolResultCache;
use crate::config::ExecutionParams;
use crate::context::{ContextInjector, InjectedContext, default_injectors};
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::agent::{Agent, AgentError};
use crate::use_cases::shared::{is_cancelled, with_timeout};
use crate::use_cases::tool_invoker::ToolInvoker;
use async_trait::async_trait;
use droidmind_domain::{
    AgentContext, AgentResult, LlmResponse, LoopPhase, Message, PersonaPrompt, Tier,
};
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Tool-using, LLM-backed agent
pub struct ToolCallingAgent<G: LlmGateway, T: ToolExecutorPort> {
    gateway: Arc<G>,
    invoker: ToolInvoker<T>,
    schemas: Vec<Value>,
    params: ExecutionParams,
    persona: PersonaPrompt,
    injectors: Vec<Arc<dyn ContextInjector>>,
    cancellation: Option<CancellationToken>,
}

impl<G: LlmGateway, T: ToolExecutorPort> ToolCallingAgent<G, T> {
    pub fn new(
        gateway: Arc<G>,
        executor: Arc<T>,
        cache: Arc<ToolResultCache>,
        schema: &dyn ToolSchemaPort,
    ) -> Self {
        let schemas = schema.all_tools_schema(executor.tool_spec());
        let params = ExecutionParams::default();
        let invoker = ToolInvoker::new(executor, cache)
            .with_tool_timeout(params.tool_timeout)
            .with_parallel(params.parallel_tool_calls);
        Self {
            gateway,
            invoker,
            schemas,
            params,
            persona: PersonaPrompt::default(),
            injectors: default_injectors(),
            cancellation: None,
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.invoker = self
            .invoker
            .with_tool_timeout(params.tool_timeout)
            .with_parallel(params.parallel_tool_calls);
        self.params = params;
        self
    }

    pub fn with_persona(mut self, persona: PersonaPrompt) -> Self {
        self.persona = persona;
        self
    }

    pub fn with_injectors(mut self, injectors: Vec<Arc<dyn ContextInjector>>) -> Self {
        self.injectors = injectors;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.invoker = self.invoker.with_logger(logger);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Run the loop. Returns the answer and the messages the turn produced.
    pub async fn run(&self, ctx: &AgentContext) -> Result<(String, Vec<Message>), AgentError> {
        debug!(phase = %LoopPhase::BuildPrompt, session = %ctx.session_id, "Building prompt");
        let injected = InjectedContext::collect(&self.injectors, ctx).await;
        let user = Message::user(&ctx.user_message);

        let mut transcript = vec![Message::system(&self.persona.system_prompt)];
        transcript.extend(injected.start);
        transcript.extend(ctx.memory_window.iter().cloned());
        transcript.extend(injected.before_user);
        transcript.push(user.clone());
        transcript.extend(injected.after_user);

        let mut turn_messages = vec![user];
        let budget = self.params.iteration_budget();

        for iteration in 1..=budget {
            if is_cancelled(&self.cancellation) {
                return Err(AgentError::Cancelled);
            }

            let final_iteration = iteration == budget;
            debug!(phase = %LoopPhase::CallModel, iteration, final_iteration, "Calling model");
            let response = self.call_model(&transcript, final_iteration).await?;
            let requests = response.tool_calls();

            if final_iteration || requests.is_empty() {
                let answer = response.text_content().trim().to_string();
                if answer.is_empty() {
                    return Err(AgentError::EmptyAnswer);
                }
                info!(iteration, "Primary tier produced an answer");
                turn_messages.push(Message::assistant(&answer));
                return Ok((answer, turn_messages));
            }

            if is_cancelled(&self.cancellation) {
                return Err(AgentError::Cancelled);
            }
            debug!(
                phase = %LoopPhase::RunTools,
                iteration,
                requested = requests.len(),
                "Running tools"
            );
            let produced = self.invoker.run_batch(&requests, &transcript).await?;
            transcript.extend(produced.iter().cloned());
            turn_messages.extend(produced);
        }

        // The final iteration always returns above
        Err(AgentError::EmptyAnswer)
    }

    async fn call_model(
        &self,
        transcript: &[Message],
        final_iteration: bool,
    ) -> Result<LlmResponse, AgentError> {
        let call = async {
            if final_iteration {
                let mut last = transcript.to_vec();
                last.push(Message::developer(&self.persona.final_iteration_directive));
                self.gateway.call_model(&last, None).await
            } else {
                let tools = (!self.schemas.is_empty()).then_some(self.schemas.as_slice());
                self.gateway.call_model(transcript, tools).await
            }
        };
        with_timeout(self.params.model_timeout, call)
            .await
            .map_err(AgentError::Timeout)?
            .map_err(AgentError::from)
    }
}

#[async_trait]
impl<G: LlmGateway + 'static, T: ToolExecutorPort + 'static> Agent for ToolCallingAgent<G, T> {
    fn tier(&self) -> Tier {
        Tier::Primary
    }

    async fn execute(&self, ctx: &AgentContext) -> AgentResult {
        match self.run(ctx).await {
            Ok((answer, messages)) => AgentResult::answer(answer, messages),
            Err(e) => AgentResult::failure(e.to_string()),
        }
    }
}
