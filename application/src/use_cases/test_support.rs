//! Scripted collaborators shared by the use case tests.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::knowledge::{KnowledgeError, KnowledgePort};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::summarizer::{SummarizerError, SummarizerPort};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use async_trait::async_trait;
use droidmind_domain::{
    LlmResponse, Message, RawToolCall, ToolCall, ToolDefinition, ToolError, ToolOutput,
    ToolParameter, ToolSpec,
};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// One scripted model reply
pub(crate) enum ScriptedResponse {
    Response(LlmResponse),
    Error(GatewayError),
    /// Sleep before answering (for timeout tests)
    Delayed(Duration, LlmResponse),
}

impl ScriptedResponse {
    pub(crate) fn text(text: &str) -> Self {
        ScriptedResponse::Response(LlmResponse::from_text(text))
    }

    pub(crate) fn tools(calls: Vec<(&str, &str, Value)>) -> Self {
        ScriptedResponse::Response(LlmResponse::from_tool_calls(
            calls
                .into_iter()
                .map(|(id, name, args)| RawToolCall::new(id, name, args)),
        ))
    }
}

/// What the gateway was asked
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub transcript: Vec<Message>,
    pub tools_offered: bool,
}

/// Gateway that replays a queue of responses and records every call
pub(crate) struct ScriptedGateway {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedGateway {
    pub(crate) fn new(responses: Vec<ScriptedResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn recorded(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn call_model(
        &self,
        transcript: &[Message],
        tools: Option<&[Value]>,
    ) -> Result<LlmResponse, GatewayError> {
        self.calls.lock().unwrap().push(RecordedCall {
            transcript: transcript.to_vec(),
            tools_offered: tools.is_some(),
        });
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(ScriptedResponse::Response(response)) => Ok(response),
            Some(ScriptedResponse::Error(err)) => Err(err),
            Some(ScriptedResponse::Delayed(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            None => Ok(LlmResponse::from_text("(default response)")),
        }
    }
}

/// Tool spec used across tests: a structured/narrative pair plus a volatile tool
pub(crate) fn champion_spec() -> ToolSpec {
    ToolSpec::new()
        .register(
            ToolDefinition::new("champion_details", "Structured champion stats")
                .with_parameter(ToolParameter::new("name", "Champion name", true))
                .with_complementary("champion_lore"),
        )
        .register(
            ToolDefinition::new("champion_lore", "Narrative champion background")
                .with_parameter(ToolParameter::new("name", "Champion name", true)),
        )
        .register(ToolDefinition::new("random_greeting", "A random greeting"))
        .register_alias("character_lore", "champion_lore")
}

/// Executor that records calls and answers from a per-tool script
pub(crate) struct MockToolExecutor {
    spec: ToolSpec,
    outputs: HashMap<String, Result<ToolOutput, ToolError>>,
    delay: Option<Duration>,
    pub executions: Mutex<Vec<ToolCall>>,
}

impl MockToolExecutor {
    pub(crate) fn new() -> Self {
        Self {
            spec: champion_spec(),
            outputs: HashMap::new(),
            delay: None,
            executions: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_output(mut self, tool: &str, output: Result<ToolOutput, ToolError>) -> Self {
        self.outputs.insert(tool.to_string(), output);
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn executed(&self) -> Vec<String> {
        self.executions
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.tool_name.clone())
            .collect()
    }
}

#[async_trait]
impl ToolExecutorPort for MockToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolOutput, ToolError> {
        self.executions.lock().unwrap().push(call.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.outputs.get(&call.tool_name) {
            Some(output) => output.clone(),
            None => Ok(ToolOutput::text(format!(
                "{} for {}",
                call.tool_name,
                call.get_string("name").unwrap_or("nobody")
            ))),
        }
    }
}

/// Schema converter that emits `{"name": ...}` only
pub(crate) struct NameOnlySchema;

impl ToolSchemaPort for NameOnlySchema {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        json!({ "name": tool.name })
    }
}

/// Summarizer returning a fixed text, or always failing
pub(crate) enum StubSummarizer {
    Fixed(String),
    Failing,
}

#[async_trait]
impl SummarizerPort for StubSummarizer {
    async fn summarize(&self, _text: &str, _target_size: usize) -> Result<String, SummarizerError> {
        match self {
            StubSummarizer::Fixed(text) => Ok(text.clone()),
            StubSummarizer::Failing => Err(SummarizerError::Unavailable("offline".to_string())),
        }
    }
}

/// Knowledge source with a fixed answer or error
pub(crate) struct StubKnowledge(pub Result<String, KnowledgeError>);

#[async_trait]
impl KnowledgePort for StubKnowledge {
    async fn lookup(&self, _query: &str) -> Result<String, KnowledgeError> {
        self.0.clone()
    }
}

/// Logger that keeps event types in memory
#[derive(Default)]
pub(crate) struct RecordingLogger {
    pub events: Mutex<Vec<ConversationEvent>>,
}

impl RecordingLogger {
    pub(crate) fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.event_type).collect()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event);
    }
}
