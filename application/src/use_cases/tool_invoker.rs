//! ToolInvoker - runs one batch of model-requested tool calls.
//!
//! ```text
//! RawToolCall[] ──parse/resolve──▶ ToolCall[] ──augment──▶ + complementary calls
//!                                                   │
//!          ┌────────────────────────────────────────┘
//!          ▼
//!   validate ─▶ dedup (transcript + batch) ─▶ cache lookup ─▶ execute
//!          │                                                     │
//!          └──── one tool-call + one tool-result message per processed call, request order
//! ```
//!
//! Bad calls (unparsable arguments, unknown tool, failed validation, a
//! recoverable backend error) become error payloads the model can read. A
//! backend failure or timeout aborts the batch.

use crate::cache::ToolResultCache;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::shared::with_timeout;
use droidmind_domain::{
    DefaultToolValidator, Message, RawToolCall, ToolCall, ToolError, ToolResult, ToolSpec,
    ToolValidator,
};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Failures that abort the current attempt
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvokeError {
    #[error("Tool '{tool}' failed: {error}")]
    Execution { tool: String, error: ToolError },

    #[error("Tool '{tool}' timed out after {after:?}")]
    Timeout { tool: String, after: Duration },
}

/// Append to `calls` a partner call for every call whose tool declares one,
/// unless an identical partner call is already in the batch.
pub fn augment_with_complements(mut calls: Vec<ToolCall>, spec: &ToolSpec) -> Vec<ToolCall> {
    let originals = calls.len();
    for i in 0..originals {
        let Some(partner) = spec.complement_of(&calls[i].tool_name) else {
            continue;
        };
        let synthetic = calls[i].complement(partner);
        if !calls.iter().any(|c| c.same_invocation(&synthetic)) {
            debug!(
                tool = %calls[i].tool_name,
                partner = %partner,
                "Adding complementary tool call"
            );
            calls.push(synthetic);
        }
    }
    calls
}

enum Prepared {
    Valid(ToolCall),
    Rejected(ToolCall, ToolError),
}

enum Planned {
    Rejected(ToolCall, ToolError),
    Cached(ToolCall, Value),
    Execute(ToolCall),
}

/// Executes tool batches against a [`ToolExecutorPort`] with caching and
/// deduplication.
pub struct ToolInvoker<T: ToolExecutorPort> {
    executor: Arc<T>,
    cache: Arc<ToolResultCache>,
    validator: DefaultToolValidator,
    tool_timeout: Option<Duration>,
    parallel: bool,
    logger: Arc<dyn ConversationLogger>,
}

impl<T: ToolExecutorPort> ToolInvoker<T> {
    pub fn new(executor: Arc<T>, cache: Arc<ToolResultCache>) -> Self {
        Self {
            executor,
            cache,
            validator: DefaultToolValidator,
            tool_timeout: None,
            parallel: false,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_tool_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.tool_timeout = timeout;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn tool_spec(&self) -> &ToolSpec {
        self.executor.tool_spec()
    }

    /// Process `requests` and return the messages to append to `transcript`.
    pub async fn run_batch(
        &self,
        requests: &[RawToolCall],
        transcript: &[Message],
    ) -> Result<Vec<Message>, InvokeError> {
        let prepared = self.prepare(requests);
        let planned = self.plan(prepared, transcript);

        let mut results: Vec<Option<ToolResult>> = vec![None; planned.len()];
        let mut sequential = Vec::new();
        let mut concurrent = Vec::new();
        let related = self.complementary_tools();

        for (i, item) in planned.iter().enumerate() {
            match item {
                Planned::Rejected(call, error) => {
                    results[i] = Some(ToolResult::rejected(
                        &call.id,
                        &call.tool_name,
                        call.arguments.clone(),
                        error,
                    ));
                }
                Planned::Cached(call, value) => {
                    results[i] = Some(ToolResult::new(call, value.clone()).cached());
                }
                Planned::Execute(call) => {
                    if self.parallel && !related.contains(call.tool_name.as_str()) {
                        concurrent.push((i, call));
                    } else {
                        sequential.push((i, call));
                    }
                }
            }
        }

        if !concurrent.is_empty() {
            let outcomes =
                futures::future::join_all(concurrent.iter().map(|(_, call)| self.execute_one(call)))
                    .await;
            for ((i, _), outcome) in concurrent.iter().zip(outcomes) {
                results[*i] = Some(outcome?);
            }
        }
        for (i, call) in sequential {
            results[i] = Some(self.execute_one(call).await?);
        }

        let mut messages = Vec::with_capacity(planned.len() * 2);
        for (item, result) in planned.into_iter().zip(results) {
            let call = match item {
                Planned::Rejected(call, _) | Planned::Cached(call, _) | Planned::Execute(call) => {
                    call
                }
            };
            let Some(result) = result else { continue };
            self.logger.log(ConversationEvent::new(
                "tool_call",
                json!({
                    "call_id": call.id,
                    "tool": call.tool_name,
                    "arguments": call.arguments,
                    "cached": result.from_cache,
                    "error": result.is_error(),
                }),
            ));
            messages.push(Message::tool_call(call));
            messages.push(Message::tool_result(result));
        }
        Ok(messages)
    }

    /// Parse arguments, resolve aliases and add complementary calls.
    fn prepare(&self, requests: &[RawToolCall]) -> Vec<Prepared> {
        let spec = self.executor.tool_spec();
        let mut prepared: Vec<Prepared> = requests
            .iter()
            .map(|raw| {
                let call = match raw.parse() {
                    Ok(call) => call,
                    Err(e) => {
                        warn!(tool = %raw.name, error = %e, "Rejecting tool call with bad arguments");
                        return Prepared::Rejected(
                            ToolCall::new(&raw.id, &raw.name),
                            ToolError::invalid_argument(e.to_string()),
                        );
                    }
                };
                match spec.resolve(&raw.name) {
                    Some(canonical) => {
                        let canonical = canonical.to_string();
                        Prepared::Valid(ToolCall { tool_name: canonical, ..call })
                    }
                    None => {
                        warn!(tool = %raw.name, "Rejecting call to unknown tool");
                        Prepared::Rejected(call, ToolError::unknown_tool(&raw.name))
                    }
                }
            })
            .collect();

        let valid: Vec<ToolCall> = prepared
            .iter()
            .filter_map(|p| match p {
                Prepared::Valid(call) => Some(call.clone()),
                Prepared::Rejected(..) => None,
            })
            .collect();
        let originals = valid.len();
        let augmented = augment_with_complements(valid, spec);
        prepared.extend(augmented.into_iter().skip(originals).map(Prepared::Valid));
        prepared
    }

    /// Validate, deduplicate and consult the cache.
    fn plan(&self, prepared: Vec<Prepared>, transcript: &[Message]) -> Vec<Planned> {
        let spec = self.executor.tool_spec();
        let mut seen: HashSet<String> = transcript
            .iter()
            .filter_map(Message::as_tool_call)
            .map(ToolCall::fingerprint)
            .collect();

        let mut planned = Vec::with_capacity(prepared.len());
        for item in prepared {
            let call = match item {
                Prepared::Rejected(call, error) => {
                    planned.push(Planned::Rejected(call, error));
                    continue;
                }
                Prepared::Valid(call) => call,
            };

            if let Some(definition) = spec.get(&call.tool_name)
                && let Err(reason) = self.validator.validate(&call, definition)
            {
                warn!(tool = %call.tool_name, %reason, "Tool call failed validation");
                planned.push(Planned::Rejected(call, ToolError::invalid_argument(reason)));
                continue;
            }

            if !seen.insert(call.fingerprint()) {
                debug!(tool = %call.tool_name, "Skipping duplicate tool call");
                continue;
            }

            match self.cache.lookup(&call.tool_name, &call.arguments) {
                Some(entry) => {
                    debug!(tool = %call.tool_name, "Tool result served from cache");
                    self.logger.log(ConversationEvent::new(
                        "tool_cache_hit",
                        json!({ "tool": call.tool_name, "key": entry.key }),
                    ));
                    planned.push(Planned::Cached(call, entry.result));
                }
                None => planned.push(Planned::Execute(call)),
            }
        }
        planned
    }

    async fn execute_one(&self, call: &ToolCall) -> Result<ToolResult, InvokeError> {
        debug!(tool = %call.tool_name, call_id = %call.id, "Executing tool");
        match with_timeout(self.tool_timeout, self.executor.execute(call)).await {
            Err(after) => {
                warn!(tool = %call.tool_name, ?after, "Tool execution timed out");
                Err(InvokeError::Timeout {
                    tool: call.tool_name.clone(),
                    after,
                })
            }
            Ok(Ok(output)) => {
                if let Some(turns) = output.cacheable_for() {
                    self.cache
                        .put(&call.tool_name, &call.arguments, output.result.clone(), turns);
                }
                Ok(ToolResult::new(call, output.result))
            }
            Ok(Err(error)) if error.is_recoverable() => {
                warn!(tool = %call.tool_name, %error, "Tool rejected its arguments");
                Ok(ToolResult::rejected(
                    &call.id,
                    &call.tool_name,
                    call.arguments.clone(),
                    &error,
                ))
            }
            Ok(Err(error)) => {
                warn!(tool = %call.tool_name, %error, "Tool execution failed");
                Err(InvokeError::Execution {
                    tool: call.tool_name.clone(),
                    error,
                })
            }
        }
    }

    /// Tools that take part in a complementary pair
    fn complementary_tools(&self) -> HashSet<&str> {
        let spec = self.executor.tool_spec();
        spec.all()
            .filter_map(|t| {
                t.complementary
                    .as_deref()
                    .map(|partner| [t.name.as_str(), partner])
            })
            .flatten()
            .collect()
    }
}
