//! The tier abstraction the supervisor drives.

use crate::ports::llm_gateway::GatewayError;
use crate::use_cases::tool_invoker::InvokeError;
use async_trait::async_trait;
use droidmind_domain::{AgentContext, AgentResult, Tier};
use std::time::Duration;
use thiserror::Error;

/// Why a tier gave up on a turn
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Tool execution failed: {0}")]
    ToolExecution(#[from] InvokeError),

    #[error("Model returned an empty answer")]
    EmptyAnswer,

    #[error("Turn cancelled")]
    Cancelled,
}

/// One way of answering a turn.
///
/// Implementations report failure through [`AgentResult::failure`] instead of
/// returning errors.
#[async_trait]
pub trait Agent: Send + Sync {
    fn tier(&self) -> Tier;

    async fn execute(&self, ctx: &AgentContext) -> AgentResult;
}
