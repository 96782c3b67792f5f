//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers.

use async_trait::async_trait;
use droidmind_domain::{LlmResponse, Message};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// A call is stateless: the full transcript is sent every time. When `tools`
/// is `None` the model must answer in text.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send `transcript` and return the model's reply
    async fn call_model(
        &self,
        transcript: &[Message],
        tools: Option<&[Value]>,
    ) -> Result<LlmResponse, GatewayError>;
}
