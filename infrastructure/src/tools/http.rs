//! HTTP-backed tools
//!
//! The call's arguments are POSTed as a JSON object. A JSON reply is the
//! structured result (its `llm_cache_duration` becomes the cache hint); any
//! other reply is kept as text.

use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use droidmind_domain::{ToolCall, ToolDefinition, ToolError, ToolOutput, truncate};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

pub struct HttpToolHandler {
    definition: ToolDefinition,
    endpoint: String,
    client: Client,
    default_cache_duration: Option<u32>,
}

impl HttpToolHandler {
    pub fn new(definition: ToolDefinition, endpoint: impl Into<String>) -> Self {
        Self {
            definition,
            endpoint: endpoint.into(),
            client: Client::new(),
            default_cache_duration: None,
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Cache hint used when the backend reply carries none
    pub fn with_default_cache_duration(mut self, turns: Option<u32>) -> Self {
        self.default_cache_duration = turns;
        self
    }
}

/// Statuses meaning the backend rejected the arguments
fn is_argument_rejection(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY
    )
}

pub(crate) fn apply_default_cache(mut output: ToolOutput, default: Option<u32>) -> ToolOutput {
    if output.cache_duration.is_none()
        && let Some(turns) = default
    {
        output = output.with_cache_duration(turns);
    }
    output
}

#[async_trait]
impl ToolHandler for HttpToolHandler {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, call: &ToolCall) -> Result<ToolOutput, ToolError> {
        debug!(tool = %self.definition.name, endpoint = %self.endpoint, "Calling tool endpoint");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&call.arguments)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ToolError::timeout(&self.definition.name)
                } else {
                    ToolError::execution_failed(format!("{} unreachable", self.definition.name))
                        .with_details(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ToolError::execution_failed(format!("{}: unreadable reply", self.definition.name))
                .with_details(e.to_string())
        })?;

        if !status.is_success() {
            warn!(tool = %self.definition.name, %status, "Tool endpoint returned an error");
            let message = format!("{} returned {}: {}", self.definition.name, status, truncate(&body, 300));
            return Err(if is_argument_rejection(status) {
                ToolError::invalid_argument(message)
            } else {
                ToolError::execution_failed(message)
            });
        }

        let output = match serde_json::from_str::<Value>(&body) {
            Ok(json) => ToolOutput::from_json(json),
            Err(_) => ToolOutput::text(body),
        };
        Ok(apply_default_cache(output, self.default_cache_duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;

    fn lore() -> ToolDefinition {
        ToolDefinition::new("champion_lore", "Champion background")
    }

    #[tokio::test]
    async fn test_json_reply_with_cache_hint() {
        let (url, server) = serve_once(
            200,
            "application/json",
            r#"{"lore": "Princess of Alderaan", "llm_cache_duration": 3}"#,
        )
        .await;
        let handler = HttpToolHandler::new(lore(), url);
        let output = handler
            .invoke(&ToolCall::new("c1", "champion_lore").with_arg("name", "Leia"))
            .await
            .unwrap();

        assert_eq!(output.result["lore"], "Princess of Alderaan");
        assert_eq!(output.cacheable_for(), Some(3));
        let request = server.await.unwrap();
        assert!(request.starts_with("POST"));
        assert!(request.contains(r#"{"name":"Leia"}"#));
    }

    #[tokio::test]
    async fn test_text_reply_uses_default_cache() {
        let (url, _server) = serve_once(200, "text/plain", "Scoundrel.").await;
        let handler = HttpToolHandler::new(lore(), url).with_default_cache_duration(Some(2));
        let output = handler.invoke(&ToolCall::new("c1", "champion_lore")).await.unwrap();

        assert_eq!(output.result, Value::String("Scoundrel.".to_string()));
        assert_eq!(output.cacheable_for(), Some(2));
    }

    #[tokio::test]
    async fn test_not_found_is_recoverable() {
        let (url, _server) = serve_once(404, "text/plain", "no such champion").await;
        let err = HttpToolHandler::new(lore(), url)
            .invoke(&ToolCall::new("c1", "champion_lore"))
            .await
            .unwrap_err();
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_server_error_is_fatal() {
        let (url, _server) = serve_once(500, "text/plain", "database offline").await;
        let err = HttpToolHandler::new(lore(), url)
            .invoke(&ToolCall::new("c1", "champion_lore"))
            .await
            .unwrap_err();
        assert_eq!(err.code, "EXECUTION_FAILED");
        assert!(err.message.contains("database offline"));
    }
}
