//! Chat completions gateway
//!
//! Implements `LlmGateway` against any OpenAI-compatible
//! `/chat/completions` endpoint.

use super::types::{ChatRequest, ChatResponse, convert_response, to_wire_messages};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use droidmind_application::{GatewayError, LlmGateway};
use droidmind_domain::{LlmResponse, Message, truncate};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

/// Gateway to an OpenAI-compatible chat completion API
#[derive(Clone)]
pub struct OpenAiGateway {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl OpenAiGateway {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Gateway for the answering tiers
    pub fn from_config(config: &FileProviderConfig) -> Self {
        let mut gateway = Self::new(&config.base_url, &config.model);
        gateway.api_key = config.resolve_api_key();
        gateway.max_tokens = config.max_tokens;
        gateway.temperature = config.temperature;
        gateway
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn call_model(
        &self,
        transcript: &[Message],
        tools: Option<&[Value]>,
    ) -> Result<LlmResponse, GatewayError> {
        let body = ChatRequest {
            model: &self.model,
            messages: to_wire_messages(transcript),
            tools,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };
        debug!(
            model = %self.model,
            messages = body.messages.len(),
            tools = tools.map_or(0, |t| t.len()),
            "Calling chat completions"
        );

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(%status, model = %self.model, "Chat completion request failed");
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}: {}",
                status,
                truncate(&text, 500)
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        convert_response(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway = OpenAiGateway::new("http://localhost:11434/v1/", "llama3");
        assert_eq!(gateway.endpoint(), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn test_from_config() {
        let config = FileProviderConfig {
            model: "llama3".to_string(),
            api_key: Some("sk-local".to_string()),
            max_tokens: Some(512),
            ..Default::default()
        };
        let gateway = OpenAiGateway::from_config(&config);
        assert_eq!(gateway.model(), "llama3");
        assert_eq!(gateway.api_key.as_deref(), Some("sk-local"));
        assert_eq!(gateway.max_tokens, Some(512));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        let gateway = OpenAiGateway::new("http://127.0.0.1:9", "llama3");
        let err = gateway
            .call_model(&[Message::user("Hi")], None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::ConnectionError(_) | GatewayError::RequestFailed(_)
        ));
    }

    #[tokio::test]
    async fn test_call_with_tools_sends_schemas() {
        use crate::test_support::serve_once;
        use serde_json::json;

        let (url, server) = serve_once(
            200,
            "application/json",
            r#"{"model":"llama3","choices":[{"message":{"role":"assistant","content":"Punch it."},"finish_reason":"stop"}]}"#,
        )
        .await;
        let schemas = vec![json!({"type": "function", "function": {"name": "champion_lore"}})];
        let response = OpenAiGateway::new(url, "llama3")
            .with_api_key("sk-local")
            .call_model(&[Message::user("Hi")], Some(&schemas))
            .await
            .unwrap();

        assert_eq!(response.text_content(), "Punch it.");
        let request = server.await.unwrap();
        assert!(request.contains(r#""tools":[{"#));
        assert!(request.to_lowercase().contains("authorization: bearer sk-local"));
    }
}
