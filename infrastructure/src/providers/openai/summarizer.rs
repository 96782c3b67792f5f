//! Summarizer backed by the chat completions gateway

use super::gateway::OpenAiGateway;
use async_trait::async_trait;
use droidmind_application::{GatewayError, LlmGateway, SummarizerError, SummarizerPort};
use droidmind_domain::Message;

fn instruction(target_size: usize) -> String {
    format!(
        "Condense the conversation below into a factual summary of at most {target_size} \
characters. Keep names, questions asked and answers given. Write plain text without \
markdown."
    )
}

/// Summarizes memory batches with a (usually cheaper) model
pub struct OpenAiSummarizer {
    gateway: OpenAiGateway,
}

impl OpenAiSummarizer {
    pub fn new(gateway: OpenAiGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl SummarizerPort for OpenAiSummarizer {
    async fn summarize(&self, text: &str, target_size: usize) -> Result<String, SummarizerError> {
        let transcript = [Message::system(instruction(target_size)), Message::user(text)];
        let response = self
            .gateway
            .call_model(&transcript, None)
            .await
            .map_err(|e| match e {
                GatewayError::ConnectionError(_) | GatewayError::Timeout => {
                    SummarizerError::Unavailable(e.to_string())
                }
                other => SummarizerError::Failed(other.to_string()),
            })?;
        Ok(response.text_content().trim().to_string())
    }
}
