//! Tools that answer with a configured payload

use crate::tools::http::apply_default_cache;
use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use droidmind_domain::{ToolCall, ToolDefinition, ToolError, ToolOutput};
use serde_json::Value;

pub struct StaticToolHandler {
    definition: ToolDefinition,
    response: Value,
    default_cache_duration: Option<u32>,
}

impl StaticToolHandler {
    pub fn new(definition: ToolDefinition, response: Value) -> Self {
        Self {
            definition,
            response,
            default_cache_duration: None,
        }
    }

    pub fn with_default_cache_duration(mut self, turns: Option<u32>) -> Self {
        self.default_cache_duration = turns;
        self
    }
}

#[async_trait]
impl ToolHandler for StaticToolHandler {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, _call: &ToolCall) -> Result<ToolOutput, ToolError> {
        Ok(apply_default_cache(
            ToolOutput::from_json(self.response.clone()),
            self.default_cache_duration,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_embedded_hint_wins() {
        let handler = StaticToolHandler::new(
            ToolDefinition::new("daily_tip", "Tip of the day"),
            json!({"tip": "Upgrade the hyperdrive.", "llm_cache_duration": 4}),
        )
        .with_default_cache_duration(Some(1));
        let output = handler.invoke(&ToolCall::new("c1", "daily_tip")).await.unwrap();
        assert_eq!(output.cacheable_for(), Some(4));
    }

    #[tokio::test]
    async fn test_no_hint_means_uncached() {
        let handler = StaticToolHandler::new(ToolDefinition::new("daily_tip", "Tip"), json!("Hi"));
        let output = handler.invoke(&ToolCall::new("c1", "daily_tip")).await.unwrap();
        assert_eq!(output.cacheable_for(), None);
        assert_eq!(output.result, json!("Hi"));
    }
}
