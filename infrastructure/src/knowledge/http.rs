//! Knowledge source behind an HTTP endpoint
//!
//! The endpoint receives `{"query": "..."}`. A plain-text reply is the
//! background text. A JSON reply is read from its `knowledge`, `text` or
//! `content` field, in that order; a bare JSON string is used as is.

use async_trait::async_trait;
use droidmind_application::{KnowledgeError, KnowledgePort};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

const TEXT_FIELDS: [&str; 3] = ["knowledge", "text", "content"];

pub struct HttpKnowledgeSource {
    endpoint: String,
    client: Client,
}

impl HttpKnowledgeSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}

fn extract_text(body: String) -> String {
    match serde_json::from_str::<Value>(&body) {
        Ok(Value::String(text)) => text,
        Ok(Value::Object(map)) => TEXT_FIELDS
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_default(),
        Ok(Value::Null) => String::new(),
        _ => body,
    }
}

#[async_trait]
impl KnowledgePort for HttpKnowledgeSource {
    async fn lookup(&self, query: &str) -> Result<String, KnowledgeError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(|e| KnowledgeError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KnowledgeError::LookupFailed(format!(
                "{} returned {}",
                self.endpoint, status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| KnowledgeError::LookupFailed(e.to_string()))?;
        let text = extract_text(body).trim().to_string();
        debug!(bytes = text.len(), "Knowledge lookup finished");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;

    #[test]
    fn test_extract_text_variants() {
        assert_eq!(extract_text("plain words".into()), "plain words");
        assert_eq!(extract_text(r#""quoted""#.into()), "quoted");
        assert_eq!(extract_text(r#"{"text": "from field"}"#.into()), "from field");
        assert_eq!(
            extract_text(r#"{"content": "second", "knowledge": "first"}"#.into()),
            "first"
        );
        assert_eq!(extract_text(r#"{"other": 1}"#.into()), "");
    }

    #[tokio::test]
    async fn test_lookup_posts_query() {
        let (url, server) = serve_once(
            200,
            "application/json",
            r#"{"knowledge": "Chewbacca is a Wookiee."}"#,
        )
        .await;
        let text = HttpKnowledgeSource::new(url).lookup("Who is Chewie?").await.unwrap();

        assert_eq!(text, "Chewbacca is a Wookiee.");
        let request = server.await.unwrap();
        assert!(request.contains(r#"{"query":"Who is Chewie?"}"#));
    }

    #[tokio::test]
    async fn test_error_status_fails_lookup() {
        let (url, _server) = serve_once(503, "text/plain", "down").await;
        let err = HttpKnowledgeSource::new(url).lookup("anything").await.unwrap_err();
        assert!(matches!(err, KnowledgeError::LookupFailed(_)));
    }
}
