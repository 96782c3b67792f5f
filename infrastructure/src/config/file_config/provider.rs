//! Provider configuration from TOML (`[provider]` section)

use super::ConfigIssue;
use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completion endpoint.
///
/// ```toml
/// [provider]
/// base_url = "https://api.openai.com/v1"
/// model = "gpt-4o-mini"
/// summary_model = "gpt-4o-mini"   # defaults to `model`
/// api_key_env = "OPENAI_API_KEY"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Model used by the answering tiers
    pub model: String,
    /// Model used for memory summaries
    pub summary_model: Option<String>,
    /// Environment variable name for the API key
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead)
    pub api_key: Option<String>,
    /// Maximum tokens per response
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            summary_model: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            max_tokens: None,
            temperature: None,
        }
    }
}

impl FileProviderConfig {
    /// API key from the config file, else from the configured env var
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok().filter(|k| !k.is_empty()))
    }

    pub fn summary_model(&self) -> &str {
        self.summary_model.as_deref().unwrap_or(&self.model)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.model.trim().is_empty() {
            issues.push(ConfigIssue::error("provider.model", "model name is empty"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            issues.push(ConfigIssue::error(
                "provider.base_url",
                format!("'{}' is not an http(s) URL", self.base_url),
            ));
        }
        if self.api_key.is_some() {
            issues.push(ConfigIssue::warning(
                "provider.api_key",
                format!("prefer the {} environment variable", self.api_key_env),
            ));
        }
        issues
    }
}
