//! Tool Registry
//!
//! The [`ToolRegistry`] maps tool names to typed [`ToolHandler`]s and
//! implements [`ToolExecutorPort`].
//!
//! # Usage
//!
//! ```ignore
//! let registry = ToolRegistry::builder()
//!     .register(HttpToolHandler::new(details, "http://localhost:8080/champions"))?
//!     .register(HttpToolHandler::new(lore, "http://localhost:8080/lore"))?
//!     .alias("character_lore", "champion_lore")
//!     .build()?;
//!
//! let output = registry.execute(&ToolCall::new("c1", "champion_lore").with_arg("name", "Leia")).await;
//! ```
//!
//! # Validation
//!
//! - `register` rejects a second handler with the same name and malformed
//!   definitions (empty name, duplicate parameters)
//! - `build` rejects unknown complementary partners and dangling aliases

use crate::config::FileToolConfig;
use crate::tools::fixed::StaticToolHandler;
use crate::tools::http::HttpToolHandler;
use async_trait::async_trait;
use droidmind_application::ToolExecutorPort;
use droidmind_domain::{DomainError, ToolCall, ToolDefinition, ToolError, ToolOutput, ToolSpec};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// A backend for one tool
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn definition(&self) -> &ToolDefinition;

    async fn invoke(&self, call: &ToolCall) -> Result<ToolOutput, ToolError>;
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("Invalid tool definition: {0}")]
    InvalidDefinition(#[from] DomainError),
}

/// Collects handlers and aliases, then validates the whole set
#[derive(Default)]
pub struct ToolRegistryBuilder {
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
    spec: ToolSpec,
}

impl ToolRegistryBuilder {
    pub fn register<H: ToolHandler + 'static>(self, handler: H) -> Result<Self, RegistryError> {
        self.register_arc(Arc::new(handler))
    }

    pub fn register_arc(mut self, handler: Arc<dyn ToolHandler>) -> Result<Self, RegistryError> {
        let definition = handler.definition().clone();
        definition.check()?;
        if self.handlers.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateTool(definition.name));
        }
        debug!(tool = %definition.name, "Registered tool");
        self.handlers.insert(definition.name.clone(), handler);
        self.spec = self.spec.register(definition);
        Ok(self)
    }

    pub fn alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.spec = self.spec.register_alias(alias, canonical);
        self
    }

    pub fn build(self) -> Result<ToolRegistry, RegistryError> {
        self.spec.validate()?;
        Ok(ToolRegistry {
            handlers: self.handlers,
            tool_spec: self.spec,
        })
    }
}

/// Tool registry dispatching calls to handlers by name
pub struct ToolRegistry {
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
    tool_spec: ToolSpec,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// A registry with no tools
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
            tool_spec: ToolSpec::new(),
        }
    }

    /// Build handlers for every `[tools.<name>]` entry.
    ///
    /// Entries with an `endpoint` become HTTP tools, entries with only a
    /// `response` become static tools.
    pub fn from_config(
        tools: &BTreeMap<String, FileToolConfig>,
        client: reqwest::Client,
    ) -> Result<Self, RegistryError> {
        let mut builder = Self::builder();
        for (name, config) in tools {
            let definition = config.to_definition(name);
            builder = match (&config.endpoint, &config.response) {
                (Some(endpoint), _) => builder.register(
                    HttpToolHandler::new(definition, endpoint)
                        .with_client(client.clone())
                        .with_default_cache_duration(config.cache_duration),
                )?,
                (None, Some(response)) => builder.register(
                    StaticToolHandler::new(definition, response.clone())
                        .with_default_cache_duration(config.cache_duration),
                )?,
                (None, None) => {
                    return Err(RegistryError::InvalidDefinition(
                        DomainError::InvalidToolDefinition(format!(
                            "tool '{name}' has neither an endpoint nor a response"
                        )),
                    ));
                }
            };
            for alias in &config.aliases {
                builder = builder.alias(alias, name);
            }
        }
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolOutput, ToolError> {
        let handler = self
            .tool_spec
            .resolve(&call.tool_name)
            .and_then(|name| self.handlers.get(name))
            .ok_or_else(|| ToolError::unknown_tool(&call.tool_name))?;
        handler.invoke(call).await
    }
}
