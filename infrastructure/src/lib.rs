//! Infrastructure layer for droidmind
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod knowledge;
pub mod logging;
pub mod providers;
pub mod tools;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::{ConfigError, ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use knowledge::HttpKnowledgeSource;
pub use logging::JsonlConversationLogger;
pub use providers::{OpenAiGateway, OpenAiSummarizer};
pub use tools::{
    HttpToolHandler, JsonSchemaToolConverter, RegistryError, StaticToolHandler, ToolHandler,
    ToolRegistry,
};
