//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod agent;
mod cache;
mod knowledge;
mod logging;
mod provider;
mod tools;

pub use agent::FileAgentConfig;
pub use cache::FileCacheConfig;
pub use knowledge::FileKnowledgeConfig;
pub use logging::FileLoggingConfig;
pub use provider::FileProviderConfig;
pub use tools::{FileToolConfig, FileToolParameter};

use droidmind_domain::MemoryLimits;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How serious a configuration problem is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Falls back to a usable value
    Warning,
    /// Cannot run with this configuration
    Error,
}

/// A problem found by [`FileConfig::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending key, e.g. `tools.lore.endpoint`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Tool loop and persona
    pub agent: FileAgentConfig,
    /// Running window bounds
    pub memory: MemoryLimits,
    /// Tool result cache
    pub cache: FileCacheConfig,
    /// OpenAI-compatible model endpoint
    pub provider: FileProviderConfig,
    /// Knowledge source of the secondary tier
    pub knowledge: FileKnowledgeConfig,
    /// Tools by name (`[tools.<name>]`)
    pub tools: BTreeMap<String, FileToolConfig>,
    /// Conversation log and diagnostics output
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.agent.validate());
        issues.extend(self.provider.validate());

        if self.memory.max_exchanges == 0 {
            issues.push(ConfigIssue::warning(
                "memory.max_exchanges",
                "0 keeps no messages in the window; every turn is summarized",
            ));
        }
        if self.memory.summary_target_size < 3 {
            issues.push(ConfigIssue::error(
                "memory.summary_target_size",
                "must be at least 3 bytes",
            ));
        }

        for (name, tool) in &self.tools {
            issues.extend(tool.validate(name));
            if let Some(partner) = &tool.complementary
                && !self.tools.contains_key(partner)
            {
                issues.push(ConfigIssue::error(
                    format!("tools.{name}.complementary"),
                    format!("unknown tool '{partner}'"),
                ));
            }
        }

        issues
    }

    /// Only the issues that prevent startup
    pub fn errors(&self) -> Vec<ConfigIssue> {
        self.validate().into_iter().filter(ConfigIssue::is_error).collect()
    }
}
