//! Configuration file loading for droidmind
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. `DROIDMIND_`-prefixed environment variables (`__` separates sections)
//! 3. Project root: `./droidmind.toml`
//! 4. Global: `~/.config/droidmind/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileAgentConfig, FileCacheConfig, FileConfig, FileKnowledgeConfig,
    FileLoggingConfig, FileProviderConfig, FileToolConfig, FileToolParameter, Severity,
};
pub use loader::{ConfigError, ConfigLoader};
