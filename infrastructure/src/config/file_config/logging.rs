//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ```toml
/// [logging]
/// conversation_log = "~/.local/share/droidmind/conversation.jsonl"
/// log_dir = "/var/log/droidmind"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving conversation events
    pub conversation_log: Option<PathBuf>,
    /// Directory for daily-rolling diagnostic logs
    pub log_dir: Option<PathBuf>,
}
