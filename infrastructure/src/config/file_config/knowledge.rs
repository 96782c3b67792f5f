//! Knowledge source configuration from TOML (`[knowledge]` section)

use serde::{Deserialize, Serialize};

/// ```toml
/// [knowledge]
/// endpoint = "http://localhost:8080/knowledge"
/// ```
///
/// Without an endpoint the secondary tier answers from the model alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileKnowledgeConfig {
    pub endpoint: Option<String>,
}
