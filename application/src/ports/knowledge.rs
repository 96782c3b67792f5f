//! Knowledge port
//!
//! General knowledge consulted by the tool-free secondary tier.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeError {
    #[error("Knowledge source unavailable: {0}")]
    Unavailable(String),

    #[error("Knowledge lookup failed: {0}")]
    LookupFailed(String),
}

#[async_trait]
pub trait KnowledgePort: Send + Sync {
    /// Background text relevant to `query`; empty when nothing matches
    async fn lookup(&self, query: &str) -> Result<String, KnowledgeError>;
}

/// Knowledge source that never knows anything
pub struct NoKnowledge;

#[async_trait]
impl KnowledgePort for NoKnowledge {
    async fn lookup(&self, _query: &str) -> Result<String, KnowledgeError> {
        Ok(String::new())
    }
}
