//! Context retriever port
//!
//! Proactive context: given what was just discussed, return snippets worth
//! reminding the model about. Ranking and embeddings are the adapter's
//! business.
//!
//! No adapter ships with this workspace and the CLI does not wire one. Hosts
//! that own a retrieval index implement the port and add a
//! [`RecallInjector`](crate::context::RecallInjector) to the agent's
//! injectors.

use async_trait::async_trait;
use droidmind_domain::LastExchange;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrieverError {
    #[error("Retrieval failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait ContextRetrieverPort: Send + Sync {
    async fn retrieve(&self, exchange: &LastExchange) -> Result<Vec<String>, RetrieverError>;
}
