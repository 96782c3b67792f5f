//! Summarizer port
//!
//! Compresses text for the rolling conversation summary. Optional: without
//! it, or when it fails, memory compaction truncates instead.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummarizerError {
    #[error("Summarizer unavailable: {0}")]
    Unavailable(String),

    #[error("Summarization failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait SummarizerPort: Send + Sync {
    /// Condense `text` to roughly `target_size` bytes
    async fn summarize(&self, text: &str, target_size: usize) -> Result<String, SummarizerError>;
}
