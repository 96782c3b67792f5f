//! OpenAI-compatible chat completions provider

mod gateway;
mod summarizer;
mod types;

pub use gateway::OpenAiGateway;
pub use summarizer::OpenAiSummarizer;
