//! LLM providers

pub mod openai;

pub use openai::{OpenAiGateway, OpenAiSummarizer};
