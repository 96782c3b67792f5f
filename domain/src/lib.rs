//! Domain layer for droidmind
//!
//! This crate contains the core entities and value objects of the assistant.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! ## Transcript
//!
//! A conversation is a sequence of [`Message`]s. Tool traffic is recorded
//! in the transcript as paired tool-call / tool-result messages so that both
//! the model and the deduplication logic can see what was already asked.
//!
//! ## Tools
//!
//! [`ToolSpec`] describes what the model may call. Definitions can declare a
//! *complementary* partner that is called alongside them with the same
//! arguments. Call identity is canonical: key order never matters.
//!
//! ## Memory
//!
//! [`ConversationMemory`] keeps a bounded running window, a rolling summary
//! and an archive. [`MemoryLimits`] holds the two bounds (message count and
//! serialized size) the window must respect after each turn.
//!
//! ## Tiers
//!
//! Each turn is answered by the first [`Tier`] that produces an
//! [`AgentResult`] with a non-empty answer.

pub mod agent;
pub mod core;
pub mod memory;
pub mod prompt;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use agent::{AgentContext, AgentResult, LoopPhase, ScreenContext, Tier};
pub use core::{
    error::DomainError,
    string::{truncate, truncate_str},
};
pub use memory::{ConversationMemory, LastExchange, MemoryLimits};
pub use prompt::{PersonaPrompt, ULTIMATE_APOLOGY};
pub use session::{ContentBlock, LlmResponse, Message, Role, StopReason};
pub use tool::{
    DefaultToolValidator, RawToolCall, ToolCall, ToolDefinition, ToolError, ToolOutput,
    ToolParameter, ToolResult, ToolSpec, ToolValidator,
};
