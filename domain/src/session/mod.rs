//! Conversation transcript domain.
//!
//! - [`entities::Message`]: a single transcript entry, optionally carrying a tool payload
//! - [`response::LlmResponse`]: what a model call returns (text and/or tool requests)

pub mod entities;
pub mod response;

pub use entities::{Message, Role};
pub use response::{ContentBlock, LlmResponse, StopReason};
