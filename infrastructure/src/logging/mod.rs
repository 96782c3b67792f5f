//! Structured conversation logging
//!
//! [`JsonlConversationLogger`] appends one JSON record per
//! [`ConversationEvent`](droidmind_application::ConversationEvent) to a
//! per-session file.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
