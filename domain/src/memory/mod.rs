//! Conversation memory domain.
//!
//! A session's memory is a bounded window of recent messages, a rolling
//! summary of everything folded out of that window, and an archive of the
//! folded messages:
//!
//! ```text
//! old_messages (archived, summarized)  │  running_messages (window)  │  pending user message
//! ─────────────────────────────────────┼─────────────────────────────┼─────────────────────
//!            summary ≈ compress(old)   │   sent to the model as-is   │   current turn
//! ```
//!
//! The compaction algorithm itself is async (it may call a summarizer) and
//! lives in the application layer; this module holds the data, the bounds
//! and the pure rendering helpers it relies on.

pub mod entities;
pub mod render;

pub use entities::{ConversationMemory, LastExchange, MemoryLimits};
pub use render::{render_for_summary, serialized_size, strip_markdown};
