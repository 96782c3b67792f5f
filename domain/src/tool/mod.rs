//! Tool domain module
//!
//! How the model reaches external knowledge: definitions describe what can be
//! called, calls carry parsed arguments, results carry what came back.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ RawToolCall  │───▶│ ToolCall     │───▶│ ToolOutput   │───▶│ ToolResult   │
//! │ (from model) │    │ (parsed)     │    │ (backend)    │    │ (transcript) │
//! └──────────────┘    └──────┬───────┘    └──────────────┘    └──────────────┘
//!                            │
//!                            └─ ToolSpec: definitions, aliases, complementary partners
//! ```
//!
//! # Complementary tools
//!
//! A [`ToolDefinition`] may name a partner (for example a structured stats
//! lookup paired with a narrative lore lookup). The application layer uses
//! [`ToolSpec::complement_of`] and [`ToolCall::complement`] to add the
//! partner call to a batch so the model sees both views from one request.
//!
//! # Call identity
//!
//! [`canonical`] defines when two calls are the same: same tool name, equal
//! arguments after sorting keys. Deduplication and the result cache both
//! key on [`ToolCall::fingerprint`].

pub mod canonical;
pub mod entities;
pub mod traits;
pub mod value_objects;

pub use canonical::{cache_key, canonical_json, parse_arguments};
pub use entities::{RawToolCall, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolOutput, ToolResult};
