//! Agent domain module
//!
//! Value types shared by the agent tiers and the supervisor that runs them.

pub mod entities;
pub mod value_objects;

pub use entities::{AgentResult, LoopPhase, Tier};
pub use value_objects::{AgentContext, ScreenContext};
