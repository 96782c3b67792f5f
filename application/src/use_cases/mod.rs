//! Use cases
//!
//! | Module | Role |
//! |--------|------|
//! | [`tool_invoker`] | One batch of tool calls: augment, dedup, cache, execute |
//! | [`compact_memory`] | Bounded window plus rolling summary |
//! | [`run_agent`] | Primary tier, the bounded tool-calling loop |
//! | [`fallback_agents`] | Knowledge and emergency tiers |
//! | [`supervisor`] | Runs the tiers for one turn and folds the result into memory |

pub mod agent;
pub mod compact_memory;
pub mod fallback_agents;
pub mod run_agent;
pub mod shared;
pub mod supervisor;
pub mod tool_invoker;

#[cfg(test)]
pub(crate) mod test_support;
