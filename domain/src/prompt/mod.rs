//! Prompt domain
//!
//! Persona text used by the agent tiers. Wording is configuration; the
//! defaults here keep the assistant usable without any prompt files.

pub mod persona;

pub use persona::{PersonaPrompt, ULTIMATE_APOLOGY};
