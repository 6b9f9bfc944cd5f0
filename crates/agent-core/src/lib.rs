//! Shared agent primitives for a 9-player no-sheriff werewolf table:
//! belief tracking, suspicion scoring, claim credibility, and prompt context.
//!
//! This crate is the state model + prompting/LLM adapters; the runner binary
//! owns the table connection and the event loop.

pub mod agent;
pub mod llm;
