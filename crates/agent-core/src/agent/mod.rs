//! Werewolf agent primitives: belief state, extraction rules, and prompting.
//!
//! The contract is deliberately narrow: the host feeds every table message
//! through [`AgentLoop::observe`], and asks for a prompt augmentation via
//! [`AgentLoop::synthesize_context`] when it is this agent's turn to speak.
//! Everything else (LLM transport, table wire format) lives behind traits.

pub mod banter;
pub mod belief;
pub mod context;
pub mod credibility;
pub mod event;
pub mod extract;
pub mod harness;
pub mod lexicon;
pub mod r#loop;
pub mod persist;
pub mod strategy;
pub mod suspicion;
pub mod system_prompt;

pub use belief::{Phase, PlayerBeliefState, PositionType, Role};
pub use event::{ChannelVisibility, GameEvent};
pub use extract::TrackerConfig;
pub use r#loop::AgentLoop;
