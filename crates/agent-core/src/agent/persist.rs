//! Versioned belief snapshots.
//!
//! The agent's state bag is persisted as one explicit struct at game
//! boundaries, decoupled from any storage backend: callers get JSON in and
//! out and decide where it lives via [`SnapshotStore`].

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::belief::PlayerBeliefState;
use super::r#loop::AgentLoop;
use super::strategy::StrategyWeights;

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BeliefSnapshot {
    pub schema_version: u32,
    pub state: PlayerBeliefState,
    pub weights: StrategyWeights,
}

impl BeliefSnapshot {
    pub fn capture(agent: &AgentLoop) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            state: agent.state.clone(),
            weights: agent.weights.clone(),
        }
    }

    pub fn restore_into(self, agent: &mut AgentLoop) {
        agent.state = self.state;
        agent.weights = self.weights;
        // The snapshot's own name wins only if it matches; a snapshot from a
        // different identity would poison self-detection.
        if agent.state.own_name != agent.name {
            agent.state.own_name = agent.name.clone();
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("encode belief snapshot")
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).context("decode belief snapshot")?;
        if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
            anyhow::bail!(
                "unsupported snapshot schema_version {} (expected {})",
                snapshot.schema_version,
                SNAPSHOT_SCHEMA_VERSION
            );
        }
        Ok(snapshot)
    }
}

/// Narrow storage seam so the core never touches the filesystem directly.
pub trait SnapshotStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn save(&mut self, key: &str, json: &str) -> anyhow::Result<()>;
}

/// In-memory store for tests and single-process runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::collections::BTreeMap<String, String>,
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, json: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), json.to_string());
        Ok(())
    }
}
