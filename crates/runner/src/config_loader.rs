use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Agent profile loaded from TOML. Every field has a default so a missing
/// profile file just means "run with defaults + env overrides".
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentProfile {
    pub name: String,
    pub table_addr: String,
    pub llm_endpoint: String,
    pub llm_model: String,
    /// Commit deaths at announcement time instead of the day transition.
    /// Only for replaying older transcripts.
    pub immediate_death_commit: bool,
    /// Where the belief snapshot is written at game boundaries; empty
    /// disables persistence.
    pub snapshot_path: String,
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self {
            name: "Player1".to_string(),
            table_addr: "127.0.0.1:9732".to_string(),
            llm_endpoint: "http://127.0.0.1:11434/api/generate".to_string(),
            llm_model: "mock".to_string(),
            immediate_death_commit: false,
            snapshot_path: String::new(),
        }
    }
}

/// Minimal config loader for the standalone runner.
///
/// Search order:
/// 1) `WEREWOLF_CONFIG_DIR/<relative_path>`
/// 2) `./<relative_path>`
/// 3) `<repo_root>/config/<relative_path>` (repo-local convenience)
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn parse_from_file<T: for<'de> Deserialize<'de>>(relative_path: &str) -> anyhow::Result<T> {
        let path = Self::resolve_path(relative_path)?;
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse_from_string(&text)
    }

    pub fn parse_from_string<T: for<'de> Deserialize<'de>>(text: &str) -> anyhow::Result<T> {
        toml::from_str(text).context("Failed to parse TOML")
    }

    fn resolve_path(relative_path: &str) -> anyhow::Result<PathBuf> {
        let rel = Path::new(relative_path);

        if let Some(root) = env::var_os("WEREWOLF_CONFIG_DIR") {
            let candidate = PathBuf::from(root).join(rel);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }

        if let Ok(cwd) = env::current_dir() {
            let candidate = cwd.join(rel);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }

        // Repo convenience: <repo_root>/config/<relative_path>.
        // This crate lives at <repo_root>/crates/runner.
        let candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .ancestors()
            .nth(2)
            .ok_or_else(|| anyhow::anyhow!("CARGO_MANIFEST_DIR has insufficient ancestors"))?
            .join("config")
            .join(rel);
        if candidate.is_file() {
            return Ok(candidate);
        }

        anyhow::bail!("Config file not found for {:?}", rel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_parses_with_partial_fields() {
        let profile: AgentProfile = ConfigLoader::parse_from_string(
            r#"
name = "Player7"
immediate_death_commit = true
"#,
        )
        .unwrap();
        assert_eq!(profile.name, "Player7");
        assert!(profile.immediate_death_commit);
        assert_eq!(profile.table_addr, AgentProfile::default().table_addr);
    }

    #[test]
    fn empty_profile_is_all_defaults() {
        let profile: AgentProfile = ConfigLoader::parse_from_string("").unwrap();
        assert_eq!(profile, AgentProfile::default());
    }
}
