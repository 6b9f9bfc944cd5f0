mod config_loader;

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

use werewolf_agent_core::agent::harness::{ReplyConfig, reply_turn};
use werewolf_agent_core::agent::persist::BeliefSnapshot;
use werewolf_agent_core::agent::{AgentLoop, GameEvent, TrackerConfig};
use werewolf_agent_core::llm::{OllamaClient, OllamaConfig};

use config_loader::{AgentProfile, ConfigLoader};

/// One newline-delimited JSON message from the table feed.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TableMessage {
    /// Narration or another player's speech; feeds the belief tracker.
    Event {
        #[serde(flatten)]
        event: GameEvent,
    },
    /// It is this agent's turn to speak; `prompt` is the host's turn text.
    YourTurn {
        #[serde(default)]
        prompt: String,
    },
    /// The game ended; `won` is from this agent's perspective.
    GameResult { won: bool },
}

#[derive(Debug, Serialize)]
struct UtteranceLine<'a> {
    r#type: &'a str,
    text: &'a str,
}

struct TableConn {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TableConn {
    async fn connect(addr: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .with_context(|| format!("connect table feed {addr}"))?;
        let (read, write) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read),
            writer: write,
        })
    }

    /// Next line from the feed; `None` on clean EOF.
    async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let n = self
            .reader
            .read_line(&mut line)
            .await
            .context("table read")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn send_utterance(&mut self, text: &str) -> anyhow::Result<()> {
        let line = serde_json::to_string(&UtteranceLine {
            r#type: "utterance",
            text,
        })
        .context("encode utterance")?;
        self.writer
            .write_all(format!("{line}\n").as_bytes())
            .await
            .context("table write")?;
        self.writer.flush().await.ok();
        Ok(())
    }
}

fn env_or(profile_value: &str, var: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| profile_value.to_string())
}

fn load_profile() -> AgentProfile {
    let mut profile = match ConfigLoader::parse_from_file::<AgentProfile>("agent.toml") {
        Ok(p) => {
            println!("runner.config.loaded source=agent.toml");
            p
        }
        Err(_) => AgentProfile::default(),
    };

    profile.name = env_or(&profile.name, "WEREWOLF_AGENT_NAME");
    profile.table_addr = env_or(&profile.table_addr, "WEREWOLF_TABLE_ADDR");
    profile.llm_endpoint = env_or(&profile.llm_endpoint, "WEREWOLF_LLM_ENDPOINT");
    profile.llm_model = env_or(&profile.llm_model, "WEREWOLF_LLM_MODEL");
    profile.snapshot_path = env_or(&profile.snapshot_path, "WEREWOLF_SNAPSHOT_PATH");
    if std::env::var("WEREWOLF_IMMEDIATE_DEATHS").is_ok_and(|v| v == "1" || v == "true") {
        profile.immediate_death_commit = true;
    }
    profile
}

async fn load_snapshot(agent: &mut AgentLoop, path: &str) {
    if path.is_empty() || !Path::new(path).is_file() {
        return;
    }
    match tokio::fs::read_to_string(path).await {
        Ok(json) => match BeliefSnapshot::from_json(&json) {
            Ok(snapshot) => {
                snapshot.restore_into(agent);
                println!("runner.snapshot.loaded path={path}");
            }
            Err(err) => eprintln!("runner.snapshot.decode_error {err:#}"),
        },
        Err(err) => eprintln!("runner.snapshot.read_error {err:#}"),
    }
}

async fn save_snapshot(agent: &AgentLoop, path: &str) {
    if path.is_empty() {
        return;
    }
    let json = match BeliefSnapshot::capture(agent).to_json() {
        Ok(json) => json,
        Err(err) => {
            eprintln!("runner.snapshot.encode_error {err:#}");
            return;
        }
    };
    match tokio::fs::write(path, json).await {
        Ok(()) => println!("runner.snapshot.saved path={path}"),
        Err(err) => eprintln!("runner.snapshot.write_error {err:#}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let profile = load_profile();
    println!(
        "runner.start name={} table={} model={}",
        profile.name, profile.table_addr, profile.llm_model
    );

    let llm = OllamaClient::new(OllamaConfig {
        endpoint: profile.llm_endpoint.clone(),
        model: profile.llm_model.clone(),
    });

    let mut agent = AgentLoop::new(profile.name.clone()).with_tracker_cfg(TrackerConfig {
        immediate_death_commit: profile.immediate_death_commit,
    });
    load_snapshot(&mut agent, &profile.snapshot_path).await;

    let mut table = TableConn::connect(&profile.table_addr).await?;
    let reply_cfg = ReplyConfig::default();
    let mut rng = rand::thread_rng();

    while let Some(line) = table.next_line().await? {
        if line.is_empty() {
            continue;
        }
        let msg: TableMessage = match serde_json::from_str(&line) {
            Ok(msg) => msg,
            Err(err) => {
                eprintln!("runner.feed.decode_error {err}");
                continue;
            }
        };

        match msg {
            TableMessage::Event { event } => {
                agent.observe(&event);
                let diag = agent.state.diagnostics();
                if !diag.is_consistent() {
                    eprintln!(
                        "runner.state.inconsistent self_dead={} alive_empty={} staged={}",
                        diag.self_marked_dead, diag.alive_list_empty, diag.staged_death_count
                    );
                }
                println!(
                    "runner.observe speaker={} round={} phase={} alive={}",
                    event.speaker,
                    agent.state.round_num,
                    agent.state.phase.as_str(),
                    agent.state.effective_alive().len()
                );
                if agent.state.seer_claims.len() >= 2 {
                    for (claimant, score) in
                        werewolf_agent_core::agent::context::seer_claim_report(&agent.state)
                    {
                        println!("runner.seer_claim claimant={claimant} credibility={score:.2}");
                    }
                }
            }
            TableMessage::YourTurn { prompt } => {
                match reply_turn(&agent, &llm, &prompt, &reply_cfg, &mut rng).await {
                    Ok(report) => {
                        println!(
                            "runner.turn context={} confusion={} truncated={} chars={}",
                            report.context_injected,
                            report.confusion_injected,
                            report.truncated,
                            report.utterance.chars().count()
                        );
                        table.send_utterance(&report.utterance).await?;
                    }
                    Err(err) => {
                        // Losing a turn beats crashing out of the game.
                        eprintln!("runner.llm.error {err:#}");
                        table.send_utterance("I'll pass this turn.").await?;
                    }
                }
            }
            TableMessage::GameResult { won } => {
                println!("runner.game.result won={won}");
                agent.record_game_result(won);
                save_snapshot(&agent, &profile.snapshot_path).await;
            }
        }
    }

    println!("runner.feed.closed");
    Ok(())
}
