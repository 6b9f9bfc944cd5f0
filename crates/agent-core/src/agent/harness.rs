//! Turn glue: prompt augmentation, LLM call, reply post-processing.
//!
//! This is intentionally small and pure: it owns no timers, sockets, or
//! model clients. The runner supplies the [`LlmClient`] and drives turns;
//! this exists so the whole reply path is testable with a fake LLM.

use std::future::Future;
use std::pin::Pin;

use rand::Rng;

use super::banter;
use super::r#loop::AgentLoop;

/// Competition cap on a single utterance.
pub const MAX_UTTERANCE_CHARS: usize = 2048;

pub trait LlmClient: Send + Sync {
    fn complete<'a>(
        &'a self,
        prompt: String,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;
}

#[derive(Debug, Clone)]
pub struct ReplyConfig {
    /// Whether the confusion-line roll happens at all.
    pub enable_confusion: bool,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            enable_confusion: true,
        }
    }
}

/// What a reply turn did, for the runner's logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub utterance: String,
    pub context_injected: bool,
    pub confusion_injected: bool,
    pub truncated: bool,
}

/// Appends the strategic-analysis block to the inbound turn text. Only done
/// once a role is known; before that the belief state has nothing useful to
/// say and the bare prompt reads better.
pub fn augment_turn_text(turn_text: &str, context: &str) -> String {
    format!("{turn_text}\n\n[STRATEGIC ANALYSIS]\n{context}")
}

/// Char-boundary-safe truncation to [`MAX_UTTERANCE_CHARS`].
pub fn cap_utterance(text: &str) -> (String, bool) {
    match text.char_indices().nth(MAX_UTTERANCE_CHARS) {
        Some((byte_idx, _)) => (text[..byte_idx].to_string(), true),
        None => (text.to_string(), false),
    }
}

/// Runs one speaking turn: build the prompt, query the LLM, optionally
/// append a confusion line, cap the length.
pub async fn reply_turn<R: Rng + ?Sized>(
    agent: &AgentLoop,
    llm: &dyn LlmClient,
    turn_text: &str,
    cfg: &ReplyConfig,
    rng: &mut R,
) -> anyhow::Result<TurnReport> {
    let context_injected = agent.state.own_role.is_some();
    let prompt = agent.build_prompt(turn_text);

    let mut text = llm.complete(prompt).await?;

    let mut confusion_injected = false;
    if cfg.enable_confusion
        && let Some(line) = banter::maybe_confusion_line(rng, &agent.state, &agent.weights)
    {
        text.push_str("\n\n");
        text.push_str(&line);
        confusion_injected = true;
    }

    let (utterance, truncated) = cap_utterance(&text);
    Ok(TurnReport {
        utterance,
        context_injected,
        confusion_injected,
        truncated,
    })
}
