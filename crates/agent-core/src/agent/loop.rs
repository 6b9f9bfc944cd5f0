use super::belief::PlayerBeliefState;
use super::context;
use super::event::GameEvent;
use super::extract::{self, TrackerConfig};
use super::strategy::StrategyWeights;
use super::system_prompt;

/// One agent instance: belief state plus the prompt scaffolding around it.
///
/// Events are applied strictly in arrival order; suspicion scoring and
/// credibility evaluation are order-sensitive.
#[derive(Debug, Clone)]
pub struct AgentLoop {
    pub name: String,
    pub system_prompt: String,
    pub state: PlayerBeliefState,
    pub weights: StrategyWeights,
    pub tracker_cfg: TrackerConfig,
}

impl AgentLoop {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            system_prompt: system_prompt::build(&name),
            state: PlayerBeliefState::new(name.clone()),
            weights: StrategyWeights::default(),
            tracker_cfg: TrackerConfig::default(),
            name,
        }
    }

    pub fn with_tracker_cfg(mut self, cfg: TrackerConfig) -> Self {
        self.tracker_cfg = cfg;
        self
    }

    /// Inbound boundary: applies one table message to the belief state.
    pub fn observe(&mut self, event: &GameEvent) {
        extract::observe(&mut self.state, event, &self.tracker_cfg);
    }

    /// Outbound boundary: the strategic-analysis block for the next prompt.
    pub fn synthesize_context(&self) -> String {
        context::synthesize_context(&self.state, &self.weights)
    }

    /// Full prompt for a speaking turn. The analysis block is only attached
    /// once a role is known.
    pub fn build_prompt(&self, turn_text: &str) -> String {
        let turn = if self.state.own_role.is_some() {
            super::harness::augment_turn_text(turn_text, &self.synthesize_context())
        } else {
            turn_text.to_string()
        };
        format!("{}\n\n[TURN]\n{turn}\n", self.system_prompt)
    }

    /// Game-boundary hook: nudges the strategy weights from the result.
    pub fn record_game_result(&mut self, won: bool) {
        let contested = !self.state.seer_claims.is_empty();
        self.weights
            .record_game_result(self.state.own_role, won, contested);
    }
}
