//! Per-agent strategy weights.
//!
//! These parameterize the werewolf-phase hints and the confusion-line
//! injection, and drift slightly with game results. This is the only
//! cross-game accumulator the agent keeps.

use serde::{Deserialize, Serialize};

use super::belief::Role;

const LEARNING_RATE: f64 = 0.05;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StrategyWeights {
    /// Chance a wolf fake-claims seer.
    pub fake_claim_chance: f64,
    /// Priority on killing the seer at night.
    pub seer_kill_priority: f64,
    /// Chance to self-knife as heal bait.
    pub self_knife_chance: f64,
    /// Chance the wolf team splits its votes for cover.
    pub vote_split_chance: f64,
    /// Chance to append a misdirection line to a reply.
    pub confuse_opponents_chance: f64,
}

impl Default for StrategyWeights {
    fn default() -> Self {
        Self {
            fake_claim_chance: 0.7,
            seer_kill_priority: 0.7,
            self_knife_chance: 0.1,
            vote_split_chance: 0.8,
            confuse_opponents_chance: 0.3,
        }
    }
}

impl StrategyWeights {
    /// Nudges the weights after a finished game. `seer_was_contested` is
    /// whether any seer claim surfaced, which signals the fake-claim game
    /// was in play.
    pub fn record_game_result(&mut self, own_role: Option<Role>, won: bool, seer_was_contested: bool) {
        if own_role == Some(Role::Werewolf) {
            if won {
                self.fake_claim_chance = clamp01(self.fake_claim_chance + LEARNING_RATE);
                self.seer_kill_priority = clamp01(self.seer_kill_priority + LEARNING_RATE * 0.5);
            } else {
                self.fake_claim_chance = clamp01(self.fake_claim_chance - LEARNING_RATE);
                if seer_was_contested {
                    self.seer_kill_priority = clamp01(self.seer_kill_priority - LEARNING_RATE);
                }
            }
        }

        let confusion_step = LEARNING_RATE * 0.3;
        if won {
            self.confuse_opponents_chance = clamp01(self.confuse_opponents_chance + confusion_step);
        } else {
            self.confuse_opponents_chance = clamp01(self.confuse_opponents_chance - confusion_step);
        }
    }
}

fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}
