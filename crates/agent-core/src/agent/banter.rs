//! Misdirection one-liners appended to replies.
//!
//! Kept out of the context synthesizer so the core stays deterministic;
//! randomness enters only here, gated by the confuse-opponents weight.

use rand::Rng;
use rand::seq::SliceRandom;

use super::belief::PlayerBeliefState;
use super::strategy::StrategyWeights;

const CONFUSION_TEMPLATES: &[&str] = &[
    "By the way, I noticed {player} hesitated before speaking last round, very suspicious.",
    "Wait, did I hear {player} claim two different roles earlier?",
    "Just a thought - maybe there's a third wolf we're all missing.",
    "I'm not sure yet, but something about {player}'s vote doesn't add up.",
    "Remember what happened last game? History might be repeating...",
];

/// One confusion line aimed at a random live non-self player, or `None`
/// when nobody qualifies.
pub fn confusion_line<R: Rng + ?Sized>(rng: &mut R, state: &PlayerBeliefState) -> Option<String> {
    let candidates: Vec<String> = state
        .effective_alive()
        .into_iter()
        .filter(|p| *p != state.own_name)
        .collect();
    let target = candidates.choose(rng)?;
    let template = CONFUSION_TEMPLATES.choose(rng)?;
    Some(template.replace("{player}", target))
}

/// Rolls the confuse-opponents weight; on success returns a confusion line.
pub fn maybe_confusion_line<R: Rng + ?Sized>(
    rng: &mut R,
    state: &PlayerBeliefState,
    weights: &StrategyWeights,
) -> Option<String> {
    if rng.r#gen::<f64>() >= weights.confuse_opponents_chance {
        return None;
    }
    confusion_line(rng, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn base_state() -> PlayerBeliefState {
        let mut state = PlayerBeliefState::new("Player5");
        state.reset_for_new_game((1..=9).map(|i| format!("Player{i}")).collect());
        state
    }

    #[test]
    fn line_never_targets_self_or_dead() {
        let mut state = base_state();
        for p in ["Player1", "Player2", "Player3", "Player4", "Player6", "Player7", "Player8"] {
            state.record_death(p);
        }
        // Only Player9 remains besides self.
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let line = confusion_line(&mut rng, &state).unwrap();
            assert!(!line.contains("Player5"));
            assert!(!line.contains("{player}"));
        }
    }

    #[test]
    fn no_line_when_nobody_else_is_alive() {
        let mut state = PlayerBeliefState::new("Player5");
        state.reset_for_new_game(vec!["Player5".to_string()]);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(confusion_line(&mut rng, &state).is_none());
    }

    #[test]
    fn zero_weight_never_injects() {
        let state = base_state();
        let weights = StrategyWeights {
            confuse_opponents_chance: 0.0,
            ..StrategyWeights::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert!(maybe_confusion_line(&mut rng, &state, &weights).is_none());
        }
    }
}
