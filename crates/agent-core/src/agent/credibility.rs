//! Plausibility scoring for seer claims.
//!
//! Pure read over the belief state; the suspicion engine and the context
//! synthesizer both consume this, so it must stay side-effect free.

use super::belief::{PlayerBeliefState, Role};

const BASE: f64 = 0.5;
const COUNTER_CLAIM_PENALTY: f64 = 0.1;
const VERIFIED_CHECK_BONUS: f64 = 0.3;
const UNVERIFIED_CHECK_PENALTY: f64 = 0.1;
const FRONT_SEAT_BONUS: f64 = 0.1;
const BACK_SEAT_PENALTY: f64 = 0.05;
const CROSS_ACCUSATION_PENALTY: f64 = 0.2;

/// Scores how believable a seer claim is, in [0, 1]. Non-claimants are
/// exactly 0.0.
pub fn evaluate_seer_credibility(state: &PlayerBeliefState, seer: &str) -> f64 {
    if !state.seer_claims.iter().any(|s| s == seer) {
        return 0.0;
    }

    let mut score = BASE;

    // A counter-claim means at least one claimant is lying.
    if state.seer_claims.len() >= 2 {
        score -= COUNTER_CLAIM_PENALTY;
    }

    // A kill-call that the record confirms (target dead and known wolf) is
    // the strongest signal a claim is genuine; anything short of that reads
    // as an unverified or contradicted call.
    if let Some(checked) = state.wolf_checks.get(seer) {
        let verified = state.is_dead(checked)
            && state.known_roles.get(checked) == Some(&Role::Werewolf);
        if verified {
            score += VERIFIED_CHECK_BONUS;
        } else {
            score -= UNVERIFIED_CHECK_PENALTY;
        }
    }

    // Claim timing by seat: under no-badge norms an early claim carries more
    // weight, a late one slightly less.
    if let Some(pos) = state.seat_position(seer) {
        if pos <= 3 {
            score += FRONT_SEAT_BONUS;
        } else if pos >= 7 {
            score -= BACK_SEAT_PENALTY;
        }
    }

    // Being called wolf by a rival claimant damages credibility per rival.
    for (other, target) in &state.wolf_checks {
        if other != seer && target == seer {
            score -= CROSS_ACCUSATION_PENALTY;
        }
    }

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_state() -> PlayerBeliefState {
        let mut state = PlayerBeliefState::new("Player5");
        state.reset_for_new_game((1..=9).map(|i| format!("Player{i}")).collect());
        state
    }

    #[test]
    fn non_claimant_scores_exactly_zero() {
        let state = base_state();
        assert_eq!(evaluate_seer_credibility(&state, "Player4"), 0.0);
    }

    #[test]
    fn lone_midseat_claimant_sits_at_base() {
        let mut state = base_state();
        state.seer_claims.push("Player4".to_string());
        assert!((evaluate_seer_credibility(&state, "Player4") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn counter_claim_lowers_both_claimants() {
        let mut state = base_state();
        state.seer_claims.push("Player4".to_string());
        let solo = evaluate_seer_credibility(&state, "Player4");
        state.seer_claims.push("Player6".to_string());
        let contested = evaluate_seer_credibility(&state, "Player4");
        assert!((solo - contested - 0.1).abs() < 1e-9);
    }

    #[test]
    fn verified_kill_call_beats_unverified_all_else_equal() {
        let mut verified = base_state();
        verified.seer_claims.push("Player4".to_string());
        verified
            .wolf_checks
            .insert("Player4".to_string(), "Player9".to_string());
        verified.record_death("Player9");
        verified
            .known_roles
            .insert("Player9".to_string(), Role::Werewolf);

        let mut unverified = base_state();
        unverified.seer_claims.push("Player4".to_string());
        unverified
            .wolf_checks
            .insert("Player4".to_string(), "Player9".to_string());
        unverified.record_death("Player9");

        assert!(
            evaluate_seer_credibility(&verified, "Player4")
                > evaluate_seer_credibility(&unverified, "Player4")
        );
        // Target still alive counts as unverified too.
        let mut alive_target = base_state();
        alive_target.seer_claims.push("Player4".to_string());
        alive_target
            .wolf_checks
            .insert("Player4".to_string(), "Player9".to_string());
        assert!(
            evaluate_seer_credibility(&verified, "Player4")
                > evaluate_seer_credibility(&alive_target, "Player4")
        );
    }

    #[test]
    fn seat_bands_shift_the_score() {
        let mut state = base_state();
        state.seer_claims.push("Player1".to_string());
        state.seer_claims.push("Player5".to_string());
        state.seer_claims.push("Player8".to_string());

        let front = evaluate_seer_credibility(&state, "Player1");
        let middle = evaluate_seer_credibility(&state, "Player5");
        let back = evaluate_seer_credibility(&state, "Player8");
        assert!((front - middle - 0.1).abs() < 1e-9);
        assert!((middle - back - 0.05).abs() < 1e-9);
    }

    #[test]
    fn rival_kill_call_costs_point_two() {
        let mut state = base_state();
        state.seer_claims.push("Player4".to_string());
        state.seer_claims.push("Player6".to_string());
        let before = evaluate_seer_credibility(&state, "Player4");

        state
            .wolf_checks
            .insert("Player6".to_string(), "Player4".to_string());
        let after = evaluate_seer_credibility(&state, "Player4");
        assert!((before - after - 0.2).abs() < 1e-9);
    }

    #[test]
    fn score_is_clamped_to_unit_interval() {
        let mut state = base_state();
        state.seer_claims.push("Player8".to_string());
        state.seer_claims.push("Player6".to_string());
        state.seer_claims.push("Player7".to_string());
        // Two rivals both call Player8 wolf, plus an unverified own check.
        state
            .wolf_checks
            .insert("Player6".to_string(), "Player8".to_string());
        state
            .wolf_checks
            .insert("Player7".to_string(), "Player8".to_string());
        state
            .wolf_checks
            .insert("Player8".to_string(), "Player2".to_string());

        let score = evaluate_seer_credibility(&state, "Player8");
        assert!((0.0..=1.0).contains(&score));
        assert_eq!(score, 0.0);
    }
}
