//! Vote-driven suspicion scoring for the no-sheriff format.
//!
//! Every rule only ever adds; scores are compared relatively downstream, so
//! there is no cap and no decay. Called once per recorded vote, after the
//! vote has been appended to the voter's history.

use super::belief::{PlayerBeliefState, Role};
use super::credibility;

const SPEECH_VOTE_MISMATCH: f64 = 0.25;
const VOTED_CONFIRMED_INNOCENT: f64 = 0.35;
const VOTED_CREDIBLE_SEER: f64 = 0.3;
const COORDINATED_VOTE: f64 = 0.1;
const LATE_BANDWAGON: f64 = 0.05;
const MUTUAL_AVOIDANCE: f64 = 0.15;

/// Credibility threshold above which voting a seer claimant is damning.
const CREDIBLE_SEER_THRESHOLD: f64 = 0.6;
/// A shared target below this score looks coordinated rather than organic.
const UNSUSPICIOUS_TARGET_THRESHOLD: f64 = 0.3;

fn bump(state: &mut PlayerBeliefState, player: &str, delta: f64) {
    *state.suspicions.entry(player.to_string()).or_insert(0.0) += delta;
}

/// Applies the five vote heuristics in order; deltas are independent and sum.
pub fn update_from_vote(state: &mut PlayerBeliefState, voter: &str, target: &str) {
    // 1. Speech/vote inconsistency: accused A but voted B.
    if let Some(patterns) = state.speech_patterns.get(voter) {
        let accused: Vec<&str> = patterns
            .iter()
            .filter_map(|p| p.strip_prefix("accused:"))
            .collect();
        if !accused.is_empty() && !accused.contains(&target) {
            bump(state, voter, SPEECH_VOTE_MISMATCH);
        }
    }

    // 2. Voting a confirmed innocent. Only a seer holds authoritative
    // innocence knowledge, so other roles skip this rule.
    if state.own_role == Some(Role::Seer)
        && state
            .known_roles
            .get(target)
            .is_some_and(|r| *r != Role::Werewolf)
    {
        bump(state, voter, VOTED_CONFIRMED_INNOCENT);
    }

    // 3. Voting a credible seer claimant.
    if state.seer_claims.iter().any(|s| s == target)
        && credibility::evaluate_seer_credibility(state, target) > CREDIBLE_SEER_THRESHOLD
    {
        bump(state, voter, VOTED_CREDIBLE_SEER);
    }

    detect_vote_coordination(state, voter, target);

    // 5. Mutual vote avoidance: the voter and a live player have never voted
    // each other across >= 2 recorded votes. Both sides look like teammates.
    let voter_votes = state.voting_history.get(voter).cloned().unwrap_or_default();
    if voter_votes.len() >= 2 {
        let candidates: Vec<String> = state
            .alive_players
            .iter()
            .filter(|p| *p != voter && !state.is_dead(p))
            .cloned()
            .collect();
        for p in candidates {
            let voter_never_votes_p = !voter_votes.iter().any(|t| *t == p);
            let p_never_votes_voter = !state
                .voting_history
                .get(&p)
                .is_some_and(|v| v.iter().any(|t| t == voter));
            if voter_never_votes_p && p_never_votes_voter {
                bump(state, voter, MUTUAL_AVOIDANCE);
                bump(state, &p, MUTUAL_AVOIDANCE);
            }
        }
    }
}

/// 4. Coordinated-vote detection: each live voter's most recent vote,
/// grouped by target. Two or more live voters piling on a target nobody
/// suspects looks like a wolf block; late-round pile-ons add a bandwagon
/// penalty for the followers.
fn detect_vote_coordination(state: &mut PlayerBeliefState, voter: &str, target: &str) {
    let voters_for_target: Vec<String> = state
        .voting_history
        .iter()
        .filter(|(v, targets)| !targets.is_empty() && !state.is_dead(v))
        .filter(|(_, targets)| targets.last().map(String::as_str) == Some(target))
        .map(|(v, _)| v.clone())
        .collect();

    if voters_for_target.len() < 2 {
        return;
    }

    let target_suspicion = state.suspicions.get(target).copied().unwrap_or(0.0);
    if target_suspicion < UNSUSPICIOUS_TARGET_THRESHOLD {
        for v in &voters_for_target {
            if *v != state.own_name {
                bump(state, v, COORDINATED_VOTE);
            }
        }
    }

    if state.speech_order > 3 {
        for v in &voters_for_target {
            if *v != state.own_name && *v != voter {
                bump(state, v, LATE_BANDWAGON);
            }
        }
    }
}
