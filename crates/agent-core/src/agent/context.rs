//! Context synthesis: belief state -> strategic-analysis text block.
//!
//! Pure read, deterministic given the state. The block is appended to the
//! turn prompt before the LLM call; section order is fixed so downstream
//! prompt diffs stay readable.

use super::belief::{Phase, PlayerBeliefState, PositionType, Role};
use super::credibility::evaluate_seer_credibility;
use super::strategy::StrategyWeights;

/// Suspects below this score are not worth surfacing.
const SUSPECT_DISPLAY_THRESHOLD: f64 = 0.2;
/// At most this many voters shown in the vote-trail section.
const VOTE_TRAIL_VOTER_CAP: usize = 5;
/// Alive count at or below which every vote decides the game.
const ENDGAME_ALIVE_THRESHOLD: usize = 4;

pub fn synthesize_context(state: &PlayerBeliefState, weights: &StrategyWeights) -> String {
    let mut parts: Vec<String> = Vec::new();

    let role = state.own_role.map(|r| r.as_str()).unwrap_or("unknown");
    let speech_info = if state.phase == Phase::Day {
        format!(" | Speaking #{}", state.speech_order + 1)
    } else {
        String::new()
    };
    parts.push(format!(
        "Role: {role} | Round: {} | Phase: {} | Position: {} ({}){speech_info}",
        state.round_num,
        state.phase.as_str(),
        state.my_position,
        state.position_type().as_str(),
    ));

    if !state.teammates.is_empty() {
        parts.push(format!(
            "Teammates (protect them!): {}",
            state.teammates.join(", ")
        ));
    }

    let known: Vec<String> = state
        .known_roles
        .iter()
        .filter(|(p, _)| **p != state.own_name)
        .map(|(p, r)| format!("{p}={}", r.as_str()))
        .collect();
    if !known.is_empty() {
        parts.push(format!("Confirmed: {}", known.join(", ")));
    }

    let claims: Vec<String> = state
        .claimed_roles
        .iter()
        .map(|(p, r)| format!("{p} claims {}", r.as_str()))
        .collect();
    if !claims.is_empty() {
        parts.push(format!("Claims: {}", claims.join(", ")));
    }

    if state.seer_claims.len() >= 2 {
        parts.push(format!(
            "WARNING - SEER COUNTER-CLAIM: {}",
            state.seer_claims.join(" vs ")
        ));
        for (seer, target) in &state.wolf_checks {
            parts.push(format!("  {seer} checked {target} as WOLF"));
        }
    }

    if !state.dead_players.is_empty() {
        parts.push(format!("Dead: {}", state.dead_players.join(", ")));
    }

    let alive = state.effective_alive();
    if !alive.is_empty() {
        parts.push(format!("Alive: {}", alive.join(", ")));
        parts.push(format!("Alive count: {}", alive.len()));
    }

    let suspects = top_suspects(state);
    if !suspects.is_empty() {
        parts.push(format!("Top suspects: {}", suspects.join(", ")));
    }

    let trails = vote_trails(state);
    if !trails.is_empty() {
        parts.push(format!("Recent votes: {}", trails.join("; ")));
    }

    parts.push(phase_advice(state, weights));

    parts.join("\n")
}

/// Top three suspects above the display threshold, descending score, name as
/// the tie-breaker so output is stable.
fn top_suspects(state: &PlayerBeliefState) -> Vec<String> {
    let mut scored: Vec<(&String, f64)> = state
        .suspicions
        .iter()
        .map(|(p, s)| (p, *s))
        .collect();
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    scored
        .into_iter()
        .take(3)
        .filter(|(_, s)| *s > SUSPECT_DISPLAY_THRESHOLD)
        .map(|(p, s)| format!("{p}(score:{s:.1})"))
        .collect()
}

/// Last two vote targets per voter with at least two recorded votes.
fn vote_trails(state: &PlayerBeliefState) -> Vec<String> {
    state
        .voting_history
        .iter()
        .filter(|(_, targets)| targets.len() >= 2)
        .take(VOTE_TRAIL_VOTER_CAP)
        .map(|(voter, targets)| {
            let tail = &targets[targets.len() - 2..];
            format!("{voter}->{}", tail.join("->"))
        })
        .collect()
}

/// Role/phase/position hint dispatch. The wording is prompt content; the
/// trigger structure (endgame, role branch, seat branch, counter-claim) is
/// the part that matters.
pub fn phase_advice(state: &PlayerBeliefState, weights: &StrategyWeights) -> String {
    let alive = state.effective_alive().len();
    let pos_type = state.position_type();
    let has_counter_claim = state.seer_claims.len() >= 2;

    if alive > 0 && alive <= ENDGAME_ALIVE_THRESHOLD {
        return format!(
            "ENDGAME! {alive} alive. Every vote critical. No sheriff = equal votes, coordinate carefully."
        );
    }

    match state.own_role {
        Some(Role::Werewolf) => {
            if state.phase == Phase::Night {
                let seer_priority = (weights.seer_kill_priority * 100.0) as u32;
                let self_knife = (weights.self_knife_chance * 100.0) as u32;
                if state.round_num == 1 {
                    format!(
                        "Night 1: Kill seer {seer_priority}% (no badge = harder to prove). \
                         Consider self-knife {self_knife}% to bait heal."
                    )
                } else {
                    format!(
                        "Night {}: Kill seer > witch > hunter. Teammates: {}",
                        state.round_num,
                        state.teammates.join(", ")
                    )
                }
            } else {
                let fake_claim = (weights.fake_claim_chance * 100.0) as u32;
                let vote_split = (weights.vote_split_chance * 100.0) as u32;
                if pos_type == PositionType::Back {
                    format!(
                        "BACK POSITION: Control final vote direction. Summarize and push vote \
                         on a villager. Vote split: {vote_split}% chance."
                    )
                } else if has_counter_claim {
                    "Counter-claim exists! Mildly attack the fake-claiming wolf to build \
                     their credibility."
                        .to_string()
                } else {
                    format!(
                        "Day: Act confused. Split votes {vote_split}% chance. Can vote teammate \
                         for cover. Fake claim chance: {fake_claim}%"
                    )
                }
            }
        }
        Some(Role::Seer) => {
            let wolves_found: Vec<&String> = state
                .known_roles
                .iter()
                .filter(|(p, r)| **r == Role::Werewolf && **p != state.own_name)
                .map(|(p, _)| p)
                .collect();
            let base = match pos_type {
                PositionType::Front => {
                    "FRONT SEER: Claim NOW with detail. Check reasoning must be personalized, \
                     not template."
                }
                PositionType::Back => {
                    "BACK SEER: Counter-claim if needed. Point out the front seer's flaws \
                     specifically."
                }
                PositionType::Middle => {
                    "MIDDLE SEER: Analyze both sides before claiming. Your position hears \
                     most info."
                }
            };
            if wolves_found.is_empty() {
                format!("{base} No badge = credibility from DETAIL and LOGIC.")
            } else {
                let found: Vec<&str> = wolves_found.iter().map(|p| p.as_str()).collect();
                format!(
                    "{base} WOLF FOUND: {}. Push vote HARD. Warn witch to stay hidden.",
                    found.join(", ")
                )
            }
        }
        Some(Role::Witch) => {
            if state.phase == Phase::Night {
                if state.round_num == 1 {
                    "Night 1 NO-SHERIFF: Only heal if seer claimed AND credible. Watch for \
                     self-knife bait."
                        .to_string()
                } else {
                    "Night 2+: MUST use poison. Target fake-claiming seer or highest suspect."
                        .to_string()
                }
            } else if has_counter_claim {
                "Two seer claims! Consider poisoning one tonight. Stay hidden until voted out."
                    .to_string()
            } else {
                "No sheriff = you're 50% more important. Save potions, reveal only when being \
                 voted."
                    .to_string()
            }
        }
        Some(Role::Hunter) => {
            let shot_advice = if has_counter_claim {
                format!(
                    "Two seers claiming: {}. If voted out, shoot the fake one.",
                    state.seer_claims.join(" vs ")
                )
            } else if let Some(top) = top_suspect_name(state) {
                format!("Top shot target: {top}.")
            } else {
                "Track suspects for your shot.".to_string()
            };
            format!(
                "No badge to protect. Can be slightly aggressive. {shot_advice} \
                 Poisoned = can't shoot!"
            )
        }
        _ => {
            // Villager advice is also the fallback before a role is known.
            if has_counter_claim {
                format!(
                    "Two seers: {}. MUST pick a side with detailed reasoning. Prevent vote split!",
                    state.seer_claims.join(" vs ")
                )
            } else if pos_type == PositionType::Back {
                "BACK VILLAGER: Summarize and coordinate final vote. Your position controls \
                 outcome."
                    .to_string()
            } else {
                "No sheriff = your vote matters equally. Pick a side Day 1. Give detailed \
                 reasoning."
                    .to_string()
            }
        }
    }
}

/// Highest-suspicion player, name tie-broken, ignoring the threshold.
fn top_suspect_name(state: &PlayerBeliefState) -> Option<String> {
    state
        .suspicions
        .iter()
        .max_by(|a, b| {
            a.1.partial_cmp(b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.0.cmp(a.0))
        })
        .map(|(p, _)| p.clone())
}

/// Credibility line-up for the current claimants, used by the runner's debug
/// logging. Order follows claim order.
pub fn seer_claim_report(state: &PlayerBeliefState) -> Vec<(String, f64)> {
    state
        .seer_claims
        .iter()
        .map(|s| (s.clone(), evaluate_seer_credibility(state, s)))
        .collect()
}
