//! Extraction rules: one inbound message in, belief-state mutations out.
//!
//! Every rule is best-effort: a pattern miss is a no-op, never an error, and
//! nothing here returns a `Result`. Ambiguous text resolves deterministically
//! (first match wins; English patterns before Chinese).

use serde::{Deserialize, Serialize};

use super::belief::{Phase, PlayerBeliefState, Role};
use super::event::{ChannelVisibility, GameEvent};
use super::lexicon;
use super::suspicion;

/// Tracker knobs. The staged death commit is the correct behavior; the
/// immediate mode exists only for replaying older transcripts that assumed
/// night casualties left the alive list at announcement time.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TrackerConfig {
    #[serde(default)]
    pub immediate_death_commit: bool,
}

/// One extraction rule. Rules are dispatched in [`RULES`] order and are
/// independently applicable; each can be exercised on its own via
/// [`apply_rule`] with a literal transcript fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTag {
    SelfRole,
    TeammateReveal,
    SeerCheckResult,
    DeathAnnouncement,
    GameStart,
    PhaseTransition,
    SpeechOrder,
    VoteRecord,
    RoleClaim,
    WolfCheckClaim,
    Accusation,
}

pub const RULES: &[RuleTag] = &[
    RuleTag::SelfRole,
    RuleTag::TeammateReveal,
    RuleTag::SeerCheckResult,
    RuleTag::DeathAnnouncement,
    RuleTag::GameStart,
    RuleTag::PhaseTransition,
    RuleTag::SpeechOrder,
    RuleTag::VoteRecord,
    RuleTag::RoleClaim,
    RuleTag::WolfCheckClaim,
    RuleTag::Accusation,
];

/// Applies the full rule table to one inbound event, in order.
pub fn observe(state: &mut PlayerBeliefState, event: &GameEvent, cfg: &TrackerConfig) {
    for rule in RULES {
        apply_rule(*rule, state, event, cfg);
    }
}

pub fn apply_rule(tag: RuleTag, state: &mut PlayerBeliefState, event: &GameEvent, cfg: &TrackerConfig) {
    match tag {
        RuleTag::SelfRole => self_role(state, event),
        RuleTag::TeammateReveal => teammate_reveal(state, event),
        RuleTag::SeerCheckResult => seer_check_result(state, event),
        RuleTag::DeathAnnouncement => death_announcement(state, event, cfg),
        RuleTag::GameStart => game_start(state, event),
        RuleTag::PhaseTransition => phase_transition(state, event),
        RuleTag::SpeechOrder => speech_order(state, event),
        RuleTag::VoteRecord => vote_record(state, event),
        RuleTag::RoleClaim => role_claim(state, event),
        RuleTag::WolfCheckClaim => wolf_check_claim(state, event),
        RuleTag::Accusation => accusation(state, event),
    }
}

/// First role word found in `text`, English set before Chinese.
fn first_role_word(text: &str) -> Option<Role> {
    let lowered = text.to_ascii_lowercase();
    for (word, role) in lexicon::ROLE_WORDS_EN {
        if lowered.contains(word) {
            return Some(*role);
        }
    }
    for (word, role) in lexicon::ROLE_WORDS_CN {
        if text.contains(word) {
            return Some(*role);
        }
    }
    None
}

fn self_role(state: &mut PlayerBeliefState, event: &GameEvent) {
    if state.own_role.is_some() {
        // Immutable after the first disclosure within a game.
        return;
    }
    if !lexicon::contains_any(&event.text, lexicon::ROLE_ANNOUNCE_MARKERS) {
        return;
    }
    if !event.text.contains(&state.own_name) {
        return;
    }
    if let Some(role) = first_role_word(&event.text) {
        state.own_role = Some(role);
        let own = state.own_name.clone();
        state.known_roles.insert(own, role);
    }
}

fn is_wolf_channel(event: &GameEvent) -> bool {
    event.channel == ChannelVisibility::WerewolvesOnly
        || lexicon::contains_any(&event.text, lexicon::WOLF_CHANNEL_MARKERS)
}

fn teammate_reveal(state: &mut PlayerBeliefState, event: &GameEvent) {
    if state.own_role != Some(Role::Werewolf) || !is_wolf_channel(event) {
        return;
    }
    for p in lexicon::find_players(&event.text) {
        if p == state.own_name {
            continue;
        }
        if !state.teammates.contains(&p) {
            state.teammates.push(p.clone());
        }
        state.known_roles.insert(p, Role::Werewolf);
    }
}

fn is_seer_feedback(event: &GameEvent) -> bool {
    event.channel == ChannelVisibility::SeerOnly
        || lexicon::contains_any(&event.text, lexicon::SEER_CHANNEL_MARKERS)
}

/// Check-outcome extraction. Requires an explicit result marker (or a copula
/// verdict directly after a player token); a check-request prompt that names
/// a player without stating an outcome records nothing.
fn seer_check_result(state: &mut PlayerBeliefState, event: &GameEvent) {
    if state.own_role != Some(Role::Seer) || !is_seer_feedback(event) {
        return;
    }
    let text = &event.text;

    if let Some(offset) = lexicon::first_marker_offset(text, lexicon::SEER_RESULT_MARKERS) {
        let subject = lexicon::first_player_after_marker(text, &["checked", "查验"])
            .or_else(|| lexicon::find_players(text).into_iter().find(|p| *p != state.own_name));
        let outcome = first_role_word(&text[offset..])
            .map(|r| if r == Role::Werewolf { Role::Werewolf } else { Role::Villager })
            .or_else(|| {
                // "好人" (innocent) is a valid outcome without being a role word.
                text[offset..].contains("好人").then_some(Role::Villager)
            });
        if let (Some(subject), Some(outcome)) = (subject, outcome)
            && subject != state.own_name
        {
            state.known_roles.insert(subject, outcome);
        }
        return;
    }

    // Verdict form: first player token immediately followed by 是狼人 etc.
    for (pos, name) in lexicon::find_player_tokens(text) {
        if name == state.own_name {
            continue;
        }
        let rest = &text[pos + name.len()..];
        for suffix in lexicon::SEER_VERDICT_SUFFIXES {
            if rest.starts_with(suffix) {
                let outcome = if suffix.contains("狼") {
                    Role::Werewolf
                } else {
                    Role::Villager
                };
                state.known_roles.insert(name, outcome);
                return;
            }
        }
    }
}

fn death_announcement(state: &mut PlayerBeliefState, event: &GameEvent, cfg: &TrackerConfig) {
    if !lexicon::contains_any(&event.text, lexicon::DEATH_MARKERS) {
        return;
    }
    for p in lexicon::find_players(&event.text) {
        if cfg.immediate_death_commit {
            state.record_death(&p);
        } else {
            state.stage_death(&p);
        }
    }
}

fn is_game_start(text: &str) -> bool {
    let lowered = text.to_ascii_lowercase();
    let (a, b) = lexicon::GAME_START_EN_BOTH;
    (lowered.contains(a) && lowered.contains(b))
        || lexicon::contains_any(text, lexicon::GAME_START_MARKERS_CN)
}

fn game_start(state: &mut PlayerBeliefState, event: &GameEvent) {
    if !is_game_start(&event.text) {
        return;
    }
    let roster = lexicon::find_players(&event.text);
    state.reset_for_new_game(roster);
}

fn phase_transition(state: &mut PlayerBeliefState, event: &GameEvent) {
    if lexicon::contains_any(&event.text, lexicon::NIGHT_MARKERS) {
        state.phase = Phase::Night;
        state.round_num += 1;
        state.speech_order = 0;
    } else if lexicon::contains_any(&event.text, lexicon::DAY_MARKERS) {
        state.phase = Phase::Day;
        state.speech_order = 0;
        state.commit_staged_deaths();
    }
}

fn speech_order(state: &mut PlayerBeliefState, event: &GameEvent) {
    if state.phase == Phase::Day
        && event.speaker != state.own_name
        && lexicon::is_player_name(&event.speaker)
    {
        state.speech_order += 1;
    }
}

/// Vote target: first player named after a voting marker, else the first
/// non-speaker mention. One target per message.
fn find_vote_target(text: &str, speaker: &str) -> Option<String> {
    if let Some(target) = lexicon::first_player_after_marker(text, lexicon::VOTE_MARKERS)
        && target != speaker
    {
        return Some(target);
    }
    lexicon::find_players(text).into_iter().find(|p| p != speaker)
}

fn vote_record(state: &mut PlayerBeliefState, event: &GameEvent) {
    if !lexicon::contains_any(&event.text, lexicon::VOTE_MARKERS) {
        return;
    }
    if !lexicon::is_player_name(&event.speaker) {
        return;
    }
    let Some(target) = find_vote_target(&event.text, &event.speaker) else {
        return;
    };
    state
        .voting_history
        .entry(event.speaker.clone())
        .or_default()
        .push(target.clone());
    suspicion::update_from_vote(state, &event.speaker, &target);
}

fn role_claim(state: &mut PlayerBeliefState, event: &GameEvent) {
    if !lexicon::is_player_name(&event.speaker) {
        return;
    }
    let lowered = event.text.to_ascii_lowercase();
    for role in [Role::Seer, Role::Witch, Role::Hunter, Role::Villager] {
        let en = role.as_str();
        let claimed_en =
            lowered.contains(&format!("i am {en}")) || lowered.contains(&format!("i'm {en}"));
        let claimed_cn = lexicon::ROLE_WORDS_CN
            .iter()
            .filter(|(_, r)| *r == role)
            .any(|(cn, _)| {
                event.text.contains(&format!("我是{cn}")) || event.text.contains(&format!("我就是{cn}"))
            });
        if claimed_en || claimed_cn {
            state.claimed_roles.insert(event.speaker.clone(), role);
            if role == Role::Seer && !state.seer_claims.contains(&event.speaker) {
                state.seer_claims.push(event.speaker.clone());
            }
        }
    }
}

fn wolf_check_claim(state: &mut PlayerBeliefState, event: &GameEvent) {
    if !state.seer_claims.contains(&event.speaker) {
        return;
    }
    if let Some(target) =
        lexicon::first_player_before_marker(&event.text, lexicon::WOLF_CHECK_MARKERS, &event.speaker)
    {
        state.wolf_checks.insert(event.speaker.clone(), target);
    }
}

fn accusation(state: &mut PlayerBeliefState, event: &GameEvent) {
    if event.speaker == state.own_name || !lexicon::is_player_name(&event.speaker) {
        return;
    }
    let accused =
        lexicon::players_before_marker(&event.text, lexicon::ACCUSE_MARKERS, &event.speaker);
    if accused.is_empty() {
        return;
    }
    let entry = state
        .speech_patterns
        .entry(event.speaker.clone())
        .or_default();
    for a in accused {
        entry.push(format!("accused:{a}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::event::GameEvent;

    fn agent(name: &str) -> (PlayerBeliefState, TrackerConfig) {
        (PlayerBeliefState::new(name), TrackerConfig::default())
    }

    fn started(name: &str) -> (PlayerBeliefState, TrackerConfig) {
        let (mut state, cfg) = agent(name);
        observe(
            &mut state,
            &GameEvent::moderator(
                "A new game begins! The players are Player1, Player2, Player3, Player4, \
                 Player5, Player6, Player7, Player8, Player9.",
            ),
            &cfg,
        );
        (state, cfg)
    }

    #[test]
    fn roster_announcement_sets_position_and_resets_state() {
        let (mut state, cfg) = agent("Player5");
        state.suspicions.insert("Player2".to_string(), 0.4);
        observe(
            &mut state,
            &GameEvent::moderator(
                "A new game begins! The players are Player1, Player2, Player3, Player4, \
                 Player5, Player6, Player7, Player8, Player9.",
            ),
            &cfg,
        );
        assert_eq!(state.my_position, 5);
        assert_eq!(state.alive_players.len(), 9);
        assert!(state.suspicions.is_empty());
    }

    #[test]
    fn self_role_sets_once_and_ignores_later_disclosures() {
        let (mut state, cfg) = started("Player5");
        observe(
            &mut state,
            &GameEvent::moderator("Player5, your role is seer."),
            &cfg,
        );
        assert_eq!(state.own_role, Some(Role::Seer));
        assert_eq!(state.known_roles.get("Player5"), Some(&Role::Seer));

        observe(
            &mut state,
            &GameEvent::moderator("Player5, your role is werewolf."),
            &cfg,
        );
        assert_eq!(state.own_role, Some(Role::Seer));
    }

    #[test]
    fn self_role_ignores_messages_naming_someone_else() {
        let (mut state, cfg) = started("Player5");
        observe(
            &mut state,
            &GameEvent::moderator("Player2, your role is witch."),
            &cfg,
        );
        assert_eq!(state.own_role, None);
    }

    #[test]
    fn chinese_role_disclosure_is_recognized() {
        let (mut state, cfg) = started("Player5");
        observe(
            &mut state,
            &GameEvent::moderator("Player5，你的身份是预言家。"),
            &cfg,
        );
        assert_eq!(state.own_role, Some(Role::Seer));
    }

    #[test]
    fn teammates_only_recorded_on_wolf_channel_as_wolf() {
        let (mut state, cfg) = started("Player5");
        observe(
            &mut state,
            &GameEvent::moderator("Player5, your role is werewolf."),
            &cfg,
        );
        // Public message naming players must not leak teammates.
        observe(
            &mut state,
            &GameEvent::public("Player2", "I trust Player3 and Player4."),
            &cfg,
        );
        assert!(state.teammates.is_empty());

        observe(
            &mut state,
            &GameEvent::moderator("WEREWOLVES ONLY: your pack is Player5, Player3, Player7."),
            &cfg,
        );
        assert_eq!(state.teammates, vec!["Player3", "Player7"]);
        assert_eq!(state.known_roles.get("Player3"), Some(&Role::Werewolf));
        assert_eq!(state.known_roles.get("Player7"), Some(&Role::Werewolf));
    }

    #[test]
    fn teammate_reveal_ignored_for_non_wolves() {
        let (mut state, cfg) = started("Player5");
        observe(
            &mut state,
            &GameEvent::moderator("Player5, your role is villager."),
            &cfg,
        );
        observe(
            &mut state,
            &GameEvent::moderator("WEREWOLVES ONLY: your pack is Player3, Player7."),
            &cfg,
        );
        assert!(state.teammates.is_empty());
    }

    #[test]
    fn seer_check_result_requires_explicit_result_marker() {
        let (mut state, cfg) = started("Player5");
        observe(
            &mut state,
            &GameEvent::moderator("Player5, your role is seer."),
            &cfg,
        );

        // Check-request prompt: passes the seer-feedback gate and names a
        // player, but states no outcome. Must record nothing.
        observe(
            &mut state,
            &GameEvent::moderator("仅预言家可见：请选择你要查验的玩家，例如Player2。"),
            &cfg,
        );
        assert_eq!(state.known_roles.get("Player2"), None);

        observe(
            &mut state,
            &GameEvent::moderator("You've checked Player2, result is: werewolf."),
            &cfg,
        );
        assert_eq!(state.known_roles.get("Player2"), Some(&Role::Werewolf));
    }

    #[test]
    fn seer_check_result_chinese_forms() {
        let (mut state, cfg) = started("Player5");
        observe(
            &mut state,
            &GameEvent::moderator("Player5，你的身份是预言家。"),
            &cfg,
        );
        observe(
            &mut state,
            &GameEvent::moderator("你查验了Player3，结果是：好人。"),
            &cfg,
        );
        assert_eq!(state.known_roles.get("Player3"), Some(&Role::Villager));

        observe(
            &mut state,
            &GameEvent::moderator("仅预言家可见：Player7是狼人。"),
            &cfg,
        );
        assert_eq!(state.known_roles.get("Player7"), Some(&Role::Werewolf));
    }

    #[test]
    fn seer_check_result_ignored_when_not_seer() {
        let (mut state, cfg) = started("Player5");
        observe(
            &mut state,
            &GameEvent::moderator("Player5, your role is villager."),
            &cfg,
        );
        observe(
            &mut state,
            &GameEvent::moderator("You've checked Player2, result is: werewolf."),
            &cfg,
        );
        assert_eq!(state.known_roles.get("Player2"), None);
    }

    #[test]
    fn night_death_stays_staged_until_day_transition() {
        let (mut state, cfg) = started("Player5");
        observe(&mut state, &GameEvent::moderator("Night has fallen."), &cfg);
        assert_eq!(state.round_num, 1);

        observe(
            &mut state,
            &GameEvent::moderator("Player3 died during the night."),
            &cfg,
        );
        assert!(state.alive_players.contains(&"Player3".to_string()));
        assert!(!state.is_dead("Player3"));

        observe(&mut state, &GameEvent::moderator("The day is coming."), &cfg);
        assert!(state.is_dead("Player3"));
        assert!(!state.alive_players.contains(&"Player3".to_string()));
        assert_eq!(state.phase, Phase::Day);
    }

    #[test]
    fn immediate_death_mode_commits_at_announcement() {
        let (mut state, _) = started("Player5");
        let cfg = TrackerConfig {
            immediate_death_commit: true,
        };
        observe(
            &mut state,
            &GameEvent::moderator("Player3 was eliminated."),
            &cfg,
        );
        assert!(state.is_dead("Player3"));
        assert!(!state.alive_players.contains(&"Player3".to_string()));
    }

    #[test]
    fn death_is_idempotent_across_repeat_announcements() {
        let (mut state, cfg) = started("Player5");
        observe(
            &mut state,
            &GameEvent::moderator("Player3 was eliminated."),
            &cfg,
        );
        observe(&mut state, &GameEvent::moderator("The day is coming."), &cfg);
        observe(
            &mut state,
            &GameEvent::moderator("Player3 was eliminated."),
            &cfg,
        );
        observe(&mut state, &GameEvent::moderator("The day is coming."), &cfg);
        assert_eq!(
            state.dead_players.iter().filter(|p| *p == "Player3").count(),
            1
        );
    }

    #[test]
    fn speech_order_counts_other_players_during_day() {
        let (mut state, cfg) = started("Player5");
        observe(&mut state, &GameEvent::moderator("The day is coming."), &cfg);
        observe(&mut state, &GameEvent::public("Player1", "Good morning."), &cfg);
        observe(&mut state, &GameEvent::public("Player2", "Morning."), &cfg);
        observe(&mut state, &GameEvent::public("Player5", "Hello."), &cfg);
        observe(&mut state, &GameEvent::moderator("Please keep order."), &cfg);
        assert_eq!(state.speech_order, 2);

        observe(&mut state, &GameEvent::moderator("Night has fallen."), &cfg);
        assert_eq!(state.speech_order, 0);
    }

    #[test]
    fn vote_is_recorded_with_marker_target() {
        let (mut state, cfg) = started("Player5");
        observe(
            &mut state,
            &GameEvent::public("Player2", "I vote Player7, he has been too quiet."),
            &cfg,
        );
        assert_eq!(
            state.voting_history.get("Player2"),
            Some(&vec!["Player7".to_string()])
        );
    }

    #[test]
    fn role_claim_records_claim_and_seer_list_once() {
        let (mut state, cfg) = started("Player5");
        observe(&mut state, &GameEvent::public("Player2", "I am seer."), &cfg);
        observe(&mut state, &GameEvent::public("Player2", "I am seer, truly."), &cfg);
        observe(&mut state, &GameEvent::public("Player8", "我是预言家。"), &cfg);
        assert_eq!(state.claimed_roles.get("Player2"), Some(&Role::Seer));
        assert_eq!(state.seer_claims, vec!["Player2", "Player8"]);
    }

    #[test]
    fn wolf_check_claim_only_for_seer_claimants() {
        let (mut state, cfg) = started("Player5");
        observe(
            &mut state,
            &GameEvent::public("Player3", "Player9 is a werewolf, I checked."),
            &cfg,
        );
        assert!(state.wolf_checks.is_empty());

        observe(&mut state, &GameEvent::public("Player3", "I am seer."), &cfg);
        observe(
            &mut state,
            &GameEvent::public("Player3", "I checked Player9, he is a wolf."),
            &cfg,
        );
        assert_eq!(state.wolf_checks.get("Player3"), Some(&"Player9".to_string()));
    }

    #[test]
    fn accusations_are_tagged_per_speaker() {
        let (mut state, cfg) = started("Player5");
        observe(
            &mut state,
            &GameEvent::public("Player2", "Player7 seems suspicious, and Player4 too 可疑."),
            &cfg,
        );
        assert_eq!(
            state.speech_patterns.get("Player2"),
            Some(&vec![
                "accused:Player7".to_string(),
                "accused:Player4".to_string()
            ])
        );
    }

    #[test]
    fn own_speech_is_not_tracked_as_accusation() {
        let (mut state, cfg) = started("Player5");
        observe(
            &mut state,
            &GameEvent::public("Player5", "Player7 seems suspicious."),
            &cfg,
        );
        assert!(state.speech_patterns.is_empty());
    }
}
