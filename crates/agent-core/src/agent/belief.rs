use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Closed role set for the 9-player no-sheriff format (3 wolves, 3
/// villagers, seer, witch, hunter).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Werewolf,
    Villager,
    Seer,
    Witch,
    Hunter,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Werewolf,
        Role::Villager,
        Role::Seer,
        Role::Witch,
        Role::Hunter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Werewolf => "werewolf",
            Role::Villager => "villager",
            Role::Seer => "seer",
            Role::Witch => "witch",
            Role::Hunter => "hunter",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Night,
    Day,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Night => "night",
            Phase::Day => "day",
        }
    }
}

/// Seat bands for the fixed 1..9 speaking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionType {
    Front,
    Middle,
    Back,
}

impl PositionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionType::Front => "front",
            PositionType::Middle => "middle",
            PositionType::Back => "back",
        }
    }
}

/// Consistency report over the belief state. Inconsistencies are diagnostic
/// only; the tracker keeps operating and readers fall back to
/// [`PlayerBeliefState::effective_alive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    pub self_marked_dead: bool,
    pub alive_list_empty: bool,
    pub staged_death_count: usize,
}

impl Diagnostics {
    pub fn is_consistent(&self) -> bool {
        !self.self_marked_dead && !self.alive_list_empty
    }
}

/// Everything this agent believes about the current game.
///
/// Owned by exactly one agent instance and mutated only through the
/// extraction rules and the suspicion engine; there is no sharing and no
/// locking. Maps are BTreeMaps so every read (context synthesis, suspicion
/// grouping) iterates in a stable order.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PlayerBeliefState {
    pub own_name: String,
    #[serde(default)]
    pub own_role: Option<Role>,
    /// Werewolf-channel teammates; append-only within a game.
    #[serde(default)]
    pub teammates: Vec<String>,
    /// Confirmed facts only: self role, teammate reveals, own seer checks.
    /// Claimed roles never enter this map.
    #[serde(default)]
    pub known_roles: BTreeMap<String, Role>,
    /// Seating order from the roster announcement; index + 1 is the seat.
    #[serde(default)]
    pub alive_players: Vec<String>,
    #[serde(default)]
    pub dead_players: Vec<String>,
    /// Night casualties observed but not yet committed. Committed at the
    /// next day transition so a hunter's pending death is not leaked early
    /// and night victims are not double-counted as alive.
    #[serde(default)]
    pub pending_dead_players: Vec<String>,
    /// Chronological vote targets per voter.
    #[serde(default)]
    pub voting_history: BTreeMap<String, Vec<String>>,
    /// Tagged claims per speaker, e.g. "accused:Player3".
    #[serde(default)]
    pub speech_patterns: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub claimed_roles: BTreeMap<String, Role>,
    /// Claim order matters for counter-claim display, so this is a Vec.
    #[serde(default)]
    pub seer_claims: Vec<String>,
    /// seer claimant -> the player they called wolf.
    #[serde(default)]
    pub wolf_checks: BTreeMap<String, String>,
    /// Unbounded, increment-only accumulator; no decay, no cap. Scores are
    /// only compared relatively and against the 0.2 display filter.
    #[serde(default)]
    pub suspicions: BTreeMap<String, f64>,
    #[serde(default)]
    pub round_num: u32,
    #[serde(default)]
    pub phase: Phase,
    /// Day-phase utterance counter, reset on every phase change.
    #[serde(default)]
    pub speech_order: u32,
    /// 1-based seat, 0 when this agent is absent from the roster.
    #[serde(default)]
    pub my_position: u32,
}

impl PlayerBeliefState {
    pub fn new(own_name: impl Into<String>) -> Self {
        Self {
            own_name: own_name.into(),
            ..Self::default()
        }
    }

    /// Clears game-scoped fields and repopulates the roster. Own role is
    /// game-scoped too: a fresh deal follows every roster announcement.
    pub fn reset_for_new_game(&mut self, roster: Vec<String>) {
        self.own_role = None;
        self.teammates.clear();
        self.known_roles.clear();
        self.suspicions.clear();
        self.dead_players.clear();
        self.pending_dead_players.clear();
        self.voting_history.clear();
        self.speech_patterns.clear();
        self.claimed_roles.clear();
        self.seer_claims.clear();
        self.wolf_checks.clear();
        self.round_num = 0;
        self.phase = Phase::Night;
        self.speech_order = 0;

        self.alive_players = roster;
        self.my_position = self
            .alive_players
            .iter()
            .position(|p| *p == self.own_name)
            .map(|i| i as u32 + 1)
            .unwrap_or(0);
    }

    pub fn is_dead(&self, player: &str) -> bool {
        self.dead_players.iter().any(|p| p == player)
    }

    /// Stages a death for commit at the next day transition. Idempotent.
    pub fn stage_death(&mut self, player: &str) {
        if self.is_dead(player) || self.pending_dead_players.iter().any(|p| p == player) {
            return;
        }
        self.pending_dead_players.push(player.to_string());
    }

    /// Commits a death immediately: into the dead set (once), out of the
    /// alive and pending lists.
    pub fn record_death(&mut self, player: &str) {
        if !self.is_dead(player) {
            self.dead_players.push(player.to_string());
        }
        self.alive_players.retain(|p| p != player);
        self.pending_dead_players.retain(|p| p != player);
    }

    pub fn commit_staged_deaths(&mut self) {
        let staged = std::mem::take(&mut self.pending_dead_players);
        for p in staged {
            self.record_death(&p);
        }
    }

    /// Players currently believed alive, in seating order.
    pub fn live_players(&self) -> Vec<String> {
        self.alive_players
            .iter()
            .filter(|p| !self.is_dead(p))
            .cloned()
            .collect()
    }

    pub fn alive_count(&self) -> usize {
        self.live_players().len()
    }

    /// 1-based seat of a player, if they are on the alive list.
    pub fn seat_position(&self, player: &str) -> Option<u32> {
        self.alive_players
            .iter()
            .position(|p| p == player)
            .map(|i| i as u32 + 1)
    }

    pub fn position_type(&self) -> PositionType {
        match self.my_position {
            0..=3 => PositionType::Front,
            4..=6 => PositionType::Middle,
            _ => PositionType::Back,
        }
    }

    /// Degraded-mode alive derivation: when the roster was never observed
    /// (or got wiped), fall back to every identifier this state has seen,
    /// minus the dead and pending-dead sets. Sorted, therefore stable, but
    /// without seating information.
    pub fn effective_alive(&self) -> Vec<String> {
        if !self.alive_players.is_empty() {
            return self
                .live_players()
                .into_iter()
                .filter(|p| !self.pending_dead_players.contains(p))
                .collect();
        }

        let mut seen: BTreeSet<String> = BTreeSet::new();
        seen.extend(self.known_roles.keys().cloned());
        seen.extend(self.claimed_roles.keys().cloned());
        seen.extend(self.speech_patterns.keys().cloned());
        seen.extend(self.seer_claims.iter().cloned());
        seen.extend(self.teammates.iter().cloned());
        for (voter, targets) in &self.voting_history {
            seen.insert(voter.clone());
            seen.extend(targets.iter().cloned());
        }
        seen.into_iter()
            .filter(|p| !self.is_dead(p) && !self.pending_dead_players.contains(p))
            .collect()
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            self_marked_dead: self.is_dead(&self.own_name),
            alive_list_empty: self.alive_players.is_empty(),
            staged_death_count: self.pending_dead_players.len(),
        }
    }
}
