//! Marker vocabulary and identifier scanning for the extraction rules.
//!
//! Matching is fixed-literal and position-aware rather than regex-based so
//! each rule stays cheap and unit-testable against literal transcripts.
//! English markers are matched case-insensitively (callers search a
//! `to_ascii_lowercase` copy, which preserves byte offsets); Chinese markers
//! are matched verbatim. The competition feed supports both languages in
//! parallel.

use super::belief::Role;

/// Moderator phrases that introduce a private role disclosure.
pub const ROLE_ANNOUNCE_MARKERS: &[&str] = &["your role is", "你的身份是", "你的角色是"];

/// English role words, checked before the Chinese set so overwrite order is
/// deterministic when a message carries both.
pub const ROLE_WORDS_EN: &[(&str, Role)] = &[
    ("werewolf", Role::Werewolf),
    ("villager", Role::Villager),
    ("seer", Role::Seer),
    ("witch", Role::Witch),
    ("hunter", Role::Hunter),
];

pub const ROLE_WORDS_CN: &[(&str, Role)] = &[
    ("狼人", Role::Werewolf),
    ("村民", Role::Villager),
    ("预言家", Role::Seer),
    ("女巫", Role::Witch),
    ("猎人", Role::Hunter),
];

/// Markers flagging a werewolf-only channel message.
pub const WOLF_CHANNEL_MARKERS: &[&str] = &["werewolves only", "仅狼人可见", "狼人请睁眼"];

/// Markers flagging the seer's private check feedback.
pub const SEER_CHANNEL_MARKERS: &[&str] = &["you've checked", "查验", "仅预言家可见"];

/// Explicit check-outcome markers. A check-request prompt ("choose who to
/// check tonight") carries the check verb but none of these; it must record
/// nothing.
pub const SEER_RESULT_MARKERS: &[&str] = &["result is", "结果是", "结果为"];

/// Copula verdict forms that also count as an outcome statement when they
/// directly follow a player identifier ("Player1是狼人").
pub const SEER_VERDICT_SUFFIXES: &[&str] =
    &["是狼人", "为狼人", "是好人", "为好人", "是村民", "为村民", "是平民", "为平民"];

pub const DEATH_MARKERS: &[&str] = &["eliminated", "died", "淘汰", "出局", "死亡"];

/// English game start needs both halves ("players are" + "new game");
/// Chinese uses single markers.
pub const GAME_START_EN_BOTH: (&str, &str) = ("players are", "new game");
pub const GAME_START_MARKERS_CN: &[&str] = &["游戏开始", "新的一局", "参与玩家"];

pub const NIGHT_MARKERS: &[&str] = &["night has fallen", "天黑了", "黑夜", "闭眼"];
pub const DAY_MARKERS: &[&str] = &["day is coming", "天亮了", "白天", "睁眼"];

pub const VOTE_MARKERS: &[&str] = &["vote", "投票", "投给", "选择"];

/// Wolf-accusation markers used for wolf-check claims by seer claimants.
pub const WOLF_CHECK_MARKERS: &[&str] = &["wolf", "werewolf", "查杀", "是狼", "狼人"];

/// Suspicion markers used for accusation tracking.
pub const ACCUSE_MARKERS: &[&str] = &["suspicious", "werewolf", "wolf", "狼", "可疑", "怀疑"];

/// Words that look like identifiers but never are.
const EXCLUDED_WORDS: &[&str] = &[
    "moderator", "system", "game", "night", "day", "vote", "check", "result",
    "eliminated", "died", "alive", "dead", "werewolf", "seer", "witch", "hunter",
    "villager", "系统", "玩家", "投票", "发言", "开始", "结束", "查验", "结果",
    "角色", "预言家", "女巫", "猎人", "村民", "狼人", "淘汰", "死亡", "出局", "存活",
    "参与玩家", "游戏开始", "新的一局",
];

/// Best-effort plausibility check for a player identifier.
pub fn is_player_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let char_len = name.chars().count();
    if !(2..=20).contains(&char_len) {
        return false;
    }
    if EXCLUDED_WORDS.contains(&name.to_ascii_lowercase().as_str()) {
        return false;
    }

    let mut chars = name.chars();
    let first = chars.next().unwrap();
    if first.is_ascii_alphabetic() {
        // Ascii identifier, optionally with digits/underscore/dash or a CJK tail.
        return chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || is_cjk(c));
    }
    if is_cjk(first) {
        return chars.all(is_cjk);
    }
    false
}

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

/// All player identifiers mentioned in `text`, in order of first appearance,
/// deduplicated. `PlayerN` tokens are authoritative; when none are present
/// the text is split on list separators and each piece is filtered through
/// [`is_player_name`] (handles free-form rosters like "Alice, Bob, Carol").
pub fn find_players(text: &str) -> Vec<String> {
    let tokens = find_player_tokens(text);
    if !tokens.is_empty() {
        return dedup_in_order(tokens.into_iter().map(|(_, name)| name));
    }

    let pieces = text
        .split(|c: char| {
            c.is_whitespace()
                || matches!(c, ',' | '，' | '、' | ':' | '：' | ';' | '；' | '.' | '!' | '?' | '。' | '！' | '？')
        })
        .filter(|s| !s.is_empty())
        .filter(|s| is_player_name(s))
        .map(|s| s.to_string());
    dedup_in_order(pieces)
}

/// `PlayerN` tokens with their byte offsets, in text order.
pub fn find_player_tokens(text: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find("Player") {
        let start = search_from + rel;
        let after = &text[start + "Player".len()..];
        let digits: String = after.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            search_from = start + "Player".len();
            continue;
        }
        let token = format!("Player{digits}");
        search_from = start + token.len();
        out.push((start, token));
    }
    out
}

fn dedup_in_order(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// True if any marker occurs in `text`. English markers are matched against
/// an ascii-lowercased copy; ascii lowering preserves byte offsets, so the
/// positional helpers below can mix lowered marker search with token scans
/// over the original text.
pub fn contains_any(text: &str, markers: &[&str]) -> bool {
    let lowered = text.to_ascii_lowercase();
    markers.iter().any(|m| lowered.contains(m))
}

/// Byte offset of the earliest marker occurrence, if any.
pub fn first_marker_offset(text: &str, markers: &[&str]) -> Option<usize> {
    let lowered = text.to_ascii_lowercase();
    markers.iter().filter_map(|m| lowered.find(m)).min()
}

/// First player token appearing after the earliest marker occurrence.
pub fn first_player_after_marker(text: &str, markers: &[&str]) -> Option<String> {
    let offset = first_marker_offset(text, markers)?;
    find_player_tokens(text)
        .into_iter()
        .find(|(pos, _)| *pos >= offset)
        .map(|(_, name)| name)
}

/// First player token that has a marker occurrence somewhere after it,
/// skipping `exclude`. Mirrors the "NAME ... wolf" claim shape.
pub fn first_player_before_marker(text: &str, markers: &[&str], exclude: &str) -> Option<String> {
    players_before_marker(text, markers, exclude).into_iter().next()
}

/// All player tokens followed (anywhere later in the text) by one of the
/// markers, in order, deduplicated, skipping `exclude`.
pub fn players_before_marker(text: &str, markers: &[&str], exclude: &str) -> Vec<String> {
    let lowered = text.to_ascii_lowercase();
    let tokens = find_player_tokens(text);
    let names = tokens
        .into_iter()
        .filter(|(pos, name)| {
            name != exclude
                && markers
                    .iter()
                    .any(|m| lowered[pos + name.len()..].contains(m))
        })
        .map(|(_, name)| name);
    dedup_in_order(names)
}
