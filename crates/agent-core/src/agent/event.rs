use serde::{Deserialize, Serialize};

/// Who a table message was visible to when it was delivered.
///
/// The moderator feed tags private-channel messages explicitly; untagged
/// messages are treated as public. Extraction rules that depend on a private
/// channel also accept the in-text channel markers, so transcripts replayed
/// without tags still work.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChannelVisibility {
    #[default]
    Public,
    WerewolvesOnly,
    SeerOnly,
    Moderator,
}

/// One inbound table message: narration from the moderator or another
/// player's speech. Speaker identity is taken as-is; the tracker only
/// applies pattern-level plausibility checks, never roster validation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GameEvent {
    pub speaker: String,
    pub text: String,
    #[serde(default)]
    pub channel: ChannelVisibility,
}

impl GameEvent {
    pub fn public(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            channel: ChannelVisibility::Public,
        }
    }

    pub fn moderator(text: impl Into<String>) -> Self {
        Self {
            speaker: "Moderator".to_string(),
            text: text.into(),
            channel: ChannelVisibility::Moderator,
        }
    }

    pub fn on_channel(
        speaker: impl Into<String>,
        text: impl Into<String>,
        channel: ChannelVisibility,
    ) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            channel,
        }
    }
}
