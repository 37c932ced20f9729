//! Playback state and loop mode enums.

use serde::{Deserialize, Serialize};

/// Processing state of the player, as reported to the host.
///
/// Exactly one state is active at a time. The state is owned by the
/// playback state machine and only mutated from engine signals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    /// No item loaded, or the engine was shut down.
    #[default]
    Idle,
    /// The engine started loading a new item.
    Loading,
    /// Playback is stalled on the network or a seek.
    Buffering,
    /// Playback can proceed from the current position.
    Ready,
    /// The end of the playlist was reached.
    Completed,
}

/// Loop mode for playback.
///
/// Stored by the engine itself and read through, never cached here, so
/// the reported mode cannot diverge from what the engine actually does.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// No repeat.
    #[default]
    None,
    /// Repeat the current track.
    One,
    /// Repeat the whole playlist.
    All,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_state_default_is_idle() {
        assert_eq!(PlayerState::default(), PlayerState::Idle);
    }

    #[test]
    fn test_state_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&PlayerState::Buffering).unwrap(),
            "\"buffering\""
        );
        assert_eq!(serde_json::to_string(&LoopMode::All).unwrap(), "\"all\"");
    }
}
