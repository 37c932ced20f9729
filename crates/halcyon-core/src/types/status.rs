//! Player status snapshot returned to the host.

use serde::{Deserialize, Serialize};

use super::{LoopMode, PlayerState};

/// Snapshot of the player as seen by the host UI.
///
/// Always computed fresh from the engine and the state machine when the
/// host asks; never cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerStatus {
    /// Whether the engine is actively playing.
    pub playing: bool,
    /// Index of the current track within the previous+next window,
    /// −1 when nothing is current.
    pub pos: i64,
    /// Playback position in milliseconds.
    pub position_ms: i64,
    /// Buffered position in milliseconds.
    pub buffered_position_ms: i64,
    /// Processing state.
    pub state: PlayerState,
    /// Loop mode, read through from the engine.
    #[serde(rename = "loop")]
    pub loop_mode: LoopMode,
}

impl Default for PlayerStatus {
    fn default() -> Self {
        Self {
            playing: false,
            pos: -1,
            position_ms: 0,
            buffered_position_ms: 0,
            state: PlayerState::Idle,
            loop_mode: LoopMode::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_shape() {
        let status = PlayerStatus {
            playing: true,
            pos: 2,
            position_ms: 1500,
            buffered_position_ms: 9000,
            state: PlayerState::Ready,
            loop_mode: LoopMode::One,
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["playing"], true);
        assert_eq!(json["pos"], 2);
        assert_eq!(json["state"], "ready");
        assert_eq!(json["loop"], "one");
    }

    #[test]
    fn test_status_default_is_idle() {
        let status = PlayerStatus::default();
        assert_eq!(status.pos, -1);
        assert_eq!(status.state, PlayerState::Idle);
    }
}
