//! Playback state machine.

use halcyon_core::PlayerState;
use tracing::debug;

use crate::engine::EngineSignal;

/// Derives the reported [`PlayerState`] from engine signals.
///
/// Owns the one piece of memory the mapping needs: a buffering
/// suppression flag. Right after a seek or a playlist update the engine
/// re-evaluates prefetch and emits one spurious core-buffering pulse that
/// does not correspond to real stalling; while the flag is armed, that
/// first pulse is reported as `Ready` instead of `Buffering`. The flag
/// disarms on the first core-buffering observation of either polarity.
#[derive(Debug, Default)]
pub struct StateTracker {
    state: PlayerState,
    buffering_suppressed: bool,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub const fn state(&self) -> PlayerState {
        self.state
    }

    /// Ignore the next core-buffering pulse. Called on every explicit
    /// seek and on every playlist update.
    pub fn arm_suppression(&mut self) {
        self.buffering_suppressed = true;
    }

    /// Set the state directly, bypassing signal mapping. Used for the
    /// optimistic `Buffering` on seek and the `Ready` after a
    /// continuity-preserving playlist update.
    pub fn force(&mut self, state: PlayerState) -> PlayerState {
        self.transition(state)
    }

    /// Apply one engine signal. Returns the state to report when the
    /// signal maps to one, `None` when it leaves state alone. Reporting
    /// the same state twice is allowed; unknown or non-state signals
    /// change nothing.
    pub fn on_signal(&mut self, signal: &EngineSignal) -> Option<PlayerState> {
        match *signal {
            EngineSignal::StartFile => Some(self.transition(PlayerState::Loading)),
            EngineSignal::PlaybackRestart => Some(self.transition(PlayerState::Ready)),
            EngineSignal::Seeking => Some(self.transition(PlayerState::Buffering)),
            EngineSignal::IdleActive(true) => Some(self.transition(PlayerState::Idle)),
            EngineSignal::CoreBuffering(stalled) => {
                let suppressed = self.buffering_suppressed;
                self.buffering_suppressed = false;
                if stalled && !suppressed {
                    Some(self.transition(PlayerState::Buffering))
                } else {
                    Some(self.transition(PlayerState::Ready))
                }
            }
            EngineSignal::EndOfStream => Some(self.transition(PlayerState::Completed)),
            EngineSignal::Shutdown => Some(self.transition(PlayerState::Idle)),
            EngineSignal::IdleActive(false) | EngineSignal::ItemTransition(_) => None,
        }
    }

    fn transition(&mut self, state: PlayerState) -> PlayerState {
        if state != self.state {
            debug!(from = ?self.state, to = ?state, "playback state transition");
        }
        self.state = state;
        state
    }
}
