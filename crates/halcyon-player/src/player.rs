//! The player actor.
//!
//! One worker thread owns the engine, the state machine, and the
//! reconciler, and services both host commands and engine signals. That
//! single thread is the linearization point the reconciliation algorithm
//! needs: its read-then-write index walks never interleave with
//! engine-driven index mutation.

use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use halcyon_core::{Error, LoopMode, PlayerState, PlayerStatus, Result, Window};
use parking_lot::RwLock;
use tracing::{debug, info, trace};

use crate::engine::{EngineSignal, MediaEngine};
use crate::reconcile::{reconcile, ReconcileScope};
use crate::state::StateTracker;

/// Commands accepted by the player actor.
#[derive(Debug)]
pub enum PlayerCommand {
    Play,
    Pause,
    /// Seek to a position in milliseconds.
    Seek(i64),
    SkipToNext,
    SkipToPrevious,
    /// Replace the desired playback window.
    SetAudios(Window),
    SetLoopMode(LoopMode),
    /// Reply with a fresh status snapshot.
    FetchStatus(Sender<PlayerStatus>),
    SetAuthToken(String),
    Shutdown,
}

/// Events pushed to the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The engine confirmed a transition to this window index.
    TrackChanged(i64),
    /// The playback state machine transitioned.
    StateChanged(PlayerState),
}

/// Handle to the player worker.
///
/// Dropping the handle closes the command channel, which stops the
/// worker on its next loop turn; [`Player::shutdown`] does the same but
/// joins the worker so no engine callback can outlive it. Embedders must
/// stop the engine's callback thread (the relay side) before releasing
/// the engine itself.
pub struct Player {
    command_tx: Sender<PlayerCommand>,
    event_rx: Receiver<PlayerEvent>,
    state: Arc<RwLock<PlayerState>>,
    worker: Option<JoinHandle<()>>,
}

impl Player {
    /// Spawn the worker thread around an engine and its signal feed.
    pub fn spawn(
        engine: Box<dyn MediaEngine>,
        signals: Receiver<EngineSignal>,
    ) -> Result<Self> {
        let (command_tx, command_rx) = crossbeam_channel::unbounded();
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        let state = Arc::new(RwLock::new(PlayerState::Idle));

        let shared_state = state.clone();
        let worker = std::thread::Builder::new()
            .name("halcyon-player".to_owned())
            .spawn(move || {
                let worker = PlayerWorker {
                    engine,
                    tracker: StateTracker::new(),
                    commands: command_rx,
                    signals,
                    events: event_tx,
                    shared_state,
                };
                worker.run();
            })
            .map_err(|e| Error::Internal(format!("failed to spawn player thread: {e}")))?;

        Ok(Self {
            command_tx,
            event_rx,
            state,
            worker: Some(worker),
        })
    }

    /// Send a command to the worker.
    pub fn send_command(&self, command: PlayerCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|e| Error::ChannelUnavailable(format!("player worker gone: {e}")))
    }

    /// A sender for the command channel, for bridging layers living on
    /// the host side of the process boundary.
    pub fn commands(&self) -> Sender<PlayerCommand> {
        self.command_tx.clone()
    }

    /// A receiver for host-bound events. Receivers are cheap clones of
    /// one shared queue.
    pub fn events(&self) -> Receiver<PlayerEvent> {
        self.event_rx.clone()
    }

    /// Last state the worker reported, readable without a command
    /// round-trip.
    pub fn state(&self) -> PlayerState {
        *self.state.read()
    }

    /// Stop the worker and wait for it to finish.
    pub fn shutdown(mut self) {
        let _ = self.command_tx.send(PlayerCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

struct PlayerWorker {
    engine: Box<dyn MediaEngine>,
    tracker: StateTracker,
    commands: Receiver<PlayerCommand>,
    signals: Receiver<EngineSignal>,
    events: Sender<PlayerEvent>,
    shared_state: Arc<RwLock<PlayerState>>,
}

impl PlayerWorker {
    fn run(mut self) {
        info!("player worker started");

        loop {
            crossbeam_channel::select! {
                recv(self.commands) -> command => match command {
                    Ok(PlayerCommand::Shutdown) | Err(_) => break,
                    Ok(command) => self.handle_command(command),
                },
                recv(self.signals) -> signal => match signal {
                    Ok(signal) => self.handle_signal(signal, None),
                    // Relay side is gone; keep serving commands.
                    Err(_) => self.signals = crossbeam_channel::never(),
                },
            }
        }

        // Drain anything the engine already delivered so no callback
        // lands after teardown, then release the engine.
        while let Ok(signal) = self.signals.try_recv() {
            trace!(?signal, "signal discarded during teardown");
        }
        info!("player worker stopped");
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Play => self.engine.play(),
            PlayerCommand::Pause => self.engine.pause(),
            PlayerCommand::Seek(position_ms) => {
                // Report the stall before the engine confirms it, and
                // swallow the prefetch pulse the seek provokes.
                let state = self.tracker.force(PlayerState::Buffering);
                self.push_state(state);
                self.tracker.arm_suppression();
                self.engine.seek(position_ms);
            }
            PlayerCommand::SkipToNext => self.engine.next(),
            PlayerCommand::SkipToPrevious => self.engine.prev(),
            PlayerCommand::SetAudios(window) => self.set_audios(&window),
            PlayerCommand::SetLoopMode(mode) => self.engine.set_loop_mode(mode),
            PlayerCommand::FetchStatus(reply) => {
                let _ = reply.send(self.status());
            }
            PlayerCommand::SetAuthToken(token) => self.engine.set_auth_header(&token),
            // Intercepted by the run loop; nothing to do here.
            PlayerCommand::Shutdown => {}
        }
    }

    fn set_audios(&mut self, window: &Window) {
        self.tracker.arm_suppression();
        let scope = reconcile(self.engine.as_mut(), window);

        // Transitions the reconciliation itself provoked are noise;
        // drain them under the scope so they never reach the host as
        // track changes.
        while let Ok(signal) = self.signals.try_recv() {
            self.handle_signal(signal, Some(&scope));
        }

        if scope.kept_current() {
            let state = self.tracker.force(PlayerState::Ready);
            self.push_state(state);
        }
    }

    fn handle_signal(&mut self, signal: EngineSignal, reconciling: Option<&ReconcileScope>) {
        if let EngineSignal::ItemTransition(index) = signal {
            if reconciling.is_some() {
                debug!(index, "item transition suppressed during reconcile");
            } else {
                let _ = self.events.send(PlayerEvent::TrackChanged(index));
            }
        }

        if let Some(state) = self.tracker.on_signal(&signal) {
            self.push_state(state);
        }
    }

    fn status(&self) -> PlayerStatus {
        PlayerStatus {
            playing: self.engine.is_playing(),
            pos: self.engine.current_index(),
            position_ms: self.engine.position_ms(),
            buffered_position_ms: self.engine.buffered_ms(),
            state: self.tracker.state(),
            loop_mode: self.engine.loop_mode(),
        }
    }

    fn push_state(&self, state: PlayerState) {
        *self.shared_state.write() = state;
        let _ = self.events.send(PlayerEvent::StateChanged(state));
    }
}
