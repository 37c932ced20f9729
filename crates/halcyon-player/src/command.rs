//! Playlist-command backend.
//!
//! Adapts a native engine driven by string commands and observable
//! properties (a single mutable playlist with insert/remove/play-index
//! commands) to the [`MediaEngine`] capability set.

use std::sync::Arc;

use crossbeam_channel::Sender;
use halcyon_core::{Locator, LoopMode};
use tracing::{debug, trace};

use crate::engine::{EngineSignal, MediaEngine, CLIENT_USER_AGENT};

/// Properties read or written on the command engine.
pub mod props {
    pub const PLAYLIST_POS: &str = "playlist-playing-pos";
    pub const PLAYLIST_COUNT: &str = "playlist-count";
    pub const TIME_POS: &str = "time-pos";
    pub const CACHE_TIME: &str = "demuxer-cache-time";
    pub const PAUSE: &str = "pause";
    pub const IDLE_ACTIVE: &str = "idle-active";
    pub const CORE_IDLE: &str = "core-idle";
    pub const EOF_REACHED: &str = "eof-reached";
    pub const LOOP_FILE: &str = "loop";
    pub const LOOP_PLAYLIST: &str = "loop-playlist";
    pub const HTTP_HEADERS: &str = "http-header-fields";
}

/// Options the embedder must apply before initializing the engine: the
/// next playlist entry is prefetched, and the engine idles instead of
/// exiting when the playlist drains.
pub const STARTUP_OPTIONS: &[(&str, &str)] = &[
    ("prefetch-playlist", "yes"),
    ("merge-files", "yes"),
    ("keep-open", "yes"),
    ("idle", "yes"),
];

/// Raw command/property surface of the engine.
///
/// Implemented by the platform embedder over the actual engine handle.
/// Every method must be a silent no-op (or zero/`None`) once
/// `is_available` reports `false`.
pub trait CommandPort: Send + Sync {
    fn is_available(&self) -> bool {
        true
    }

    fn command(&self, name: &str, args: &[&str]);

    fn get_flag(&self, prop: &str) -> bool;
    fn get_int(&self, prop: &str) -> i64;
    fn get_double(&self, prop: &str) -> f64;
    fn get_string(&self, prop: &str) -> Option<String>;

    fn set_string(&self, prop: &str, value: &str);
    fn set_double(&self, prop: &str, value: f64);
}

/// [`MediaEngine`] over a [`CommandPort`] surface.
///
/// The engine itself stores loop mode and the HTTP header block; both
/// are read through, never cached here.
pub struct CommandEngine<P: CommandPort> {
    port: Arc<P>,
}

impl<P: CommandPort> CommandEngine<P> {
    pub const fn new(port: Arc<P>) -> Self {
        Self { port }
    }
}

impl<P: CommandPort> MediaEngine for CommandEngine<P> {
    fn item_locator_at(&self, index: usize) -> Option<Locator> {
        self.port
            .get_string(&format!("playlist/{index}/filename"))
            .filter(|url| !url.is_empty())
            .map(Locator::from)
    }

    fn insert(&mut self, locator: &Locator, index: usize) {
        if !self.port.is_available() {
            return;
        }
        trace!(index, %locator, "playlist insert");
        if index >= self.count() {
            self.port.command("loadfile", &[locator.as_str(), "append"]);
        } else {
            let at = index.to_string();
            self.port
                .command("loadfile", &[locator.as_str(), "insert-at", &at]);
        }
    }

    fn remove(&mut self, index: usize) {
        if !self.port.is_available() {
            return;
        }
        trace!(index, "playlist remove");
        self.port.command("playlist-remove", &[&index.to_string()]);
    }

    fn remove_range(&mut self, start: usize, end: usize) {
        // No range primitive on this engine; removed back to front so
        // the remaining indices stay valid.
        for index in (start..end).rev() {
            self.remove(index);
        }
    }

    fn play_index(&mut self, index: usize) {
        if !self.port.is_available() {
            return;
        }
        debug!(index, "playlist jump");
        self.port
            .command("playlist-play-index", &[&index.to_string()]);
    }

    fn current_index(&self) -> i64 {
        self.port.get_int(props::PLAYLIST_POS)
    }

    fn count(&self) -> usize {
        self.port.get_int(props::PLAYLIST_COUNT).max(0) as usize
    }

    fn play(&mut self) {
        self.port.command("set", &[props::PAUSE, "no"]);
    }

    fn pause(&mut self) {
        self.port.command("set", &[props::PAUSE, "yes"]);
    }

    fn seek(&mut self, position_ms: i64) {
        self.port
            .set_double(props::TIME_POS, position_ms as f64 / 1000.0);
    }

    fn next(&mut self) {
        self.port.command("playlist-next", &[]);
    }

    fn prev(&mut self) {
        self.port.command("playlist-prev", &[]);
    }

    fn position_ms(&self) -> i64 {
        (self.port.get_double(props::TIME_POS) * 1000.0) as i64
    }

    fn buffered_ms(&self) -> i64 {
        (self.port.get_double(props::CACHE_TIME) * 1000.0) as i64
    }

    fn is_playing(&self) -> bool {
        self.port.is_available() && !self.port.get_flag(props::PAUSE)
    }

    fn set_loop_mode(&mut self, mode: LoopMode) {
        let (file, playlist) = match mode {
            LoopMode::One => ("inf", "no"),
            LoopMode::All => ("no", "inf"),
            LoopMode::None => ("no", "no"),
        };
        self.port.set_string(props::LOOP_FILE, file);
        self.port.set_string(props::LOOP_PLAYLIST, playlist);
    }

    fn loop_mode(&self) -> LoopMode {
        if self.port.get_string(props::LOOP_FILE).as_deref() == Some("inf") {
            return LoopMode::One;
        }
        if self.port.get_string(props::LOOP_PLAYLIST).as_deref() == Some("inf") {
            return LoopMode::All;
        }
        LoopMode::None
    }

    fn set_auth_header(&mut self, token: &str) {
        let headers = format!("Cookie: {token}\nUser-Agent: {CLIENT_USER_AGENT}");
        self.port.set_string(props::HTTP_HEADERS, &headers);
    }
}

/// Lifecycle events the engine's event loop reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEvent {
    StartFile,
    PlaybackRestart,
    Seek,
    Shutdown,
}

/// A typed property-change notification from the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Int(i64),
    Flag(bool),
    Double(f64),
}

/// Translates the engine's event loop into [`EngineSignal`]s.
///
/// Driven from the engine-owned event thread. Keeps a port handle of its
/// own because end-of-stream is a property that must be re-read at
/// notification time.
pub struct CommandRelay<P: CommandPort> {
    port: Arc<P>,
    signals: Sender<EngineSignal>,
}

impl<P: CommandPort> CommandRelay<P> {
    pub const fn new(port: Arc<P>, signals: Sender<EngineSignal>) -> Self {
        Self { port, signals }
    }

    pub fn on_event(&self, event: CommandEvent) {
        let signal = match event {
            CommandEvent::StartFile => EngineSignal::StartFile,
            CommandEvent::PlaybackRestart => EngineSignal::PlaybackRestart,
            CommandEvent::Seek => EngineSignal::Seeking,
            CommandEvent::Shutdown => EngineSignal::Shutdown,
        };
        self.send(signal);
    }

    pub fn on_property(&self, name: &str, value: PropertyValue) {
        match (name, value) {
            (props::PLAYLIST_POS, PropertyValue::Int(pos)) => {
                if pos >= 0 {
                    self.send(EngineSignal::ItemTransition(pos));
                }
            }
            (props::IDLE_ACTIVE, PropertyValue::Flag(idle)) => {
                self.send(EngineSignal::IdleActive(idle));
            }
            (props::CORE_IDLE, PropertyValue::Flag(stalled)) => {
                self.send(EngineSignal::CoreBuffering(stalled));
            }
            (props::EOF_REACHED, PropertyValue::Flag(_)) => {
                if self.port.get_flag(props::EOF_REACHED) {
                    self.send(EngineSignal::EndOfStream);
                }
            }
            // Pause flips are visible through fetch_status, not state.
            (props::PAUSE, _) => {}
            _ => trace!(name, "unobserved property change"),
        }
    }

    fn send(&self, signal: EngineSignal) {
        // The actor may already be gone during teardown.
        if self.signals.send(signal).is_err() {
            trace!(?signal, "engine signal dropped, player gone");
        }
    }
}
