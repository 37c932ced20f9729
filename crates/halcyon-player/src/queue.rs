//! Queue-engine backend.
//!
//! Adapts a native engine that holds a mutable media-item queue with
//! add/remove-at-index primitives (and its own repeat-mode storage) to
//! the [`MediaEngine`] capability set.

use std::sync::Arc;

use crossbeam_channel::Sender;
use halcyon_core::{Locator, LoopMode};
use tracing::{debug, trace};

use crate::engine::{EngineSignal, MediaEngine, CLIENT_USER_AGENT};

/// A media request handed to the raw engine: the locator plus the HTTP
/// headers the engine must attach when it fetches the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    pub locator: Locator,
    pub headers: Vec<(String, String)>,
}

/// Raw control surface of a queue-based native engine.
///
/// Implemented by the platform embedder over the actual engine object.
/// Methods take `&self`; the engine object carries its own interior
/// synchronization. Every method must be a silent no-op once
/// `is_available` reports `false` (engine not yet initialized, or
/// already released).
pub trait QueueControl: Send + Sync {
    fn is_available(&self) -> bool {
        true
    }

    fn item_count(&self) -> usize;
    /// Index of the current queue item, −1 when the queue is empty.
    fn current_item(&self) -> i64;
    fn item_url_at(&self, index: usize) -> Option<String>;

    fn add_item(&self, index: usize, request: MediaRequest);
    /// Remove queue items in `[from, to)`.
    fn remove_items(&self, from: usize, to: usize);
    /// Jump to a queue item and start it from `position_ms`.
    fn seek_to_item(&self, index: usize, position_ms: i64);

    fn set_play_when_ready(&self, play: bool);
    fn seek_to(&self, position_ms: i64);

    fn has_next_item(&self) -> bool;
    fn has_previous_item(&self) -> bool;
    fn seek_to_next_item(&self);
    fn seek_to_previous_item(&self);

    fn position_ms(&self) -> i64;
    fn buffered_position_ms(&self) -> i64;
    fn is_playing(&self) -> bool;

    fn set_repeat(&self, mode: LoopMode);
    fn repeat(&self) -> LoopMode;
}

/// [`MediaEngine`] over a [`QueueControl`] surface.
///
/// Holds the current auth token and attaches it (as a `Cookie` header,
/// with the client User-Agent) to every item it adds. Items already in
/// the queue keep the headers they were loaded with.
pub struct QueueEngine<C: QueueControl> {
    control: Arc<C>,
    auth_cookie: Option<String>,
}

impl<C: QueueControl> QueueEngine<C> {
    pub fn new(control: Arc<C>) -> Self {
        Self {
            control,
            auth_cookie: None,
        }
    }

    fn request_for(&self, locator: &Locator) -> MediaRequest {
        let mut headers = Vec::with_capacity(2);
        if let Some(cookie) = &self.auth_cookie {
            headers.push(("Cookie".to_owned(), cookie.clone()));
        }
        headers.push(("User-Agent".to_owned(), CLIENT_USER_AGENT.to_owned()));
        MediaRequest {
            locator: locator.clone(),
            headers,
        }
    }
}

impl<C: QueueControl> MediaEngine for QueueEngine<C> {
    fn item_locator_at(&self, index: usize) -> Option<Locator> {
        if !self.control.is_available() {
            return None;
        }
        self.control.item_url_at(index).map(Locator::from)
    }

    fn insert(&mut self, locator: &Locator, index: usize) {
        if !self.control.is_available() {
            return;
        }
        trace!(index, %locator, "queue add");
        self.control.add_item(index, self.request_for(locator));
    }

    fn remove(&mut self, index: usize) {
        if !self.control.is_available() {
            return;
        }
        trace!(index, "queue remove");
        self.control.remove_items(index, index + 1);
    }

    fn remove_range(&mut self, start: usize, end: usize) {
        if !self.control.is_available() || start >= end {
            return;
        }
        trace!(start, end, "queue remove range");
        self.control.remove_items(start, end);
    }

    fn play_index(&mut self, index: usize) {
        if !self.control.is_available() {
            return;
        }
        debug!(index, "queue jump");
        self.control.seek_to_item(index, 0);
    }

    fn current_index(&self) -> i64 {
        if !self.control.is_available() {
            return -1;
        }
        self.control.current_item()
    }

    fn count(&self) -> usize {
        if !self.control.is_available() {
            return 0;
        }
        self.control.item_count()
    }

    fn play(&mut self) {
        self.control.set_play_when_ready(true);
    }

    fn pause(&mut self) {
        self.control.set_play_when_ready(false);
    }

    fn seek(&mut self, position_ms: i64) {
        self.control.seek_to(position_ms);
    }

    fn next(&mut self) {
        if self.control.has_next_item() {
            self.control.seek_to_next_item();
        }
    }

    fn prev(&mut self) {
        if self.control.has_previous_item() {
            self.control.seek_to_previous_item();
        }
    }

    fn position_ms(&self) -> i64 {
        self.control.position_ms()
    }

    fn buffered_ms(&self) -> i64 {
        self.control.buffered_position_ms()
    }

    fn is_playing(&self) -> bool {
        self.control.is_playing()
    }

    fn set_loop_mode(&mut self, mode: LoopMode) {
        self.control.set_repeat(mode);
    }

    fn loop_mode(&self) -> LoopMode {
        self.control.repeat()
    }

    fn set_auth_header(&mut self, token: &str) {
        self.auth_cookie = Some(token.to_owned());
    }
}

/// Raw playback-state values a queue engine reports from its listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueuePlaybackState {
    Idle,
    Buffering,
    Ready,
    Ended,
}

/// Translates raw queue-engine listener callbacks into [`EngineSignal`]s.
///
/// Driven from the engine's own callback thread; the signals land in the
/// player actor's channel, which is where they get linearized against
/// commands.
pub struct QueueRelay {
    signals: Sender<EngineSignal>,
}

impl QueueRelay {
    pub const fn new(signals: Sender<EngineSignal>) -> Self {
        Self { signals }
    }

    pub fn on_item_transition(&self, index: i64) {
        self.send(EngineSignal::ItemTransition(index));
    }

    pub fn on_playback_state(&self, raw: QueuePlaybackState) {
        let signal = match raw {
            QueuePlaybackState::Idle => EngineSignal::IdleActive(true),
            QueuePlaybackState::Buffering => EngineSignal::CoreBuffering(true),
            QueuePlaybackState::Ready => EngineSignal::CoreBuffering(false),
            QueuePlaybackState::Ended => EngineSignal::EndOfStream,
        };
        self.send(signal);
    }

    pub fn on_released(&self) {
        self.send(EngineSignal::Shutdown);
    }

    fn send(&self, signal: EngineSignal) {
        // The actor may already be gone during teardown.
        if self.signals.send(signal).is_err() {
            trace!(?signal, "queue signal dropped, player gone");
        }
    }
}
