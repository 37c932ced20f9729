//! In-memory engine used by unit tests.

use std::sync::Arc;

use halcyon_core::{Locator, LoopMode};
use parking_lot::Mutex;

use crate::engine::MediaEngine;

/// One recorded playlist edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Insert(usize, Locator),
    Remove(usize, Locator),
    RemoveRange(usize, usize),
    PlayIndex(usize),
}

impl Edit {
    pub fn touches_locator(&self, url: &str) -> bool {
        match self {
            Self::Insert(_, locator) | Self::Remove(_, locator) => locator.as_str() == url,
            Self::RemoveRange(..) | Self::PlayIndex(_) => false,
        }
    }
}

#[derive(Debug)]
struct State {
    items: Vec<Locator>,
    current: i64,
    playing: bool,
    position_ms: i64,
    buffered_ms: i64,
    loop_mode: LoopMode,
    auth: Option<String>,
    edits: Vec<Edit>,
    play_index_called: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: -1,
            playing: false,
            position_ms: 0,
            buffered_ms: 0,
            loop_mode: LoopMode::None,
            auth: None,
            edits: Vec::new(),
            play_index_called: false,
        }
    }
}

/// Scriptable in-memory engine with native index semantics: inserts at
/// or below the current item shift it up, removals below shift it down.
///
/// Clones share state, so a test can keep a handle for inspection while
/// the player actor owns the engine.
#[derive(Debug, Clone, Default)]
pub struct TestEngine {
    state: Arc<Mutex<State>>,
}

impl TestEngine {
    pub fn with_playlist(urls: &[&str], current: i64) -> Self {
        let engine = Self::default();
        {
            let mut state = engine.state.lock();
            state.items = urls.iter().map(|u| Locator::new(*u)).collect();
            state.current = current;
        }
        engine
    }

    pub fn items(&self) -> Vec<Locator> {
        self.state.lock().items.clone()
    }

    pub fn edits(&self) -> Vec<Edit> {
        self.state.lock().edits.clone()
    }

    pub fn clear_edits(&self) {
        let mut state = self.state.lock();
        state.edits.clear();
        state.play_index_called = false;
    }

    pub fn play_index_called(&self) -> bool {
        self.state.lock().play_index_called
    }

    pub fn auth(&self) -> Option<String> {
        self.state.lock().auth.clone()
    }

    pub fn set_position(&self, position_ms: i64, buffered_ms: i64) {
        let mut state = self.state.lock();
        state.position_ms = position_ms;
        state.buffered_ms = buffered_ms;
    }
}

impl MediaEngine for TestEngine {
    fn item_locator_at(&self, index: usize) -> Option<Locator> {
        self.state.lock().items.get(index).cloned()
    }

    fn insert(&mut self, locator: &Locator, index: usize) {
        let mut state = self.state.lock();
        let index = index.min(state.items.len());
        state.items.insert(index, locator.clone());
        if state.current >= 0 && index as i64 <= state.current {
            state.current += 1;
        }
        state.edits.push(Edit::Insert(index, locator.clone()));
    }

    fn remove(&mut self, index: usize) {
        let mut state = self.state.lock();
        if index >= state.items.len() {
            return;
        }
        let removed = state.items.remove(index);
        if (index as i64) < state.current {
            state.current -= 1;
        } else if index as i64 == state.current && state.current as usize >= state.items.len() {
            state.current = -1;
        }
        state.edits.push(Edit::Remove(index, removed));
    }

    fn remove_range(&mut self, start: usize, end: usize) {
        let mut state = self.state.lock();
        let end = end.min(state.items.len());
        if start >= end {
            return;
        }
        state.items.drain(start..end);
        if state.current >= end as i64 {
            state.current -= (end - start) as i64;
        } else if state.current >= start as i64 {
            state.current = -1;
        }
        state.edits.push(Edit::RemoveRange(start, end));
    }

    fn play_index(&mut self, index: usize) {
        let mut state = self.state.lock();
        state.current = index as i64;
        state.position_ms = 0;
        state.play_index_called = true;
        state.edits.push(Edit::PlayIndex(index));
    }

    fn current_index(&self) -> i64 {
        self.state.lock().current
    }

    fn count(&self) -> usize {
        self.state.lock().items.len()
    }

    fn play(&mut self) {
        self.state.lock().playing = true;
    }

    fn pause(&mut self) {
        self.state.lock().playing = false;
    }

    fn seek(&mut self, position_ms: i64) {
        self.state.lock().position_ms = position_ms;
    }

    fn next(&mut self) {
        let mut state = self.state.lock();
        if state.current >= 0 && (state.current as usize) + 1 < state.items.len() {
            state.current += 1;
        }
    }

    fn prev(&mut self) {
        let mut state = self.state.lock();
        if state.current > 0 {
            state.current -= 1;
        }
    }

    fn position_ms(&self) -> i64 {
        self.state.lock().position_ms
    }

    fn buffered_ms(&self) -> i64 {
        self.state.lock().buffered_ms
    }

    fn is_playing(&self) -> bool {
        self.state.lock().playing
    }

    fn set_loop_mode(&mut self, mode: LoopMode) {
        self.state.lock().loop_mode = mode;
    }

    fn loop_mode(&self) -> LoopMode {
        self.state.lock().loop_mode
    }

    fn set_auth_header(&mut self, token: &str) {
        self.state.lock().auth = Some(token.to_owned());
    }
}
