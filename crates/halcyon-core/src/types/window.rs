//! The desired playback window.

#![allow(clippy::unwrap_used)] // Tests use unwrap for brevity

use serde::{Deserialize, Serialize};

use super::Locator;

/// Caller-supplied desired ordered set of tracks around the playing item.
///
/// `previous` runs oldest to newest and its last element is the track
/// that should occupy the engine's current slot; `next` runs soonest to
/// latest. The window is a fresh desired-state snapshot on every call:
/// nothing here persists across reconciliations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Window {
    /// Past tracks plus the currently-playing track (last element).
    pub previous: Vec<Locator>,
    /// Upcoming tracks, soonest first.
    pub next: Vec<Locator>,
}

impl Window {
    pub fn new(previous: Vec<Locator>, next: Vec<Locator>) -> Self {
        Self { previous, next }
    }

    /// Build a window from raw URL strings.
    pub fn from_urls<S: AsRef<str>>(previous: &[S], next: &[S]) -> Self {
        Self {
            previous: previous.iter().map(|u| Locator::new(u.as_ref())).collect(),
            next: next.iter().map(|u| Locator::new(u.as_ref())).collect(),
        }
    }

    /// The track that should be current, if playback is possible at all.
    pub fn current(&self) -> Option<&Locator> {
        self.previous.last()
    }

    /// Engine index the current track should occupy.
    pub fn current_index(&self) -> Option<usize> {
        self.previous.len().checked_sub(1)
    }

    /// Total number of tracks in the window.
    pub fn len(&self) -> usize {
        self.previous.len() + self.next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.previous.is_empty() && self.next.is_empty()
    }

    /// The full desired playlist, previous then next.
    pub fn flatten(&self) -> Vec<Locator> {
        let mut all = Vec::with_capacity(self.len());
        all.extend_from_slice(&self.previous);
        all.extend_from_slice(&self.next);
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_current_is_last_previous() {
        let window = Window::from_urls(&["a", "b"], &["c"]);
        assert_eq!(window.current().unwrap().as_str(), "b");
        assert_eq!(window.current_index(), Some(1));
    }

    #[test]
    fn test_empty_previous_has_no_current() {
        let window = Window::from_urls::<&str>(&[], &["c"]);
        assert!(window.current().is_none());
        assert!(window.current_index().is_none());
        assert!(!window.is_empty());
    }

    #[test]
    fn test_flatten_order() {
        let window = Window::from_urls(&["a", "b"], &["c", "d"]);
        let flat: Vec<_> = window.flatten().iter().map(|l| l.to_string()).collect();
        assert_eq!(flat, ["a", "b", "c", "d"]);
    }
}
