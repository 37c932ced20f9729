//! Playlist reconciliation.
//!
//! Converges the engine's live playlist to the caller's desired
//! previous/next window with the minimal sequence of engine edits,
//! keeping the currently playing item untouched whenever its identity is
//! unchanged.

use halcyon_core::{Locator, Window};
use tracing::{debug, trace};

use crate::engine::MediaEngine;

/// Outcome of one reconciliation call.
///
/// The scope lives exactly as long as the call that produced it: while
/// the actor holds it, engine item-transition signals are dropped,
/// because transitions induced by reconciliation are implementation
/// noise, not user-visible track changes.
#[derive(Debug)]
pub struct ReconcileScope {
    kept_current: bool,
    mutations: usize,
}

impl ReconcileScope {
    /// True when the current item's identity survived the call and
    /// playback was not restarted.
    pub const fn kept_current(&self) -> bool {
        self.kept_current
    }

    /// True when at least one engine edit was issued.
    pub const fn mutated(&self) -> bool {
        self.mutations > 0
    }

    /// Number of engine edits issued.
    pub const fn mutation_count(&self) -> usize {
        self.mutations
    }
}

/// Converge the engine playlist to `window`.
///
/// When the engine's current item already equals `window.previous.last()`
/// only the surrounding slots are edited and playback continues
/// uninterrupted. Any discontinuity (different current item, nothing
/// playing, empty `previous`) takes the full-replace path, the one path
/// that may cause an audible reload. Reconciling twice against the same
/// window issues zero edits on the second call.
pub fn reconcile(engine: &mut dyn MediaEngine, window: &Window) -> ReconcileScope {
    let current = engine.current_index();
    let playing_now = usize::try_from(current)
        .ok()
        .and_then(|index| engine.item_locator_at(index));

    let continuity = match (window.current(), playing_now.as_ref()) {
        (Some(want), Some(have)) => want == have,
        _ => false,
    };

    let scope = if continuity {
        converge(engine, window)
    } else {
        replace_all(engine, window)
    };

    debug!(
        mutations = scope.mutation_count(),
        kept_current = scope.kept_current(),
        "reconciled playlist"
    );
    if tracing::enabled!(tracing::Level::TRACE) {
        dump_playlist(&*engine);
    }
    scope
}

/// Continuity path: per-slot diff around the untouched current item.
fn converge(engine: &mut dyn MediaEngine, window: &Window) -> ReconcileScope {
    let mut mirror = Mirror::snapshot(engine);
    let previous = &window.previous;
    let p = previous.len() as i64;

    // Previous-window convergence, walking backward from the current
    // item. Slots that would land below index zero clamp to zero, so the
    // desired item becomes the new earliest slot.
    for i in 1..p {
        let want = &previous[(p - 1 - i) as usize];
        let look = mirror.current - i;
        if look >= 0 && mirror.locator_at(look as usize) == Some(want) {
            continue;
        }
        if look >= 0 && (look as usize) < mirror.len() {
            mirror.remove(look as usize);
        }
        mirror.insert(want, look.max(0) as usize);
    }

    // Stale-prefix cleanup: anything still below the window start is
    // leftover history.
    while mirror.current > p - 1 {
        mirror.remove(0);
    }

    // Next-window convergence, walking forward from the current item.
    for (i, want) in window.next.iter().enumerate() {
        let look = (mirror.current + 1) as usize + i;
        if look < mirror.len() {
            if mirror.locator_at(look) == Some(want) {
                continue;
            }
            mirror.remove(look);
        }
        mirror.insert(want, look);
    }

    // Stale-suffix cleanup, scanning from the end backward so earlier
    // removals do not shift indices still to be removed.
    let window_end = (mirror.current + 1) as usize + window.next.len();
    for index in (window_end..mirror.len()).rev() {
        mirror.remove(index);
    }

    ReconcileScope {
        kept_current: true,
        mutations: mirror.mutations,
    }
}

/// Discontinuity path: replace the whole playlist and restart from the
/// desired current slot.
fn replace_all(engine: &mut dyn MediaEngine, window: &Window) -> ReconcileScope {
    let count = engine.count();
    let mut mutations = 0;
    if count > 0 {
        engine.remove_range(0, count);
        mutations += 1;
    }
    for (index, locator) in window.flatten().iter().enumerate() {
        engine.insert(locator, index);
        mutations += 1;
    }
    if let Some(index) = window.current_index() {
        engine.play_index(index);
    }
    ReconcileScope {
        kept_current: false,
        mutations,
    }
}

fn dump_playlist(engine: &dyn MediaEngine) {
    for index in 0..engine.count() {
        let locator = engine
            .item_locator_at(index)
            .map_or_else(|| "<unresolved>".to_owned(), |l| l.to_string());
        trace!(index, %locator, "playlist slot");
    }
}

/// Working model of the engine playlist.
///
/// Snapshotted once at the start of the call; every emitted edit is
/// applied to the model and the engine together, tracking current-index
/// shifts, so no step re-reads engine indices mid-flight.
struct Mirror<'a> {
    engine: &'a mut dyn MediaEngine,
    items: Vec<Option<Locator>>,
    current: i64,
    mutations: usize,
}

impl<'a> Mirror<'a> {
    fn snapshot(engine: &'a mut dyn MediaEngine) -> Self {
        let count = engine.count();
        let items = (0..count).map(|i| engine.item_locator_at(i)).collect();
        let current = engine.current_index();
        Self {
            engine,
            items,
            current,
            mutations: 0,
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn locator_at(&self, index: usize) -> Option<&Locator> {
        self.items.get(index).and_then(Option::as_ref)
    }

    fn insert(&mut self, locator: &Locator, index: usize) {
        let index = index.min(self.items.len());
        self.engine.insert(locator, index);
        self.items.insert(index, Some(locator.clone()));
        if self.current >= 0 && index as i64 <= self.current {
            self.current += 1;
        }
        self.mutations += 1;
    }

    fn remove(&mut self, index: usize) {
        self.engine.remove(index);
        self.items.remove(index);
        if self.current >= 0 && (index as i64) < self.current {
            self.current -= 1;
        }
        self.mutations += 1;
    }
}
