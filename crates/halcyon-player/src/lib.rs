//! # halcyon-player
//!
//! The playback core of the Halcyon streaming client.
//!
//! Structure:
//! - One capability trait ([`MediaEngine`]) over whichever native media
//!   engine is present, with two backends: a queue engine
//!   ([`queue::QueueEngine`]) and a playlist-command engine
//!   ([`command::CommandEngine`])
//! - A playback state machine ([`state::StateTracker`]) fed by engine
//!   signals
//! - A playlist reconciler ([`reconcile::reconcile`]) converging the
//!   engine's live playlist to the desired previous/next window
//! - A single serialized actor ([`player::Player`]) that linearizes host
//!   commands against engine-driven mutation

pub mod command;
pub mod engine;
pub mod player;
pub mod queue;
pub mod reconcile;
pub mod state;
#[cfg(test)]
mod testutil;

pub use engine::{EngineSignal, MediaEngine, CLIENT_USER_AGENT};
pub use player::{Player, PlayerCommand, PlayerEvent};
pub use reconcile::{reconcile, ReconcileScope};
pub use state::StateTracker;
