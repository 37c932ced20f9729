//! # halcyon-host
//!
//! Host-side bridge for the Halcyon playback core: the typed inbound
//! command surface and the outbound event dispatch toward the UI.

pub mod api;
pub mod events;

pub use api::{wrap_api, PlayerHandle};
pub use events::{EventDispatcher, HostEvent, HostListener};
