//! Core domain types for Halcyon.

pub mod locator;
pub mod state;
pub mod status;
pub mod window;

pub use locator::Locator;
pub use state::{LoopMode, PlayerState};
pub use status::PlayerStatus;
pub use window::Window;
