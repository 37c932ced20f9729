//! # halcyon-core
//!
//! Core types and error handling for the Halcyon playback core.

pub mod error;
pub mod types;

pub use error::{ApiError, Error, Result};
pub use types::*;
