//! Host-side helpers
//!
//! - [`FrameClock`]: clamped frame delta source
//! - [`MovementController`]: keyboard fly/orbit controller for a viewer node

pub mod movement_control;
pub mod time;

pub use movement_control::{KeyMappings, MovementController};
pub use time::FrameClock;
