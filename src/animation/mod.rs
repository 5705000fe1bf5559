//! Keyframe animation
//!
//! - [`Pose`]: translation / Euler rotation / scale triple
//! - [`KeyframeTrack`]: timestamped poses plus an authoritative duration
//! - [`AnimationPlayer`]: Idle/Playing state machine advancing over a track

pub mod pose;
pub mod tracks;
pub mod player;

pub use pose::Pose;
pub use tracks::{Keyframe, KeyframeCursor, KeyframeSpan, KeyframeTrack, TrackBuilder};
pub use player::{AnimationMode, AnimationPlayer, PlaybackState, PlayerTick};
