//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`MarionetteError`] covers the failure modes that can
//! be observed while *assembling* a scene:
//! - Malformed keyframe tracks (bad timestamps, missing duration)
//! - Hierarchy edits that would introduce a cycle
//! - Stale actor handles
//! - Settings that fail to deserialize
//!
//! The per-frame path (`Scene::prepare` / `Scene::update`) never returns an
//! error: end of animation and out-of-range sampling are ordinary control
//! flow, resolved inside the actor and player.
//!
//! # Usage
//!
//! ```rust,ignore
//! use marionette::errors::{MarionetteError, Result};
//!
//! fn build() -> Result<()> {
//!     let track = TrackBuilder::new().keyframe(0.0, Pose::IDENTITY).build()?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::scene::ActorKey;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum MarionetteError {
    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// The track does not hold a bracketing pair of keyframes.
    #[error("Track is not playable: {keyframes} keyframe(s), at least 2 required")]
    NotPlayable {
        /// Number of keyframes the track actually holds
        keyframes: usize,
    },

    /// A keyframe timestamp is negative, non-finite or out of order.
    #[error("Invalid keyframe at index {index}: {reason}")]
    InvalidKeyframes {
        /// Index of the offending keyframe
        index: usize,
        /// What is wrong with it
        reason: &'static str,
    },

    /// The track duration is not a finite positive number.
    #[error("Invalid track duration: {0}")]
    InvalidDuration(f32),

    /// A track was built without an explicit duration.
    #[error("Track duration must be set explicitly")]
    MissingDuration,

    // ========================================================================
    // Hierarchy Errors
    // ========================================================================
    /// Attaching `child` under `parent` would make an actor its own ancestor.
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    CyclicHierarchy {
        /// The actor being re-parented
        child: ActorKey,
        /// The requested parent
        parent: ActorKey,
    },

    /// The handle does not refer to a live actor in this scene.
    #[error("Actor not found: {0:?}")]
    ActorNotFound(ActorKey),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Settings JSON failed to parse.
    #[error("Settings parse error: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Alias for `Result<T, MarionetteError>`.
pub type Result<T> = std::result::Result<T, MarionetteError>;
