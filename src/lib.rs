//! # Marionette
//!
//! Keyframe-animated actor hierarchies for real-time 3D scenes.
//!
//! Each frame the host hands over a delta time and keyboard state; every
//! [`Actor`] advances its keyframe track, writes the resulting pose into its
//! scene node, composes it with its parent's world matrix and caches the
//! result. The renderer reads the cached matrices afterwards.
//!
//! ```rust,ignore
//! use marionette::{Pose, Scene, TrackBuilder, AnimationMode, Input};
//! use glam::Vec3;
//!
//! let mut scene = Scene::new();
//! let slide = TrackBuilder::new()
//!     .keyframe(0.0, Pose::IDENTITY)
//!     .keyframe(2.0, Pose::from_translation(Vec3::X * 10.0))
//!     .duration(2.0)
//!     .build()?;
//! let cube = scene.spawn_actor("cube").track(slide).mode(AnimationMode::Continuous).spawn()?;
//!
//! scene.tick(1.0 / 60.0, &Input::new());
//! let world = scene.world_matrix(cube);
//! ```

pub mod animation;
pub mod engine;
pub mod errors;
pub mod input;
pub mod scene;
pub mod settings;
pub mod utils;

pub use animation::{AnimationMode, AnimationPlayer, Keyframe, KeyframeTrack, PlaybackState, PlayerTick, Pose, TrackBuilder};
pub use engine::Engine;
pub use errors::{MarionetteError, Result};
pub use input::{ButtonState, Input, Key};
pub use scene::{Actor, ActorId, ActorKey, ActorUniforms, NodeKey, RenderBinding, RenderItem, Scene};
pub use settings::{MovementSettings, Settings};
pub use utils::{FrameClock, MovementController};
