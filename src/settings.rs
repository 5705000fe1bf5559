//! Runtime configuration
//!
//! ```rust,ignore
//! use marionette::Settings;
//!
//! // Defaults: 1.6 s frame clamp, Enter triggers, stock movement speeds
//! let settings = Settings::default();
//!
//! // Partial JSON: anything omitted keeps its default
//! let settings = Settings::from_json_str(r#"{ "default_trigger_key": "K" }"#)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::input::Key;

/// Upper bound applied to the host's frame delta, in seconds.
pub const DEFAULT_MAX_FRAME_DELTA: f32 = 1.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame deltas above this are clamped before reaching the scene, so a
    /// stall (window drag, breakpoint) does not skip whole animations.
    pub max_frame_delta: f32,
    /// Trigger key for actors that do not name their own.
    pub default_trigger_key: Key,
    pub movement: MovementSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
            default_trigger_key: Key::Enter,
            movement: MovementSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        if !(settings.max_frame_delta.is_finite() && settings.max_frame_delta > 0.0) {
            log::warn!(
                "max_frame_delta {} is not a positive number, using {DEFAULT_MAX_FRAME_DELTA}",
                settings.max_frame_delta
            );
            return Ok(Self {
                max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
                ..settings
            });
        }
        Ok(settings)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Tuning for [`MovementController`](crate::utils::MovementController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    /// Units per second.
    pub move_speed: f32,
    /// Radians per second.
    pub look_speed: f32,
    /// Degrees per frame, divided by 100, while orbiting.
    pub orbit_speed: f32,
    /// Distance from the origin for look-at-origin and orbit.
    pub orbit_radius: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            look_speed: 1.5,
            orbit_speed: 2.0,
            orbit_radius: 3.0,
        }
    }
}
