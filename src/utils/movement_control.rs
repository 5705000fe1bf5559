use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::input::{Input, Key};
use crate::scene::transform::Transform;
use crate::settings::MovementSettings;

const PITCH_LIMIT: f32 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyMappings {
    pub move_left: Key,
    pub move_right: Key,
    pub move_forward: Key,
    pub move_backward: Key,
    pub move_up: Key,
    pub move_down: Key,
    pub look_left: Key,
    pub look_right: Key,
    pub look_up: Key,
    pub look_down: Key,
    pub look_at_origin: Key,
    pub orbit: Key,
}

impl Default for KeyMappings {
    fn default() -> Self {
        Self {
            move_left: Key::A,
            move_right: Key::D,
            move_forward: Key::W,
            move_backward: Key::S,
            move_up: Key::E,
            move_down: Key::Q,
            look_left: Key::ArrowLeft,
            look_right: Key::ArrowRight,
            look_up: Key::ArrowUp,
            look_down: Key::ArrowDown,
            look_at_origin: Key::Space,
            orbit: Key::R,
        }
    }
}

/// Keyboard fly controller for a viewer node, moving in the XZ plane.
///
/// Besides free movement it has two canned moves: jump back to the home
/// position facing the origin, and one full orbit around the origin.
#[derive(Debug, Clone)]
pub struct MovementController {
    pub keys: KeyMappings,
    pub settings: MovementSettings,

    orbit_angle: f32,
    orbiting: bool,
}

impl MovementController {
    #[must_use]
    pub fn new(settings: MovementSettings) -> Self {
        Self {
            keys: KeyMappings::default(),
            settings,
            orbit_angle: 0.0,
            orbiting: false,
        }
    }

    #[must_use]
    pub fn is_orbiting(&self) -> bool {
        self.orbiting
    }

    /// Where look-at-origin puts the viewer.
    #[must_use]
    pub fn home(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, -self.settings.orbit_radius)
    }

    pub fn update(&mut self, transform: &mut Transform, input: &Input, dt: f32) {
        let keys = &self.keys;
        let pose = &mut transform.pose;

        let mut rotate = Vec3::ZERO;
        if input.is_key_pressed(keys.look_left) {
            rotate.y += 1.0;
        }
        if input.is_key_pressed(keys.look_right) {
            rotate.y -= 1.0;
        }
        if input.is_key_pressed(keys.look_up) {
            rotate.x += 1.0;
        }
        if input.is_key_pressed(keys.look_down) {
            rotate.x -= 1.0;
        }
        if rotate.length_squared() > f32::EPSILON {
            pose.rotation += self.settings.look_speed * dt * rotate.normalize();
        }

        if input.is_key_pressed(keys.look_at_origin) {
            pose.rotation = Vec3::ZERO;
            pose.translation = self.home();
            self.orbit_angle = 0.0;
            self.orbiting = false;
        }

        if input.is_key_pressed(keys.orbit) && !self.orbiting {
            self.orbiting = true;
            pose.translation = self.home();
            pose.rotation = Vec3::ZERO;
        }

        if self.orbiting {
            self.orbit_angle += self.settings.orbit_speed.to_radians() / 100.0;
            if self.orbit_angle >= TAU {
                self.orbit_angle = 0.0;
                self.orbiting = false;
            }
            let r = self.settings.orbit_radius;
            pose.rotation = Vec3::new(0.0, -self.orbit_angle, 0.0);
            pose.translation = Vec3::new(r * self.orbit_angle.sin(), 0.0, -r * self.orbit_angle.cos());
        }

        pose.rotation.x = pose.rotation.x.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        pose.rotation.y = pose.rotation.y.rem_euclid(TAU);

        let yaw = pose.rotation.y;
        let forward = Vec3::new(yaw.sin(), 0.0, yaw.cos());
        let right = Vec3::new(forward.z, 0.0, -forward.x);
        // Y points down in view space.
        let up = Vec3::NEG_Y;

        let mut direction = Vec3::ZERO;
        if input.is_key_pressed(keys.move_forward) {
            direction += forward;
        }
        if input.is_key_pressed(keys.move_backward) {
            direction -= forward;
        }
        if input.is_key_pressed(keys.move_right) {
            direction += right;
        }
        if input.is_key_pressed(keys.move_left) {
            direction -= right;
        }
        if input.is_key_pressed(keys.move_up) {
            direction += up;
        }
        if input.is_key_pressed(keys.move_down) {
            direction -= up;
        }
        if direction.length_squared() > f32::EPSILON {
            pose.translation += self.settings.move_speed * dt * direction.normalize();
        }
    }
}

impl Default for MovementController {
    fn default() -> Self {
        Self::new(MovementSettings::default())
    }
}
