use glam::{Affine3A, EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Local translation / rotation / scale of an animatable object.
///
/// Rotation is stored as Euler angles in radians and applied in intrinsic
/// XYZ order. Keeping the Euler triple (rather than a quaternion) means
/// keyframes blend angle-by-angle, so a track authored as
/// `0 → 2π` around Y spins a full turn instead of collapsing to identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub const fn new(translation: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Component-wise linear blend of translation, rotation and scale.
    #[must_use]
    pub fn lerp(&self, other: &Self, alpha: f32) -> Self {
        Self {
            translation: self.translation.lerp(other.translation, alpha),
            rotation: self.rotation.lerp(other.rotation, alpha),
            scale: self.scale.lerp(other.scale, alpha),
        }
    }

    /// Rotation as a quaternion (intrinsic XYZ).
    #[inline]
    #[must_use]
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local matrix: scale, then rotate, then translate.
    #[inline]
    #[must_use]
    pub fn to_matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.quat(), self.translation)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}
