use glam::{Affine3A, Mat3, Mat4, Vec3};

use crate::animation::Pose;

/// Transform component
///
/// Local pose plus the cached local and world matrices. The local matrix is
/// rebuilt only when the pose differs from the one it was last built from;
/// the world matrix is written by whoever owns the node for the frame.
#[derive(Debug, Clone)]
pub struct Transform {
    pub pose: Pose,

    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,

    last_pose: Pose,
    force_update: bool,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self::from_pose(Pose::IDENTITY)
    }

    #[must_use]
    pub fn from_pose(pose: Pose) -> Self {
        let local = pose.to_matrix();
        Self {
            pose,
            local_matrix: local,
            world_matrix: local,
            last_pose: pose,
            force_update: true,
        }
    }

    // ========================================================================
    // Shadow-state check
    // ========================================================================

    /// Rebuilds the local matrix if the pose changed.
    /// Returns whether it did.
    pub fn update_local_matrix(&mut self) -> bool {
        let changed = self.pose != self.last_pose || self.force_update;

        if changed {
            self.local_matrix = self.pose.to_matrix();
            self.last_pose = self.pose;
            self.force_update = false;
        }

        changed
    }

    /// Recomputes the world matrix from the local pose and an optional
    /// parent world matrix (parent pre-multiplies).
    pub fn compose(&mut self, parent_world: Option<&Affine3A>) -> &Affine3A {
        self.update_local_matrix();
        self.world_matrix = match parent_world {
            Some(parent) => *parent * self.local_matrix,
            None => self.local_matrix,
        };
        &self.world_matrix
    }

    // ========================================================================
    // Getters & Helpers
    // ========================================================================

    #[inline]
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    #[inline]
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        self.pose.translation
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    /// World matrix for upload to the renderer.
    #[inline]
    #[must_use]
    pub fn world_matrix_as_mat4(&self) -> Mat4 {
        Mat4::from(self.world_matrix)
    }

    /// Inverse-transpose of the world 3x3, for transforming normals.
    ///
    /// Singular (zero-scale) transforms yield the identity.
    #[must_use]
    pub fn normal_matrix(&self) -> Mat3 {
        let linear = Mat3::from(self.world_matrix.matrix3);
        let det = linear.determinant();
        if det == 0.0 || !det.is_finite() {
            return Mat3::IDENTITY;
        }
        let normal = linear.inverse().transpose();
        if normal.is_finite() { normal } else { Mat3::IDENTITY }
    }

    pub fn mark_dirty(&mut self) {
        self.force_update = true;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
