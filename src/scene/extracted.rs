//! Extract phase
//!
//! Copies out what the renderer needs for the frame once every actor has been
//! updated, so drawing never holds a borrow of the scene.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4};

use crate::scene::actor::RenderBinding;
use crate::scene::ids::ActorId;

/// Per-draw block, laid out for direct upload (push constants or a uniform
/// buffer). The normal matrix is widened to 4x4 to keep std140 alignment.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ActorUniforms {
    pub model: Mat4,
    pub normal: Mat4,
}

impl ActorUniforms {
    #[must_use]
    pub fn new(model: Mat4, normal: Mat3) -> Self {
        Self {
            model,
            normal: Mat4::from_mat3(normal),
        }
    }
}

impl Default for ActorUniforms {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY,
            normal: Mat4::IDENTITY,
        }
    }
}

/// One drawable actor for the current frame.
#[derive(Clone, Copy, Debug)]
pub struct RenderItem {
    pub actor: ActorId,
    pub binding: RenderBinding,
    pub uniforms: ActorUniforms,
}
