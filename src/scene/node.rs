use glam::Affine3A;
use smallvec::SmallVec;

use crate::animation::Pose;
use crate::scene::NodeKey;
use crate::scene::transform::Transform;

/// A transform node in the scene graph.
///
/// # Hierarchy
///
/// - `parent`: non-owning link to the parent node (None for roots)
/// - `children`: the inverse links, kept in sync by [`Scene`](crate::scene::Scene)
///
/// Both sides are maintained by the scene so that the relation stays a forest.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: SmallVec<[NodeKey; 4]>,

    pub transform: Transform,
}

impl Node {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pose(pose: Pose) -> Self {
        Self {
            parent: None,
            children: SmallVec::new(),
            transform: Transform::from_pose(pose),
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}
