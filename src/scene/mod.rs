//! Scene graph
//!
//! - [`Node`] / [`Transform`]: local pose with cached local and world matrices
//! - [`Actor`]: animation and update policy attached to one node
//! - [`Scene`]: arena owner and per-frame driver
//! - [`transform_system`]: hierarchy links and matrix propagation

pub mod actor;
pub mod extracted;
pub mod ids;
pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use actor::{Actor, RenderBinding};
pub use extracted::{ActorUniforms, RenderItem};
pub use ids::{ActorId, IdAllocator};
pub use node::Node;
pub use scene::{ActorBuilder, Scene};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeKey;
    pub struct ActorKey;
}
