use std::sync::atomic::{AtomicU32, Ordering};

use glam::Mat4;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::animation::{AnimationMode, KeyframeTrack, Pose};
use crate::errors::{MarionetteError, Result};
use crate::input::{Input, Key};
use crate::scene::actor::{Actor, RenderBinding};
use crate::scene::extracted::{ActorUniforms, RenderItem};
use crate::scene::ids::IdAllocator;
use crate::scene::node::Node;
use crate::scene::transform_system;
use crate::scene::{ActorKey, NodeKey};

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Owns every node and actor for its whole lifetime.
///
/// Actors are updated in insertion order, but the update protocol recurses
/// into parents first, so the order never affects the result.
pub struct Scene {
    pub id: u32,

    nodes: SlotMap<NodeKey, Node>,
    actors: SlotMap<ActorKey, Actor>,
    update_order: Vec<ActorKey>,
    names: FxHashMap<String, ActorKey>,
    ids: IdAllocator,

    /// Trigger key given to actors spawned without an explicit one.
    pub default_trigger_key: Key,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),
            nodes: SlotMap::with_key(),
            actors: SlotMap::with_key(),
            update_order: Vec::new(),
            names: FxHashMap::default(),
            ids: IdAllocator::new(),
            default_trigger_key: Key::Enter,
        }
    }

    /// Starts building an actor.
    pub fn spawn_actor(&mut self, name: &str) -> ActorBuilder<'_> {
        ActorBuilder::new(self, name)
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Re-parents `child` under `parent`, keeping actor and node links in sync.
    pub fn attach(&mut self, child: ActorKey, parent: ActorKey) -> Result<()> {
        let child_node = self.actors.get(child).ok_or(MarionetteError::ActorNotFound(child))?.node;
        let parent_node = self.actors.get(parent).ok_or(MarionetteError::ActorNotFound(parent))?.node;

        if transform_system::is_ancestor_or_self(&self.nodes, child_node, parent_node) {
            log::warn!("Rejected attach of {child:?} under {parent:?}: cycle");
            return Err(MarionetteError::CyclicHierarchy { child, parent });
        }

        transform_system::link(&mut self.nodes, child_node, parent_node);
        if let Some(actor) = self.actors.get_mut(child) {
            actor.parent = Some(parent);
        }
        Ok(())
    }

    /// Makes `child` a root again.
    pub fn detach(&mut self, child: ActorKey) -> Result<()> {
        let actor = self.actors.get_mut(child).ok_or(MarionetteError::ActorNotFound(child))?;
        actor.parent = None;
        let node = actor.node;
        transform_system::unlink(&mut self.nodes, node);
        if let Some(n) = self.nodes.get_mut(node) {
            n.transform.mark_dirty();
        }
        Ok(())
    }

    // ========================================================================
    // Frame update
    // ========================================================================

    /// Clears every actor's per-frame guard. Call once before `update`.
    pub fn prepare(&mut self) {
        for actor in self.actors.values_mut() {
            actor.prepare();
        }
    }

    /// Updates every actor once.
    pub fn update(&mut self, dt: f32, input: &Input) {
        for i in 0..self.update_order.len() {
            let key = self.update_order[i];
            self.update_actor(key, dt, input);
        }
    }

    /// `prepare` followed by `update`.
    pub fn tick(&mut self, dt: f32, input: &Input) {
        self.prepare();
        self.update(dt, input);
    }

    /// Updates one actor, bringing its ancestors up to date first.
    /// A no-op for actors already updated since the last `prepare`.
    pub fn update_actor(&mut self, key: ActorKey, dt: f32, input: &Input) {
        let Some(parent) = self.actors.get(key).map(|a| a.parent) else {
            return;
        };
        if let Some(parent) = parent {
            self.update_actor(parent, dt, input);
        }

        let Some(actor) = self.actors.get_mut(key) else {
            return;
        };
        let parent_world = transform_system::parent_world(&self.nodes, actor.node);
        let Some(node) = self.nodes.get_mut(actor.node) else {
            log::error!("{} '{}' lost its node", actor.id, actor.name);
            return;
        };
        actor.update(dt, input, &mut node.transform, parent_world.as_ref());
    }

    /// Recomputes all world matrices from the current local poses without
    /// advancing any animation.
    pub fn refresh_world_matrices(&mut self) {
        let roots = transform_system::roots(&self.nodes);
        transform_system::update_hierarchy_iterative(&mut self.nodes, &roots);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn actor(&self, key: ActorKey) -> Option<&Actor> {
        self.actors.get(key)
    }

    pub fn actor_mut(&mut self, key: ActorKey) -> Option<&mut Actor> {
        self.actors.get_mut(key)
    }

    #[must_use]
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// The node driven by `actor`.
    pub fn actor_node_mut(&mut self, actor: ActorKey) -> Option<&mut Node> {
        let node = self.actors.get(actor)?.node;
        self.nodes.get_mut(node)
    }

    #[must_use]
    pub fn actor_node(&self, actor: ActorKey) -> Option<&Node> {
        let node = self.actors.get(actor)?.node;
        self.nodes.get(node)
    }

    #[must_use]
    pub fn find_actor(&self, name: &str) -> Option<ActorKey> {
        self.names.get(name).copied()
    }

    /// Cached world matrix of `actor`, as of its last update.
    #[must_use]
    pub fn world_matrix(&self, actor: ActorKey) -> Option<Mat4> {
        self.actor_node(actor).map(|n| n.transform.world_matrix_as_mat4())
    }

    #[must_use]
    pub fn local_pose(&self, actor: ActorKey) -> Option<Pose> {
        self.actor_node(actor).map(|n| n.transform.pose)
    }

    /// Actors in update order.
    pub fn actors(&self) -> impl Iterator<Item = (ActorKey, &Actor)> {
        self.update_order
            .iter()
            .filter_map(|&k| self.actors.get(k).map(|a| (k, a)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Drawable actors with their upload-ready matrices.
    #[must_use]
    pub fn render_items(&self) -> Vec<RenderItem> {
        self.actors()
            .filter_map(|(_, actor)| {
                let binding = actor.render_binding?;
                let node = self.nodes.get(actor.node)?;
                Some(RenderItem {
                    actor: actor.id,
                    binding,
                    uniforms: ActorUniforms::new(
                        node.transform.world_matrix_as_mat4(),
                        node.transform.normal_matrix(),
                    ),
                })
            })
            .collect()
    }
}

/// Builder returned by [`Scene::spawn_actor`].
pub struct ActorBuilder<'a> {
    scene: &'a mut Scene,
    name: String,
    pose: Pose,
    track: Option<KeyframeTrack>,
    mode: AnimationMode,
    trigger_key: Option<Key>,
    parent: Option<ActorKey>,
    render_binding: Option<RenderBinding>,
}

impl<'a> ActorBuilder<'a> {
    fn new(scene: &'a mut Scene, name: &str) -> Self {
        Self {
            scene,
            name: name.to_string(),
            pose: Pose::IDENTITY,
            track: None,
            mode: AnimationMode::default(),
            trigger_key: None,
            parent: None,
            render_binding: None,
        }
    }

    /// Authored local pose; also becomes the actor's original pose.
    #[must_use]
    pub fn pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    #[must_use]
    pub fn track(mut self, track: KeyframeTrack) -> Self {
        self.track = Some(track);
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: AnimationMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn trigger_key(mut self, key: Key) -> Self {
        self.trigger_key = Some(key);
        self
    }

    #[must_use]
    pub fn parent(mut self, parent: ActorKey) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn render_binding(mut self, binding: RenderBinding) -> Self {
        self.render_binding = Some(binding);
        self
    }

    pub fn spawn(self) -> Result<ActorKey> {
        let scene = self.scene;

        let parent_node = match self.parent {
            Some(parent) => Some(
                scene
                    .actors
                    .get(parent)
                    .ok_or(MarionetteError::ActorNotFound(parent))?
                    .node,
            ),
            None => None,
        };

        let node = scene.nodes.insert(Node::with_pose(self.pose));
        if let Some(parent_node) = parent_node {
            transform_system::link(&mut scene.nodes, node, parent_node);
        }

        let id = scene.ids.allocate();
        let mut actor = Actor::new(id, self.name, node, self.pose);
        actor.parent = self.parent;
        actor.mode = self.mode;
        actor.trigger_key = self.trigger_key.unwrap_or(scene.default_trigger_key);
        actor.render_binding = self.render_binding;
        actor.set_track(self.track);

        if actor.track().is_some_and(|t| !t.is_playable()) {
            log::debug!("{id} '{}': track has fewer than 2 keyframes, it will never play", actor.name);
        }

        let name = actor.name.clone();
        let key = scene.actors.insert(actor);
        scene.update_order.push(key);
        if let Some(previous) = scene.names.insert(name.clone(), key) {
            log::warn!("Actor name '{name}' reused; lookups now resolve to the newest ({previous:?} shadowed)");
        }

        Ok(key)
    }
}
