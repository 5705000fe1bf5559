use glam::Affine3A;
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationMode, AnimationPlayer, KeyframeTrack, Pose, PlayerTick};
use crate::input::{Input, Key};
use crate::scene::ids::ActorId;
use crate::scene::transform::Transform;
use crate::scene::{ActorKey, NodeKey};

/// Opaque renderer-side identifiers carried alongside an actor.
///
/// A negative `texture` means "untextured".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderBinding {
    pub mesh: u32,
    pub texture: i32,
}

impl RenderBinding {
    #[must_use]
    pub const fn untextured(mesh: u32) -> Self {
        Self { mesh, texture: -1 }
    }
}

/// Logic-and-animation wrapper around one scene node.
///
/// Actors are created through [`Scene::spawn_actor`](crate::scene::Scene::spawn_actor)
/// and driven by [`Scene::update`](crate::scene::Scene::update); the scene
/// owns both the actor and its node.
#[derive(Debug, Clone)]
pub struct Actor {
    pub(crate) id: ActorId,
    pub name: String,

    pub(crate) node: NodeKey,
    pub(crate) parent: Option<ActorKey>,

    track: Option<KeyframeTrack>,
    player: AnimationPlayer,
    pub mode: AnimationMode,
    pub trigger_key: Key,

    original_pose: Pose,

    pub(crate) updated_this_frame: bool,
    trigger_held: bool,
    trigger_requested: bool,
    pose_reset_pending: bool,

    pub render_binding: Option<RenderBinding>,
}

impl Actor {
    pub(crate) fn new(id: ActorId, name: String, node: NodeKey, original_pose: Pose) -> Self {
        Self {
            id,
            name,
            node,
            parent: None,
            track: None,
            player: AnimationPlayer::new(),
            mode: AnimationMode::default(),
            trigger_key: Key::Enter,
            original_pose,
            updated_this_frame: false,
            trigger_held: false,
            trigger_requested: false,
            pose_reset_pending: false,
            render_binding: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> ActorId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn node(&self) -> NodeKey {
        self.node
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<ActorKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn track(&self) -> Option<&KeyframeTrack> {
        self.track.as_ref()
    }

    /// Replaces the track. Any running playback is stopped and the node
    /// returns to the original pose on the next update.
    pub fn set_track(&mut self, track: Option<KeyframeTrack>) {
        if self.player.is_playing() {
            self.pose_reset_pending = true;
        }
        self.track = track;
        self.player.reset();
    }

    #[inline]
    #[must_use]
    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.player.is_playing()
    }

    /// Pose snapshot taken at construction; restored when an animation ends.
    #[inline]
    #[must_use]
    pub fn original_pose(&self) -> &Pose {
        &self.original_pose
    }

    #[inline]
    #[must_use]
    pub fn updated_this_frame(&self) -> bool {
        self.updated_this_frame
    }

    /// Requests a start on the next update, as if the trigger key went down.
    /// Ignored while already playing.
    pub fn trigger(&mut self) {
        self.trigger_requested = true;
    }

    pub(crate) fn prepare(&mut self) {
        self.updated_this_frame = false;
    }

    /// Steps 2 to 6 of the update protocol. The scene has already brought the
    /// parent up to date and passes its world matrix in.
    pub(crate) fn update(
        &mut self,
        dt: f32,
        input: &Input,
        transform: &mut Transform,
        parent_world: Option<&Affine3A>,
    ) {
        if self.updated_this_frame {
            return;
        }

        if std::mem::take(&mut self.pose_reset_pending) {
            transform.set_pose(self.original_pose);
        }

        if self.should_start(input)
            && let Some(track) = &self.track
            && self.player.try_start(track)
        {
            log::debug!("{} '{}': animation started ({:?})", self.id, self.name, self.mode);
        }

        if let Some(track) = &self.track {
            match self.player.advance(dt, track) {
                PlayerTick::Pose(pose) => transform.set_pose(pose),
                PlayerTick::Completed => {
                    log::debug!("{} '{}': animation completed", self.id, self.name);
                    transform.set_pose(self.original_pose);
                    self.player.reset();
                }
                PlayerTick::Idle => {}
            }
        }

        transform.compose(parent_world);
        self.updated_this_frame = true;
    }

    /// Activation policy. The trigger edge is tracked every frame, even
    /// while playing, so holding the key does not retrigger on completion.
    fn should_start(&mut self, input: &Input) -> bool {
        let held = input.is_key_pressed(self.trigger_key);
        let edge = held && !self.trigger_held;
        self.trigger_held = held;
        let requested = std::mem::take(&mut self.trigger_requested);

        if self.player.is_playing() {
            if requested {
                log::trace!("{} '{}': trigger ignored, already playing", self.id, self.name);
            }
            return false;
        }

        match self.mode {
            AnimationMode::Triggered => edge || requested,
            AnimationMode::Continuous => true,
        }
    }
}
