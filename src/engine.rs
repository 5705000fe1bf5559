//! Frame driver
//!
//! [`Engine`] ties together the pieces a host needs once per rendered frame:
//! clamp the delta, move the viewer, run the scene's prepare/update pass and
//! hand back the render list. It owns no window or GPU state.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut engine = Engine::new(Settings::default());
//! let cube = engine.scene.spawn_actor("cube").track(track).spawn()?;
//!
//! loop {
//!     // host: translate window events into engine.input
//!     let dt = clock.tick();
//!     engine.frame(dt);
//!     for item in engine.render_list() {
//!         // host: upload item.uniforms, draw item.binding.mesh
//!     }
//! }
//! ```

use crate::input::Input;
use crate::scene::{ActorKey, RenderItem, Scene};
use crate::settings::Settings;
use crate::utils::MovementController;

pub struct Engine {
    pub scene: Scene,
    pub input: Input,
    pub settings: Settings,

    viewer: Option<(ActorKey, MovementController)>,
    time: f32,
    frame_count: u64,
}

impl Engine {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let mut scene = Scene::new();
        scene.default_trigger_key = settings.default_trigger_key;
        Self {
            scene,
            input: Input::new(),
            settings,
            viewer: None,
            time: 0.0,
            frame_count: 0,
        }
    }

    /// Drives `actor` with a keyboard movement controller every frame.
    pub fn set_viewer(&mut self, actor: ActorKey) {
        let controller = MovementController::new(self.settings.movement.clone());
        self.viewer = Some((actor, controller));
    }

    #[must_use]
    pub fn viewer(&self) -> Option<ActorKey> {
        self.viewer.as_ref().map(|(key, _)| *key)
    }

    /// Runs one frame with a host-measured delta in seconds.
    pub fn frame(&mut self, dt: f32) {
        let dt = dt.max(0.0).min(self.settings.max_frame_delta);

        let mut viewer_lost = false;
        if let Some((key, controller)) = &mut self.viewer {
            match self.scene.actor_node_mut(*key) {
                Some(node) => controller.update(&mut node.transform, &self.input, dt),
                None => {
                    log::warn!("viewer actor {key:?} is gone, dropping controller");
                    viewer_lost = true;
                }
            }
        }
        if viewer_lost {
            self.viewer = None;
        }

        self.scene.tick(dt, &self.input);
        self.input.start_frame();

        self.time += dt;
        self.frame_count += 1;
    }

    #[must_use]
    pub fn render_list(&self) -> Vec<RenderItem> {
        self.scene.render_items()
    }

    /// Sum of clamped deltas since creation.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
